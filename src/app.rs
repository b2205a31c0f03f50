use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::state::view::{Msg, Screen, ViewState};
use crate::ui::components::home::HomeFocus;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// UI shell around the view state: cursors, focus and the band input live
/// here, everything that defines the screen lives in `ViewState`.
pub struct App {
    pub view: ViewState,
    pub band_input: LineInput,
    pub home_focus: HomeFocus,
    pub preset_selected: usize,
    pub topic_selected: usize,
    pub vocab_selected: usize,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    pub tick: usize,
    dispatcher: Dispatcher,
}

impl App {
    pub fn new(config: Config, theme: &'static Theme, dispatcher: Dispatcher) -> Self {
        Self {
            view: ViewState::new(),
            band_input: LineInput::new(""),
            home_focus: HomeFocus::Input,
            preset_selected: 0,
            topic_selected: 0,
            vocab_selected: 0,
            theme,
            config,
            should_quit: false,
            tick: 0,
            dispatcher,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        for effect in self.view.update(msg) {
            // Workers report back through the event channel; the handle is not needed.
            drop(self.dispatcher.run(effect));
        }
        self.clamp_cursors();
    }

    pub fn on_tick(&mut self) {
        if self.view.loading_topics() || self.view.loading_vocab() {
            self.tick = self.tick.wrapping_add(1);
        }
    }

    pub fn submit_band(&mut self) {
        let value = match self.home_focus {
            HomeFocus::Input => self.band_input.value().to_string(),
            HomeFocus::Presets => match self.config.preset_bands.get(self.preset_selected) {
                Some(preset) => {
                    self.band_input.set(preset);
                    preset.clone()
                }
                None => return,
            },
        };
        self.topic_selected = 0;
        self.dispatch(Msg::SubmitBand(value));
    }

    pub fn quick_select(&mut self, band: &str) {
        self.band_input.set(band);
        self.topic_selected = 0;
        self.dispatch(Msg::SubmitBand(band.to_string()));
    }

    pub fn change_band(&mut self) {
        self.dispatch(Msg::ChangeBand);
        self.band_input.clear();
        self.home_focus = HomeFocus::Input;
        self.topic_selected = 0;
        self.vocab_selected = 0;
    }

    pub fn toggle_home_focus(&mut self) {
        self.home_focus = match self.home_focus {
            HomeFocus::Input => HomeFocus::Presets,
            HomeFocus::Presets => HomeFocus::Input,
        };
    }

    pub fn preset_prev(&mut self) {
        let len = self.config.preset_bands.len();
        if len > 0 {
            self.preset_selected = (self.preset_selected + len - 1) % len;
        }
    }

    pub fn preset_next(&mut self) {
        let len = self.config.preset_bands.len();
        if len > 0 {
            self.preset_selected = (self.preset_selected + 1) % len;
        }
    }

    pub fn select_topic(&mut self) {
        self.vocab_selected = 0;
        self.dispatch(Msg::SelectTopic(self.topic_selected));
    }

    pub fn move_selection(&mut self, delta: isize) {
        let (cursor, len) = match self.view.screen() {
            Screen::Home => return,
            Screen::TopicList => (&mut self.topic_selected, self.view.topics.len()),
            Screen::VocabList => (&mut self.vocab_selected, self.view.vocab_list.len()),
        };
        if len == 0 {
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn clamp_cursors(&mut self) {
        self.topic_selected = self
            .topic_selected
            .min(self.view.topics.len().saturating_sub(1));
        self.vocab_selected = self
            .vocab_selected
            .min(self.view.vocab_list.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::event::AppEvent;
    use crate::provider::demo::DemoProvider;

    fn app() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let config = Config::default();
        let dispatcher = Dispatcher::new(Arc::new(DemoProvider::new()), &config, tx);
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        (App::new(config, theme, dispatcher), rx)
    }

    fn settle(app: &mut App, rx: &mpsc::Receiver<AppEvent>) {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(AppEvent::Provider(msg)) => app.dispatch(msg),
            _ => panic!("expected a provider completion"),
        }
    }

    #[test]
    fn preset_submit_fills_input_and_loads_topics() {
        let (mut app, rx) = app();
        app.toggle_home_focus();
        app.preset_next();
        app.submit_band();

        assert_eq!(app.band_input.value(), "5.5");
        assert_eq!(app.view.band, "5.5");
        assert!(app.view.loading_topics());

        settle(&mut app, &rx);
        assert!(!app.view.loading_topics());
        assert_eq!(app.view.topics.len(), 12);
    }

    #[test]
    fn blank_input_stays_home() {
        let (mut app, rx) = app();
        app.band_input.set("   ");
        app.submit_band();
        assert_eq!(app.view.screen(), Screen::Home);
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn selection_is_clamped_to_list() {
        let (mut app, rx) = app();
        app.quick_select("6.5");
        settle(&mut app, &rx);

        app.move_selection(-3);
        assert_eq!(app.topic_selected, 0);
        app.move_selection(100);
        assert_eq!(app.topic_selected, 11);

        app.select_topic();
        assert_eq!(app.view.screen(), Screen::VocabList);
        settle(&mut app, &rx);
        assert_eq!(app.view.vocab_list.len(), 20);
    }

    #[test]
    fn change_band_resets_home_controls() {
        let (mut app, rx) = app();
        app.band_input.set("7.0");
        app.submit_band();
        settle(&mut app, &rx);

        app.toggle_home_focus();
        app.change_band();
        assert_eq!(app.view.screen(), Screen::Home);
        assert_eq!(app.band_input.value(), "");
        assert_eq!(app.home_focus, HomeFocus::Input);
        assert_eq!(app.topic_selected, 0);
    }

    #[test]
    fn preset_cursor_wraps() {
        let (mut app, _rx) = app();
        app.preset_prev();
        assert_eq!(app.preset_selected, app.config.preset_bands.len() - 1);
        app.preset_next();
        assert_eq!(app.preset_selected, 0);
    }
}
