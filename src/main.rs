use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use vocabcard::app::App;
use vocabcard::config::Config;
use vocabcard::dispatch::Dispatcher;
use vocabcard::event::{AppEvent, EventHandler};
use vocabcard::logging;
use vocabcard::provider::ContentProvider;
use vocabcard::provider::demo::DemoProvider;
use vocabcard::state::view::{Msg, Screen, SpeakTarget};
use vocabcard::ui;
use vocabcard::ui::components::flashcard::Flashcard;
use vocabcard::ui::components::home::{HomeFocus, HomeScreen};
use vocabcard::ui::components::topic_list::TopicList;
use vocabcard::ui::components::vocab_list::VocabList;
use vocabcard::ui::components::word_detail::WordDetail;
use vocabcard::ui::layout::{AppLayout, pack_hint_lines};
use vocabcard::ui::line_input::InputResult;

#[derive(Parser)]
#[command(
    name = "vocabcard",
    version,
    about = "Terminal vocabulary flashcards generated for your band score"
)]
struct Cli {
    #[arg(short, long, help = "Band score to start with (skips the home screen)")]
    band: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Model used for topics and vocabulary")]
    model: Option<String>,

    #[arg(long, help = "Serve bundled sample content instead of calling the API")]
    demo: bool,

    #[arg(long, help = "Write the effective config file and exit")]
    write_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: file logging disabled: {err}");
            None
        }
    };

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, path = %Config::config_path().display(), "config unreadable, using defaults");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    if cli.write_config {
        config.save()?;
        println!("wrote {}", Config::config_path().display());
        return Ok(());
    }

    let provider = build_provider(&config, cli.demo)?;

    let theme = ui::theme::Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using default");
        ui::theme::Theme::default()
    });
    let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));

    let events = EventHandler::new(Duration::from_millis(100));
    let dispatcher = Dispatcher::new(provider, &config, events.sender());
    let mut app = App::new(config, theme, dispatcher);
    if let Some(band) = cli.band {
        app.quick_select(&band);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "event loop exited with error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn build_provider(config: &Config, demo: bool) -> Result<Arc<dyn ContentProvider>> {
    if demo {
        tracing::info!("serving bundled demo content");
        return Ok(Arc::new(DemoProvider::new()));
    }

    #[cfg(feature = "network")]
    {
        if config.resolved_api_key().is_none() {
            anyhow::bail!(
                "no API key found: set GEMINI_API_KEY, add api_key to {}, or run with --demo",
                Config::config_path().display()
            );
        }
        let provider = vocabcard::provider::gemini::GeminiProvider::from_config(config)?;
        tracing::info!(model = %config.model, "using generative provider");
        Ok(Arc::new(provider))
    }

    #[cfg(not(feature = "network"))]
    {
        let _ = config;
        tracing::info!("built without network support, serving demo content");
        Ok(Arc::new(DemoProvider::new()))
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::Provider(msg) => app.dispatch(msg),
        }

        if app.should_quit {
            tracing::info!("quitting");
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Overlays take the keyboard before the screen underneath.
    if app.view.practice().is_some() {
        handle_practice_key(app, key);
        return;
    }
    if let Some(idx) = app.view.overlays.word_detail {
        handle_word_detail_key(app, key, idx);
        return;
    }

    match app.view.screen() {
        Screen::Home => handle_home_key(app, key),
        Screen::TopicList => handle_topic_key(app, key),
        Screen::VocabList => handle_vocab_key(app, key),
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    if app.home_focus == HomeFocus::Presets {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => app.preset_prev(),
            KeyCode::Right | KeyCode::Char('l') => app.preset_next(),
            KeyCode::Enter => app.submit_band(),
            KeyCode::Tab | KeyCode::BackTab => app.toggle_home_focus(),
            KeyCode::Esc => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match app.band_input.handle(key) {
        InputResult::Submit => app.submit_band(),
        InputResult::Cancel => app.should_quit = true,
        InputResult::FocusNext => app.toggle_home_focus(),
        InputResult::Continue => {}
    }
}

fn handle_topic_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Enter => app.select_topic(),
        KeyCode::Char('r') => {
            app.topic_selected = 0;
            app.dispatch(Msg::RefreshTopics);
        }
        KeyCode::Char('b') | KeyCode::Esc => app.change_band(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_vocab_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Enter => app.dispatch(Msg::OpenWordDetail(app.vocab_selected)),
        KeyCode::Char('s') => app.dispatch(Msg::Speak(SpeakTarget::Entry(app.vocab_selected))),
        KeyCode::Char('p') => app.dispatch(Msg::StartPractice),
        KeyCode::Esc | KeyCode::Backspace => app.dispatch(Msg::Back),
        KeyCode::Char('b') => app.change_band(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_word_detail_key(app: &mut App, key: KeyEvent, idx: usize) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.dispatch(Msg::CloseWordDetail),
        KeyCode::Char('s') => app.dispatch(Msg::Speak(SpeakTarget::Entry(idx))),
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => app.dispatch(Msg::FlipCard),
        KeyCode::Left | KeyCode::Char('h') => app.dispatch(Msg::PrevCard),
        KeyCode::Right | KeyCode::Char('l') => app.dispatch(Msg::NextCard),
        KeyCode::Char('s') => app.dispatch(Msg::Speak(SpeakTarget::CurrentCard)),
        KeyCode::Esc => app.dispatch(Msg::ExitPractice),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let (Some(session), Some(card)) = (app.view.practice(), app.view.current_card()) {
        frame.render_widget(Flashcard::new(card, session, app.theme), area);
        return;
    }

    let layout = AppLayout::new(area);
    render_header(frame, app, layout.header);

    match app.view.screen() {
        Screen::Home => frame.render_widget(
            HomeScreen::new(
                &app.band_input,
                &app.config.preset_bands,
                app.home_focus,
                app.preset_selected,
                app.theme,
            ),
            layout.main,
        ),
        Screen::TopicList => frame.render_widget(
            TopicList::new(
                &app.view.topics,
                app.topic_selected,
                app.view.loading_topics(),
                app.tick,
                app.theme,
            ),
            layout.main,
        ),
        Screen::VocabList => frame.render_widget(
            VocabList::new(
                &app.view.vocab_list,
                app.vocab_selected,
                app.view.loading_vocab(),
                app.tick,
                app.theme,
            ),
            layout.main,
        ),
    }

    if let Some(entry) = app.view.word_detail() {
        let popup = ui::layout::centered_rect(60, 70, layout.main);
        frame.render_widget(WordDetail::new(entry, app.theme), popup);
    }

    let hints: &[&str] = match app.view.screen() {
        _ if app.view.overlays.word_detail.is_some() => &["[s] Listen", "[Esc] Close"],
        Screen::Home => &["[Enter] Start", "[Tab] Presets", "[Esc] Quit"],
        Screen::TopicList => &[
            "[↑↓] Move",
            "[Enter] Open",
            "[r] Refresh",
            "[b] Change band",
            "[q] Quit",
        ],
        Screen::VocabList => &[
            "[↑↓] Move",
            "[Enter] Details",
            "[s] Listen",
            "[p] Practice",
            "[Esc] Topics",
            "[b] Change band",
            "[q] Quit",
        ],
    };
    let footer_lines: Vec<Line> = pack_hint_lines(hints, layout.footer.width as usize)
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                line,
                Style::default().fg(app.theme.colors.muted()),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    let header_info = match (app.view.screen(), &app.view.selected_topic) {
        (Screen::VocabList, Some(topic)) => format!(
            " {} · {} · BAND {}",
            topic.title, topic.localized_title, app.view.band
        ),
        (Screen::TopicList, _) => format!(" TOPICS · BAND {}", app.view.band),
        _ => " choose a band to begin".to_string(),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " vocabcard ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}
