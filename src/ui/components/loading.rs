use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner shown while the provider is generating content.
pub struct Loading<'a> {
    message: &'a str,
    tick: usize,
    theme: &'a Theme,
}

impl<'a> Loading<'a> {
    pub fn new(message: &'a str, tick: usize, theme: &'a Theme) -> Self {
        Self {
            message,
            tick,
            theme,
        }
    }
}

pub fn spinner_frame(tick: usize) -> &'static str {
    FRAMES[tick % FRAMES.len()]
}

impl Widget for Loading<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let top_pad = area.height.saturating_sub(3) / 2;

        let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
        lines.push(Line::from(Span::styled(
            spinner_frame(self.tick),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.message.to_uppercase(),
            Style::default().fg(colors.muted()),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::buffer_text;

    #[test]
    fn spinner_cycles() {
        assert_eq!(spinner_frame(0), spinner_frame(FRAMES.len()));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }

    #[test]
    fn renders_message() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        Loading::new("generating topics", 0, &theme).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("GENERATING TOPICS"));
    }
}
