use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::state::model::VocabEntry;
use crate::ui::theme::Theme;

/// Popup with everything known about one entry.
pub struct WordDetail<'a> {
    entry: &'a VocabEntry,
    theme: &'a Theme,
}

impl<'a> WordDetail<'a> {
    pub fn new(entry: &'a VocabEntry, theme: &'a Theme) -> Self {
        Self { entry, theme }
    }
}

impl Widget for WordDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let entry = self.entry;

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" Word ")
            .title_bottom(Line::from(" [s] Listen  [Esc] Close ").right_aligned())
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.card_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let label = |text: &'static str| {
            Line::from(Span::styled(
                text,
                Style::default()
                    .fg(colors.muted())
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let mut lines = vec![
            Line::from(Span::styled(
                entry.phrase.as_str(),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                entry.pronunciation.as_str(),
                Style::default()
                    .fg(colors.muted())
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(Span::styled(
                entry.localized_meaning.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            label("DEFINITION"),
            Line::from(Span::styled(
                entry.meaning.as_str(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            label("EXAMPLE"),
            Line::from(Span::styled(
                format!("\"{}\"", entry.example_sentence),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::ITALIC),
            )),
        ];

        if !entry.synonyms.is_empty() {
            lines.push(Line::from(""));
            lines.push(label("SYNONYMS"));
            let mut chips: Vec<Span> = Vec::new();
            for (i, synonym) in entry.synonyms.iter().enumerate() {
                if i > 0 {
                    chips.push(Span::raw(" "));
                }
                chips.push(Span::styled(
                    format!("[{synonym}]"),
                    Style::default().fg(colors.accent()),
                ));
            }
            lines.push(Line::from(chips));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::buffer_text;

    #[test]
    fn shows_all_fields() {
        let entry = VocabEntry {
            phrase: "carbon footprint".to_string(),
            keyword: "footprint".to_string(),
            pronunciation: "/ˈkɑːbən/".to_string(),
            meaning: "emissions caused by a person".to_string(),
            localized_meaning: "lượng khí thải".to_string(),
            example_sentence: "Cut your carbon footprint.".to_string(),
            synonyms: vec!["emissions".to_string(), "impact".to_string()],
        };
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        WordDetail::new(&entry, &theme).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("carbon footprint"));
        assert!(text.contains("emissions caused by a person"));
        assert!(text.contains("Cut your carbon footprint."));
        assert!(text.contains("[emissions] [impact]"));
    }
}
