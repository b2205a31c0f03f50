use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::state::model::VocabEntry;
use crate::ui::components::loading::Loading;
use crate::ui::layout::scroll_offset;
use crate::ui::theme::Theme;

pub struct VocabList<'a> {
    entries: &'a [VocabEntry],
    selected: usize,
    loading: bool,
    tick: usize,
    theme: &'a Theme,
}

impl<'a> VocabList<'a> {
    pub fn new(
        entries: &'a [VocabEntry],
        selected: usize,
        loading: bool,
        tick: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            entries,
            selected,
            loading,
            tick,
            theme,
        }
    }
}

impl Widget for VocabList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} words ", self.entries.len()))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.loading {
            Loading::new("Picking the most valuable words", self.tick, self.theme)
                .render(inner, buf);
            return;
        }

        if self.entries.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  Nothing came back for this topic. [Esc] to pick another.",
                Style::default().fg(colors.muted()),
            )))
            .render(inner, buf);
            return;
        }

        // Two lines per entry: phrase, then localized meaning.
        let visible = (inner.height / 2).max(1) as usize;
        let offset = scroll_offset(self.selected, self.entries.len(), visible);

        let mut lines: Vec<Line> = Vec::new();
        for (idx, entry) in self.entries.iter().enumerate().skip(offset).take(visible) {
            let is_selected = idx == self.selected;
            let number_style = if is_selected {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.muted())
            };
            let phrase_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(Modifier::BOLD);

            lines.push(Line::from(vec![
                Span::styled(format!(" {:02} ", idx + 1), number_style),
                Span::raw(" "),
                Span::styled(entry.phrase.as_str(), phrase_style),
                Span::styled(
                    format!("  {}", entry.pronunciation),
                    Style::default().fg(colors.muted()),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("      {}", entry.localized_meaning),
                Style::default().fg(colors.muted()),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::buffer_text;

    fn entries(n: usize) -> Vec<VocabEntry> {
        (0..n)
            .map(|i| VocabEntry {
                phrase: format!("phrase-{i}"),
                keyword: String::new(),
                pronunciation: "/x/".to_string(),
                meaning: String::new(),
                localized_meaning: format!("nghĩa {i}"),
                example_sentence: String::new(),
                synonyms: Vec::new(),
            })
            .collect()
    }

    fn render(list: &[VocabEntry], selected: usize, loading: bool) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        VocabList::new(list, selected, loading, 3, &theme).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn numbers_entries_from_one() {
        let text = render(&entries(3), 0, false);
        assert!(text.contains("01"));
        assert!(text.contains("phrase-0"));
        assert!(text.contains("nghĩa 2"));
    }

    #[test]
    fn scrolls_to_selection() {
        let text = render(&entries(20), 19, false);
        assert!(text.contains("phrase-19"));
        assert!(!text.contains("phrase-0 "));
    }

    #[test]
    fn loading_panel_replaces_list() {
        let text = render(&entries(2), 0, true);
        assert!(text.contains("PICKING THE MOST VALUABLE WORDS"));
        assert!(!text.contains("phrase-0"));
    }

    #[test]
    fn empty_result_has_hint() {
        assert!(render(&[], 0, false).contains("Nothing came back"));
    }
}
