use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::state::model::Topic;
use crate::ui::components::loading::Loading;
use crate::ui::layout::scroll_offset;
use crate::ui::theme::Theme;

const ROWS_PER_TOPIC: u16 = 4;

pub struct TopicList<'a> {
    topics: &'a [Topic],
    selected: usize,
    loading: bool,
    tick: usize,
    theme: &'a Theme,
}

impl<'a> TopicList<'a> {
    pub fn new(topics: &'a [Topic], selected: usize, loading: bool, tick: usize, theme: &'a Theme) -> Self {
        Self {
            topics,
            selected,
            loading,
            tick,
            theme,
        }
    }
}

impl Widget for TopicList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} topics ", self.topics.len()))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.loading {
            Loading::new("Finding the right topics for your band", self.tick, self.theme)
                .render(inner, buf);
            return;
        }

        if self.topics.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No topics. Press [r] to ask again or [b] to change band.",
                Style::default().fg(colors.muted()),
            )))
            .render(inner, buf);
            return;
        }

        let visible = (inner.height / ROWS_PER_TOPIC).max(1) as usize;
        let offset = scroll_offset(self.selected, self.topics.len(), visible);
        let shown = &self.topics[offset..(offset + visible).min(self.topics.len())];

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(shown.iter().map(|_| Constraint::Length(ROWS_PER_TOPIC)).collect::<Vec<_>>())
            .split(inner);

        for (row, topic) in shown.iter().enumerate() {
            let is_selected = offset + row == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let title_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(Modifier::BOLD);
            let bg = if is_selected { colors.selection_bg() } else { colors.bg() };

            let lines = vec![
                Line::from(vec![
                    Span::styled(format!(" {indicator} "), title_style),
                    Span::styled(topic.title.as_str(), title_style),
                    Span::styled(
                        format!("  {}", topic.exam_section.as_str().to_uppercase()),
                        Style::default().fg(colors.accent()),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("   {}", topic.localized_title),
                    Style::default().fg(colors.muted()).add_modifier(Modifier::ITALIC),
                )),
                Line::from(Span::styled(
                    format!("   {}", topic.description),
                    Style::default().fg(colors.muted()),
                )),
            ];
            Paragraph::new(lines)
                .style(Style::default().bg(bg))
                .render(rows[row], buf);
        }
    }
}
