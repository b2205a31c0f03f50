use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeFocus {
    Input,
    Presets,
}

/// Band entry: free-text field plus quick-select chips.
pub struct HomeScreen<'a> {
    input: &'a LineInput,
    presets: &'a [String],
    focus: HomeFocus,
    selected_preset: usize,
    theme: &'a Theme,
}

impl<'a> HomeScreen<'a> {
    pub fn new(
        input: &'a LineInput,
        presets: &'a [String],
        focus: HomeFocus,
        selected_preset: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            input,
            presets,
            focus,
            selected_preset,
            theme,
        }
    }
}

impl Widget for HomeScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "VOCABULARY BOOST",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Enter your band score and get a study list generated for it.",
                Style::default().fg(colors.muted()),
            )),
        ])
        .alignment(Alignment::Center);
        title.render(layout[1], buf);

        let input_area = centered_columns(layout[2], 44);
        let input_focused = self.focus == HomeFocus::Input;
        let block = Block::bordered()
            .title(" Band score ")
            .border_style(Style::default().fg(if input_focused {
                colors.border_focused()
            } else {
                colors.border()
            }))
            .style(Style::default().bg(colors.card_bg()));
        let inner = block.inner(input_area);
        block.render(input_area, buf);

        let (before, cursor_ch, after) = self.input.render_parts();
        let line = if self.input.value().is_empty() && !input_focused {
            Line::from(Span::styled(
                "e.g. 3.0, 7.5",
                Style::default().fg(colors.muted()),
            ))
        } else {
            let cursor_style = if input_focused {
                Style::default().fg(colors.bg()).bg(colors.accent())
            } else {
                Style::default().fg(colors.fg())
            };
            Line::from(vec![
                Span::styled(format!(" {before}"), Style::default().fg(colors.fg())),
                Span::styled(cursor_ch.unwrap_or(' ').to_string(), cursor_style),
                Span::styled(after, Style::default().fg(colors.fg())),
            ])
        };
        Paragraph::new(line).render(inner, buf);

        let mut chips: Vec<Span> = Vec::new();
        for (i, band) in self.presets.iter().enumerate() {
            let selected = self.focus == HomeFocus::Presets && i == self.selected_preset;
            let style = if selected {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.muted())
            };
            if i > 0 {
                chips.push(Span::raw("  "));
            }
            chips.push(Span::styled(format!(" Band {band} "), style));
        }
        Paragraph::new(Line::from(chips))
            .alignment(Alignment::Center)
            .render(layout[4], buf);
    }
}

fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}
