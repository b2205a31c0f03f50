use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::state::model::VocabEntry;
use crate::state::overlay::PracticeSession;
use crate::ui::theme::Theme;

/// Full-screen practice card: phrase on the front, meanings on the back.
pub struct Flashcard<'a> {
    entry: &'a VocabEntry,
    session: &'a PracticeSession,
    theme: &'a Theme,
}

impl<'a> Flashcard<'a> {
    pub fn new(entry: &'a VocabEntry, session: &'a PracticeSession, theme: &'a Theme) -> Self {
        Self {
            entry,
            session,
            theme,
        }
    }
}

impl Widget for Flashcard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        Block::default()
            .style(Style::default().bg(colors.bg()))
            .render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(2),
            ])
            .split(area);

        let counter = Paragraph::new(vec![
            Line::from(Span::styled(
                "PRACTICE MODE",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} / {}", self.session.card_index + 1, self.session.len()),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        counter.render(layout[0], buf);

        let card_width = layout[1].width.min(60);
        let card_area = Rect::new(
            layout[1].x + (layout[1].width - card_width) / 2,
            layout[1].y,
            card_width,
            layout[1].height,
        );
        let (face, border) = if self.session.is_flipped {
            ("MEANING", colors.accent_dim())
        } else {
            ("TERM", colors.border())
        };
        let block = Block::bordered()
            .title(Line::from(format!(" {face} ")).centered())
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.card_bg()));
        let inner = block.inner(card_area);
        block.render(card_area, buf);

        let body: Vec<Line> = if self.session.is_flipped {
            vec![
                Line::from(Span::styled(
                    self.entry.localized_meaning.as_str(),
                    Style::default()
                        .fg(colors.fg())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    self.entry.meaning.as_str(),
                    Style::default()
                        .fg(colors.muted())
                        .add_modifier(Modifier::ITALIC),
                )),
            ]
        } else {
            vec![
                Line::from(Span::styled(
                    self.entry.phrase.as_str(),
                    Style::default()
                        .fg(colors.fg())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    self.entry.pronunciation.as_str(),
                    Style::default().fg(colors.muted()),
                )),
            ]
        };
        let top_pad = inner.height.saturating_sub(body.len() as u16) / 2;
        let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
        lines.extend(body);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);

        let next_label = if self.session.is_last() { "[→] Finish" } else { "[→] Next" };
        let prev_style = if self.session.card_index == 0 {
            Style::default().fg(colors.border())
        } else {
            Style::default().fg(colors.muted())
        };
        Paragraph::new(Line::from(vec![
            Span::styled("[←] Prev", prev_style),
            Span::styled("   [Space] Flip   [s] Listen   ", Style::default().fg(colors.muted())),
            Span::styled(next_label, Style::default().fg(colors.muted())),
            Span::styled("   [Esc] Exit", Style::default().fg(colors.muted())),
        ]))
        .alignment(Alignment::Center)
        .render(layout[2], buf);
    }
}
