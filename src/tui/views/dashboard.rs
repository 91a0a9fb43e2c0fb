//! Dashboard — bar chart of profile counts grouped by a chosen attribute.
//!
//! Aggregates run over the full, unfiltered store; the table's filters do
//! not apply here. The chart widget is rebuilt from the current grouping on
//! every frame, so switching the x-axis can never show stale bars.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::theme;
use super::super::widgets::bar_chart::BarChart;
use crate::core::aggregate::{self, GroupBy};
use crate::core::model::ProfileStore;

pub struct DashboardState {
    group_by: GroupBy,
    scroll: usize,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            group_by: GroupBy::default(),
            scroll: 0,
        }
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    pub fn handle_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                self.group_by = self.group_by.next();
                self.scroll = 0;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => {
                self.group_by = self.group_by.prev();
                self.scroll = 0;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.scroll = self.scroll.saturating_add(1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, store: &ProfileStore) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        self.render_selector(frame, chunks[0]);
        self.render_chart(frame, chunks[1], store);
    }

    fn render_selector(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("X-Axis");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut spans = vec![Span::raw(" ")];
        for group in GroupBy::ALL {
            let style = if group == self.group_by {
                theme::highlight()
            } else {
                theme::muted()
            };
            spans.push(Span::styled(format!(" {} ", group.label()), style));
            spans.push(Span::styled("│", theme::dim()));
        }
        spans.push(Span::styled("  [h/l] switch  [j/k] scroll", theme::key_hint()));

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, store: &ProfileStore) {
        let title = format!("{} Counts", self.group_by.label());
        let block = theme::block_focused(&title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let counts = aggregate::aggregate(store.profiles(), self.group_by);
        if counts.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    " No data to chart",
                    theme::muted(),
                ))),
                inner,
            );
            return;
        }

        let total: u64 = counts.iter().map(|(_, c)| c).sum();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!(" {} groups", counts.len()),
                    theme::muted(),
                ),
                Span::styled(
                    format!("  {total} profiles"),
                    Style::default().fg(theme::PRIMARY_LIGHT),
                ),
            ])),
            rows[0],
        );

        frame.render_widget(
            BarChart::new(&counts).color(theme::INFO).scroll(self.scroll),
            rows[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_default_grouping_is_search_term() {
        let state = DashboardState::new();
        assert_eq!(state.group_by(), GroupBy::SearchTerm);
    }

    #[test]
    fn test_switch_grouping_resets_scroll() {
        let mut state = DashboardState::new();
        state.scroll = 7;
        assert!(state.handle_input(&key(KeyCode::Right)));
        assert_eq!(state.group_by(), GroupBy::Date);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_grouping_cycles_backwards() {
        let mut state = DashboardState::new();
        state.handle_input(&key(KeyCode::Left));
        assert_eq!(state.group_by(), GroupBy::Source);
    }

    #[test]
    fn test_scroll_keys() {
        let mut state = DashboardState::new();
        state.handle_input(&key(KeyCode::Char('j')));
        state.handle_input(&key(KeyCode::Char('j')));
        state.handle_input(&key(KeyCode::Char('k')));
        assert_eq!(state.scroll, 1);
    }

    #[test]
    fn test_unhandled_key_not_consumed() {
        let mut state = DashboardState::new();
        assert!(!state.handle_input(&key(KeyCode::Char('x'))));
    }
}
