//! Timeline — daily discovery counts for one exact search term.
//!
//! The term must match `searchTerm` exactly (not as a substring) and the
//! date labels appear in first-encountered order, unlike the dashboard's
//! chronologically sorted date grouping.

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
use crate::core::aggregate;
use crate::core::model::ProfileStore;

pub struct TimelineState {
    term: String,
    editing: bool,
    scroll: usize,
}

impl TimelineState {
    pub fn new() -> Self {
        Self {
            term: String::new(),
            editing: false,
            scroll: 0,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_editing(&self) -> bool {
        self.editing
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

        if self.editing {
            match code {
                KeyCode::Esc | KeyCode::Enter => self.editing = false,
                KeyCode::Backspace => {
                    self.term.pop();
                    self.scroll = 0;
                }
                KeyCode::Char(c) => {
                    self.term.push(*c);
                    self.scroll = 0;
                }
                _ => {}
            }
            return true;
        }

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('i') | KeyCode::Char('/')) => {
                self.editing = true;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('c')) => {
                self.term.clear();
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

        self.render_input(frame, chunks[0]);
        self.render_series(frame, chunks[1], store);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = if self.editing {
            theme::block_focused("Search Term")
        } else {
            theme::block_default("Search Term")
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let value = if self.editing {
            Span::styled(
                format!(" {}▏", self.term),
                Style::default().fg(theme::TEXT),
            )
        } else if self.term.is_empty() {
            Span::styled(" (press i to type a term)", theme::dim())
        } else {
            Span::styled(format!(" {}", self.term), Style::default().fg(theme::TEXT))
        };

        let line = Line::from(vec![
            value,
            Span::styled("   [i] edit  [c] clear  [j/k] scroll", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_series(&self, frame: &mut Frame, area: Rect, store: &ProfileStore) {
        let block = theme::block_focused("Pages Found per Day");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.term.is_empty() {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::raw(""),
                    Line::from(Span::styled(
                        "  Enter a search term to see its daily discovery counts.",
                        theme::muted(),
                    )),
                    Line::from(Span::styled(
                        "  The match is exact, not a substring.",
                        theme::dim(),
                    )),
                ]),
                inner,
            );
            return;
        }

        let series = aggregate::term_series(store.profiles(), &self.term);
        if series.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  No profiles with search term \"{}\"", self.term),
                    theme::muted(),
                ))),
                inner,
            );
            return;
        }

        frame.render_widget(
            BarChart::new(&series)
                .color(theme::SUCCESS)
                .scroll(self.scroll),
            inner,
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
    fn test_new_state() {
        let state = TimelineState::new();
        assert!(state.term().is_empty());
        assert!(!state.is_editing());
    }

    #[test]
    fn test_edit_mode_captures_text() {
        let mut state = TimelineState::new();
        state.handle_input(&key(KeyCode::Char('i')));
        assert!(state.is_editing());
        for c in "alice".chars() {
            state.handle_input(&key(KeyCode::Char(c)));
        }
        assert_eq!(state.term(), "alice");
        state.handle_input(&key(KeyCode::Enter));
        assert!(!state.is_editing());
        assert_eq!(state.term(), "alice");
    }

    #[test]
    fn test_backspace_edits_term() {
        let mut state = TimelineState::new();
        state.handle_input(&key(KeyCode::Char('/')));
        state.handle_input(&key(KeyCode::Char('a')));
        state.handle_input(&key(KeyCode::Char('b')));
        state.handle_input(&key(KeyCode::Backspace));
        assert_eq!(state.term(), "a");
    }

    #[test]
    fn test_clear_term() {
        let mut state = TimelineState::new();
        state.handle_input(&key(KeyCode::Char('i')));
        state.handle_input(&key(KeyCode::Char('x')));
        state.handle_input(&key(KeyCode::Esc));
        state.handle_input(&key(KeyCode::Char('c')));
        assert!(state.term().is_empty());
    }

    #[test]
    fn test_typing_resets_scroll() {
        let mut state = TimelineState::new();
        state.scroll = 4;
        state.handle_input(&key(KeyCode::Char('i')));
        state.handle_input(&key(KeyCode::Char('a')));
        assert_eq!(state.scroll, 0);
    }
}
