//! Profile detail modal.
//!
//! Shows the full record for one row of the filtered list, with
//! wrap-around previous/next navigation.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::super::theme;
use crate::core::model::Profile;

pub struct DetailState {
    /// Index into the filtered row list.
    index: usize,
}

impl DetailState {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Navigate within a list of `len` rows; both directions wrap around.
    pub fn handle_key(&mut self, code: KeyCode, len: usize) {
        if len == 0 {
            return;
        }
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.index = if self.index > 0 { self.index - 1 } else { len - 1 };
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.index = if self.index + 1 < len { self.index + 1 } else { 0 };
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, rows: &[&Profile]) {
        let modal = super::super::app::centered_rect(70, 70, area);
        let block = theme::block_focused("Profile Detail");
        let inner = block.inner(modal);

        frame.render_widget(Clear, modal);
        frame.render_widget(block, modal);

        let Some(profile) = rows.get(self.index) else {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    " Profile no longer in the filtered set",
                    theme::muted(),
                ))),
                inner,
            );
            return;
        };

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("  {}", profile.name.as_deref().unwrap_or("(unnamed)")),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (label, value) in [
            ("Bio", profile.bio.as_deref()),
            ("URL", profile.url.as_deref()),
            ("Profile ID", Some(profile.id.as_str()).filter(|s| !s.is_empty())),
            ("Search Term", profile.search_term.as_deref()),
            ("Type", profile.kind.as_deref()),
            ("Source", profile.source.as_deref()),
            ("Found", profile.created_at.as_deref()),
            ("Last Screenshot", profile.last_screenshot.as_deref()),
            ("Screenshot URL", profile.screenshot_url.as_deref()),
        ] {
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<16} "), theme::muted()),
                Span::styled(
                    value.unwrap_or("—").to_string(),
                    Style::default().fg(theme::TEXT),
                ),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {} of {}", self.index + 1, rows.len()),
                theme::muted(),
            ),
            Span::styled("   [←/→] prev/next  [Esc] close", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_to_first() {
        let mut detail = DetailState::new(2);
        detail.handle_key(KeyCode::Right, 3);
        assert_eq!(detail.index(), 0);
    }

    #[test]
    fn test_prev_wraps_to_last() {
        let mut detail = DetailState::new(0);
        detail.handle_key(KeyCode::Left, 3);
        assert_eq!(detail.index(), 2);
    }

    #[test]
    fn test_navigation_within_bounds() {
        let mut detail = DetailState::new(1);
        detail.handle_key(KeyCode::Right, 3);
        assert_eq!(detail.index(), 2);
        detail.handle_key(KeyCode::Left, 3);
        assert_eq!(detail.index(), 1);
    }

    #[test]
    fn test_empty_list_is_noop() {
        let mut detail = DetailState::new(0);
        detail.handle_key(KeyCode::Right, 0);
        assert_eq!(detail.index(), 0);
    }

    #[test]
    fn test_unrelated_key_ignored() {
        let mut detail = DetailState::new(1);
        detail.handle_key(KeyCode::Char('x'), 3);
        assert_eq!(detail.index(), 1);
    }
}
