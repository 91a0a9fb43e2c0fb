//! Root layout computation for tab strip + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the tab strip (bordered).
pub const TAB_STRIP_HEIGHT: u16 = 3;
/// Hide the tab strip below this terminal height.
pub const HIDE_TABS_THRESHOLD: u16 = 8;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Tab strip area (None on very short terminals).
    pub tabs: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    pub fn compute(area: Rect) -> Self {
        if area.height < HIDE_TABS_THRESHOLD {
            let rows =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
            return AppLayout {
                tabs: None,
                main: rows[0],
                status: rows[1],
            };
        }

        let rows = Layout::vertical([
            Constraint::Length(TAB_STRIP_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        AppLayout {
            tabs: Some(rows[0]),
            main: rows[1],
            status: rows[2],
        }
    }
}
