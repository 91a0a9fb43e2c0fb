use crate::core::model::Profile;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Periodic tick for animations (loading spinner).
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// The one-shot fetch completed successfully.
    ProfilesLoaded(Vec<Profile>),
    /// A resolved action to execute.
    Action(Action),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the global input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusTable,
    FocusDashboard,
    FocusTimeline,
    TabNext,
    TabPrev,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Which top-level view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Table,
    Dashboard,
    Timeline,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Table, Focus::Dashboard, Focus::Timeline];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Table => "Profiles",
            Focus::Dashboard => "Dashboard",
            Focus::Timeline => "Timeline",
        }
    }

    pub fn to_action(self) -> Action {
        match self {
            Focus::Table => Action::FocusTable,
            Focus::Dashboard => Action::FocusDashboard,
            Focus::Timeline => Action::FocusTimeline,
        }
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_next_cycles() {
        let mut f = Focus::Table;
        for _ in 0..Focus::ALL.len() {
            f = f.next();
        }
        assert_eq!(f, Focus::Table);
    }

    #[test]
    fn test_focus_prev_cycles() {
        let mut f = Focus::Table;
        for _ in 0..Focus::ALL.len() {
            f = f.prev();
        }
        assert_eq!(f, Focus::Table);
    }

    #[test]
    fn test_focus_labels_non_empty() {
        for f in Focus::ALL {
            assert!(!f.label().is_empty());
        }
    }

    #[test]
    fn test_focus_actions_are_unique() {
        let actions: Vec<Action> = Focus::ALL.iter().map(|f| f.to_action()).collect();
        for (i, a) in actions.iter().enumerate() {
            for b in actions.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
