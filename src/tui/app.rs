use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Focus};
use super::layout::AppLayout;
use super::theme;
use super::views::dashboard::DashboardState;
use super::views::table::TableViewState;
use super::views::timeline::TimelineState;
use crate::core::model::ProfileStore;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently focused top-level view.
    pub focus: Focus,
    /// Table view state.
    pub table: TableViewState,
    /// Dashboard view state.
    pub dashboard: DashboardState,
    /// Timeline view state.
    pub timeline: TimelineState,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Loaded record store (None while the fetch is outstanding).
    store: Option<ProfileStore>,
    /// Loading spinner animation frame.
    spinner_frame: usize,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender for pushing events from within the app.
    #[allow(dead_code)]
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            running: true,
            focus: Focus::Table,
            table: TableViewState::new(),
            dashboard: DashboardState::new(),
            timeline: TimelineState::new(),
            show_help: false,
            store: None,
            spinner_frame: 0,
            event_rx,
            event_tx,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            // Render — derived views are recomputed from the current
            // inputs here, so a frame never shows a stale pipeline.
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Focused view
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::ProfilesLoaded(profiles) => {
                log::info!("Store loaded with {} profiles", profiles.len());
                self.store = Some(ProfileStore::new(profiles));
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Dispatch input to the currently focused view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.focus {
            Focus::Table => match self.store {
                Some(ref store) => self.table.handle_input(event, store),
                None => false,
            },
            Focus::Dashboard => self.dashboard.handle_input(event),
            Focus::Timeline => self.timeline.handle_input(event),
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            // Ctrl+C → quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::FocusTable => self.focus = Focus::Table,
            Action::FocusDashboard => self.focus = Focus::Dashboard,
            Action::FocusTimeline => self.focus = Focus::Timeline,
            Action::TabNext => self.focus = self.focus.next(),
            Action::TabPrev => self.focus = self.focus.prev(),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    fn on_tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        if let Some(tabs_area) = layout.tabs {
            self.render_tabs(frame, tabs_area);
        }

        match self.store {
            Some(ref store) => self.render_content(frame, layout.main, store),
            None => self.render_loading(frame, layout.main),
        }

        self.render_status_bar(frame, layout.status);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let spans: Vec<Span> = Focus::ALL
            .iter()
            .flat_map(|f| {
                let style = if *f == self.focus {
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::TEXT_MUTED)
                };
                vec![Span::styled(format!(" {} ", f.label()), style), Span::raw("│")]
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::TEXT_DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect, store: &ProfileStore) {
        match self.focus {
            Focus::Table => self.table.render(frame, area, store),
            Focus::Dashboard => self.dashboard.render(frame, area, store),
            Focus::Timeline => self.timeline.render(frame, area, store),
        }
    }

    /// Loading screen shown until the fetch delivers.
    ///
    /// A failed fetch never leaves this screen; the log file has the
    /// details.
    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::TEXT_DIM));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("{spinner} Loading data, please wait..."),
                Style::default().fg(theme::PRIMARY_LIGHT),
            )),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let store_status = match self.store {
            Some(ref store) => Span::styled(
                format!("{} profiles", store.len()),
                Style::default().fg(theme::TEXT_MUTED),
            ),
            None => Span::styled("loading", Style::default().fg(theme::PRIMARY_LIGHT)),
        };

        let editing = match self.focus {
            Focus::Table => self.table.is_editing(),
            Focus::Timeline => self.timeline.is_editing(),
            Focus::Dashboard => false,
        };
        let mode_indicator = if editing {
            Span::styled(" EDIT ", theme::edit_badge())
        } else {
            Span::raw("")
        };

        let status = Line::from(vec![
            Span::styled(" IMPTRACK ", theme::brand_badge()),
            Span::raw(" "),
            mode_indicator,
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            store_status,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":view "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q / Ctrl+C", "Quit application"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous view"),
            ("", ""),
            ("Profiles View:", ""),
            ("j/k", "Select row"),
            ("←/→", "Previous / next page"),
            ("s", "Cycle page size (10/25/50/100)"),
            ("1-5", "Sort by column (again: flip order)"),
            ("f", "Search-term checkboxes"),
            ("n/b/u/d", "Filter name/bio/URL/found date"),
            ("c", "Clear filters and sort"),
            ("Enter", "Open profile detail"),
            ("", ""),
            ("Detail Modal:", ""),
            ("←/→", "Previous / next profile (wraps)"),
            ("Esc", "Close"),
            ("", ""),
            ("Dashboard View:", ""),
            ("h/l", "Switch grouping attribute"),
            ("j/k", "Scroll chart"),
            ("", ""),
            ("Timeline View:", ""),
            ("i or /", "Type a search term (exact match)"),
            ("c", "Clear term"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<18}", key),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
