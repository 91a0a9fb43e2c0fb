//! Profile table — filterable, sortable, paginated record listing.
//!
//! The pipeline (filter → sort → window) is recomputed from the immutable
//! store on every render, so the rows always reflect the current criteria.
//! Any change to a filter, the sort key, or the page size resets the page
//! index to 0.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::super::theme;
use super::detail::DetailState;
use crate::core::model::{Profile, ProfileStore};
use crate::core::page::PageState;
use crate::core::view::{self, FilterCriteria, SortField, SortKey, SortOrder};

// ── Filter inputs ──────────────────────────────────────────────────────────

/// Which free-text filter field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterInput {
    Name,
    Bio,
    Url,
    CreatedAt,
}

impl FilterInput {
    fn label(self) -> &'static str {
        match self {
            FilterInput::Name => "Name",
            FilterInput::Bio => "Bio",
            FilterInput::Url => "URL",
            FilterInput::CreatedAt => "Found",
        }
    }
}

/// Checkbox modal over the distinct search terms.
pub struct TermPickerState {
    terms: Vec<String>,
    cursor: usize,
}

impl TermPickerState {
    fn new(terms: Vec<String>) -> Self {
        Self { terms, cursor: 0 }
    }
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct TableViewState {
    pub criteria: FilterCriteria,
    pub sort: Option<SortKey>,
    pub page: PageState,
    /// Selected row within the current page window.
    selected: usize,
    filter_input: Option<FilterInput>,
    term_picker: Option<TermPickerState>,
    detail: Option<DetailState>,
}

impl TableViewState {
    pub fn new() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: None,
            page: PageState::default(),
            selected: 0,
            filter_input: None,
            term_picker: None,
            detail: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.filter_input.is_some()
    }

    /// The filtered, sorted row list for the current criteria.
    pub fn rows<'a>(&self, store: &'a ProfileStore) -> Vec<&'a Profile> {
        view::apply(store.profiles(), &self.criteria, self.sort)
    }

    /// Filter criteria or sort changed: back to page 0, top row.
    fn on_pipeline_changed(&mut self) {
        self.page.reset();
        self.selected = 0;
    }

    fn sort_by(&mut self, field: SortField) {
        self.sort = match self.sort {
            // Same column toggles direction.
            Some(key) if key.field == field => Some(SortKey {
                field,
                order: key.order.toggled(),
            }),
            // New column starts ascending.
            _ => Some(SortKey {
                field,
                order: SortOrder::Asc,
            }),
        };
        self.on_pipeline_changed();
    }

    // ── Input ──────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, store: &ProfileStore) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return false;
        };

        // Priority 1: detail modal
        if self.detail.is_some() {
            let len = self.rows(store).len();
            let closed = match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => true,
                _ => {
                    if let Some(ref mut detail) = self.detail {
                        detail.handle_key(*code, len);
                    }
                    false
                }
            };
            if closed {
                self.detail = None;
            }
            return true;
        }

        // Priority 2: term picker modal
        if self.term_picker.is_some() {
            match code {
                KeyCode::Esc | KeyCode::Char('f') => {
                    self.term_picker = None;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    if let Some(picker) = self.term_picker.as_mut() {
                        if !picker.terms.is_empty() {
                            picker.cursor = (picker.cursor + 1) % picker.terms.len();
                        }
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    if let Some(picker) = self.term_picker.as_mut() {
                        if !picker.terms.is_empty() {
                            picker.cursor =
                                (picker.cursor + picker.terms.len() - 1) % picker.terms.len();
                        }
                    }
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    let term = self
                        .term_picker
                        .as_ref()
                        .and_then(|p| p.terms.get(p.cursor).cloned());
                    if let Some(term) = term {
                        self.criteria.toggle_term(&term);
                        self.on_pipeline_changed();
                    }
                }
                _ => {}
            }
            return true;
        }

        // Priority 3: filter text entry
        if let Some(input) = self.filter_input {
            match code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.filter_input = None;
                }
                KeyCode::Backspace => {
                    self.filter_field_mut(input).pop();
                    self.on_pipeline_changed();
                }
                KeyCode::Char(c) => {
                    self.filter_field_mut(input).push(*c);
                    self.on_pipeline_changed();
                }
                _ => {}
            }
            return true;
        }

        // Normal mode
        let row_count = self.rows(store).len();
        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                let visible = self.page.window(row_count).len();
                if visible > 0 {
                    self.selected = (self.selected + 1).min(visible - 1);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Left | KeyCode::Char('h')) => {
                self.page.prev_page();
                self.selected = 0;
                true
            }
            (KeyModifiers::NONE, KeyCode::Right | KeyCode::Char('l')) => {
                self.page.next_page(row_count);
                self.selected = 0;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.page.cycle_size();
                self.selected = 0;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('f')) => {
                self.term_picker = Some(TermPickerState::new(store.distinct_search_terms()));
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('n')) => {
                self.filter_input = Some(FilterInput::Name);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('b')) => {
                self.filter_input = Some(FilterInput::Bio);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('u')) => {
                self.filter_input = Some(FilterInput::Url);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                self.filter_input = Some(FilterInput::CreatedAt);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('c')) => {
                self.criteria = FilterCriteria::default();
                self.sort = None;
                self.on_pipeline_changed();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='5')) => {
                let idx = (c as u8 - b'1') as usize;
                self.sort_by(SortField::ALL[idx]);
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                let window = self.page.window(row_count);
                let index = window.start + self.selected;
                if index < window.end {
                    self.detail = Some(DetailState::new(index));
                }
                true
            }
            _ => false,
        }
    }

    fn filter_field_mut(&mut self, input: FilterInput) -> &mut String {
        match input {
            FilterInput::Name => &mut self.criteria.name,
            FilterInput::Bio => &mut self.criteria.bio,
            FilterInput::Url => &mut self.criteria.url,
            FilterInput::CreatedAt => &mut self.criteria.created_at,
        }
    }

    // ── Rendering ──────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, store: &ProfileStore) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let rows = self.rows(store);
        self.render_filter_bar(frame, chunks[0], rows.len(), store.len());
        self.render_rows(frame, chunks[1], &rows);

        if let Some(ref picker) = self.term_picker {
            self.render_term_picker(frame, area, picker);
        }
        if let Some(ref detail) = self.detail {
            detail.render(frame, area, &rows);
        }
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect, matched: usize, total: usize) {
        let block = theme::block_default("Filters");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut spans = vec![Span::styled(" terms: ", theme::muted())];
        if self.criteria.search_terms.is_empty() {
            spans.push(Span::styled("all", theme::dim()));
        } else {
            spans.push(Span::styled(
                self.criteria.search_terms.join(", "),
                Style::default().fg(theme::SUCCESS),
            ));
        }

        for (input, value) in [
            (FilterInput::Name, &self.criteria.name),
            (FilterInput::Bio, &self.criteria.bio),
            (FilterInput::Url, &self.criteria.url),
            (FilterInput::CreatedAt, &self.criteria.created_at),
        ] {
            spans.push(Span::raw("  "));
            let editing = self.filter_input == Some(input);
            let label_style = if editing {
                theme::highlight()
            } else {
                theme::muted()
            };
            spans.push(Span::styled(format!("{}: ", input.label()), label_style));
            let value_style = if value.is_empty() {
                theme::dim()
            } else {
                Style::default().fg(theme::SUCCESS)
            };
            let shown = if value.is_empty() && !editing {
                "·".to_string()
            } else if editing {
                format!("{value}▏")
            } else {
                value.clone()
            };
            spans.push(Span::styled(shown, value_style));
        }

        let sort_desc = match self.sort {
            Some(key) => format!("{} {}", key.field.label(), key.order.arrow()),
            None => "none".to_string(),
        };

        let lines = vec![
            Line::from(spans),
            Line::from(vec![
                Span::styled(
                    format!(" {matched} of {total} profiles"),
                    theme::muted(),
                ),
                Span::styled("  sort: ", theme::muted()),
                Span::styled(sort_desc, Style::default().fg(theme::PRIMARY_LIGHT)),
                Span::styled(
                    "  [f] terms  [n/b/u/d] filter  [1-5] sort  [c] clear",
                    theme::key_hint(),
                ),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, rows: &[&Profile]) {
        let block = theme::block_focused("Profiles");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = Vec::new();

        // Column headers with sort arrows.
        let header: Vec<Span> = SortField::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let arrow = match self.sort {
                    Some(key) if key.field == *field => key.order.arrow(),
                    _ => " ",
                };
                Span::styled(
                    format!("{:<width$}", format!("{}{arrow}", field.label()), width = col_width(i)),
                    Style::default()
                        .fg(theme::TEXT_MUTED)
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        let mut header_spans = vec![Span::raw("  ")];
        header_spans.extend(header);
        lines.push(Line::from(header_spans));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(inner.width.saturating_sub(2) as usize)),
            theme::dim(),
        )));

        let window = self.page.window(rows.len());
        if window.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                "  No profiles match the current filters",
                theme::muted(),
            )));
        }

        for (i, profile) in rows[window.clone()].iter().enumerate() {
            let is_selected = i == self.selected;
            let marker = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT)
            };

            let cells = [
                cell(profile.search_term.as_deref(), col_width(0)),
                cell(profile.name.as_deref(), col_width(1)),
                cell(profile.bio.as_deref(), col_width(2)),
                cell(profile.url.as_deref(), col_width(3)),
                cell(profile.created_at.as_deref(), col_width(4)),
            ];

            let mut spans = vec![Span::styled(marker.to_string(), style)];
            for c in cells {
                spans.push(Span::styled(c, style));
            }
            lines.push(Line::from(spans));
        }

        // Pagination footer.
        let page_count = self.page.page_count(rows.len());
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "  Page {}/{page_count}  {} per page",
                    self.page.page + 1,
                    self.page.size
                ),
                theme::muted(),
            ),
            Span::styled(
                "  [←/→] page  [s] page size  [j/k] row  [Enter] detail",
                theme::key_hint(),
            ),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_term_picker(&self, frame: &mut Frame, area: Rect, picker: &TermPickerState) {
        let modal = super::super::app::centered_rect(40, 60, area);
        let block = theme::block_focused("Select Search Terms");
        let inner = block.inner(modal);

        frame.render_widget(Clear, modal);
        frame.render_widget(block, modal);

        let mut lines: Vec<Line<'static>> = Vec::new();
        if picker.terms.is_empty() {
            lines.push(Line::from(Span::styled(
                " No search terms in the data",
                theme::muted(),
            )));
        }

        let visible = inner.height.saturating_sub(2) as usize;
        let scroll = picker.cursor.saturating_sub(visible.saturating_sub(1));
        for (i, term) in picker.terms.iter().enumerate().skip(scroll).take(visible) {
            let checked = self.criteria.search_terms.iter().any(|t| t == term);
            let box_mark = if checked { "[x]" } else { "[ ]" };
            let style = if i == picker.cursor {
                theme::highlight()
            } else {
                Style::default().fg(theme::TEXT)
            };
            lines.push(Line::from(Span::styled(
                format!(" {box_mark} {term}"),
                style,
            )));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            " [Space] toggle  [j/k] move  [Esc] close",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

// ── Column formatting ──────────────────────────────────────────────────────

const COL_WIDTHS: [usize; 5] = [14, 20, 32, 32, 22];

fn col_width(index: usize) -> usize {
    COL_WIDTHS[index]
}

/// Truncate a cell value to the column width, ellipsized.
fn cell(value: Option<&str>, width: usize) -> String {
    let text = value.unwrap_or("—");
    let budget = width.saturating_sub(2);
    if text.chars().count() > budget {
        let cut: String = text.chars().take(budget.saturating_sub(1)).collect();
        format!("{:<width$}", format!("{cut}…"))
    } else {
        format!("{text:<width$}")
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
