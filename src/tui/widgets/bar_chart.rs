//! Horizontal bar chart widget for ratatui.
//!
//! Renders (label, count) pairs as labeled Unicode bars with a trailing
//! count, one row per label, with scroll-offset clamping. A widget
//! instance lives for exactly one draw: it is built from the current
//! aggregates and consumed by `render`, so a re-render can never observe
//! a chart from a previous frame.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::tui::theme;

/// Widest a label column may grow before truncation.
const MAX_LABEL_WIDTH: usize = 24;

/// A horizontal bar chart over (label, count) pairs.
///
/// # Example
///
/// ```ignore
/// let chart = BarChart::new(&counts).color(theme::INFO).scroll(0);
/// frame.render_widget(chart, area);
/// ```
pub struct BarChart<'a> {
    data: &'a [(String, u64)],
    bar_color: Color,
    scroll_offset: usize,
}

impl<'a> BarChart<'a> {
    pub fn new(data: &'a [(String, u64)]) -> Self {
        Self {
            data,
            bar_color: theme::INFO,
            scroll_offset: 0,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.bar_color = color;
        self
    }

    pub fn scroll(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Width of the label column for the current data.
    fn label_width(&self) -> usize {
        self.data
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH)
    }
}

impl Widget for BarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.data.is_empty() {
            return;
        }

        let label_width = self.label_width();
        let max_count = self.data.iter().map(|(_, c)| *c).max().unwrap_or(0);
        let visible_height = area.height as usize;

        let max_offset = self.data.len().saturating_sub(visible_height);
        let offset = self.scroll_offset.min(max_offset);

        // label │ bar count
        let count_width = max_count.to_string().len();
        let bar_budget = (area.width as usize)
            .saturating_sub(label_width + 2 + count_width + 1)
            .max(1);

        for (i, (label, count)) in self
            .data
            .iter()
            .skip(offset)
            .take(visible_height)
            .enumerate()
        {
            let y = area.y + i as u16;

            let truncated: String = label.chars().take(label_width).collect();
            let padded = format!("{truncated:>label_width$} ");
            buf.set_string(area.x, y, &padded, Style::default().fg(theme::TEXT));

            let bar_x = area.x + padded.chars().count() as u16;
            let filled = if max_count == 0 {
                0
            } else {
                ((*count as f64 / max_count as f64) * bar_budget as f64).round() as usize
            };
            // At least one cell for any non-zero count.
            let filled = if *count > 0 { filled.max(1) } else { 0 };

            let bar: String = "█".repeat(filled);
            buf.set_string(bar_x, y, &bar, Style::default().fg(self.bar_color));

            let count_text = format!(" {count}");
            buf.set_string(
                bar_x + filled as u16,
                y,
                &count_text,
                Style::default().fg(theme::TEXT_MUTED),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: render the widget into a buffer and dump it as strings.
    fn render_to_string(widget: BarChart<'_>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        buf.cell((x, y))
                            .map_or(' ', |c| c.symbol().chars().next().unwrap_or(' '))
                    })
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn counts(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs.iter().map(|(l, c)| (l.to_string(), *c)).collect()
    }

    #[test]
    fn test_empty_data_renders_nothing() {
        let data: Vec<(String, u64)> = vec![];
        let output = render_to_string(BarChart::new(&data), 40, 4);
        for line in &output {
            assert!(line.is_empty(), "expected blank line, got: {line:?}");
        }
    }

    #[test]
    fn test_labels_and_counts_visible() {
        let data = counts(&[("alice", 2), ("bob", 1)]);
        let output = render_to_string(BarChart::new(&data), 40, 4);
        let joined = output.join("\n");
        assert!(joined.contains("alice"), "missing label: {joined}");
        assert!(joined.contains("bob"), "missing label: {joined}");
        assert!(joined.contains('2'), "missing count: {joined}");
        assert!(joined.contains('█'), "missing bar: {joined}");
    }

    #[test]
    fn test_largest_count_has_longest_bar() {
        let data = counts(&[("big", 10), ("small", 1)]);
        let output = render_to_string(BarChart::new(&data), 40, 4);
        let big_bar = output[0].chars().filter(|&c| c == '█').count();
        let small_bar = output[1].chars().filter(|&c| c == '█').count();
        assert!(big_bar > small_bar, "{big_bar} vs {small_bar}");
        assert!(small_bar >= 1, "non-zero count must render a bar");
    }

    #[test]
    fn test_zero_count_renders_no_bar() {
        let data = counts(&[("none", 0), ("some", 3)]);
        let output = render_to_string(BarChart::new(&data), 40, 4);
        assert_eq!(output[0].chars().filter(|&c| c == '█').count(), 0);
    }

    #[test]
    fn test_long_label_truncated() {
        let long = "x".repeat(60);
        let data = vec![(long, 1u64)];
        let output = render_to_string(BarChart::new(&data), 50, 2);
        let xs = output[0].chars().filter(|&c| c == 'x').count();
        assert_eq!(xs, MAX_LABEL_WIDTH);
    }

    #[test]
    fn test_scroll_offset_clamps() {
        let data = counts(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        // Viewport of 2 rows, absurd scroll — clamps to show the tail.
        let output = render_to_string(BarChart::new(&data).scroll(99), 40, 2);
        let joined = output.join("\n");
        assert!(joined.contains('c') && joined.contains('d'), "{joined}");
        assert!(!joined.contains('a'), "{joined}");
    }

    #[test]
    fn test_zero_area_does_not_panic() {
        let data = counts(&[("a", 1)]);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        BarChart::new(&data).render(area, &mut buf);
    }
}
