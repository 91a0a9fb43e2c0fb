//! Pagination window over an ordered sequence.

use std::ops::Range;

/// Allowed rows-per-page choices.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Current page index and size.
///
/// The table view resets `page` to 0 whenever filter criteria, the sort
/// key, or the page size change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: usize,
    pub size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    /// Number of pages for a sequence of `len` items (at least 1).
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.size).max(1)
    }

    /// Advance to the next page if one exists.
    pub fn next_page(&mut self, len: usize) {
        if self.page + 1 < self.page_count(len) {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Cycle to the next allowed page size and reset to page 0.
    pub fn cycle_size(&mut self) {
        let idx = PAGE_SIZES.iter().position(|&s| s == self.size).unwrap_or(0);
        self.size = PAGE_SIZES[(idx + 1) % PAGE_SIZES.len()];
        self.page = 0;
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// The visible index range, clamped to the sequence bounds.
    ///
    /// A page index past the end of a shrunken sequence yields an empty
    /// range rather than an error; callers reset the page on input changes.
    pub fn window(&self, len: usize) -> Range<usize> {
        window(len, self.page, self.size)
    }
}

/// The slice `[page*size, page*size+size)` clamped to `0..len`.
pub fn window(len: usize, page: usize, size: usize) -> Range<usize> {
    let start = page.saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}
