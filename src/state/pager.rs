//! Classic pagination over the loaded row list.
//!
//! Distinct from fetch pages: the pager slices whatever the row store
//! currently holds for display, while fetch pages are how rows arrive.

use std::fmt;
use std::ops::Range;

/// Rows shown per pagination page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Rows(usize),
    /// Show the whole loaded list (the virtualized view's default).
    All,
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Rows(n) => write!(f, "{n}"),
            PageSize::All => f.write_str("All"),
        }
    }
}

/// Selectable page sizes, cycled by the UI.
pub const PAGE_SIZE_CHOICES: &[PageSize] = &[
    PageSize::All,
    PageSize::Rows(10),
    PageSize::Rows(20),
    PageSize::Rows(30),
    PageSize::Rows(40),
    PageSize::Rows(50),
    PageSize::Rows(100),
];

/// Pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_index: usize,
    page_size: PageSize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: PageSize::All,
        }
    }
}

impl Pager {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    fn rows_per_page(&self, total: usize) -> usize {
        match self.page_size {
            PageSize::Rows(n) => n.max(1),
            PageSize::All => total.max(1),
        }
    }

    /// Number of pages for a list of `total` rows. At least 1, so an
    /// empty list still displays "Page 1 of 1".
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page(total)).max(1)
    }

    /// Index range of the current page within the loaded list.
    ///
    /// The range is clamped: if rows disappeared and the cursor points
    /// past the end, the returned slice is empty rather than panicking.
    pub fn slice(&self, total: usize) -> Range<usize> {
        let per_page = self.rows_per_page(total);
        let start = (self.page_index * per_page).min(total);
        let end = (start + per_page).min(total);
        start..end
    }

    pub fn can_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.page_index + 1 < self.page_count(total)
    }

    pub fn first(&mut self) {
        self.page_index = 0;
    }

    pub fn last(&mut self, total: usize) {
        self.page_index = self.page_count(total) - 1;
    }

    pub fn next(&mut self, total: usize) {
        if self.can_next(total) {
            self.page_index += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Jump to a page, clamped to the valid range.
    pub fn goto(&mut self, index: usize, total: usize) {
        self.page_index = index.min(self.page_count(total) - 1);
    }

    /// Change the page size and reset to the first page.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.page_index = 0;
    }

    /// Advance to the next entry of [`PAGE_SIZE_CHOICES`], wrapping.
    pub fn cycle_page_size(&mut self) {
        let at = PAGE_SIZE_CHOICES
            .iter()
            .position(|choice| *choice == self.page_size)
            .unwrap_or(0);
        let next = PAGE_SIZE_CHOICES[(at + 1) % PAGE_SIZE_CHOICES.len()];
        self.set_page_size(next);
    }
}
