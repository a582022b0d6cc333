//! Pages: batches of rows returned by one fetch call.
//!
//! Distinct from the UI notion of a pagination page — a fetch page is a
//! contiguous slice of the backing dataset under one sort key.

use crate::model::Applicant;

/// Zero-based index of a fetch page.
///
/// Pages are requested sequentially; the row store uses this index to
/// apply responses in request order regardless of completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PageIndex(usize);

impl PageIndex {
    pub const ZERO: Self = Self(0);

    /// Create a page index from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Row offset of the first row of this page.
    pub fn offset(&self, page_size: usize) -> usize {
        self.0 * page_size
    }

    /// The next page index.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// One fetched batch of rows plus the authoritative dataset size.
///
/// # Invariants
/// - `rows.len() <= page size` requested (the final page may be short)
/// - `total_row_count` reflects the dataset under the sort key the page
///   was fetched with; a sort change invalidates the page entirely
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Rows in dataset order for the requested slice.
    pub rows: Vec<Applicant>,
    /// Authoritative count of all rows matching the current sort/filter.
    pub total_row_count: usize,
}

impl Page {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
