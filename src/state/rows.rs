//! Flat row list with in-order page reconciliation.
//!
//! Fetch responses may complete out of order (the worker is sequential
//! today, but the store does not rely on that). Arrivals are buffered by
//! their *requested* page index and appended only when every earlier page
//! has been applied, so the flat list is always the concatenation of
//! pages in request order.

use crate::model::{Applicant, Page, PageIndex, RowId};
use std::collections::BTreeMap;
use std::collections::HashSet;
use tracing::debug;

/// Accumulated rows for the current sort key.
///
/// # Invariants
/// - `rows` equals pages `0..next_expected` concatenated in index order
/// - `total_db_rows` is `None` until the first page of the current sort
///   key has been applied
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: Vec<Applicant>,
    total_db_rows: Option<usize>,
    next_expected: PageIndex,
    pending: BTreeMap<PageIndex, Page>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All loaded rows, in page request order.
    pub fn rows(&self) -> &[Applicant] {
        &self.rows
    }

    /// Number of loaded rows (`totalFetched`).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Authoritative dataset size from the latest applied page, if any
    /// page has arrived for the current sort key.
    pub fn total_db_rows(&self) -> Option<usize> {
        self.total_db_rows
    }

    /// Whether every backend row has been fetched.
    pub fn fully_loaded(&self) -> bool {
        self.total_db_rows.is_some_and(|total| self.rows.len() >= total)
    }

    /// The loaded row at `index`, if any.
    pub fn row(&self, index: usize) -> Option<&Applicant> {
        self.rows.get(index)
    }

    /// Ids of all loaded rows.
    pub fn loaded_ids(&self) -> HashSet<RowId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    /// Accept a fetched page, keyed by its requested index.
    ///
    /// Returns the number of rows appended to the flat list by this call
    /// (zero when the page was buffered for a gap, or was a duplicate).
    pub fn accept(&mut self, index: PageIndex, page: Page) -> usize {
        if index < self.next_expected {
            debug!(page = index.get(), "Ignoring duplicate page");
            return 0;
        }
        self.pending.insert(index, page);

        let before = self.rows.len();
        while let Some(page) = self.pending.remove(&self.next_expected) {
            self.total_db_rows = Some(page.total_row_count);
            self.rows.extend(page.rows);
            self.next_expected = self.next_expected.next();
        }
        self.rows.len() - before
    }

    /// Discard everything (the sort key changed; all pages are invalid).
    pub fn clear(&mut self) {
        self.rows.clear();
        self.total_db_rows = None;
        self.next_expected = PageIndex::ZERO;
        self.pending.clear();
    }
}
