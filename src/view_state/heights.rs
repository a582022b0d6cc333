//! Per-row heights with estimate fallback and measured overrides.
//!
//! Every row starts at the configured estimate. In measured mode the
//! rendering surface feeds actual heights back after layout; each
//! measurement is tagged with the row's identity so that a different row
//! landing at the same index invalidates the cached value automatically.

use crate::model::RowId;
use crate::view_state::height_index::HeightIndex;

/// Height bookkeeping for the windowed list.
#[derive(Debug, Clone)]
pub struct RowHeights {
    index: HeightIndex,
    /// `Some(id)` at position i means the height is a measurement taken
    /// for that row; `None` means it is still the estimate.
    tags: Vec<Option<RowId>>,
    estimate: usize,
}

impl RowHeights {
    /// Create with the given per-row estimate (clamped to >= 1 — a
    /// zero-height row would make offsets ambiguous).
    pub fn new(estimate: usize) -> Self {
        Self {
            index: HeightIndex::with_capacity(64),
            tags: Vec::new(),
            estimate: estimate.max(1),
        }
    }

    pub fn estimate(&self) -> usize {
        self.estimate
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Resize to `count` rows.
    ///
    /// Growing appends estimate-height rows and preserves existing
    /// measurements (appending rows never changes the identity at an
    /// existing index). Shrinking means the index→row mapping changed,
    /// so all measurements are discarded and rows reset to the estimate.
    pub fn set_len(&mut self, count: usize) {
        if count < self.index.len() {
            self.index.clear();
            self.tags.clear();
        }
        while self.index.len() < count {
            self.index.push(self.estimate);
            self.tags.push(None);
        }
    }

    /// Record a measured height for the row with identity `id` at
    /// `index`. Re-measuring the same row with the same height is a
    /// no-op; a different identity at the index replaces the stale value.
    ///
    /// Returns `true` if the stored height changed.
    pub fn record(&mut self, index: usize, id: RowId, height: usize) -> bool {
        if index >= self.index.len() {
            return false;
        }
        let height = height.max(1);
        if self.tags[index] == Some(id) && self.index.get(index) == height {
            return false;
        }
        self.index.set(index, height);
        self.tags[index] = Some(id);
        true
    }

    /// Drop every measurement, resetting all rows to the estimate.
    pub fn reset_measurements(&mut self) {
        for i in 0..self.index.len() {
            if self.tags[i].take().is_some() {
                self.index.set(i, self.estimate);
            }
        }
    }

    /// Remove all rows.
    pub fn clear(&mut self) {
        self.index.clear();
        self.tags.clear();
    }

    /// True if any row currently carries a measured height.
    pub fn has_measurements(&self) -> bool {
        self.tags.iter().any(Option::is_some)
    }

    /// Height of the row at `index`.
    pub fn height_of(&self, index: usize) -> usize {
        self.index.get(index)
    }

    /// Vertical offset at which row `index` starts.
    pub fn offset_of(&self, index: usize) -> usize {
        self.index.offset_of(index)
    }

    /// Total content extent.
    pub fn total(&self) -> usize {
        self.index.total()
    }

    /// Row containing the vertical `offset`, if any.
    pub fn index_at(&self, offset: usize) -> Option<usize> {
        self.index.index_at(offset)
    }
}
