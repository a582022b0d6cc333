//! Single-column sort state machine.
//!
//! Per-column indicator states are {NONE, ASC, DESC}. Activating a column
//! cycles NONE → ASC → DESC → NONE; activating a different column replaces
//! the current sort entirely (single-column policy — the model could
//! stack sorts, the grid deliberately does not).

use crate::model::{ColumnId, SortDirection, SortSpec};

/// Current sort of the grid: at most one `(column, direction)` pair.
///
/// # Invariants
/// - Changing this state invalidates every fetched page; callers must
///   clear the row store and rekey the fetcher when `toggle` reports a
///   change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    current: Option<SortSpec>,
}

impl SortState {
    /// Unsorted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active sort spec, if any.
    pub fn spec(&self) -> Option<&SortSpec> {
        self.current.as_ref()
    }

    /// Indicator direction for a column (`None` = unsorted).
    pub fn direction_of(&self, column: &ColumnId) -> Option<SortDirection> {
        self.current
            .as_ref()
            .filter(|spec| spec.column == *column)
            .map(|spec| spec.direction)
    }

    /// Advance the cycle for `column` and reset every other column.
    ///
    /// Returns `true` if the state changed (it always does here; the
    /// cycle has no self-loops).
    pub fn toggle(&mut self, column: &ColumnId) -> bool {
        let next = match &self.current {
            Some(spec) if spec.column == *column => match spec.direction {
                SortDirection::Ascending => {
                    Some(SortSpec::new(column.clone(), SortDirection::Descending))
                }
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec::new(column.clone(), SortDirection::Ascending)),
        };
        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Clear the sort entirely.
    pub fn clear(&mut self) -> bool {
        let changed = self.current.is_some();
        self.current = None;
        changed
    }
}
