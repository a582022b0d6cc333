//! Row selection tracking.
//!
//! Membership set keyed by stable [`RowId`]: absence means unselected.
//! Ids referring to rows no longer loaded are harmless and can be pruned.

use crate::model::RowId;
use std::collections::HashSet;

/// Set of selected rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: HashSet<RowId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flip one row's membership.
    pub fn toggle(&mut self, id: RowId) {
        if !self.selected.insert(id) {
            self.selected.remove(&id);
        }
    }

    /// Bulk toggle over a group of rows (a pagination page, or all loaded
    /// rows): if every row in the group is already selected, the group is
    /// deselected; otherwise the whole group becomes selected.
    pub fn toggle_group<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = RowId>,
    {
        let ids: Vec<RowId> = ids.into_iter().collect();
        if ids.is_empty() {
            return;
        }
        if ids.iter().all(|id| self.selected.contains(id)) {
            for id in ids {
                self.selected.remove(&id);
            }
        } else {
            self.selected.extend(ids);
        }
    }

    /// How many of the given rows are selected.
    pub fn count_in<'a, I>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a RowId>,
    {
        ids.into_iter().filter(|id| self.selected.contains(id)).count()
    }

    /// Clear all selections (explicit bulk action).
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop ids that are not in the loaded set.
    pub fn prune(&mut self, loaded: &HashSet<RowId>) {
        self.selected.retain(|id| loaded.contains(id));
    }
}
