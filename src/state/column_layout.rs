//! Column descriptors, column order, and the reorder operation.
//!
//! The layout owns the user-mutable column order. A reorder gesture
//! supplies `(source, target)` column ids; the move uses array-move
//! semantics (remove the source, reinsert at the target's position), so
//! the result is always a permutation of the previous order.

use crate::model::ColumnId;
use tracing::warn;

/// Declarative description of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub id: ColumnId,
    /// Header label.
    pub label: &'static str,
    /// Preferred width in terminal cells.
    pub width: u16,
    /// Whether clicking the header cycles the sort.
    pub sortable: bool,
    /// Whether the column can initiate a reorder move. Non-reorderable
    /// columns can still be displaced as targets.
    pub reorderable: bool,
}

/// Column set plus the current display order.
///
/// # Invariants
/// - `order` contains every spec id exactly once, always.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    specs: Vec<ColumnSpec>,
    order: Vec<ColumnId>,
}

impl ColumnLayout {
    /// Build a layout in declaration order.
    pub fn new(specs: Vec<ColumnSpec>) -> Self {
        let order = specs.iter().map(|spec| spec.id.clone()).collect();
        Self { specs, order }
    }

    /// Build a layout applying a previously persisted order.
    ///
    /// The saved order is used only if it is a permutation of the spec
    /// ids; anything else (missing column, unknown id, duplicate) falls
    /// back to declaration order. A stale persisted value must never
    /// break startup.
    pub fn with_saved_order(specs: Vec<ColumnSpec>, saved: &[String]) -> Self {
        let mut layout = Self::new(specs);
        match Self::validate_order(&layout.specs, saved) {
            Some(order) => layout.order = order,
            None => {
                warn!(?saved, "Ignoring persisted column order that no longer matches the column set");
            }
        }
        layout
    }

    fn validate_order(specs: &[ColumnSpec], saved: &[String]) -> Option<Vec<ColumnId>> {
        if saved.len() != specs.len() {
            return None;
        }
        let mut order = Vec::with_capacity(saved.len());
        for raw in saved {
            let id = specs.iter().map(|s| &s.id).find(|id| id.as_str() == raw)?;
            if order.contains(id) {
                return None;
            }
            order.push(id.clone());
        }
        Some(order)
    }

    /// The current order of column ids.
    pub fn order(&self) -> &[ColumnId] {
        &self.order
    }

    /// Columns in display order.
    pub fn ordered(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.order.iter().filter_map(|id| self.spec(id))
    }

    /// Look up one column's descriptor.
    pub fn spec(&self, id: &ColumnId) -> Option<&ColumnSpec> {
        self.specs.iter().find(|spec| spec.id == *id)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Apply a reorder gesture: move `source` to `target`'s position.
    ///
    /// Silently refuses (returns `false`) when either id is unknown, when
    /// source equals target, or when the source column is marked
    /// non-reorderable. Drag sources are constrained to valid ids by
    /// construction, so there is nothing to report to the user.
    pub fn reorder(&mut self, source: &ColumnId, target: &ColumnId) -> bool {
        if source == target {
            return false;
        }
        let movable = self.spec(source).is_some_and(|spec| spec.reorderable);
        if !movable {
            return false;
        }
        let (Some(from), Some(to)) = (
            self.order.iter().position(|id| id == source),
            self.order.iter().position(|id| id == target),
        ) else {
            return false;
        };
        let id = self.order.remove(from);
        self.order.insert(to, id);
        true
    }

    /// Replace the order wholesale (e.g. from a [`Change`] request).
    ///
    /// Rejects anything that is not a permutation of the column set.
    pub fn set_order(&mut self, order: Vec<ColumnId>) -> bool {
        let raw: Vec<String> = order.iter().map(|id| id.as_str().to_string()).collect();
        match Self::validate_order(&self.specs, &raw) {
            Some(validated) => {
                self.order = validated;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(id: &str) -> ColumnId {
        ColumnId::new(id).expect("valid id")
    }

    fn spec(id: &str, reorderable: bool) -> ColumnSpec {
        ColumnSpec {
            id: col(id),
            label: "x",
            width: 10,
            sortable: true,
            reorderable,
        }
    }

    fn layout(ids: &[&str]) -> ColumnLayout {
        ColumnLayout::new(ids.iter().map(|id| spec(id, true)).collect())
    }

    fn order_of(layout: &ColumnLayout) -> Vec<&str> {
        layout.order().iter().map(|id| id.as_str()).collect()
    }

    mod reorder {
        use super::*;

        #[test]
        fn moves_dragged_column_to_target_position() {
            let mut l = layout(&["a", "b", "c"]);
            assert!(l.reorder(&col("c"), &col("a")));
            assert_eq!(order_of(&l), vec!["c", "a", "b"]);
        }

        #[test]
        fn moves_forward_past_target() {
            let mut l = layout(&["a", "b", "c"]);
            assert!(l.reorder(&col("a"), &col("c")));
            assert_eq!(order_of(&l), vec!["b", "c", "a"]);
        }

        #[test]
        fn adjacent_swap() {
            let mut l = layout(&["a", "b", "c"]);
            assert!(l.reorder(&col("b"), &col("a")));
            assert_eq!(order_of(&l), vec!["b", "a", "c"]);
        }

        #[test]
        fn source_equals_target_is_noop() {
            let mut l = layout(&["a", "b", "c"]);
            assert!(!l.reorder(&col("b"), &col("b")));
            assert_eq!(order_of(&l), vec!["a", "b", "c"]);
        }

        #[test]
        fn unknown_source_is_silently_ignored() {
            let mut l = layout(&["a", "b", "c"]);
            assert!(!l.reorder(&col("zzz"), &col("a")));
            assert_eq!(order_of(&l), vec!["a", "b", "c"]);
        }

        #[test]
        fn unknown_target_is_silently_ignored() {
            let mut l = layout(&["a", "b", "c"]);
            assert!(!l.reorder(&col("a"), &col("zzz")));
            assert_eq!(order_of(&l), vec!["a", "b", "c"]);
        }

        #[test]
        fn non_reorderable_source_never_initiates_a_move() {
            let mut l = ColumnLayout::new(vec![
                spec("select", false),
                spec("name", true),
                spec("age", true),
            ]);
            assert!(!l.reorder(&col("select"), &col("age")));
            assert_eq!(order_of(&l), vec!["select", "name", "age"]);
        }

        #[test]
        fn non_reorderable_column_can_be_displaced_as_target() {
            let mut l = ColumnLayout::new(vec![
                spec("select", false),
                spec("name", true),
                spec("age", true),
            ]);
            assert!(l.reorder(&col("age"), &col("select")));
            assert_eq!(order_of(&l), vec!["age", "select", "name"]);
        }

        #[test]
        fn result_is_always_a_permutation() {
            let mut l = layout(&["a", "b", "c", "d", "e"]);
            l.reorder(&col("d"), &col("b"));
            l.reorder(&col("a"), &col("e"));
            l.reorder(&col("c"), &col("a"));

            let mut sorted = order_of(&l);
            sorted.sort_unstable();
            assert_eq!(sorted, vec!["a", "b", "c", "d", "e"]);
            assert_eq!(l.order().len(), 5);
        }
    }

    mod saved_order {
        use super::*;

        fn saved(ids: &[&str]) -> Vec<String> {
            ids.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn valid_saved_order_is_applied() {
            let l = ColumnLayout::with_saved_order(
                vec![spec("a", true), spec("b", true), spec("c", true)],
                &saved(&["c", "a", "b"]),
            );
            assert_eq!(order_of(&l), vec!["c", "a", "b"]);
        }

        #[test]
        fn saved_order_with_unknown_id_falls_back() {
            let l = ColumnLayout::with_saved_order(
                vec![spec("a", true), spec("b", true)],
                &saved(&["a", "bogus"]),
            );
            assert_eq!(order_of(&l), vec!["a", "b"]);
        }

        #[test]
        fn saved_order_with_missing_column_falls_back() {
            let l = ColumnLayout::with_saved_order(
                vec![spec("a", true), spec("b", true), spec("c", true)],
                &saved(&["a", "b"]),
            );
            assert_eq!(order_of(&l), vec!["a", "b", "c"]);
        }

        #[test]
        fn saved_order_with_duplicates_falls_back() {
            let l = ColumnLayout::with_saved_order(
                vec![spec("a", true), spec("b", true)],
                &saved(&["a", "a"]),
            );
            assert_eq!(order_of(&l), vec!["a", "b"]);
        }
    }

    mod set_order {
        use super::*;

        #[test]
        fn accepts_a_permutation() {
            let mut l = layout(&["a", "b", "c"]);
            assert!(l.set_order(vec![col("b"), col("c"), col("a")]));
            assert_eq!(order_of(&l), vec!["b", "c", "a"]);
        }

        #[test]
        fn rejects_a_non_permutation() {
            let mut l = layout(&["a", "b", "c"]);
            assert!(!l.set_order(vec![col("a"), col("b")]));
            assert_eq!(order_of(&l), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn ordered_iterates_specs_in_display_order() {
        let mut l = layout(&["a", "b", "c"]);
        l.reorder(&col("c"), &col("a"));
        let labels: Vec<&str> = l.ordered().map(|s| s.id.as_str()).collect();
        assert_eq!(labels, vec!["c", "a", "b"]);
    }
}
