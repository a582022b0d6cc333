//! Top-level grid state.
//!
//! Pure composition of the sort machine, selection set, column layout,
//! pager, and row store. All transitions are plain methods testable
//! without a terminal; the event loop owns the impure pieces (fetcher,
//! persistence, rendering) and drives this state in response to input.

use crate::model::{Applicant, ColumnId, FetchError, Page, PageIndex, RowId, SortSpec};
use crate::state::{Change, ColumnLayout, ColumnSpec, Pager, RowStore, SelectionSet, SortState};
use std::ops::Range;
use tracing::info;

/// Column set of the applicant grid.
///
/// `select` and `index` are synthetic columns (checkbox and row number):
/// neither sorts nor initiates a reorder move.
pub fn applicant_columns() -> Vec<ColumnSpec> {
    fn col(id: &str) -> ColumnId {
        // Ids are compile-time constants and never empty.
        ColumnId::new(id).expect("column ids are non-empty")
    }
    vec![
        ColumnSpec {
            id: col("select"),
            label: "[ ]",
            width: 3,
            sortable: false,
            reorderable: false,
        },
        ColumnSpec {
            id: col("index"),
            label: "#",
            width: 6,
            sortable: false,
            reorderable: false,
        },
        ColumnSpec {
            id: col("name"),
            label: "Name",
            width: 20,
            sortable: true,
            reorderable: true,
        },
        ColumnSpec {
            id: col("age"),
            label: "Age",
            width: 5,
            sortable: true,
            reorderable: true,
        },
        ColumnSpec {
            id: col("visits"),
            label: "Visits",
            width: 8,
            sortable: true,
            reorderable: true,
        },
        ColumnSpec {
            id: col("city"),
            label: "City",
            width: 12,
            sortable: true,
            reorderable: true,
        },
        ColumnSpec {
            id: col("email"),
            label: "Email",
            width: 26,
            sortable: true,
            reorderable: true,
        },
        ColumnSpec {
            id: col("status"),
            label: "Status",
            width: 10,
            sortable: true,
            reorderable: true,
        },
        ColumnSpec {
            id: col("applied_at"),
            label: "Applied",
            width: 12,
            sortable: true,
            reorderable: true,
        },
    ]
}

/// Composed UI state for one grid.
#[derive(Debug)]
pub struct GridState {
    columns: ColumnLayout,
    sort: SortState,
    selection: SelectionSet,
    pager: Pager,
    rows: RowStore,
    notice: Option<String>,
}

impl GridState {
    pub fn new(columns: ColumnLayout) -> Self {
        Self {
            columns,
            sort: SortState::new(),
            selection: SelectionSet::new(),
            pager: Pager::default(),
            rows: RowStore::new(),
            notice: None,
        }
    }

    // ===== Columns =====

    pub fn columns(&self) -> &ColumnLayout {
        &self.columns
    }

    /// Apply a reorder gesture. Returns `true` if the order changed (the
    /// caller is then responsible for persisting the new order).
    pub fn reorder_column(&mut self, source: &ColumnId, target: &ColumnId) -> bool {
        let moved = self.columns.reorder(source, target);
        if moved {
            info!(source = %source, target = %target, "Column reordered");
        }
        moved
    }

    /// Replace the column order via an explicit change request.
    pub fn set_column_order(&mut self, change: Change<Vec<ColumnId>>) -> bool {
        let next = change.apply(&self.columns.order().to_vec());
        self.columns.set_order(next)
    }

    // ===== Sort =====

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Active sort spec handed to the data source with each fetch.
    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.spec()
    }

    /// Cycle the sort on a column.
    ///
    /// Non-sortable columns are ignored. On a real change every fetched
    /// page becomes invalid: the row store is cleared, the pager returns
    /// to the first page, and the caller must rekey the fetcher and reset
    /// the scroll position.
    pub fn toggle_sort(&mut self, column: &ColumnId) -> bool {
        let sortable = self
            .columns
            .spec(column)
            .is_some_and(|spec| spec.sortable);
        if !sortable {
            return false;
        }
        let changed = self.sort.toggle(column);
        if changed {
            info!(sort = ?self.sort.spec(), "Sort changed, discarding fetched pages");
            self.invalidate_rows();
        }
        changed
    }

    /// Sort change invalidation: loaded pages are stale, the pagination
    /// cursor resets. Selection survives — row ids are stable across
    /// refetches.
    fn invalidate_rows(&mut self) {
        self.rows.clear();
        self.pager.first();
        self.notice = None;
    }

    // ===== Rows =====

    pub fn rows(&self) -> &[Applicant] {
        self.rows.rows()
    }

    /// Loaded row count (`totalFetched`).
    pub fn total_fetched(&self) -> usize {
        self.rows.len()
    }

    pub fn total_db_rows(&self) -> Option<usize> {
        self.rows.total_db_rows()
    }

    pub fn fully_loaded(&self) -> bool {
        self.rows.fully_loaded()
    }

    /// Accept a fetched page; returns rows appended to the flat list.
    pub fn apply_page(&mut self, index: PageIndex, page: Page) -> usize {
        let appended = self.rows.accept(index, page);
        if appended > 0 {
            self.notice = None;
        }
        appended
    }

    /// Record a fetch failure as a data-unavailable notice. The grid
    /// keeps serving whatever is already loaded.
    pub fn fetch_failed(&mut self, err: &FetchError) {
        self.notice = Some(format!("Data unavailable: {err}"));
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    // ===== Pagination =====

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Index range of the current pagination page within the flat list.
    pub fn page_range(&self) -> Range<usize> {
        self.pager.slice(self.rows.len())
    }

    /// Rows of the current pagination page.
    pub fn page_rows(&self) -> &[Applicant] {
        &self.rows.rows()[self.page_range()]
    }

    pub fn next_page(&mut self) {
        self.pager.next(self.rows.len());
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
    }

    pub fn first_page(&mut self) {
        self.pager.first();
    }

    pub fn last_page(&mut self) {
        self.pager.last(self.rows.len());
    }

    pub fn cycle_page_size(&mut self) {
        self.pager.cycle_page_size();
    }

    // ===== Selection =====

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn toggle_row(&mut self, id: RowId) {
        self.selection.toggle(id);
    }

    /// Toggle every row on the current pagination page.
    pub fn toggle_page_selection(&mut self) {
        let ids: Vec<RowId> = self.page_rows().iter().map(|row| row.id).collect();
        self.selection.toggle_group(ids);
    }

    /// Toggle every loaded row.
    pub fn toggle_all_selection(&mut self) {
        let ids: Vec<RowId> = self.rows.rows().iter().map(|row| row.id).collect();
        self.selection.toggle_group(ids);
    }

    /// Are all rows on the current page selected (and the page non-empty)?
    pub fn page_fully_selected(&self) -> bool {
        let rows = self.page_rows();
        !rows.is_empty() && rows.iter().all(|row| self.selection.is_selected(row.id))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drop selection ids that no longer refer to loaded rows.
    pub fn prune_selection(&mut self) {
        self.selection.prune(&self.rows.loaded_ids());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use chrono::NaiveDate;

    fn col(id: &str) -> ColumnId {
        ColumnId::new(id).expect("valid id")
    }

    fn row(id: u64) -> Applicant {
        Applicant {
            id: RowId::new(id),
            name: format!("Row {id}"),
            age: 30,
            visits: 0,
            city: "Accra".to_string(),
            email: format!("row{id}@example.com"),
            status: Status::Pending,
            applied_at: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        }
    }

    fn page(ids: std::ops::Range<u64>, total: usize) -> Page {
        Page {
            rows: ids.map(row).collect(),
            total_row_count: total,
        }
    }

    fn grid() -> GridState {
        GridState::new(ColumnLayout::new(applicant_columns()))
    }

    fn grid_with_rows(n: u64) -> GridState {
        let mut g = grid();
        g.apply_page(PageIndex::new(0), page(0..n, n as usize));
        g
    }

    #[test]
    fn toggle_sort_on_sortable_column_clears_rows() {
        let mut g = grid_with_rows(10);
        assert_eq!(g.total_fetched(), 10);

        assert!(g.toggle_sort(&col("name")));
        assert_eq!(g.total_fetched(), 0, "fetched pages discarded");
        assert_eq!(g.total_db_rows(), None, "total unknown until refetch");
        assert_eq!(g.pager().page_index(), 0);
    }

    #[test]
    fn toggle_sort_on_non_sortable_column_is_ignored() {
        let mut g = grid_with_rows(10);
        assert!(!g.toggle_sort(&col("select")));
        assert!(!g.toggle_sort(&col("index")));
        assert_eq!(g.total_fetched(), 10, "rows untouched");
    }

    #[test]
    fn sort_cycle_back_to_none_also_invalidates() {
        let mut g = grid();
        g.toggle_sort(&col("age"));
        g.apply_page(PageIndex::new(0), page(0..5, 5));

        g.toggle_sort(&col("age")); // DESC
        assert_eq!(g.total_fetched(), 0);
        g.apply_page(PageIndex::new(0), page(0..5, 5));

        g.toggle_sort(&col("age")); // back to NONE
        assert!(g.sort_spec().is_none());
        assert_eq!(g.total_fetched(), 0);
    }

    #[test]
    fn selection_survives_sort_change() {
        let mut g = grid_with_rows(10);
        g.toggle_row(RowId::new(3));
        g.toggle_sort(&col("name"));
        assert!(g.is_selected(RowId::new(3)), "row ids are stable");
    }

    #[test]
    fn prune_selection_drops_unloaded_ids() {
        let mut g = grid_with_rows(10);
        g.toggle_row(RowId::new(3));
        g.toggle_sort(&col("name"));
        g.apply_page(PageIndex::new(0), page(5..10, 5));

        g.prune_selection();
        assert!(!g.is_selected(RowId::new(3)));
    }

    #[test]
    fn fetch_failure_sets_notice_and_next_page_clears_it() {
        let mut g = grid();
        g.fetch_failed(&FetchError::Failed {
            reason: "backend down".to_string(),
        });
        assert!(g.notice().is_some_and(|n| n.contains("Data unavailable")));

        g.apply_page(PageIndex::new(0), page(0..5, 5));
        assert!(g.notice().is_none());
    }

    #[test]
    fn page_rows_follow_the_pager() {
        let mut g = grid_with_rows(250);
        g.cycle_page_size(); // All -> 10
        assert_eq!(g.page_rows().len(), 10);
        g.next_page();
        assert_eq!(g.page_rows()[0].id, RowId::new(10));
    }

    #[test]
    fn toggle_page_selection_only_touches_the_page() {
        let mut g = grid_with_rows(30);
        g.cycle_page_size(); // 10 per page
        g.toggle_page_selection();
        assert_eq!(g.selected_count(), 10);
        assert!(g.page_fully_selected());

        g.next_page();
        assert!(!g.page_fully_selected());
        g.toggle_all_selection();
        assert_eq!(g.selected_count(), 30);
    }

    #[test]
    fn set_column_order_accepts_update_request() {
        let mut g = grid();
        let moved = g.set_column_order(Change::update(|order: &Vec<ColumnId>| {
            let mut next = order.clone();
            next.rotate_left(1);
            next
        }));
        assert!(moved);
        assert_eq!(g.columns().order()[0].as_str(), "index");
    }

    #[test]
    fn set_column_order_rejects_bad_set_request() {
        let mut g = grid();
        let before = g.columns().order().to_vec();
        assert!(!g.set_column_order(Change::Set(vec![col("name")])));
        assert_eq!(g.columns().order(), before.as_slice());
    }

    #[test]
    fn reorder_column_moves_and_reports() {
        let mut g = grid();
        assert!(g.reorder_column(&col("status"), &col("name")));
        let order: Vec<&str> = g.columns().order().iter().map(|c| c.as_str()).collect();
        let status_at = order.iter().position(|c| *c == "status").expect("status");
        let name_at = order.iter().position(|c| *c == "name").expect("name");
        assert!(status_at < name_at);
    }
}
