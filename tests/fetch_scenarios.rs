//! Scenario tests for the windowing-and-incremental-fetch coordination.
//!
//! Drives the pure pieces (windower, row store, data source) through the
//! same cycle the event loop runs, with synchronous fetches so every
//! step is deterministic. Reference tuning throughout: 33-unit rows,
//! 600-unit viewport, 500-unit fetch threshold, 100-row pages.

use vgrid::model::{FetchError, PageIndex};
use vgrid::source::{DataSource, MemorySource};
use vgrid::state::{applicant_columns, ColumnLayout, RowStore};
use vgrid::view_state::{WindowParams, Windower};

/// Minimal synchronous stand-in for the event loop's fetch cycle.
struct Harness {
    source: MemorySource,
    store: RowStore,
    windower: Windower,
    page_size: usize,
    /// Requested page index of the in-flight fetch, if any.
    pending: Option<PageIndex>,
    fetches: usize,
}

impl Harness {
    fn new(rows: usize) -> Self {
        let mut windower = Windower::new(WindowParams::default());
        windower.set_viewport_height(600);
        Self {
            source: MemorySource::new(rows, 42),
            store: RowStore::new(),
            windower,
            page_size: 100,
            pending: None,
            fetches: 0,
        }
    }

    /// Issue the next page request if the trigger fires. Returns whether
    /// a request was issued.
    fn maybe_request(&mut self) -> bool {
        let fire = self.windower.should_fetch_more(
            self.pending.is_some(),
            self.store.len(),
            self.store.total_db_rows(),
        );
        if fire {
            self.request_next();
        }
        fire
    }

    /// Unconditionally request the next sequential page (startup path).
    fn request_next(&mut self) {
        assert!(self.pending.is_none(), "one fetch in flight at a time");
        self.pending = Some(PageIndex::new(self.store.len() / self.page_size));
        self.fetches += 1;
    }

    /// Complete the in-flight fetch synchronously.
    fn complete(&mut self) -> Result<(), FetchError> {
        let index = self.pending.take().expect("a fetch is in flight");
        let page = self
            .source
            .fetch_page(index.offset(self.page_size), self.page_size, None)?;
        self.store.accept(index, page);
        self.windower.set_row_count(self.store.len());
        Ok(())
    }
}

#[test]
fn three_pages_fetch_at_boundaries_and_stop_at_the_total() {
    let mut h = Harness::new(250);

    // Startup: page 0.
    h.request_next();
    h.complete().expect("page 0");
    assert_eq!(h.store.len(), 100);
    assert_eq!(h.store.total_db_rows(), Some(250));

    // At the top nothing fires: 3300 - 0 - 600 = 2700 units below.
    assert!(!h.maybe_request());

    // Exactly at the threshold boundary nothing fires (strict <).
    h.windower.scroll_to(2200); // 3300 - 2200 - 600 == 500
    assert!(!h.maybe_request());

    // One unit further the trigger crosses the threshold: page 1.
    h.windower.scroll_to(2201);
    assert!(h.maybe_request());
    h.complete().expect("page 1");
    assert_eq!(h.store.len(), 200);

    // New extent 6600; the same position is far from the new bottom.
    assert!(!h.maybe_request());

    // Chase the bottom again: page 2 (the short final page).
    h.windower.scroll_to(h.windower.max_scroll());
    assert!(h.maybe_request());
    h.complete().expect("page 2");
    assert_eq!(h.store.len(), 250);
    assert!(h.store.fully_loaded());

    // Scrolled hard against the end with everything loaded: the trigger
    // must stay quiet no matter how often the scroll repeats.
    h.windower.scroll_to(h.windower.max_scroll());
    for _ in 0..10 {
        assert!(!h.maybe_request());
    }
    assert_eq!(h.fetches, 3);
}

#[test]
fn repeated_scroll_events_do_not_stack_requests_while_pending() {
    let mut h = Harness::new(250);
    h.request_next();
    h.complete().expect("page 0");

    h.windower.scroll_to(h.windower.max_scroll());
    assert!(h.maybe_request(), "first qualifying scroll fires");

    // The fetch is pending: further scroll events at (and around) the
    // same position must not fire again.
    for offset in [2700, 2650, 2700, 2699, 2700] {
        h.windower.scroll_to(offset);
        assert!(!h.maybe_request());
    }
    assert_eq!(h.fetches, 2, "exactly one request per threshold crossing");

    h.complete().expect("page 1");
    h.windower.scroll_to(h.windower.max_scroll());
    assert!(h.maybe_request(), "after delivery the trigger re-arms");
}

#[test]
fn fetch_failure_leaves_loaded_rows_and_rearms_on_next_scroll() {
    let mut h = Harness::new(250);
    h.request_next();
    h.complete().expect("page 0");

    // Simulate a failing fetch: the pending flag clears, loaded rows
    // stay, and the next qualifying scroll re-attempts.
    h.windower.scroll_to(h.windower.max_scroll());
    assert!(h.maybe_request());
    h.pending = None; // the response was an error
    assert_eq!(h.store.len(), 100, "window degrades to loaded rows");

    h.windower.scroll_to(h.windower.max_scroll());
    assert!(h.maybe_request(), "re-attempt on the next qualifying scroll");
    h.complete().expect("page 1");
    assert_eq!(h.store.len(), 200);
}

#[test]
fn empty_dataset_never_triggers_a_fetch() {
    let mut h = Harness::new(0);
    h.request_next();
    h.complete().expect("empty page 0");

    assert_eq!(h.store.len(), 0);
    assert_eq!(h.store.total_db_rows(), Some(0));

    let window = h.windower.window();
    assert_eq!((window.start, window.end), (0, 0));
    assert!(!h.maybe_request(), "empty list fetches nothing");
    assert_eq!(h.fetches, 1, "only the startup request");
}

#[test]
fn unknown_total_disables_the_trigger() {
    let h = Harness::new(250);
    // No page has arrived: totalDBRowCount is unknown.
    assert_eq!(h.store.total_db_rows(), None);
    assert!(!h.windower.should_fetch_more(false, 0, None));
}

#[test]
fn corrupt_persisted_order_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("column_order.json");
    std::fs::write(&path, "][ not json").expect("write corrupt state");

    // Load yields None; the caller supplies its default order and the
    // page renders with it rather than failing.
    let saved = vgrid::config::load_column_order(&path);
    assert_eq!(saved, None);

    let layout = match saved {
        Some(saved) => ColumnLayout::with_saved_order(applicant_columns(), &saved),
        None => ColumnLayout::new(applicant_columns()),
    };
    assert_eq!(layout.order()[0].as_str(), "select");
    assert_eq!(layout.len(), applicant_columns().len());
}
