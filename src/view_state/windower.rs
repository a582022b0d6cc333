//! Windowing coordinator.
//!
//! Owns the scroll offset and per-row heights for the rendered list and
//! answers two questions every frame:
//!
//! 1. which contiguous row range must be materialized ([`window`](Windower::window)),
//! 2. whether the user is close enough to the end of loaded data that the
//!    next page should be fetched ([`should_fetch_more`](Windower::should_fetch_more)).
//!
//! The coordinator is unit-agnostic: heights and offsets share one unit
//! (pixels in the reference defaults, terminal lines in the TUI).

use crate::model::RowId;
use crate::view_state::heights::RowHeights;
use crate::view_state::window::RowWindow;
use tracing::debug;

/// Tuning parameters for the windowing coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    /// Assumed row height before (or instead of) measurement.
    pub estimate: usize,
    /// Extra rows rendered above and below the visible range to mask
    /// scroll latency.
    pub overscan: usize,
    /// Fetch the next page when the remaining scrollable distance below
    /// the viewport drops under this.
    pub fetch_threshold: usize,
    /// Whether measured heights from the rendering surface are accepted.
    /// When false the estimate is authoritative (fast path).
    pub measured: bool,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            estimate: 33,
            overscan: 5,
            fetch_threshold: 500,
            measured: false,
        }
    }
}

/// Scroll + window state for one virtualized list.
#[derive(Debug, Clone)]
pub struct Windower {
    params: WindowParams,
    heights: RowHeights,
    scroll_offset: usize,
    viewport_height: usize,
}

impl Windower {
    pub fn new(params: WindowParams) -> Self {
        Self {
            params,
            heights: RowHeights::new(params.estimate),
            scroll_offset: 0,
            viewport_height: 0,
        }
    }

    pub fn params(&self) -> &WindowParams {
        &self.params
    }

    pub fn row_count(&self) -> usize {
        self.heights.len()
    }

    /// Total content extent (the scroll spacer size).
    pub fn total_extent(&self) -> usize {
        self.heights.total()
    }

    // ===== Viewport & rows =====

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Update the viewport height (e.g. on terminal resize). The scroll
    /// offset is re-clamped so the viewport never hangs past the end.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Update the number of rows the window ranges over.
    ///
    /// Growth (more pages arrived) keeps measurements; shrinking resets
    /// them, since index identities changed.
    pub fn set_row_count(&mut self, count: usize) {
        self.heights.set_len(count);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Feed back a measured row height after layout. Ignored unless
    /// measured mode is on.
    pub fn record_height(&mut self, index: usize, id: RowId, height: usize) -> bool {
        if !self.params.measured {
            return false;
        }
        self.heights.record(index, id, height)
    }

    /// True if any measured height is currently cached.
    pub fn has_measurements(&self) -> bool {
        self.heights.has_measurements()
    }

    /// Sort-change reset: scroll returns to the top and every measured
    /// height is dropped — cached heights belong to the old ordering.
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.heights.reset_measurements();
        debug!("Windower reset: scroll to top, measured heights cleared");
    }

    // ===== Scrolling =====

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> usize {
        self.total_extent().saturating_sub(self.viewport_height)
    }

    /// Jump to an absolute offset, clamped to the valid range.
    pub fn scroll_to(&mut self, offset: usize) {
        self.scroll_offset = offset.min(self.max_scroll());
    }

    /// Scroll by a signed amount, clamped at both ends.
    pub fn scroll_by(&mut self, delta: isize) {
        let next = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as usize)
        };
        self.scroll_to(next);
    }

    /// Scroll the minimum amount needed to bring a row fully into view.
    pub fn ensure_visible(&mut self, index: usize) {
        if index >= self.heights.len() {
            return;
        }
        let top = self.heights.offset_of(index);
        let bottom = top + self.heights.height_of(index);
        if top < self.scroll_offset {
            self.scroll_to(top);
        } else if bottom > self.scroll_offset + self.viewport_height {
            self.scroll_to(bottom.saturating_sub(self.viewport_height));
        }
    }

    // ===== Outputs =====

    /// Compute the row window for the current scroll position.
    ///
    /// Empty list → `[0, 0)`. Otherwise the visible range is found by
    /// binary search over cumulative heights and widened by the overscan
    /// margin on both sides, clamped to the row count.
    pub fn window(&self) -> RowWindow {
        let count = self.heights.len();
        let total_extent = self.heights.total();
        if count == 0 || self.viewport_height == 0 {
            return RowWindow {
                start: 0,
                end: 0,
                offset_y: 0,
                total_extent,
            };
        }

        let scroll = self.scroll_offset.min(self.max_scroll());
        let first = self.heights.index_at(scroll).unwrap_or(count - 1);
        let last = self
            .heights
            .index_at(scroll + self.viewport_height - 1)
            .unwrap_or(count - 1);

        let start = first.saturating_sub(self.params.overscan);
        let end = (last + 1 + self.params.overscan).min(count);
        RowWindow {
            start,
            end,
            offset_y: self.heights.offset_of(start),
            total_extent,
        }
    }

    /// Decide whether the next page should be requested now.
    ///
    /// Fires only when all of these hold:
    /// - no fetch is already in flight (the debounce flag),
    /// - at least one row is loaded and the authoritative total is known,
    /// - more rows exist than are loaded,
    /// - the remaining content below the viewport is within
    ///   `fetch_threshold`.
    ///
    /// A failed fetch clears the in-flight flag upstream, so the next
    /// qualifying scroll event re-attempts naturally; there is no retry
    /// loop here.
    pub fn should_fetch_more(
        &self,
        is_fetching: bool,
        total_fetched: usize,
        total_db_rows: Option<usize>,
    ) -> bool {
        if is_fetching || self.heights.is_empty() {
            return false;
        }
        let Some(total) = total_db_rows else {
            // Total unknown until the first page lands.
            return false;
        };
        if total_fetched >= total {
            return false;
        }
        let below = self
            .total_extent()
            .saturating_sub(self.scroll_offset + self.viewport_height);
        below < self.params.fetch_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference-tuned windower: 33-unit rows, 5 overscan, 500 threshold.
    fn reference(rows: usize, viewport: usize) -> Windower {
        let mut windower = Windower::new(WindowParams::default());
        windower.set_viewport_height(viewport);
        windower.set_row_count(rows);
        windower
    }

    mod window {
        use super::*;

        #[test]
        fn empty_list_yields_empty_window_at_zero() {
            let windower = reference(0, 600);
            let w = windower.window();
            assert_eq!((w.start, w.end), (0, 0));
            assert_eq!(w.total_extent, 0);
        }

        #[test]
        fn zero_viewport_yields_empty_window() {
            let windower = reference(100, 0);
            assert!(windower.window().is_empty());
        }

        #[test]
        fn window_at_top_starts_at_zero_with_trailing_overscan() {
            let windower = reference(1000, 600);
            let w = windower.window();
            assert_eq!(w.start, 0);
            // ceil(600 / 33) = 19 visible rows, plus 5 overscan below.
            assert_eq!(w.end, 24);
            assert_eq!(w.offset_y, 0);
            assert_eq!(w.total_extent, 33_000);
        }

        #[test]
        fn window_mid_scroll_is_overscanned_both_sides() {
            let mut windower = reference(1000, 600);
            windower.scroll_to(33 * 100); // row 100 at the top edge
            let w = windower.window();
            assert_eq!(w.start, 95);
            assert!(w.contains(100));
            assert_eq!(w.offset_y, 95 * 33);
            // 19 visible + 5 + 5 overscan.
            assert_eq!(w.len(), 29);
        }

        #[test]
        fn window_is_clamped_at_the_end_of_the_list() {
            let mut windower = reference(100, 600);
            windower.scroll_to(usize::MAX); // clamps to max_scroll
            let w = windower.window();
            assert_eq!(w.end, 100);
            assert!(w.start <= w.end);
            assert!(w.contains(99));
        }

        #[test]
        fn window_size_is_bounded_by_viewport_rows_plus_overscan() {
            let windower = reference(1000, 600);
            let viewport_rows = 600usize.div_ceil(33) + 1;
            let bound = viewport_rows + 2 * windower.params().overscan;
            for offset in [0, 100, 5000, 16_000, 32_000, usize::MAX] {
                let mut w = windower.clone();
                w.scroll_to(offset);
                assert!(
                    w.window().len() <= bound,
                    "window too large at offset {offset}"
                );
            }
        }
    }

    mod scrolling {
        use super::*;

        #[test]
        fn scroll_is_clamped_to_content() {
            let mut windower = reference(10, 100);
            // 10 rows * 33 = 330 extent; max scroll = 230.
            windower.scroll_to(10_000);
            assert_eq!(windower.scroll_offset(), 230);
        }

        #[test]
        fn scroll_by_saturates_at_the_top() {
            let mut windower = reference(100, 100);
            windower.scroll_by(-500);
            assert_eq!(windower.scroll_offset(), 0);
        }

        #[test]
        fn ensure_visible_scrolls_down_minimally() {
            let mut windower = reference(100, 99); // 3 rows visible
            windower.ensure_visible(10);
            // Row 10 spans [330, 363); bottom-aligned => 363 - 99.
            assert_eq!(windower.scroll_offset(), 264);
        }

        #[test]
        fn ensure_visible_scrolls_up_to_the_row_top() {
            let mut windower = reference(100, 99);
            windower.scroll_to(1000);
            windower.ensure_visible(10);
            assert_eq!(windower.scroll_offset(), 330);
        }

        #[test]
        fn ensure_visible_ignores_rows_already_in_view() {
            let mut windower = reference(100, 99);
            windower.scroll_to(330);
            windower.ensure_visible(11);
            assert_eq!(windower.scroll_offset(), 330);
        }
    }

    mod fetch_more {
        use super::*;

        #[test]
        fn fires_near_the_bottom_of_loaded_content() {
            let mut windower = reference(100, 600);
            windower.scroll_to(windower.max_scroll());
            assert!(windower.should_fetch_more(false, 100, Some(250)));
        }

        #[test]
        fn does_not_fire_far_from_the_bottom() {
            let windower = reference(100, 600);
            // At the top: 3300 - 0 - 600 = 2700 >= 500.
            assert!(!windower.should_fetch_more(false, 100, Some(250)));
        }

        #[test]
        fn debounced_while_a_fetch_is_in_flight() {
            let mut windower = reference(100, 600);
            windower.scroll_to(windower.max_scroll());
            assert!(!windower.should_fetch_more(true, 100, Some(250)));
        }

        #[test]
        fn disabled_while_total_is_unknown() {
            let mut windower = reference(100, 600);
            windower.scroll_to(windower.max_scroll());
            assert!(!windower.should_fetch_more(false, 100, None));
        }

        #[test]
        fn never_fires_once_everything_is_loaded() {
            let mut windower = reference(250, 600);
            windower.scroll_to(windower.max_scroll());
            assert!(!windower.should_fetch_more(false, 250, Some(250)));
        }

        #[test]
        fn never_fires_on_an_empty_list() {
            let windower = reference(0, 600);
            assert!(!windower.should_fetch_more(false, 0, Some(250)));
            assert!(!windower.should_fetch_more(false, 0, Some(0)));
        }
    }

    mod measurement {
        use super::*;

        fn measured(rows: usize, viewport: usize) -> Windower {
            let mut windower = Windower::new(WindowParams {
                estimate: 1,
                overscan: 2,
                fetch_threshold: 10,
                measured: true,
            });
            windower.set_viewport_height(viewport);
            windower.set_row_count(rows);
            windower
        }

        #[test]
        fn measured_heights_change_the_extent() {
            let mut windower = measured(10, 5);
            assert_eq!(windower.total_extent(), 10);
            assert!(windower.record_height(0, RowId::new(1), 3));
            assert_eq!(windower.total_extent(), 12);
        }

        #[test]
        fn estimated_mode_ignores_measurements() {
            let mut windower = reference(10, 100);
            assert!(!windower.record_height(0, RowId::new(1), 99));
            assert_eq!(windower.total_extent(), 330);
        }

        #[test]
        fn reset_clears_scroll_and_measurements() {
            let mut windower = measured(10, 5);
            windower.record_height(0, RowId::new(1), 3);
            windower.scroll_to(4);

            windower.reset();
            assert_eq!(windower.scroll_offset(), 0);
            assert!(!windower.has_measurements());
            assert_eq!(windower.total_extent(), 10, "back to estimates");
        }

        #[test]
        fn growth_after_fetch_keeps_measurements() {
            let mut windower = measured(10, 5);
            windower.record_height(0, RowId::new(1), 3);
            windower.set_row_count(20);
            assert!(windower.has_measurements());
            assert_eq!(windower.total_extent(), 3 + 19);
        }
    }
}
