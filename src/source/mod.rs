//! Incremental data sources.
//!
//! This module is the boundary between the grid and whatever produces its
//! rows:
//! - [`DataSource`] — the fetch-page contract
//! - [`MemorySource`] — seeded in-memory backend with simulated latency
//! - [`PageFetcher`] — off-thread fetch execution with non-blocking
//!   `poll()` for event-loop integration and a stale-response guard

use crate::model::{FetchError, Page, SortSpec};

pub mod fetcher;
pub mod memory;

pub use fetcher::{FetchEvent, PageFetcher};
pub use memory::MemorySource;

/// Contract for producing pages of rows on demand.
///
/// Implementations must be idempotent for identical arguments: fetching
/// the same `(offset, page_size, sort)` twice yields the same page, so a
/// retry after a dropped response is always safe.
///
/// An implementation is an explicit object constructed per run (or per
/// test) — there is no shared global dataset.
pub trait DataSource: Send {
    /// Fetch `page_size` rows starting at `offset`, ordered by `sort`.
    ///
    /// The returned page carries the authoritative total row count for
    /// the dataset under this sort key. The final page may be short;
    /// `offset >= total` is an error.
    fn fetch_page(
        &mut self,
        offset: usize,
        page_size: usize,
        sort: Option<&SortSpec>,
    ) -> Result<Page, FetchError>;
}
