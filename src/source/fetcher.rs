//! Off-thread page fetching.
//!
//! The event loop must never block on the data source, so fetches run on
//! a dedicated worker thread and results come back over a channel drained
//! by a non-blocking [`PageFetcher::poll`].
//!
//! # Stale-response guard
//!
//! Every request is tagged with the fetcher's current [`Epoch`]. Changing
//! the sort key bumps the epoch ([`PageFetcher::rekey`]); responses that
//! arrive tagged with an older epoch belong to an abandoned sort order
//! and are dropped without reaching the row store. There is no explicit
//! cancellation — a late fetch simply completes into the void.

use crate::model::{FetchError, Page, PageIndex, SortSpec};
use crate::source::DataSource;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{debug, warn};

/// Fetch generation counter. Bumped on every sort change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Epoch(u64);

impl Epoch {
    fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

struct FetchRequest {
    epoch: Epoch,
    page: PageIndex,
    offset: usize,
    page_size: usize,
    sort: Option<SortSpec>,
}

struct FetchResponse {
    epoch: Epoch,
    page: PageIndex,
    result: Result<Page, FetchError>,
}

/// A completed fetch, delivered by [`PageFetcher::poll`].
#[derive(Debug)]
pub enum FetchEvent {
    /// A page arrived for the current epoch.
    Page {
        /// Requested page index (NOT arrival order).
        index: PageIndex,
        page: Page,
    },
    /// A fetch failed. The grid surfaces this as a notice; the fetcher
    /// does not retry on its own.
    Failed(FetchError),
}

/// Sequential page requester with an off-thread worker.
///
/// Owns the request cursor: pages are always requested in order
/// (0, 1, 2, ...) for the current epoch, so the row store can rely on
/// page indices being gapless.
pub struct PageFetcher {
    request_tx: Option<Sender<FetchRequest>>,
    response_rx: Receiver<FetchResponse>,
    epoch: Epoch,
    page_size: usize,
    next_page: PageIndex,
    in_flight: usize,
    disconnected: bool,
}

impl PageFetcher {
    /// Spawn the fetch worker around the given source.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned.
    pub fn spawn(
        mut source: Box<dyn DataSource>,
        page_size: usize,
    ) -> Result<Self, std::io::Error> {
        let (request_tx, request_rx) = mpsc::channel::<FetchRequest>();
        let (response_tx, response_rx) = mpsc::channel();

        thread::Builder::new()
            .name("vgrid-fetch".to_string())
            .spawn(move || {
                while let Ok(req) = request_rx.recv() {
                    let result = source.fetch_page(req.offset, req.page_size, req.sort.as_ref());
                    let response = FetchResponse {
                        epoch: req.epoch,
                        page: req.page,
                        result,
                    };
                    if response_tx.send(response).is_err() {
                        // Receiver gone: the fetcher was dropped.
                        break;
                    }
                }
            })?;

        Ok(Self {
            request_tx: Some(request_tx),
            response_rx,
            epoch: Epoch::default(),
            page_size: page_size.max(1),
            next_page: PageIndex::ZERO,
            in_flight: 0,
            disconnected: false,
        })
    }

    /// Whether a fetch is currently pending.
    ///
    /// This is the debounce flag for the fetch-more trigger: while true,
    /// scroll events must not issue another request.
    pub fn is_fetching(&self) -> bool {
        self.in_flight > 0
    }

    /// Number of pages requested so far in the current epoch.
    pub fn pages_requested(&self) -> usize {
        self.next_page.get()
    }

    /// Configured page size in rows.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Request the next sequential page under the given sort key.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Disconnected`] if the worker is gone.
    pub fn request_next_page(&mut self, sort: Option<&SortSpec>) -> Result<(), FetchError> {
        let request = FetchRequest {
            epoch: self.epoch,
            page: self.next_page,
            offset: self.next_page.offset(self.page_size),
            page_size: self.page_size,
            sort: sort.cloned(),
        };
        let sent = self
            .request_tx
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok());
        if !sent {
            warn!("Fetch worker unavailable, dropping page request");
            return Err(FetchError::Disconnected);
        }
        debug!(page = self.next_page.get(), "Requested page");
        self.in_flight += 1;
        self.next_page = self.next_page.next();
        Ok(())
    }

    /// Start a new fetch generation (the sort key changed).
    ///
    /// Resets the request cursor to page 0 and abandons all in-flight
    /// requests: their responses will carry the old epoch and be dropped
    /// by [`poll`](Self::poll).
    pub fn rekey(&mut self) {
        self.epoch = self.epoch.next();
        self.next_page = PageIndex::ZERO;
        self.in_flight = 0;
    }

    /// Drain completed fetches without blocking.
    ///
    /// Stale responses (older epoch) are logged and discarded; they do
    /// not affect the in-flight count, which was reset at rekey time.
    pub fn poll(&mut self) -> Vec<FetchEvent> {
        let mut events = Vec::new();
        loop {
            match self.response_rx.try_recv() {
                Ok(response) => {
                    if response.epoch != self.epoch {
                        debug!(page = response.page.get(), "Dropping stale fetch response");
                        continue;
                    }
                    self.in_flight = self.in_flight.saturating_sub(1);
                    match response.result {
                        Ok(page) => events.push(FetchEvent::Page {
                            index: response.page,
                            page,
                        }),
                        Err(err) => events.push(FetchEvent::Failed(err)),
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        self.disconnected = true;
                        self.in_flight = 0;
                        events.push(FetchEvent::Failed(FetchError::Disconnected));
                    }
                    break;
                }
            }
        }
        events
    }
}

impl Drop for PageFetcher {
    fn drop(&mut self) {
        // Hang up the request channel; the worker exits after its current
        // fetch and is left to finish detached.
        self.request_tx.take();
    }
}
