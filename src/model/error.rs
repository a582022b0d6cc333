//! Error taxonomy.
//!
//! Hierarchical errors built on `thiserror`, composing via `?` and `From`
//! conversions:
//!
//! - [`AppError`] — top-level application error
//!   - [`FetchError`] — page-fetch failures from the data source
//!   - [`PersistError`] — column-order persistence write failures
//!   - `std::io::Error` — terminal/TUI failures
//!
//! Fetch failures are non-fatal: the grid surfaces a data-unavailable
//! notice and keeps whatever rows are already loaded. Persistence write
//! failures are logged and otherwise ignored. Terminal errors are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// A page fetch failed. Non-fatal: surfaced as a notice in the UI.
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    /// Persisting UI state failed. Non-fatal: logged, execution continues.
    #[error("Failed to persist state: {0}")]
    Persist(#[from] PersistError),

    /// Terminal or TUI rendering error. Fatal: without a working terminal
    /// the application cannot continue.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors produced by a [`DataSource`](crate::source::DataSource) when
/// fetching a page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The requested offset lies beyond the dataset.
    ///
    /// The coordinator only requests pages while `total_fetched <
    /// total_row_count`, so this indicates a disagreement between the
    /// source's advertised total and its actual extent.
    #[error("Requested offset {offset} beyond dataset of {total} rows")]
    OutOfRange {
        /// Offset that was requested.
        offset: usize,
        /// Actual dataset size.
        total: usize,
    },

    /// The fetch worker is gone (channel disconnected). Requests can no
    /// longer be serviced this session.
    #[error("Fetch worker disconnected")]
    Disconnected,

    /// Backend-specific failure, carried as text for display.
    #[error("Fetch failed: {reason}")]
    Failed {
        /// Description of what went wrong.
        reason: String,
    },
}

/// Errors writing persisted UI state (column order) to disk.
///
/// Read-side failures are deliberately NOT errors: a missing or corrupt
/// stored value falls back to the default order (see
/// [`load_column_order`](crate::config::load_column_order)).
#[derive(Debug, Error)]
pub enum PersistError {
    /// Failed to create the state directory or write the file.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the value.
    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}
