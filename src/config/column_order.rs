//! Column-order persistence.
//!
//! The user's column order survives sessions as a small JSON array of
//! column ids in a state file. Reads are infallible by design: a missing
//! file, unreadable file, or corrupt payload all yield `None`, and the
//! caller falls back to its default order — a stale state file must
//! never break startup. Writes report failure so the caller can log it,
//! but callers are expected to continue regardless.

use crate::model::{ColumnId, PersistError};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default location of the persisted column order
/// (`~/.local/share/vgrid/column_order.json` on Unix-like systems).
pub fn default_column_order_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("vgrid").join("column_order.json")
    } else {
        PathBuf::from("column_order.json")
    }
}

/// Load a previously saved column order.
///
/// Returns `None` when the file is missing, unreadable, or does not
/// contain a JSON array of strings. Never fails.
pub fn load_column_order(path: &Path) -> Option<Vec<String>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), %err, "Could not read column order, using default");
            return None;
        }
    };
    match serde_json::from_str::<Vec<String>>(&contents) {
        Ok(order) => {
            debug!(path = %path.display(), ?order, "Loaded persisted column order");
            Some(order)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "Corrupt column order, using default");
            None
        }
    }
}

/// Persist the column order, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`PersistError`] when the directory cannot be created or the
/// file cannot be written. Callers log and continue — losing the saved
/// order is never fatal.
pub fn save_column_order(path: &Path, order: &[ColumnId]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| PersistError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let raw: Vec<&str> = order.iter().map(ColumnId::as_str).collect();
    let payload = serde_json::to_string_pretty(&raw)?;
    std::fs::write(path, payload).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Saved column order");
    Ok(())
}
