//! Core identifier newtypes.
//!
//! Column identifiers validate non-empty strings at construction time;
//! the raw constructor is never exported.

use std::fmt;

/// Stable identity of a row, assigned by the data source.
///
/// Survives refetches: the same backing record keeps the same `RowId`
/// regardless of sort order or fetch position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    /// Create a row id from the source-assigned value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a column in the grid (e.g. `"name"`, `"status"`).
///
/// Column order is persisted as a sequence of these ids, so they must be
/// non-empty. Smart constructor only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnId(String);

impl ColumnId {
    /// Smart constructor: validates a non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidColumnId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidColumnId::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned by [`ColumnId::new`] for invalid input.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidColumnId {
    #[error("Column ID cannot be empty")]
    Empty,
}
