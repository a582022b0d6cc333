//! Applicant records: the row type displayed by the grid.

use crate::model::RowId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Accepted,
    Rejected,
}

impl Status {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Accepted => "Accepted",
            Status::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single applicant row.
///
/// Immutable once fetched; the row store only ever appends and replaces
/// whole pages, it never mutates individual records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    /// Stable identity assigned by the data source.
    pub id: RowId,
    pub name: String,
    pub age: u8,
    pub visits: u32,
    pub city: String,
    /// Contact for follow-up or verification.
    pub email: String,
    pub status: Status,
    /// Date the application was submitted.
    pub applied_at: NaiveDate,
}
