//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without a TUI.

pub mod change;
pub mod column_layout;
pub mod grid;
pub mod pager;
pub mod rows;
pub mod selection;
pub mod sort;

// Re-export for convenience
pub use change::Change;
pub use column_layout::{ColumnLayout, ColumnSpec};
pub use grid::{applicant_columns, GridState};
pub use pager::{PageSize, Pager, PAGE_SIZE_CHOICES};
pub use rows::RowStore;
pub use selection::SelectionSet;
pub use sort::SortState;
