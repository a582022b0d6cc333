//! TUI rendering and terminal management (impure shell)

pub mod run;
pub mod styles;
pub mod table;

pub use run::{run, GridApp, TuiError};
pub use styles::{ColorConfig, GridStyles};
