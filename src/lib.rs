//! vgrid — a virtualized TUI data grid.
//!
//! Renders a large tabular dataset with windowed scrolling, incremental
//! page fetch, single-column sorting, row selection, pagination, and
//! persisted column reordering. Pure Core / Impure Shell: `state` and
//! `view_state` are plain data and transitions; `source`, `config`,
//! `logging`, and `view` own the I/O around them.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
