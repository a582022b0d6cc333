//! Windowing layer — scroll math and visible-range calculation.
//!
//! # Module Structure
//!
//! - `height_index`: Fenwick-tree prefix sums over row heights
//! - `heights`: estimate-backed heights with identity-tagged measurements
//! - `window`: `RowWindow` — the materialized row range
//! - `windower`: the windowing coordinator (scroll, overscan, fetch-more)

pub mod height_index;
pub mod heights;
pub mod window;
pub mod windower;

pub use height_index::HeightIndex;
pub use heights::RowHeights;
pub use window::RowWindow;
pub use windower::{WindowParams, Windower};
