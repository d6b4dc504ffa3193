//! `gridmon-engine`: neighbor statistics and danger flags over a numeric grid.
//!
//! Pure engine crate: receives an in-memory grid, returns derived grids.
//! No file or CLI dependencies.

pub mod error;
pub mod grid;
pub mod monitor;
pub mod pipeline;
pub mod report;

pub use error::GridError;
pub use grid::Grid;
pub use monitor::{DangerCell, GridMonitor, Snapshot};
pub use report::ReportStyle;
