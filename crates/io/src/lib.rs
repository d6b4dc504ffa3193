// Grid sources: text format, CSV/TSV, JSON

pub mod csv;
pub mod encoding;
pub mod error;
pub mod json;
pub mod source;
pub mod text;

pub use error::{LoadError, MalformedReason};
pub use source::{load_monitor, parse_grid, read_grid, SourceFormat};
