// Source format selection

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use gridmon_engine::{Grid, GridMonitor};

use crate::error::LoadError;
use crate::{csv, json, text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `<rows> <cols>` header + whitespace-separated rows
    Text,
    Csv,
    Tsv,
    /// Array of row arrays
    Json,
}

impl SourceFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }

    /// Guess from the file extension. Files without one are read as text.
    pub fn infer(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            None | Some("txt") | Some("grid") | Some("dat") => Some(Self::Text),
            Some("csv") => Some(Self::Csv),
            Some("tsv") | Some("tab") => Some(Self::Tsv),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown source format '{other}' (expected text, csv, tsv or json)")),
        }
    }
}

pub fn read_grid(path: &Path, format: SourceFormat) -> Result<Grid<f64>, LoadError> {
    match format {
        SourceFormat::Text => text::read_grid(path),
        SourceFormat::Csv => csv::import(path),
        SourceFormat::Tsv => csv::import_tsv(path),
        SourceFormat::Json => json::import(path),
    }
}

/// Parse already-decoded content (stdin, tests).
pub fn parse_grid(content: &str, format: SourceFormat) -> Result<Grid<f64>, LoadError> {
    match format {
        SourceFormat::Text => text::parse_str(content),
        SourceFormat::Csv => csv::import_from_string(content, csv::sniff_delimiter(content)),
        SourceFormat::Tsv => csv::import_from_string(content, b'\t'),
        SourceFormat::Json => json::import_from_str(content),
    }
}

pub fn load_monitor(path: &Path, format: SourceFormat) -> Result<GridMonitor, LoadError> {
    let grid = read_grid(path, format)?;
    log::debug!("read {} grid {}x{} from {}", format, grid.rows(), grid.cols(), path.display());
    Ok(GridMonitor::from_grid(grid))
}
