// JSON grid import and snapshot export

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use gridmon_engine::{Grid, GridMonitor};

use crate::encoding::read_file_as_utf8;
use crate::error::{LoadError, MalformedReason};

/// Import a grid stored as an array of row arrays: `[[1, 2], [3, 4]]`
pub fn import(path: &Path) -> Result<Grid<f64>, LoadError> {
    let content = read_file_as_utf8(path)?;
    import_from_str(&content)
}

pub fn import_from_str(content: &str) -> Result<Grid<f64>, LoadError> {
    // Shape errors surface as InvalidGrid rather than a serde message
    let rows: Vec<Vec<f64>> = serde_json::from_str(content)
        .map_err(|e| LoadError::malformed(e.line().max(1), MalformedReason::Syntax(e.to_string())))?;
    Ok(Grid::from_rows(rows)?)
}

/// Pretty-printed snapshot of every grid in the monitor.
pub fn snapshot_to_string(monitor: &GridMonitor) -> Result<String, String> {
    serde_json::to_string_pretty(&monitor.snapshot()).map_err(|e| e.to_string())
}

pub fn export(monitor: &GridMonitor, path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &monitor.snapshot()).map_err(|e| e.to_string())?;
    Ok(())
}
