//! Whitespace-separated grid text format.
//!
//! ```text
//! <rows> <cols>
//! <v00> <v01> ... <v0(cols-1)>
//! ...
//! ```
//!
//! The header holds two positive integers. Exactly `rows` lines follow, each
//! with exactly `cols` finite real numbers separated by spaces or tabs.
//! Blank lines after the last row are ignored.

use std::io::Read;
use std::path::Path;

use gridmon_engine::{Grid, GridMonitor};

use crate::encoding;
use crate::error::{LoadError, MalformedReason};

/// Read a grid file and build a monitor from it.
pub fn load(path: &Path) -> Result<GridMonitor, LoadError> {
    Ok(GridMonitor::from_grid(read_grid(path)?))
}

pub fn read_grid(path: &Path) -> Result<Grid<f64>, LoadError> {
    let content = encoding::read_file_as_utf8(path)?;
    let grid = parse_str(&content)?;
    log::debug!("loaded {}x{} grid from {}", grid.rows(), grid.cols(), path.display());
    Ok(grid)
}

pub fn read_from<R: Read>(reader: R) -> Result<Grid<f64>, LoadError> {
    let content = encoding::read_as_utf8(reader)?;
    parse_str(&content)
}

pub fn monitor_from_str(content: &str) -> Result<GridMonitor, LoadError> {
    Ok(GridMonitor::from_grid(parse_str(content)?))
}

pub fn parse_str(content: &str) -> Result<Grid<f64>, LoadError> {
    let mut lines = content.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (header_line, header) = match lines.next() {
        Some((n, l)) if !l.trim().is_empty() => (n, l),
        _ => return Err(LoadError::malformed(1, MalformedReason::MissingHeader)),
    };
    let (rows, cols) = parse_header(header_line, header)?;

    // Grows with the data actually read; the header count is untrusted.
    let mut values = Vec::new();
    for found in 0..rows {
        let (line_no, line) = lines.next().ok_or_else(|| {
            LoadError::malformed(
                header_line + found + 1,
                MalformedReason::MissingRow { expected: rows, found },
            )
        })?;
        values.push(parse_row(line_no, line, cols)?);
    }

    if let Some((line_no, _)) = lines.find(|(_, l)| !l.trim().is_empty()) {
        return Err(LoadError::malformed(line_no, MalformedReason::TrailingData));
    }

    Ok(Grid::from_rows(values)?)
}

fn parse_header(line_no: usize, line: &str) -> Result<(usize, usize), LoadError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(LoadError::malformed(
            line_no,
            MalformedReason::HeaderTokenCount { found: tokens.len() },
        ));
    }

    let dimension = |token: &str| match token.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LoadError::malformed(
            line_no,
            MalformedReason::BadDimension { token: token.to_string() },
        )),
    };

    Ok((dimension(tokens[0])?, dimension(tokens[1])?))
}

fn parse_row(line_no: usize, line: &str, cols: usize) -> Result<Vec<f64>, LoadError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != cols {
        return Err(LoadError::malformed(
            line_no,
            MalformedReason::WrongTokenCount { expected: cols, found: tokens.len() },
        ));
    }

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| parse_reading(line_no, i + 1, token))
        .collect()
}

/// Parse one reading. Shared with the CSV source.
pub(crate) fn parse_reading(line_no: usize, column: usize, token: &str) -> Result<f64, LoadError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(LoadError::malformed(
            line_no,
            MalformedReason::NonFinite { column, token: token.to_string() },
        )),
        Err(_) => Err(LoadError::malformed(
            line_no,
            MalformedReason::BadNumber { column, token: token.to_string() },
        )),
    }
}
