// CSV/TSV grid import
//
// Headerless: every record is a grid row, every field a reading.

use std::path::Path;

use gridmon_engine::Grid;

use crate::encoding::read_file_as_utf8;
use crate::error::{LoadError, MalformedReason};
use crate::text::parse_reading;

pub fn import(path: &Path) -> Result<Grid<f64>, LoadError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    log::debug!("sniffed delimiter {:?} for {}", delimiter as char, path.display());
    import_from_string(&content, delimiter)
}

pub fn import_tsv(path: &Path) -> Result<Grid<f64>, LoadError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t')
}

pub fn import_with_delimiter(path: &Path, delimiter: u8) -> Result<Grid<f64>, LoadError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, delimiter)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins. A single-column file
/// falls back to comma.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (lines with the same field count as line 1) * field_count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

pub fn import_from_string(content: &str, delimiter: u8) -> Result<Grid<f64>, LoadError> {
    // Field counts are checked below, with expected/found in the error
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut expected_cols: Option<usize> = None;

    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
            LoadError::malformed(line, MalformedReason::Syntax(e.to_string()))
        })?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(rows.len() + 1);

        let cols = *expected_cols.get_or_insert(record.len());
        if record.len() != cols {
            return Err(LoadError::malformed(
                line,
                MalformedReason::WrongTokenCount { expected: cols, found: record.len() },
            ));
        }

        let row = record
            .iter()
            .enumerate()
            .map(|(i, field)| parse_reading(line, i + 1, field))
            .collect::<Result<Vec<f64>, LoadError>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LoadError::malformed(1, MalformedReason::Syntax("no records".to_string())));
    }

    Ok(Grid::from_rows(rows)?)
}
