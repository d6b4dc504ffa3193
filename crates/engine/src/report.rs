// Text report rendering

use std::fmt::Write;

use crate::grid::Grid;
use crate::monitor::DangerCell;

pub const TITLE: &str = "=== GridMonitor Report ===";
pub const BASE_HEADING: &str = "--- Base Grid ---";
pub const SUM_HEADING: &str = "--- Surrounding Sum Grid ---";
pub const AVG_HEADING: &str = "--- Surrounding Average Grid ---";
pub const DELTA_HEADING: &str = "--- Delta Grid (50% of Avg) ---";
pub const DANGER_HEADING: &str = "--- Danger Grid (true/false) ---";
pub const SUMMARY_HEADING: &str = "--- Danger Summary ---";

pub const DEFAULT_WIDTH: usize = 8;
pub const DEFAULT_PRECISION: usize = 3;

/// Number layout for the text report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    /// Minimum field width; numbers are right-aligned within it
    pub width: usize,
    /// Digits after the decimal point
    pub precision: usize,
    /// Append a section listing cells in danger
    pub show_summary: bool,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            precision: DEFAULT_PRECISION,
            show_summary: false,
        }
    }
}

impl ReportStyle {
    pub fn number(&self, value: f64) -> String {
        format!("{:>width$.prec$}", value, width = self.width, prec = self.precision)
    }
}

/// Heading, one line per grid row (each value followed by a space), then a blank line.
pub(crate) fn push_section<T>(
    out: &mut String,
    heading: &str,
    grid: &Grid<T>,
    mut cell: impl FnMut(&T) -> String,
) {
    out.push_str(heading);
    out.push('\n');
    for row in grid.iter_rows() {
        for value in row {
            out.push_str(&cell(value));
            out.push(' ');
        }
        out.push('\n');
    }
    out.push('\n');
}

pub(crate) fn push_summary(out: &mut String, total: usize, cells: &[DangerCell], style: &ReportStyle) {
    out.push_str(SUMMARY_HEADING);
    out.push('\n');
    // Writing to a String cannot fail
    let _ = writeln!(out, "{} of {} cell(s) in danger", cells.len(), total);
    for c in cells {
        let _ = writeln!(
            out,
            "({}, {}) {} outside [{}, {}]",
            c.row,
            c.col,
            style.number(c.value).trim_start(),
            style.number(c.low).trim_start(),
            style.number(c.high).trim_start(),
        );
    }
    out.push('\n');
}
