//! `GridMonitor`: a base grid plus every grid derived from it.
//!
//! All five grids are computed together at construction and never change
//! afterwards. Accessors hand out clones, so nothing a caller does to a
//! returned grid can reach the monitor's own copy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::grid::Grid;
use crate::pipeline;
use crate::report::{self, ReportStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct GridMonitor {
    base: Grid<f64>,
    surrounding_sum: Grid<f64>,
    surrounding_avg: Grid<f64>,
    delta: Grid<f64>,
    danger: Grid<bool>,
}

/// A cell whose reading falls outside its tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DangerCell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    pub avg: f64,
    /// Lower band edge (avg - delta)
    pub low: f64,
    /// Upper band edge (avg + delta)
    pub high: f64,
}

impl fmt::Display for DangerCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) value {} outside [{}, {}] (avg {})",
            self.row, self.col, self.value, self.low, self.high, self.avg
        )
    }
}

/// Serializable view of a monitor: every grid plus the flagged cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    pub base: Grid<f64>,
    pub surrounding_sum: Grid<f64>,
    pub surrounding_avg: Grid<f64>,
    pub delta: Grid<f64>,
    pub danger: Grid<bool>,
    pub danger_cells: Vec<DangerCell>,
}

impl GridMonitor {
    /// Take ownership of an already-validated grid and derive everything from it.
    pub fn from_grid(base: Grid<f64>) -> Self {
        let surrounding_sum = pipeline::surrounding_sum(&base);
        let surrounding_avg = pipeline::surrounding_avg(&surrounding_sum);
        let delta = pipeline::delta(&surrounding_avg);
        let danger = pipeline::danger(&base, &surrounding_avg, &delta);

        let monitor = Self { base, surrounding_sum, surrounding_avg, delta, danger };
        log::debug!(
            "derived {}x{} grid, {} cell(s) in danger",
            monitor.rows(),
            monitor.cols(),
            monitor.danger_count()
        );
        monitor
    }

    /// Copy nested rows into a new monitor. Fails on empty or jagged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, GridError> {
        let owned: Vec<Vec<f64>> = rows.iter().map(|r| r.as_ref().to_vec()).collect();
        Ok(Self::from_grid(Grid::from_rows(owned)?))
    }

    pub fn rows(&self) -> usize {
        self.base.rows()
    }

    pub fn cols(&self) -> usize {
        self.base.cols()
    }

    // =========================================================================
    // Grid accessors (copies)
    // =========================================================================

    pub fn base_grid(&self) -> Grid<f64> {
        self.base.clone()
    }

    pub fn surrounding_sum_grid(&self) -> Grid<f64> {
        self.surrounding_sum.clone()
    }

    pub fn surrounding_avg_grid(&self) -> Grid<f64> {
        self.surrounding_avg.clone()
    }

    /// Half of the surrounding average for each cell.
    pub fn delta_grid(&self) -> Grid<f64> {
        self.delta.clone()
    }

    /// `true` marks a cell outside `[avg - delta, avg + delta]`.
    pub fn danger_grid(&self) -> Grid<bool> {
        self.danger.clone()
    }

    // =========================================================================
    // Danger queries
    // =========================================================================

    pub fn danger_count(&self) -> usize {
        self.danger.iter_cells().filter(|(_, _, d)| **d).count()
    }

    /// Flagged cells in row-major order.
    pub fn danger_cells(&self) -> Vec<DangerCell> {
        self.danger
            .iter_cells()
            .filter(|(_, _, d)| **d)
            .map(|(row, col, _)| {
                let avg = self.surrounding_avg[(row, col)];
                let delta = self.delta[(row, col)];
                DangerCell {
                    row,
                    col,
                    value: self.base[(row, col)],
                    avg,
                    low: avg - delta,
                    high: avg + delta,
                }
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.rows(),
            cols: self.cols(),
            base: self.base_grid(),
            surrounding_sum: self.surrounding_sum_grid(),
            surrounding_avg: self.surrounding_avg_grid(),
            delta: self.delta_grid(),
            danger: self.danger_grid(),
            danger_cells: self.danger_cells(),
        }
    }

    /// Render the labeled multi-section report.
    pub fn report(&self, style: &ReportStyle) -> String {
        let mut out = String::new();
        out.push_str(report::TITLE);
        out.push('\n');

        report::push_section(&mut out, report::BASE_HEADING, &self.base, |v| style.number(*v));
        report::push_section(&mut out, report::SUM_HEADING, &self.surrounding_sum, |v| style.number(*v));
        report::push_section(&mut out, report::AVG_HEADING, &self.surrounding_avg, |v| style.number(*v));
        report::push_section(&mut out, report::DELTA_HEADING, &self.delta, |v| style.number(*v));
        report::push_section(&mut out, report::DANGER_HEADING, &self.danger, |d| d.to_string());

        if style.show_summary {
            report::push_summary(&mut out, self.rows() * self.cols(), &self.danger_cells(), style);
        }

        out
    }
}

impl From<Grid<f64>> for GridMonitor {
    fn from(base: Grid<f64>) -> Self {
        Self::from_grid(base)
    }
}

impl fmt::Display for GridMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report(&ReportStyle::default()))
    }
}
