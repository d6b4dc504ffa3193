//! Derivation pipeline: base → sum → average → delta → danger.
//!
//! Each stage reads only the output of earlier stages. The neighbor stencil
//! is the fixed 4-cell von Neumann neighborhood; a neighbor that falls off
//! the grid is replaced by the cell's own value (edge-mirroring), and the
//! average always divides by 4 regardless of how many neighbors were real.

use crate::grid::Grid;

/// Divisor for the neighbor average. Mirrored neighbors count toward it.
pub const NEIGHBOR_COUNT: f64 = 4.0;

/// Delta is the average divided by this (a band of ±50% around the average).
pub const DELTA_DIVISOR: f64 = 2.0;

/// Sum of up, down, left and right for one cell, mirroring at the edges.
pub fn neighbor_sum(base: &Grid<f64>, row: usize, col: usize) -> f64 {
    let own = base[(row, col)];
    let (rows, cols) = base.dims();

    let up = if row > 0 { base[(row - 1, col)] } else { own };
    let down = if row + 1 < rows { base[(row + 1, col)] } else { own };
    let left = if col > 0 { base[(row, col - 1)] } else { own };
    let right = if col + 1 < cols { base[(row, col + 1)] } else { own };

    up + down + left + right
}

pub fn surrounding_sum(base: &Grid<f64>) -> Grid<f64> {
    base.map_indexed(|row, col, _| neighbor_sum(base, row, col))
}

pub fn surrounding_avg(sum: &Grid<f64>) -> Grid<f64> {
    sum.map(|s| s / NEIGHBOR_COUNT)
}

pub fn delta(avg: &Grid<f64>) -> Grid<f64> {
    avg.map(|a| a / DELTA_DIVISOR)
}

/// True when `value` lies strictly outside `[avg - delta, avg + delta]`.
/// A value exactly on either edge is safe.
#[inline]
pub fn is_outside_band(value: f64, avg: f64, delta: f64) -> bool {
    value < avg - delta || value > avg + delta
}

pub fn danger(base: &Grid<f64>, avg: &Grid<f64>, delta: &Grid<f64>) -> Grid<bool> {
    debug_assert!(base.same_shape(avg) && base.same_shape(delta));
    base.map_indexed(|row, col, &value| {
        is_outside_band(value, avg[(row, col)], delta[(row, col)])
    })
}
