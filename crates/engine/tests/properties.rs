// Property-based tests for the derivation pipeline.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use gridmon_engine::{Grid, GridMonitor};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Reading: mostly moderate reals, sometimes whole numbers, sometimes zero.
fn arb_reading() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => -1000.0..1000.0f64,
        1 => (-500i32..500).prop_map(f64::from),
        1 => Just(0.0),
    ]
}

/// Rectangular grid, 1..=8 rows by 1..=8 cols.
fn arb_rows() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..=8, 1usize..=8).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(proptest::collection::vec(arb_reading(), cols), rows)
    })
}

/// Neighbor lookup written independently of the engine: off-grid → own value.
fn mirrored(rows: &[Vec<f64>], r: usize, c: usize, dr: isize, dc: isize) -> f64 {
    let nr = r as isize + dr;
    let nc = c as isize + dc;
    if nr < 0 || nc < 0 || nr as usize >= rows.len() || nc as usize >= rows[0].len() {
        rows[r][c]
    } else {
        rows[nr as usize][nc as usize]
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn base_grid_round_trips(rows in arb_rows()) {
        let m = GridMonitor::from_rows(&rows).unwrap();
        prop_assert_eq!(m.base_grid().to_rows(), rows.clone());
        prop_assert_eq!(m.rows(), rows.len());
        prop_assert_eq!(m.cols(), rows[0].len());
    }

    #[test]
    fn sum_is_mirrored_four_neighbor_sum(rows in arb_rows()) {
        let m = GridMonitor::from_rows(&rows).unwrap();
        let sum = m.surrounding_sum_grid();
        for r in 0..rows.len() {
            for c in 0..rows[0].len() {
                let expected = mirrored(&rows, r, c, -1, 0)
                    + mirrored(&rows, r, c, 1, 0)
                    + mirrored(&rows, r, c, 0, -1)
                    + mirrored(&rows, r, c, 0, 1);
                prop_assert_eq!(sum[(r, c)], expected, "cell ({}, {})", r, c);
            }
        }
    }

    #[test]
    fn avg_delta_danger_relations(rows in arb_rows()) {
        let m = GridMonitor::from_rows(&rows).unwrap();
        let base = m.base_grid();
        let sum = m.surrounding_sum_grid();
        let avg = m.surrounding_avg_grid();
        let delta = m.delta_grid();
        let danger = m.danger_grid();

        prop_assert!(avg.same_shape(&base) && delta.same_shape(&base) && danger.same_shape(&base));

        for (r, c, &value) in base.iter_cells() {
            prop_assert_eq!(avg[(r, c)], sum[(r, c)] / 4.0);
            prop_assert_eq!(delta[(r, c)], avg[(r, c)] / 2.0);
            let outside = value < avg[(r, c)] - delta[(r, c)] || value > avg[(r, c)] + delta[(r, c)];
            prop_assert_eq!(danger[(r, c)], outside, "cell ({}, {})", r, c);
        }
    }

    #[test]
    fn danger_cells_match_grid(rows in arb_rows()) {
        let m = GridMonitor::from_rows(&rows).unwrap();
        let danger = m.danger_grid();
        let cells = m.danger_cells();

        prop_assert_eq!(cells.len(), m.danger_count());
        for cell in &cells {
            prop_assert!(danger[(cell.row, cell.col)]);
        }
    }

    #[test]
    fn getters_are_idempotent_and_independent(rows in arb_rows()) {
        let m = GridMonitor::from_rows(&rows).unwrap();
        let first = m.surrounding_avg_grid();
        let mut edited = first.to_rows();
        edited[0][0] += 1.0;

        let second = m.surrounding_avg_grid();
        prop_assert_eq!(&first, &second);
        prop_assert_ne!(edited, second.to_rows());
        prop_assert_eq!(m.danger_grid(), m.danger_grid());
    }

    #[test]
    fn non_negative_uniform_grid_is_safe(
        rows in 1usize..=6,
        cols in 1usize..=6,
        value in (0i32..100_000).prop_map(f64::from),
    ) {
        let m = GridMonitor::from_rows(&vec![vec![value; cols]; rows]).unwrap();
        prop_assert_eq!(m.danger_count(), 0);
        for (_, _, &a) in m.surrounding_avg_grid().iter_cells() {
            prop_assert_eq!(a, value);
        }
        for (_, _, &d) in m.delta_grid().iter_cells() {
            prop_assert_eq!(d, value / 2.0);
        }
    }

    #[test]
    fn grid_json_round_trips(rows in arb_rows()) {
        let grid = Grid::from_rows(rows).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid<f64> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, grid);
    }
}

// ---------------------------------------------------------------------------
// Fixed scenarios
// ---------------------------------------------------------------------------

#[test]
fn single_cell_sum_is_four_times_value() {
    let m = GridMonitor::from_rows(&[[3.25]]).unwrap();
    assert_eq!(m.surrounding_sum_grid()[(0, 0)], 13.0);
    assert_eq!(m.surrounding_avg_grid()[(0, 0)], 3.25);
    assert!(!m.danger_grid()[(0, 0)]);
}

#[test]
fn negative_uniform_grid_is_flagged() {
    // avg = -8, delta = -4: the band [-4, -12] is inverted, so every cell is outside it
    let m = GridMonitor::from_rows(&[[-8.0, -8.0], [-8.0, -8.0]]).unwrap();
    assert_eq!(m.danger_count(), 4);
}

#[test]
fn value_on_band_edge_is_safe() {
    // Center cell sees neighbors 4,4,4,4 → avg 4, delta 2, band [2, 6].
    let rows = [
        [4.0, 4.0, 4.0],
        [4.0, 6.0, 4.0],
        [4.0, 4.0, 4.0],
    ];
    let m = GridMonitor::from_rows(&rows).unwrap();
    assert_eq!(m.surrounding_avg_grid()[(1, 1)], 4.0);
    assert!(!m.danger_grid()[(1, 1)]);
}
