use std::path::PathBuf;

use gridmon_engine::GridMonitor;
use gridmon_io::{load_monitor, text, LoadError, MalformedReason, SourceFormat};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load(name: &str) -> Result<GridMonitor, LoadError> {
    let path = fixtures_dir().join(name);
    let format = SourceFormat::infer(&path).unwrap();
    load_monitor(&path, format)
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

// -------------------------------------------------------------------------
// Text fixtures
// -------------------------------------------------------------------------

#[test]
fn sample_scenario() {
    let m = text::load(&fixtures_dir().join("sample.txt")).unwrap();

    assert_eq!(m.base_grid().to_rows(), vec![vec![10.0, 10.0], vec![10.0, 100.0]]);
    assert_eq!(m.surrounding_sum_grid()[(0, 0)], 40.0);
    assert_eq!(m.surrounding_avg_grid()[(0, 0)], 10.0);
    assert_eq!(m.delta_grid()[(0, 0)], 5.0);
    assert!(!m.danger_grid()[(0, 0)]);

    assert_eq!(m.surrounding_sum_grid()[(1, 1)], 220.0);
    assert_eq!(m.surrounding_avg_grid()[(1, 1)], 55.0);
    assert_eq!(m.delta_grid()[(1, 1)], 27.5);
    assert!(m.danger_grid()[(1, 1)]);
}

#[test]
fn sensors_text_derived_grids() {
    let m = load("sensors.txt").unwrap();
    assert_eq!((m.rows(), m.cols()), (3, 4));

    let sum = m.surrounding_sum_grid();
    let expected_sum = [
        [7.0, 8.2, 16.5, 11.3],
        [7.5, 15.1, 9.9, 14.9],
        [7.7, 8.5, 13.6, 5.4],
    ];
    for (r, row) in expected_sum.iter().enumerate() {
        for (c, &s) in row.iter().enumerate() {
            assert_close(sum[(r, c)], s);
        }
    }

    assert_close(m.surrounding_avg_grid()[(0, 2)], 4.125);
    assert_close(m.delta_grid()[(1, 1)], 3.775 / 2.0);

    let flagged: Vec<(usize, usize)> = m.danger_cells().iter().map(|c| (c.row, c.col)).collect();
    assert_eq!(flagged, vec![(1, 2), (2, 3)]);
}

#[test]
fn every_source_format_builds_the_same_monitor() {
    let text = load("sensors.txt").unwrap();
    let csv = load("sensors.csv").unwrap();
    let json = load("sensors.json").unwrap();

    assert_eq!(text, csv);
    assert_eq!(text, json);
}

// -------------------------------------------------------------------------
// Failures
// -------------------------------------------------------------------------

#[test]
fn short_row_is_malformed() {
    let err = load("short_row.txt").unwrap_err();
    assert_eq!(
        err,
        LoadError::Malformed {
            line: 3,
            reason: MalformedReason::WrongTokenCount { expected: 2, found: 1 },
        }
    );
}

#[test]
fn bad_token_names_the_token() {
    let err = load("bad_token.txt").unwrap_err();
    assert_eq!(err.to_string(), "line 3: value 2 '1O0' is not a number");
}

#[test]
fn missing_file_is_io_error() {
    let err = load("does_not_exist.txt").unwrap_err();
    assert!(matches!(err, LoadError::Io(_)), "got {err:?}");
    assert!(!err.is_malformed());
}
