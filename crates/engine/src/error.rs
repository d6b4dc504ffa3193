use std::fmt;

/// A grid that cannot be monitored: empty, or not rectangular.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows at all.
    Empty,
    /// A row with no columns (0-based row index).
    EmptyRow { row: usize },
    /// A row whose length differs from the first row.
    Jagged { row: usize, expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "invalid grid: no rows"),
            Self::EmptyRow { row } => write!(f, "invalid grid: row {row} has no columns"),
            Self::Jagged { row, expected, found } => {
                write!(f, "invalid grid: row {row} has {found} value(s), expected {expected}")
            }
        }
    }
}

impl std::error::Error for GridError {}
