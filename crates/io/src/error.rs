use std::fmt;

use gridmon_engine::GridError;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Source missing or unreadable.
    Io(String),
    /// Content does not follow the expected layout. `line` is 1-based.
    Malformed { line: usize, reason: MalformedReason },
    /// Content parsed but the values do not form a rectangular, non-empty grid.
    InvalidGrid(GridError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MalformedReason {
    /// Nothing to read (empty input or blank header line).
    MissingHeader,
    /// Header does not hold exactly two tokens.
    HeaderTokenCount { found: usize },
    /// Header dimension is not a positive integer.
    BadDimension { token: String },
    /// Input ended before all declared rows were read.
    MissingRow { expected: usize, found: usize },
    /// A row holds the wrong number of values.
    WrongTokenCount { expected: usize, found: usize },
    /// A value is not a real number (`column` is 1-based).
    BadNumber { column: usize, token: String },
    /// A value parses but is NaN or infinite.
    NonFinite { column: usize, token: String },
    /// Non-blank content after the last declared row.
    TrailingData,
    /// Record-level error from a delimited or JSON reader.
    Syntax(String),
}

impl LoadError {
    pub fn malformed(line: usize, reason: MalformedReason) -> Self {
        Self::Malformed { line, reason }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "missing header (expected '<rows> <cols>')"),
            Self::HeaderTokenCount { found } => {
                write!(f, "header must hold 2 values '<rows> <cols>', found {found}")
            }
            Self::BadDimension { token } => {
                write!(f, "dimension '{token}' is not a positive integer")
            }
            Self::MissingRow { expected, found } => {
                write!(f, "expected {expected} row(s), input ends after {found}")
            }
            Self::WrongTokenCount { expected, found } => {
                write!(f, "expected {expected} value(s), found {found}")
            }
            Self::BadNumber { column, token } => {
                write!(f, "value {column} '{token}' is not a number")
            }
            Self::NonFinite { column, token } => {
                write!(f, "value {column} '{token}' is not finite")
            }
            Self::TrailingData => write!(f, "unexpected data after the last row"),
            Self::Syntax(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Malformed { line, reason } => write!(f, "line {line}: {reason}"),
            Self::InvalidGrid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidGrid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for LoadError {
    fn from(e: GridError) -> Self {
        Self::InvalidGrid(e)
    }
}
