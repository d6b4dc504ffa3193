//! CLI Exit Code Registry
//!
//! Single source of truth for `gridmon` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                      |
//! |------|----------------------------------------------|
//! | 0    | Success                                      |
//! | 1    | General error (unspecified)                  |
//! | 2    | Usage error (bad args, unknown format)       |
//! | 3    | Input source missing or unreadable           |
//! | 4    | Input does not follow the expected layout    |
//! | 5    | Input is not a rectangular, non-empty grid   |
//! | 6    | --config / GRIDMON_CONFIG file invalid       |

use gridmon_io::LoadError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (e.g. stdout closed).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown extension without --from.
pub const EXIT_USAGE: u8 = 2;

/// Input file or stdin could not be read.
pub const EXIT_IO: u8 = 3;

/// Header, row count, token count or a value is wrong.
pub const EXIT_MALFORMED: u8 = 4;

/// Parsed values are empty or jagged.
pub const EXIT_INVALID_GRID: u8 = 5;

/// --config (or GRIDMON_CONFIG) settings file failed to load.
pub const EXIT_CONFIG: u8 = 6;

/// Map a load error to its exit code.
pub fn load_exit_code(err: &LoadError) -> u8 {
    match err {
        LoadError::Io(_) => EXIT_IO,
        LoadError::Malformed { .. } => EXIT_MALFORMED,
        LoadError::InvalidGrid(_) => EXIT_INVALID_GRID,
    }
}
