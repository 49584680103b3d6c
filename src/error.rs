use thiserror::Error;

use crate::coord::Coord;

/// Everything that can go wrong while building a grid or searching it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions { rows: i32, columns: i32 },
    #[error("{coord} is outside of the {rows}x{columns} grid")]
    OutOfBounds { coord: Coord, rows: i32, columns: i32 },
    #[error("endpoint {0} is blocked")]
    BlockedEndpoint(Coord),
    /// The frontier ran dry before the destination was reached. This is an ordinary outcome.
    #[error("no path from {from} to {to}")]
    NoPathFound { from: Coord, to: Coord },
    #[error("grid has no {0} set")]
    MissingEndpoint(&'static str),
    #[error("search was cancelled")]
    Cancelled,
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl PathError {
    /// Whether this error is the expected "unreachable" outcome rather than a caller mistake.
    pub fn is_no_path(&self) -> bool {
        matches!(self, PathError::NoPathFound { .. })
    }
}
