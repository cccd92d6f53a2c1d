//! Error types for the colony.
//!
//! Everything that can be rejected is rejected up front: matrices and
//! parameters are validated once when the colony is built. Numeric
//! degeneracies during tour construction are not errors; they are recovered
//! with a uniform fallback and counted in the run result.

use thiserror::Error;

/// Result alias used across the crate.
pub type AcoResult<T> = Result<T, AcoError>;

#[derive(Debug, Error)]
pub enum AcoError {
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(#[from] MatrixError),

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("L{line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcoError {
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Reasons a distance matrix is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("matrix has no rows")]
    Empty,

    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("diagonal entry ({index},{index}) is {value}, expected +inf")]
    FiniteDiagonal { index: usize, value: f64 },

    #[error("entry ({from},{to}) is {value}, expected a finite positive distance with a finite reciprocal")]
    NotPositive { from: usize, to: usize, value: f64 },

    #[error("entries ({from},{to}) = {forward} and ({to},{from}) = {backward} differ")]
    Asymmetric {
        from: usize,
        to: usize,
        forward: f64,
        backward: f64,
    },
}
