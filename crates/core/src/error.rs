//! Error types for the match engine.

use thiserror::Error;

/// Failures surfaced by grid access and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A coordinate fell outside `[0, rows) x [0, cols)`.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Configuration values that cannot produce a playable encounter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::ConfigParse(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
