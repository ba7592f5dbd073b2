//! Error types
//!
//! The simulation step itself is infallible. These cover the edges: building
//! matrices from authored data and writing output files.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors building an interaction matrix from authored rows.
#[derive(Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("interaction matrix must not be empty")]
    Empty,
    #[error("interaction matrix row {row} has {len} entries, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
}

/// Errors writing snapshots or tick summaries.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error for the simulation host.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
