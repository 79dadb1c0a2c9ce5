//! Error types for grid codec operations

use thiserror::Error;

/// Error type for grid codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid target: {0}")]
    InvalidTarget(&'static str),
    #[error("cannot parse {text:?} as {kind} at ({row}, {column})")]
    Parse {
        kind: &'static str,
        text: String,
        row: usize,
        column: usize,
    },
    #[error("invalid datetime {text:?}: {reason}")]
    Datetime { text: String, reason: String },
    #[error("value does not match declared shape: {0}")]
    Mismatch(&'static str),
}
