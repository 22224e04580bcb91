//! Error types for contrast encoding.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while fitting or applying an encoder.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// `transform` was called before `fit`.
    #[error("encoder must be fitted before it can transform data")]
    NotFitted,

    /// Input column count differs from the fit-time column count.
    #[error("unexpected input dimension {got}, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A configured column does not exist in the frame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// A category unseen at fit time was found under the `error` policy.
    #[error("unexpected category '{value}' found in column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// A code has no row in the column's contrast matrix.
    #[error("code {code} out of range for column '{column}' with {levels} levels")]
    CodeOutOfRange {
        column: String,
        code: u32,
        levels: usize,
    },

    /// A generated contrast column would reuse an existing column name.
    #[error("output column '{column}' would be produced more than once")]
    DuplicateOutputColumn { column: String },

    /// Raw array output was requested but a column is not numeric.
    #[error("column '{column}' is not numeric and cannot be returned as an array")]
    NonNumericOutput { column: String },

    /// Invalid encoder configuration.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Underlying DataFrame operation failed.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

/// Result type for encoding operations.
pub type Result<T> = std::result::Result<T, EncodeError>;
