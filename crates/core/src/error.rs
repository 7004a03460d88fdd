//! Error types for natbreaks

use thiserror::Error;

/// Main error type for natbreaks operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Empty input, class count out of range, or a partition whose shape
    /// does not match what the caller asked for.
    #[error("Invalid partition request: {0}")]
    InvalidPartitionRequest(String),

    #[error("Non-finite sample value {value} at index {index}")]
    NonFiniteSample { index: usize, value: f64 },

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidPartitionRequest`]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Error::InvalidPartitionRequest(reason.into())
    }
}

/// Result type alias for natbreaks operations
pub type Result<T> = std::result::Result<T, Error>;
