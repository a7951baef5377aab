//! Error types for pixlab-core
//!
//! Provides a unified error type for buffer construction and pixel access.
//! Each variant captures enough context for diagnostics without exposing
//! internal layout details.

use thiserror::Error;

/// pixlab-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions (zero width or height, or overflow)
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Raw sample data does not match the declared dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for pixlab-core operations
pub type Result<T> = std::result::Result<T, Error>;
