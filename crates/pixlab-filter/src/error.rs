//! Error types for pixlab-filter
//!
//! Invalid kernels and window sizes are rejected up front; arithmetic
//! edge cases inside a filter (zero divisors, zero kernel sums) have
//! defined fallbacks and never surface as errors.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixlab_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
