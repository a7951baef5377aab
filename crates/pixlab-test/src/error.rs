//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while writing regression output
#[derive(Debug, Error)]
pub enum TestError {
    /// Encoding or writing an image failed
    #[error("cannot write image '{path}'")]
    ImageWrite {
        path: String,
        #[source]
        source: pixlab_io::IoError,
    },

    /// The output directory could not be created
    #[error("cannot create directory '{path}'")]
    DirectoryCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
