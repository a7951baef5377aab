//! Error types for the pixlab engine

use thiserror::Error;

/// Errors surfaced by [`Session`](crate::Session) operations
#[derive(Debug, Error)]
pub enum Error {
    /// An operation needs a current image and none is loaded
    #[error("no image loaded")]
    NoImage,

    /// Invalid engine configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixlab_core::Error),

    /// Decoding or encoding failed
    #[error("I/O error: {0}")]
    Io(#[from] pixlab_io::IoError),

    /// Filter error
    #[error("filter error: {0}")]
    Filter(#[from] pixlab_filter::FilterError),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] pixlab_morph::MorphError),

    /// Color processing error
    #[error("color error: {0}")]
    Color(#[from] pixlab_color::ColorError),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
