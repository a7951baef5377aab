//! pixlab - Raster image processing engine
//!
//! # Overview
//!
//! pixlab decodes PPM and JPEG images into an RGBA [`PixelBuffer`], keeps
//! a pan-and-zoom [`ViewTransform`] for display, and applies pixel
//! operations:
//!
//! - Point operations and grayscale conversion
//! - Convolution, edge detection and rank filters
//! - Color morphology and the hit-or-miss transform
//! - Histogram stretch and equalization, thresholding
//!
//! The view never changes pixel data; pixel operations never change the
//! view.
//!
//! # Example
//!
//! ```
//! use pixlab::{ExportFormat, Session};
//!
//! let mut session = Session::new();
//! session.load_ppm(b"P3\n1 1\n255\n200 100 50\n").unwrap();
//! session.threshold(100).unwrap();
//! let ppm = session.export(ExportFormat::PpmAscii).unwrap();
//! assert_eq!(ppm, b"P3\n1 1\n255\n255 255 255\n");
//! ```

pub mod config;
mod error;
pub mod session;
pub mod view;

pub use config::{EngineConfig, IterativeConfig};
pub use error::{Error, Result};
pub use session::{ExportFormat, Session};
pub use view::{DEFAULT_ZOOM_FACTOR, DrawRegion, Rect, ViewTransform, ZoomDirection};

// Re-export core types (primary data structures used everywhere)
pub use pixlab_core::{BorderPolicy, ColorHistogram, Histogram, PixelBuffer, color};

// Re-export domain crates as modules to avoid name conflicts
pub use pixlab_color as color_ops;
pub use pixlab_filter as filter;
pub use pixlab_io as io;
pub use pixlab_morph as morph;
