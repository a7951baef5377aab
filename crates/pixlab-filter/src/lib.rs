//! pixlab-filter - Image filtering operations
//!
//! This crate provides the pixel-level transforms of the engine:
//!
//! - Point operations (arithmetic, brightness, grayscale, inversion)
//! - Convolution with arbitrary odd-sized kernels
//! - Blur operations (box blur, Gaussian blur)
//! - Edge detection and enhancement (Sobel, Laplacian, sharpen, unsharp mask)
//! - Rank filtering (median, min, max filters)
//!
//! Every function reads a borrowed [`PixelBuffer`](pixlab_core::PixelBuffer)
//! and returns a new one.

pub mod convolve;
pub mod edge;
mod error;
pub mod kernel;
pub mod point;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use kernel::{ConvolveMode, Kernel};

// Re-export commonly used functions
pub use convolve::{box_blur, convolve, convolve_with_border, gaussian_blur, gaussian_blur_auto};
pub use edge::{EdgeOrientation, laplacian_edge, sharpen, sobel_edge, unsharp_mask};
pub use point::{PointOp, apply_point_op, map_pixels};
pub use rank::{
    max_filter, median_filter, median_filter_with_border, min_filter, rank_filter,
};
