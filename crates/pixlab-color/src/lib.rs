//! pixlab-color - Intensity and color processing
//!
//! This crate provides histogram-based enhancement and color analysis:
//!
//! - **Enhancement** ([`equalize`]): Contrast stretching, histogram equalization
//! - **Thresholding** ([`threshold`]): Manual, percent-black and iterative selection
//! - **Color analysis** ([`analysis`]): Green-area coverage
//! - **Color space conversion** ([`colorspace`]): RGB <-> CMYK

pub mod analysis;
pub mod colorspace;
pub mod equalize;
pub mod error;
pub mod threshold;

// Re-export core types
pub use pixlab_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

pub use analysis::{DEFAULT_GREEN_MARGIN, GreenCoverage, green_coverage, is_green};
pub use colorspace::{Cmyk, cmyk_to_rgb, rgb_to_cmyk};
pub use equalize::{equalize_histogram, stretch_histogram};
pub use threshold::{
    // Types
    IterativeThresholdOptions,
    // Functions
    compute_iterative_threshold,
    compute_percent_black_threshold,
    threshold_iterative,
    threshold_manual,
    threshold_percent_black,
};
