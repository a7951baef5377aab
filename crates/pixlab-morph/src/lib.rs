//! pixlab-morph - Morphological operations for image processing
//!
//! This crate provides morphological operations including:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Color morphology: erosion, dilation, opening, closing per channel
//! - Hit-miss transform for pattern detection

pub mod binary;
pub mod color;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::{FOREGROUND_THRESHOLD, hit_miss_transform, is_background, is_foreground};
pub use color::{
    close_color, close_color_with_border, dilate_color, dilate_color_with_border, erode_color,
    erode_color_with_border, open_color, open_color_with_border,
};
