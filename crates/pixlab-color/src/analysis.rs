//! Color content analysis
//!
//! Green-area coverage: locate pixels whose green channel dominates both
//! red and blue by a margin.

use crate::ColorResult;
use pixlab_core::PixelBuffer;

/// Default amount by which green must exceed red and blue.
pub const DEFAULT_GREEN_MARGIN: u8 = 25;

/// Result of [`green_coverage`]
#[derive(Debug, Clone)]
pub struct GreenCoverage {
    /// Copy of the input where non-green pixels have alpha 0
    pub masked: PixelBuffer,
    /// Number of green pixels
    pub green_pixels: usize,
    /// Share of green pixels in percent
    pub percent: f64,
}

/// Whether `g > r + margin && g > b + margin`.
#[inline]
pub fn is_green(px: [u8; 4], margin: u8) -> bool {
    let g = px[1] as u16;
    g > px[0] as u16 + margin as u16 && g > px[2] as u16 + margin as u16
}

/// Measure the green area of an image.
///
/// Green pixels are kept as they are; every other pixel becomes fully
/// transparent in the returned buffer.
pub fn green_coverage(pix: &PixelBuffer, margin: u8) -> ColorResult<GreenCoverage> {
    let mut masked = pix.clone();
    let mut green_pixels = 0usize;
    for px in masked.pixels_mut() {
        if is_green([px[0], px[1], px[2], px[3]], margin) {
            green_pixels += 1;
        } else {
            px[3] = 0;
        }
    }
    let percent = green_pixels as f64 / pix.pixel_count() as f64 * 100.0;
    tracing::debug!(margin, green_pixels, percent, "green coverage");
    Ok(GreenCoverage {
        masked,
        green_pixels,
        percent,
    })
}
