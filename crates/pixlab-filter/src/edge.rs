//! Edge detection and enhancement operations
//!
//! - Sobel gradient magnitude -> `sobel_edge`
//! - Laplacian convolution -> `laplacian_edge`
//! - Sharpening via kernel convolution -> `sharpen`
//! - Unsharp mask -> `unsharp_mask`
//!
//! All of these apply their kernels raw (no normalization) with
//! clamp-to-edge borders.

use crate::convolve::{publish, weighted_sums};
use crate::kernel::ConvolveMode;
use crate::{FilterError, FilterResult, Kernel, convolve, gaussian_blur};
use pixlab_core::{BorderPolicy, PixelBuffer, color};

/// Edge detection orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeOrientation {
    /// Detect horizontal edges
    Horizontal,
    /// Detect vertical edges
    Vertical,
    /// Detect all edges
    #[default]
    All,
}

/// Apply Sobel edge detection.
///
/// A single orientation yields `min(255, |g|)`; [`EdgeOrientation::All`]
/// yields `min(255, |gx| + |gy|)`.
pub fn sobel_edge(pix: &PixelBuffer, orientation: EdgeOrientation) -> FilterResult<PixelBuffer> {
    let border = BorderPolicy::Clamp;
    let sums = match orientation {
        EdgeOrientation::Horizontal => abs_sums(weighted_sums(pix, &Kernel::sobel_horizontal(), border)),
        EdgeOrientation::Vertical => abs_sums(weighted_sums(pix, &Kernel::sobel_vertical(), border)),
        EdgeOrientation::All => {
            let gy = weighted_sums(pix, &Kernel::sobel_horizontal(), border);
            let gx = weighted_sums(pix, &Kernel::sobel_vertical(), border);
            gx.iter()
                .zip(&gy)
                .map(|(a, b)| [0, 1, 2].map(|c| a[c].abs() + b[c].abs()))
                .collect()
        }
    };
    tracing::debug!(?orientation, "sobel edge");
    Ok(publish(pix, &sums, |s| s))
}

fn abs_sums(sums: Vec<[f32; 3]>) -> Vec<[f32; 3]> {
    sums.into_iter().map(|s| s.map(f32::abs)).collect()
}

/// Apply Laplacian edge detection.
///
/// Negative responses clamp to 0.
pub fn laplacian_edge(pix: &PixelBuffer) -> FilterResult<PixelBuffer> {
    convolve(pix, &Kernel::laplacian(), ConvolveMode::Raw)
}

/// Sharpen with the 3x3 cross kernel.
pub fn sharpen(pix: &PixelBuffer) -> FilterResult<PixelBuffer> {
    convolve(pix, &Kernel::sharpen(), ConvolveMode::Raw)
}

/// Apply an unsharp mask: `src + amount * (src - gaussian(src))`.
///
/// # Arguments
/// * `radius` - Gaussian half-width; sigma is `radius / 2` (minimum 0.5)
/// * `amount` - Strength, must be non-negative
pub fn unsharp_mask(pix: &PixelBuffer, radius: u32, amount: f32) -> FilterResult<PixelBuffer> {
    if !(amount >= 0.0 && amount.is_finite()) {
        return Err(FilterError::InvalidParameters(format!(
            "unsharp amount must be non-negative, got {}",
            amount
        )));
    }
    let sigma = (radius as f32 / 2.0).max(0.5);
    let blurred = gaussian_blur(pix, radius, sigma)?;
    let mut out = pix.clone();
    for (dst, low) in out.pixels_mut().zip(blurred.pixels()) {
        for c in 0..3 {
            let v = dst[c] as f32;
            dst[c] = color::clamp_sample((v + amount * (v - low[c] as f32)) as f64);
        }
    }
    Ok(out)
}
