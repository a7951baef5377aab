//! Convolution operations
//!
//! Implements image convolution with arbitrary kernels over the R, G and
//! B channels of an RGBA buffer. Alpha is copied from the source.

use crate::kernel::ConvolveMode;
use crate::{FilterError, FilterResult, Kernel};
use pixlab_core::{BorderPolicy, PixelBuffer, color};

/// Raw weighted sums for every pixel, `[R, G, B]` per entry.
///
/// Neighbors the border policy drops contribute nothing.
pub(crate) fn weighted_sums(
    pix: &PixelBuffer,
    kernel: &Kernel,
    border: BorderPolicy,
) -> Vec<[f32; 3]> {
    let (w, h) = pix.dimensions();
    let kw = kernel.width();
    let kh = kernel.height();
    let kcx = kernel.center_x() as i64;
    let kcy = kernel.center_y() as i64;
    let weights = kernel.data();

    let mut sums = Vec::with_capacity(pix.pixel_count());
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for ky in 0..kh {
                for kx in 0..kw {
                    let k = weights[(ky * kw + kx) as usize];
                    if k == 0.0 {
                        continue;
                    }
                    let sx = x as i64 + kx as i64 - kcx;
                    let sy = y as i64 + ky as i64 - kcy;
                    let Some((sx, sy)) = border.resolve_xy(sx, sy, w, h) else {
                        continue;
                    };
                    let px = pix.get_rgba_unchecked(sx, sy);
                    acc[0] += px[color::RED] as f32 * k;
                    acc[1] += px[color::GREEN] as f32 * k;
                    acc[2] += px[color::BLUE] as f32 * k;
                }
            }
            sums.push(acc);
        }
    }
    sums
}

/// Write `f(sum)` into the color channels of a copy of `pix`.
pub(crate) fn publish<F>(pix: &PixelBuffer, sums: &[[f32; 3]], f: F) -> PixelBuffer
where
    F: Fn(f32) -> f32,
{
    let mut out = pix.clone();
    for (px, s) in out.pixels_mut().zip(sums) {
        for c in 0..3 {
            px[c] = color::clamp_sample(f(s[c]) as f64);
        }
    }
    out
}

/// Convolve an image with a kernel using clamp-to-edge borders.
///
/// # Examples
///
/// ```
/// use pixlab_core::PixelBuffer;
/// use pixlab_filter::{ConvolveMode, Kernel, convolve};
///
/// let pix = PixelBuffer::new_filled(4, 4, [40, 80, 120, 255]).unwrap();
/// let blurred = convolve(&pix, &Kernel::box_kernel(3).unwrap(), ConvolveMode::Normalize).unwrap();
/// assert_eq!(blurred, pix);
/// ```
pub fn convolve(pix: &PixelBuffer, kernel: &Kernel, mode: ConvolveMode) -> FilterResult<PixelBuffer> {
    convolve_with_border(pix, kernel, mode, BorderPolicy::Clamp)
}

/// Convolve an image with an explicit border policy.
///
/// With [`BorderPolicy::Ignore`] out-of-range neighbors are dropped,
/// which amounts to zero padding.
pub fn convolve_with_border(
    pix: &PixelBuffer,
    kernel: &Kernel,
    mode: ConvolveMode,
    border: BorderPolicy,
) -> FilterResult<PixelBuffer> {
    let kernel = kernel.prepared(mode);
    tracing::debug!(
        kw = kernel.width(),
        kh = kernel.height(),
        ?mode,
        ?border,
        "convolve"
    );
    let sums = weighted_sums(pix, &kernel, border);
    Ok(publish(pix, &sums, |s| s))
}

/// Window side `2 * radius + 1`.
fn window_side(radius: u32) -> FilterResult<u32> {
    radius
        .checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .ok_or_else(|| FilterError::InvalidParameters(format!("radius {} is too large", radius)))
}

/// Apply box (average) blur
pub fn box_blur(pix: &PixelBuffer, radius: u32) -> FilterResult<PixelBuffer> {
    let size = window_side(radius)?;
    let kernel = Kernel::box_kernel(size)?;
    convolve(pix, &kernel, ConvolveMode::Normalize)
}

/// Apply Gaussian blur
pub fn gaussian_blur(pix: &PixelBuffer, radius: u32, sigma: f32) -> FilterResult<PixelBuffer> {
    let size = window_side(radius)?;
    let kernel = Kernel::gaussian(size, sigma)?;
    convolve(pix, &kernel, ConvolveMode::Normalize)
}

/// Apply Gaussian blur with automatic sigma calculation
pub fn gaussian_blur_auto(pix: &PixelBuffer, radius: u32) -> FilterResult<PixelBuffer> {
    // Use sigma = radius (minimum 0.5) for a reasonable default
    let sigma = (radius as f32).max(0.5);
    gaussian_blur(pix, radius, sigma)
}
