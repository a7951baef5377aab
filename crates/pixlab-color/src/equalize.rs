//! Contrast stretching and histogram equalization
//!
//! Both operate on R, G and B independently and leave alpha untouched.

use crate::ColorResult;
use pixlab_core::color::Channel;
use pixlab_core::{ColorHistogram, PixelBuffer};

/// Build a 256-entry lookup table per color channel and apply it.
fn apply_luts(pix: &PixelBuffer, luts: &[[u8; 256]; 3]) -> PixelBuffer {
    let mut out = pix.clone();
    for px in out.pixels_mut() {
        for (c, lut) in luts.iter().enumerate() {
            px[c] = lut[px[c] as usize];
        }
    }
    out
}

/// Linearly stretch each channel so that its range spans `[0, 255]`.
///
/// Each sample becomes `round((v - min) / (max - min) * 255)`. If any
/// channel holds a single value the image is returned unchanged.
pub fn stretch_histogram(pix: &PixelBuffer) -> ColorResult<PixelBuffer> {
    let ranges = Channel::RGB.map(|ch| pix.channel_range(ch));
    if ranges.iter().any(|&(lo, hi)| lo == hi) {
        tracing::debug!(?ranges, "stretch skipped, flat channel");
        return Ok(pix.clone());
    }

    let mut luts = [[0u8; 256]; 3];
    for (lut, &(lo, hi)) in luts.iter_mut().zip(&ranges) {
        let span = (hi - lo) as f64;
        for (v, entry) in lut.iter_mut().enumerate() {
            let v = (v as f64 - lo as f64).max(0.0);
            *entry = (v / span * 255.0).round().min(255.0) as u8;
        }
    }
    tracing::debug!(?ranges, "stretch histogram");
    Ok(apply_luts(pix, &luts))
}

/// Equalize each channel through its cumulative distribution.
///
/// A sample `v` maps to `round((cdf[v] - cdf_min) / (total - cdf_min) * 255)`
/// where `cdf_min` is the first nonzero CDF entry and `total` the pixel
/// count. A channel holding a single value is left unchanged.
pub fn equalize_histogram(pix: &PixelBuffer) -> ColorResult<PixelBuffer> {
    let hist = ColorHistogram::from_buffer(pix);
    let channels = [&hist.red, &hist.green, &hist.blue];
    let total = pix.pixel_count() as u64;

    let mut luts = [[0u8; 256]; 3];
    for (c, (lut, h)) in luts.iter_mut().zip(channels).enumerate() {
        let cdf = h.cdf();
        let cdf_min = cdf.iter().copied().find(|&v| v > 0).unwrap_or(0);
        if total == cdf_min {
            tracing::debug!(channel = c, "equalize skipped, single value");
            for (v, entry) in lut.iter_mut().enumerate() {
                *entry = v as u8;
            }
            continue;
        }
        let denom = (total - cdf_min) as f64;
        for (entry, &cum) in lut.iter_mut().zip(cdf.iter()) {
            let num = cum.saturating_sub(cdf_min) as f64;
            *entry = (num / denom * 255.0).round() as u8;
        }
    }
    tracing::debug!(total, "equalize histogram");
    Ok(apply_luts(pix, &luts))
}
