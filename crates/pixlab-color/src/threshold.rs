//! Luma thresholding
//!
//! Provides methods for converting color images to black and white:
//! - Fixed threshold binarization
//! - Percent-black threshold selection
//! - Iterative mean threshold selection
//!
//! Every method compares the exact luma `0.3R + 0.59G + 0.11B` of a
//! pixel against the threshold. Pixels strictly above it become white,
//! all others black; alpha is kept. Only percent-black selection works
//! on the rounded-luma histogram.

use crate::{ColorError, ColorResult};
use pixlab_core::{Histogram, PixelBuffer, color};

/// Options for iterative threshold selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterativeThresholdOptions {
    /// Starting threshold
    pub initial: u8,
    /// Stop once the threshold moves by at most this much
    pub tolerance: u8,
    /// Iteration cap
    pub max_iterations: u32,
}

impl Default for IterativeThresholdOptions {
    fn default() -> Self {
        Self {
            initial: 128,
            tolerance: 1,
            max_iterations: 100,
        }
    }
}

/// Binarize on luma: `255` where `luma > threshold`, else `0`.
pub fn threshold_manual(pix: &PixelBuffer, threshold: u8) -> PixelBuffer {
    let mut out = pix.clone();
    for px in out.pixels_mut() {
        let v = if color::luma_x100(px[0], px[1], px[2]) > 100 * threshold as u32 {
            255
        } else {
            0
        };
        px[..3].fill(v);
    }
    tracing::debug!(threshold, "manual threshold");
    out
}

/// Smallest threshold `t` such that at least `percent`% of the pixels
/// have luma `<= t`.
///
/// # Errors
///
/// [`ColorError::InvalidParameters`] if `percent` is not in `[0, 100]`.
pub fn compute_percent_black_threshold(pix: &PixelBuffer, percent: f64) -> ColorResult<u8> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(ColorError::InvalidParameters(format!(
            "percent must be in [0, 100], got {}",
            percent
        )));
    }
    let hist = Histogram::from_luma(pix);
    let target = hist.total() as f64 * percent / 100.0;
    let cdf = hist.cdf();
    let threshold = cdf
        .iter()
        .position(|&cum| cum as f64 >= target)
        .unwrap_or(0) as u8;
    tracing::debug!(percent, threshold, "percent black threshold");
    Ok(threshold)
}

/// Binarize so that roughly `percent`% of the pixels turn black.
///
/// Returns the thresholded image and the threshold used.
pub fn threshold_percent_black(pix: &PixelBuffer, percent: f64) -> ColorResult<(PixelBuffer, u8)> {
    let t = compute_percent_black_threshold(pix, percent)?;
    Ok((threshold_manual(pix, t), t))
}

/// Iterative mean threshold selection.
///
/// Starting from `options.initial`, pixels are split into `luma <= t` and
/// `luma > t` and the threshold moves to the rounded midpoint of the two
/// means. An empty side has mean 0. Iteration stops when the threshold
/// moves by at most `options.tolerance`, or after `options.max_iterations`.
///
/// The means are taken over the unrounded luma values.
pub fn compute_iterative_threshold(pix: &PixelBuffer, options: &IterativeThresholdOptions) -> u8 {
    let lumas: Vec<u32> = pix
        .pixels()
        .map(|px| color::luma_x100(px[0], px[1], px[2]))
        .collect();
    let mut t = options.initial;
    for iteration in 1..=options.max_iterations {
        let (below, above) = split_means(&lumas, t);
        let next = ((below + above) / 2.0).round().clamp(0.0, 255.0) as u8;
        let delta = next.abs_diff(t);
        t = next;
        if delta <= options.tolerance {
            tracing::debug!(threshold = t, iteration, "iterative threshold converged");
            return t;
        }
    }
    tracing::warn!(
        threshold = t,
        max_iterations = options.max_iterations,
        "iterative threshold did not converge"
    );
    t
}

/// Mean luma of the pixels at or below `t` and of those above it.
///
/// `lumas` holds [`color::luma_x100`] values; an empty side has mean 0.
fn split_means(lumas: &[u32], t: u8) -> (f64, f64) {
    let cut = 100 * t as u32;
    let (mut below, mut above) = ((0u64, 0u64), (0u64, 0u64));
    for &l in lumas {
        let side = if l > cut { &mut above } else { &mut below };
        side.0 += l as u64;
        side.1 += 1;
    }
    let mean = |(sum, n): (u64, u64)| {
        if n == 0 {
            0.0
        } else {
            sum as f64 / n as f64 / 100.0
        }
    };
    (mean(below), mean(above))
}

/// Binarize with the iteratively selected threshold.
///
/// Returns the thresholded image and the threshold used.
pub fn threshold_iterative(
    pix: &PixelBuffer,
    options: &IterativeThresholdOptions,
) -> (PixelBuffer, u8) {
    let t = compute_iterative_threshold(pix, options);
    (threshold_manual(pix, t), t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_boundary() {
        let pix = PixelBuffer::from_rgb(2, 1, &[127, 127, 127, 128, 128, 128]).unwrap();
        let out = threshold_manual(&pix, 127);
        assert_eq!(out.get_rgba(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(out.get_rgba(1, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_manual_fractional_luma() {
        // luma 127.3 is above 127; luma 0.3 is above 0
        let pix = PixelBuffer::from_rgb(3, 1, &[128, 127, 127, 1, 0, 0, 0, 0, 0]).unwrap();
        let out = threshold_manual(&pix, 127);
        assert_eq!(out.get_rgba(0, 0), Some([255, 255, 255, 255]));
        let out = threshold_manual(&pix, 0);
        assert_eq!(out.get_rgba(1, 0), Some([255, 255, 255, 255]));
        assert_eq!(out.get_rgba(2, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_percent_black_zero_spares_dim_color() {
        let pix = PixelBuffer::from_rgb(2, 1, &[1, 0, 0, 200, 200, 200]).unwrap();
        let (out, t) = threshold_percent_black(&pix, 0.0).unwrap();
        assert_eq!(t, 0);
        assert_eq!(out.get_rgba(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(out.get_rgba(1, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_iterative_uses_unrounded_luma() {
        // luma 0 and 226.95: midpoint 113.475 rounds to 113
        let pix = PixelBuffer::from_rgb(2, 1, &[0, 0, 0, 255, 255, 0]).unwrap();
        let t = compute_iterative_threshold(&pix, &IterativeThresholdOptions::default());
        assert_eq!(t, 113);
    }

    #[test]
    fn test_manual_keeps_alpha() {
        let pix = PixelBuffer::new_filled(2, 2, [200, 200, 200, 31]).unwrap();
        let out = threshold_manual(&pix, 10);
        assert!(out.pixels().all(|px| px == [255, 255, 255, 31]));
    }

    #[test]
    fn test_percent_black_bounds() {
        let pix = PixelBuffer::from_rgb(4, 1, &[10, 10, 10, 50, 50, 50, 90, 90, 90, 200, 200, 200])
            .unwrap();
        assert_eq!(compute_percent_black_threshold(&pix, 0.0).unwrap(), 0);
        assert_eq!(compute_percent_black_threshold(&pix, 50.0).unwrap(), 50);
        assert_eq!(compute_percent_black_threshold(&pix, 100.0).unwrap(), 200);
        assert!(matches!(
            compute_percent_black_threshold(&pix, 100.5),
            Err(ColorError::InvalidParameters(_))
        ));
        assert!(compute_percent_black_threshold(&pix, -1.0).is_err());
        assert!(compute_percent_black_threshold(&pix, f64::NAN).is_err());
    }

    #[test]
    fn test_iterative_two_clusters() {
        let mut rgb = Vec::new();
        for _ in 0..8 {
            rgb.extend_from_slice(&[40, 40, 40]);
        }
        for _ in 0..8 {
            rgb.extend_from_slice(&[200, 200, 200]);
        }
        let pix = PixelBuffer::from_rgb(16, 1, &rgb).unwrap();
        let t = compute_iterative_threshold(&pix, &IterativeThresholdOptions::default());
        assert_eq!(t, 120);
        let (out, used) = threshold_iterative(&pix, &IterativeThresholdOptions::default());
        assert_eq!(used, t);
        assert_eq!(out.count_foreground(128), 8);
    }

    #[test]
    fn test_iterative_capped() {
        let pix = PixelBuffer::from_rgb(2, 1, &[0, 0, 0, 250, 250, 250]).unwrap();
        let opts = IterativeThresholdOptions {
            initial: 0,
            tolerance: 0,
            max_iterations: 1,
        };
        // first step: below mean 0, above mean 250 -> 125, stopped by the cap
        assert_eq!(compute_iterative_threshold(&pix, &opts), 125);
    }
}
