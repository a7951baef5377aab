//! Rank filtering operations
//!
//! Provides rank (order-statistic) filters including median, min, and
//! max filters. Each of R, G and B is ranked independently over a square
//! window with clamp-to-edge borders; alpha is copied.

use crate::{FilterError, FilterResult};
use pixlab_core::{BorderPolicy, PixelBuffer};

/// Validate the window side and return the window cell count.
fn check_window(window_size: u32) -> FilterResult<usize> {
    if window_size == 0 || window_size % 2 == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "window size must be a positive odd integer, got {}",
            window_size
        )));
    }
    window_size
        .checked_mul(window_size)
        .map(|cells| cells as usize)
        .ok_or_else(|| {
            FilterError::InvalidParameters(format!("window size {} is too large", window_size))
        })
}

/// Which element of a sorted window to keep.
#[derive(Debug, Clone, Copy)]
enum Select {
    /// `round(rank * (n - 1))`
    Rank(f32),
    /// Middle element; mean of the two middles for even counts
    Median,
}

impl Select {
    fn pick(self, sorted: &[u8]) -> u8 {
        let n = sorted.len();
        match self {
            Select::Rank(rank) => {
                let idx = ((n - 1) as f32 * rank).round() as usize;
                sorted[idx.min(n - 1)]
            }
            Select::Median if n % 2 == 1 => sorted[n / 2],
            Select::Median => {
                let sum = sorted[n / 2 - 1] as u32 + sorted[n / 2] as u32;
                sum.div_ceil(2) as u8
            }
        }
    }
}

fn filter_window(
    pix: &PixelBuffer,
    window_size: u32,
    cap: usize,
    select: Select,
    border: BorderPolicy,
) -> PixelBuffer {
    let (w, h) = pix.dimensions();
    let half = (window_size / 2) as i64;
    let mut out = pix.clone();
    let mut bufs: [Vec<u8>; 3] = [
        Vec::with_capacity(cap),
        Vec::with_capacity(cap),
        Vec::with_capacity(cap),
    ];

    for y in 0..h {
        for x in 0..w {
            for b in &mut bufs {
                b.clear();
            }
            for dy in -half..=half {
                for dx in -half..=half {
                    let Some((sx, sy)) = border.resolve_xy(x as i64 + dx, y as i64 + dy, w, h)
                    else {
                        continue;
                    };
                    let px = pix.get_rgba_unchecked(sx, sy);
                    for c in 0..3 {
                        bufs[c].push(px[c]);
                    }
                }
            }
            let mut rgba = pix.get_rgba_unchecked(x, y);
            for c in 0..3 {
                bufs[c].sort_unstable();
                rgba[c] = select.pick(&bufs[c]);
            }
            out.set_rgba_unchecked(x, y, rgba);
        }
    }
    out
}

/// Rank filter over a `window_size x window_size` neighborhood.
///
/// # Arguments
/// * `window_size` - Positive odd window side
/// * `rank` - In `[0, 1]`; 0 selects the minimum, 1 the maximum
pub fn rank_filter(pix: &PixelBuffer, window_size: u32, rank: f32) -> FilterResult<PixelBuffer> {
    let cap = check_window(window_size)?;
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameters(format!(
            "rank must be in [0, 1], got {}",
            rank
        )));
    }
    tracing::debug!(window_size, rank, "rank filter");
    Ok(filter_window(
        pix,
        window_size,
        cap,
        Select::Rank(rank),
        BorderPolicy::Clamp,
    ))
}

/// Median filter.
pub fn median_filter(pix: &PixelBuffer, window_size: u32) -> FilterResult<PixelBuffer> {
    median_filter_with_border(pix, window_size, BorderPolicy::Clamp)
}

/// Median filter with an explicit border policy.
///
/// With [`BorderPolicy::Ignore`] windows at the edge hold fewer samples,
/// possibly an even count, in which case the two middle values are
/// averaged and rounded up.
pub fn median_filter_with_border(
    pix: &PixelBuffer,
    window_size: u32,
    border: BorderPolicy,
) -> FilterResult<PixelBuffer> {
    let cap = check_window(window_size)?;
    tracing::debug!(window_size, ?border, "median filter");
    Ok(filter_window(pix, window_size, cap, Select::Median, border))
}

/// Minimum filter (rank 0).
pub fn min_filter(pix: &PixelBuffer, window_size: u32) -> FilterResult<PixelBuffer> {
    rank_filter(pix, window_size, 0.0)
}

/// Maximum filter (rank 1).
pub fn max_filter(pix: &PixelBuffer, window_size: u32) -> FilterResult<PixelBuffer> {
    rank_filter(pix, window_size, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_validation() {
        let pix = PixelBuffer::new(4, 4).unwrap();
        assert!(matches!(
            median_filter(&pix, 0),
            Err(FilterError::InvalidParameters(_))
        ));
        assert!(median_filter(&pix, 4).is_err());
        assert!(rank_filter(&pix, 3, 1.5).is_err());
        assert!(median_filter(&pix, 1).is_ok());
        // 65537^2 does not fit in a u32
        assert!(matches!(
            median_filter(&pix, 65537),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_median_removes_salt() {
        let mut pix = PixelBuffer::new_filled(5, 5, [50, 50, 50, 255]).unwrap();
        pix.set_rgba(2, 2, [255, 0, 255, 9]).unwrap();
        let out = median_filter(&pix, 3).unwrap();
        assert_eq!(out.get_rgba(2, 2), Some([50, 50, 50, 9]));
    }

    #[test]
    fn test_min_max() {
        let mut pix = PixelBuffer::new_filled(5, 5, [50, 50, 50, 255]).unwrap();
        pix.set_rgba(2, 2, [200, 10, 50, 255]).unwrap();
        let lo = min_filter(&pix, 3).unwrap();
        let hi = max_filter(&pix, 3).unwrap();
        assert_eq!(lo.get_rgba(1, 1), Some([50, 10, 50, 255]));
        assert_eq!(hi.get_rgba(3, 3), Some([200, 50, 50, 255]));
        assert_eq!(hi.get_rgba(0, 0), Some([50, 50, 50, 255]));
    }

    #[test]
    fn test_even_median_with_ignore() {
        // 2x1 image, window 3 with Ignore: each window holds two samples
        let pix = PixelBuffer::from_rgb(2, 1, &[10, 0, 0, 21, 0, 0]).unwrap();
        let out = median_filter_with_border(&pix, 3, BorderPolicy::Ignore).unwrap();
        // (10 + 21) / 2 = 15.5 -> 16
        assert_eq!(out.get_rgba(0, 0).unwrap()[0], 16);
        assert_eq!(out.get_rgba(1, 0).unwrap()[0], 16);
    }
}
