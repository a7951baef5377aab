//! Histogram generation for pixel buffers
//!
//! Functions to compute 256-bin value distributions of a single channel
//! or of the luma of each pixel, and their cumulative distributions.

use crate::PixelBuffer;
use crate::color::{self, Channel};

/// Number of bins in an 8-bit histogram
pub const BINS: usize = 256;

/// Counts of each 8-bit value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; BINS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { counts: [0; BINS] }
    }
}

impl Histogram {
    /// Build a histogram from raw counts.
    pub fn from_counts(counts: [u32; BINS]) -> Self {
        Self { counts }
    }

    /// Tally one channel over every pixel.
    ///
    /// # Example
    ///
    /// ```
    /// use pixlab_core::{Histogram, PixelBuffer, color::Channel};
    ///
    /// let pix = PixelBuffer::new_filled(4, 4, [10, 20, 30, 255]).unwrap();
    /// let hist = Histogram::from_channel(&pix, Channel::Green);
    /// assert_eq!(hist.count(20), 16);
    /// assert_eq!(hist.total(), 16);
    /// ```
    pub fn from_channel(pix: &PixelBuffer, channel: Channel) -> Self {
        let c = channel.index();
        let mut counts = [0u32; BINS];
        for px in pix.pixels() {
            counts[px[c] as usize] += 1;
        }
        Self { counts }
    }

    /// Tally the rounded luma (`0.3R + 0.59G + 0.11B`) of every pixel.
    pub fn from_luma(pix: &PixelBuffer) -> Self {
        let mut counts = [0u32; BINS];
        for px in pix.pixels() {
            counts[color::luma_u8(px[0], px[1], px[2]) as usize] += 1;
        }
        Self { counts }
    }

    /// Count for a single value.
    #[inline]
    pub fn count(&self, value: u8) -> u32 {
        self.counts[value as usize]
    }

    /// All 256 counts.
    pub fn counts(&self) -> &[u32; BINS] {
        &self.counts
    }

    /// Total number of samples tallied.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Cumulative distribution: `cdf[v] = sum(counts[0..=v])`.
    pub fn cdf(&self) -> [u64; BINS] {
        let mut cdf = [0u64; BINS];
        let mut acc = 0u64;
        for (i, &c) in self.counts.iter().enumerate() {
            acc += c as u64;
            cdf[i] = acc;
        }
        cdf
    }

    /// Smallest value with a nonzero count.
    pub fn min_value(&self) -> Option<u8> {
        self.counts.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Largest value with a nonzero count.
    pub fn max_value(&self) -> Option<u8> {
        self.counts.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    /// Mean value, or `None` for an empty histogram.
    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let sum: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(v, &c)| v as f64 * c as f64)
            .sum();
        Some(sum / total as f64)
    }

    /// Mean of the values in `lo..=hi`, or `None` if that range is empty.
    pub fn mean_in_range(&self, lo: u8, hi: u8) -> Option<f64> {
        if lo > hi {
            return None;
        }
        let (sum, n) = self.counts[lo as usize..=hi as usize]
            .iter()
            .enumerate()
            .fold((0.0f64, 0u64), |(s, n), (i, &c)| {
                (s + (lo as usize + i) as f64 * c as f64, n + c as u64)
            });
        (n > 0).then(|| sum / n as f64)
    }
}

/// RGB channel histograms
///
/// Contains separate 256-bin histograms for red, green, and blue channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorHistogram {
    /// Red channel histogram
    pub red: Histogram,
    /// Green channel histogram
    pub green: Histogram,
    /// Blue channel histogram
    pub blue: Histogram,
}

impl ColorHistogram {
    /// Tally R, G and B in a single pass.
    pub fn from_buffer(pix: &PixelBuffer) -> Self {
        let mut r = [0u32; BINS];
        let mut g = [0u32; BINS];
        let mut b = [0u32; BINS];
        for px in pix.pixels() {
            r[px[0] as usize] += 1;
            g[px[1] as usize] += 1;
            b[px[2] as usize] += 1;
        }
        Self {
            red: Histogram::from_counts(r),
            green: Histogram::from_counts(g),
            blue: Histogram::from_counts(b),
        }
    }

    /// Histogram of one color channel.
    ///
    /// Alpha has no stored histogram here; asking for it tallies nothing
    /// and returns `None`.
    pub fn channel(&self, channel: Channel) -> Option<&Histogram> {
        match channel {
            Channel::Red => Some(&self.red),
            Channel::Green => Some(&self.green),
            Channel::Blue => Some(&self.blue),
            Channel::Alpha => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone() -> PixelBuffer {
        let mut pix = PixelBuffer::new_filled(4, 1, [10, 0, 0, 255]).unwrap();
        pix.set_rgba(3, 0, [250, 0, 0, 255]).unwrap();
        pix
    }

    #[test]
    fn test_from_channel() {
        let hist = Histogram::from_channel(&two_tone(), Channel::Red);
        assert_eq!(hist.count(10), 3);
        assert_eq!(hist.count(250), 1);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.min_value(), Some(10));
        assert_eq!(hist.max_value(), Some(250));
    }

    #[test]
    fn test_cdf_is_running_sum() {
        let hist = Histogram::from_channel(&two_tone(), Channel::Red);
        let cdf = hist.cdf();
        assert_eq!(cdf[9], 0);
        assert_eq!(cdf[10], 3);
        assert_eq!(cdf[249], 3);
        assert_eq!(cdf[250], 4);
        assert_eq!(cdf[255], 4);
    }

    #[test]
    fn test_mean() {
        let hist = Histogram::from_channel(&two_tone(), Channel::Red);
        assert_eq!(hist.mean(), Some(70.0));
        assert_eq!(hist.mean_in_range(0, 100), Some(10.0));
        assert_eq!(hist.mean_in_range(11, 200), None);
        assert_eq!(Histogram::default().mean(), None);
    }

    #[test]
    fn test_luma_histogram() {
        let pix = PixelBuffer::new_filled(2, 2, [100, 100, 100, 255]).unwrap();
        let hist = Histogram::from_luma(&pix);
        assert_eq!(hist.count(100), 4);
    }

    #[test]
    fn test_color_histogram() {
        let ch = ColorHistogram::from_buffer(&two_tone());
        assert_eq!(ch.red.count(10), 3);
        assert_eq!(ch.green.count(0), 4);
        assert!(ch.channel(Channel::Alpha).is_none());
        assert_eq!(ch.channel(Channel::Blue).unwrap().count(0), 4);
    }
}
