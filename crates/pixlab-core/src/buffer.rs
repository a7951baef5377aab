//! PixelBuffer - The main image container
//!
//! `PixelBuffer` is the only pixel data the engine owns. Every decoder
//! produces one and every transform reads one and returns a new one.
//!
//! # Pixel layout
//!
//! - Row-major, top row first
//! - Four bytes per pixel in `R, G, B, A` order
//! - `data.len() == width * height * 4` always holds
//! - `width` and `height` are never zero
//!
//! # Ownership model
//!
//! Operations take `&PixelBuffer` and build a fresh output buffer, so a
//! source is never read while it is being written. The owning session
//! swaps the result in once it is complete.

use crate::color::{self, CHANNELS, Channel};
use crate::error::{Error, Result};

/// RGBA raster, 8 bits per channel.
///
/// # Examples
///
/// ```
/// use pixlab_core::PixelBuffer;
///
/// let pix = PixelBuffer::new(4, 3).unwrap();
/// assert_eq!(pix.width(), 4);
/// assert_eq!(pix.height(), 3);
/// assert_eq!(pix.data().len(), 4 * 3 * 4);
/// assert_eq!(pix.get_rgba(0, 0), Some([0, 0, 0, 255]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// RGBA samples, row-major
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new opaque black buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero or
    /// the sample count overflows `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, color::compose_rgb(0, 0, 0))
    }

    /// Create a buffer where every pixel has the given RGBA value.
    pub fn new_filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let len = Self::byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..(len / CHANNELS) {
            data.extend_from_slice(&rgba);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing RGBA byte vector.
    ///
    /// This is the entry point for externally decoded images (for example
    /// a JPEG decoded by the host), which arrive as `width`, `height` and
    /// an RGBA array.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] for zero dimensions
    /// - [`Error::BufferSizeMismatch`] if `data.len() != width * height * 4`
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::byte_len(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer from packed RGB triplets, inserting alpha = 255
    /// after every third sample.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] for zero dimensions
    /// - [`Error::BufferSizeMismatch`] if `rgb.len() != width * height * 3`
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self> {
        let len = Self::byte_len(width, height)?;
        let expected = len / CHANNELS * 3;
        if rgb.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: rgb.len(),
            });
        }
        let mut data = Vec::with_capacity(len);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], color::OPAQUE]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an opaque black buffer with the same dimensions as `self`.
    pub fn new_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: [0, 0, 0, color::OPAQUE].repeat(self.pixel_count()),
        }
    }

    fn byte_len(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check whether two buffers have identical dimensions.
    pub fn sizes_equal(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Get the raw RGBA samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable access to the raw RGBA samples.
    ///
    /// The length cannot change through this slice, so the size
    /// invariant is preserved.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return the RGBA samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Copy out the RGB samples, dropping alpha.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.data.chunks_exact(CHANNELS) {
            rgb.extend_from_slice(&px[..3]);
        }
        rgb
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Get the RGBA value at `(x, y)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_rgba_unchecked(x, y))
    }

    /// Get the RGBA value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_rgba_unchecked(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index_of(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Get one channel sample without bounds checking.
    #[inline]
    pub fn sample_unchecked(&self, x: u32, y: u32, channel: Channel) -> u8 {
        self.data[self.index_of(x, y) + channel.index()]
    }

    /// Set the RGBA value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        self.set_rgba_unchecked(x, y, rgba);
        Ok(())
    }

    /// Set the RGBA value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_rgba_unchecked(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index_of(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Iterate over pixels as 4-byte slices.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Iterate mutably over pixels as 4-byte slices.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Minimum and maximum sample of one channel over the whole image.
    pub fn channel_range(&self, channel: Channel) -> (u8, u8) {
        let c = channel.index();
        self.pixels()
            .fold((u8::MAX, u8::MIN), |(lo, hi), px| (lo.min(px[c]), hi.max(px[c])))
    }

    /// Count pixels whose R, G and B samples are all above `cutoff`.
    pub fn count_foreground(&self, cutoff: u8) -> usize {
        self.pixels()
            .filter(|px| px[..3].iter().all(|&v| v > cutoff))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_opaque_black() {
        let pix = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(pix.pixel_count(), 6);
        assert!(pix.pixels().all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelBuffer::new(0, 5),
            Err(Error::InvalidDimension { width: 0, height: 5 })
        ));
        assert!(PixelBuffer::new(5, 0).is_err());
        assert!(PixelBuffer::from_rgba(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_from_rgba_size_check() {
        let err = PixelBuffer::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        ));
        assert!(PixelBuffer::from_rgba(2, 2, vec![7; 16]).is_ok());
    }

    #[test]
    fn test_from_rgb_inserts_alpha() {
        let pix = PixelBuffer::from_rgb(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(pix.data(), &[1, 2, 3, 255, 4, 5, 6, 255]);
        assert_eq!(pix.to_rgb_bytes(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_get_set_rgba() {
        let mut pix = PixelBuffer::new(4, 4).unwrap();
        pix.set_rgba(3, 2, [10, 20, 30, 40]).unwrap();
        assert_eq!(pix.get_rgba(3, 2), Some([10, 20, 30, 40]));
        assert_eq!(pix.sample_unchecked(3, 2, Channel::Green), 20);
        assert_eq!(pix.get_rgba(4, 0), None);
        assert!(pix.set_rgba(0, 4, [0; 4]).is_err());
    }

    #[test]
    fn test_row_major_layout() {
        let mut pix = PixelBuffer::new(3, 2).unwrap();
        pix.set_rgba(1, 1, [9, 9, 9, 9]).unwrap();
        // (1, 1) -> pixel index 4 -> byte 16
        assert_eq!(pix.index_of(1, 1), 16);
        assert_eq!(&pix.data()[16..20], &[9, 9, 9, 9]);
    }

    #[test]
    fn test_channel_range_and_foreground() {
        let mut pix = PixelBuffer::new_filled(2, 2, [50, 60, 70, 255]).unwrap();
        pix.set_rgba(1, 1, [200, 210, 220, 255]).unwrap();
        assert_eq!(pix.channel_range(Channel::Red), (50, 200));
        assert_eq!(pix.count_foreground(128), 1);
    }

    #[test]
    fn test_new_like() {
        let pix = PixelBuffer::new_filled(5, 3, [1, 2, 3, 4]).unwrap();
        let other = pix.new_like();
        assert!(pix.sizes_equal(&other));
        assert_eq!(other.get_rgba(4, 2), Some([0, 0, 0, 255]));
    }
}
