//! pixlab Core - Basic data structures for the pixlab image engine
//!
//! This crate provides the fundamental data structures used throughout
//! the engine:
//!
//! - [`PixelBuffer`] - The RGBA image container every operation works on
//! - [`BorderPolicy`] - How neighborhood operations address pixels outside
//!   the image
//! - [`Histogram`] / [`ColorHistogram`] - 256-bin value distributions
//!
//! # Pixel format
//!
//! Pixels are stored row-major as four bytes, `R, G, B, A`, 8 bits per
//! channel. Alpha is 255 (opaque) unless an operation explicitly sets
//! transparency.

pub mod border;
pub mod buffer;
pub mod error;
pub mod histogram;

pub use border::BorderPolicy;
pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use histogram::{ColorHistogram, Histogram};

/// Color channel indices and helper functions for RGBA pixels.
///
/// A pixel is represented as `[u8; 4]` in `R, G, B, A` order.
pub mod color {
    /// Red channel (byte 0)
    pub const RED: usize = 0;
    /// Green channel (byte 1)
    pub const GREEN: usize = 1;
    /// Blue channel (byte 2)
    pub const BLUE: usize = 2;
    /// Alpha channel (byte 3)
    pub const ALPHA: usize = 3;

    /// Bytes per pixel
    pub const CHANNELS: usize = 4;

    /// Fully opaque alpha value
    pub const OPAQUE: u8 = 255;

    /// A single color channel of an RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Channel {
        /// Red channel
        Red,
        /// Green channel
        Green,
        /// Blue channel
        Blue,
        /// Alpha channel
        Alpha,
    }

    impl Channel {
        /// The three color channels, in storage order.
        pub const RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

        /// Byte offset of this channel within a pixel.
        #[inline]
        pub fn index(self) -> usize {
            match self {
                Channel::Red => RED,
                Channel::Green => GREEN,
                Channel::Blue => BLUE,
                Channel::Alpha => ALPHA,
            }
        }
    }

    /// Compose an opaque RGBA pixel.
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> [u8; 4] {
        [r, g, b, OPAQUE]
    }

    /// Compose an RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
        [r, g, b, a]
    }

    /// Weighted luma `0.3R + 0.59G + 0.11B`, unrounded.
    ///
    /// Thresholds compare it through [`luma_x100`].
    #[inline]
    pub fn luma(r: u8, g: u8, b: u8) -> f64 {
        0.3 * r as f64 + 0.59 * g as f64 + 0.11 * b as f64
    }

    /// Luma scaled by 100, `30R + 59G + 11B`, in exact integers.
    ///
    /// Comparing `luma_x100(..) > 100 * t` is the same as `luma > t`
    /// without float error at the boundary.
    #[inline]
    pub fn luma_x100(r: u8, g: u8, b: u8) -> u32 {
        30 * r as u32 + 59 * g as u32 + 11 * b as u32
    }

    /// Luma rounded to the nearest 8-bit level.
    #[inline]
    pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
        luma(r, g, b).round().clamp(0.0, 255.0) as u8
    }

    /// Luminosity grayscale `0.21R + 0.72G + 0.07B`, rounded.
    #[inline]
    pub fn luminosity(r: u8, g: u8, b: u8) -> u8 {
        (0.21 * r as f64 + 0.72 * g as f64 + 0.07 * b as f64)
            .round()
            .clamp(0.0, 255.0) as u8
    }

    /// Average grayscale `(R + G + B) / 3`, rounded.
    #[inline]
    pub fn average(r: u8, g: u8, b: u8) -> u8 {
        ((r as f64 + g as f64 + b as f64) / 3.0).round() as u8
    }

    /// Round and clamp a floating-point sample to `[0, 255]`.
    #[inline]
    pub fn clamp_sample(v: f64) -> u8 {
        if v.is_nan() {
            return 0;
        }
        v.round().clamp(0.0, 255.0) as u8
    }

}
