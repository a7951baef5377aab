//! Point operations
//!
//! Each output pixel depends only on the input pixel at the same
//! position. Results are computed in floating point, then rounded and
//! clamped to `[0, 255]` per channel.

use pixlab_core::{PixelBuffer, color};

/// A built-in per-pixel operation.
///
/// Arithmetic variants carry one constant per color channel, in
/// `[R, G, B]` order. Alpha passes through every built-in operation
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointOp {
    /// `v + c`
    Add([f64; 3]),
    /// `v - c`
    Subtract([f64; 3]),
    /// `v * c`
    Multiply([f64; 3]),
    /// `v / c`; a zero divisor yields 0 for that channel
    Divide([f64; 3]),
    /// `v + delta` on all three channels
    Brightness(f64),
    /// `(r + g + b) / 3` on all three channels
    GrayscaleAverage,
    /// `0.21r + 0.72g + 0.07b` on all three channels
    GrayscaleLuminosity,
    /// `255 - v`
    Invert,
}

impl PointOp {
    /// Evaluate the operation for one pixel.
    pub fn eval(&self, px: [u8; 4]) -> [f64; 4] {
        let [r, g, b, a] = px.map(f64::from);
        let rgb = [r, g, b];
        let per_channel = |f: &dyn Fn(f64, usize) -> f64| {
            [f(rgb[0], 0), f(rgb[1], 1), f(rgb[2], 2), a]
        };
        match *self {
            PointOp::Add(c) => per_channel(&|v, i| v + c[i]),
            PointOp::Subtract(c) => per_channel(&|v, i| v - c[i]),
            PointOp::Multiply(c) => per_channel(&|v, i| v * c[i]),
            PointOp::Divide(c) => per_channel(&|v, i| if c[i] == 0.0 { 0.0 } else { v / c[i] }),
            PointOp::Brightness(d) => per_channel(&|v, _| v + d),
            PointOp::GrayscaleAverage => {
                let y = (r + g + b) / 3.0;
                [y, y, y, a]
            }
            PointOp::GrayscaleLuminosity => {
                let y = 0.21 * r + 0.72 * g + 0.07 * b;
                [y, y, y, a]
            }
            PointOp::Invert => per_channel(&|v, _| 255.0 - v),
        }
    }
}

/// Apply `f` to every pixel and collect the results in a new buffer.
///
/// `f` receives the source RGBA sample and returns the new sample in
/// floating point; each returned channel, alpha included, is rounded
/// and clamped to `[0, 255]`. The source is not modified.
///
/// # Examples
///
/// ```
/// use pixlab_core::PixelBuffer;
/// use pixlab_filter::point::map_pixels;
///
/// let pix = PixelBuffer::new_filled(2, 2, [100, 150, 200, 255]).unwrap();
/// let out = map_pixels(&pix, |[r, g, b, a]| {
///     [r as f64 * 2.0, g as f64, b as f64 - 250.0, a as f64]
/// });
/// assert_eq!(out.get_rgba(1, 1), Some([200, 150, 0, 255]));
/// ```
pub fn map_pixels<F>(pix: &PixelBuffer, mut f: F) -> PixelBuffer
where
    F: FnMut([u8; 4]) -> [f64; 4],
{
    let mut out = pix.clone();
    for px in out.pixels_mut() {
        let v = f([px[0], px[1], px[2], px[3]]);
        for (dst, s) in px.iter_mut().zip(v) {
            *dst = color::clamp_sample(s);
        }
    }
    out
}

/// Apply a built-in point operation.
pub fn apply_point_op(pix: &PixelBuffer, op: PointOp) -> PixelBuffer {
    tracing::debug!(?op, "point operation");
    map_pixels(pix, |px| op.eval(px))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::new_filled(1, 1, rgba).unwrap()
    }

    fn one(pix: &PixelBuffer) -> [u8; 4] {
        pix.get_rgba(0, 0).unwrap()
    }

    #[test]
    fn test_arithmetic_clamps() {
        let p = px([100, 200, 10, 128]);
        assert_eq!(one(&apply_point_op(&p, PointOp::Add([100.0, 100.0, 0.0]))), [200, 255, 10, 128]);
        assert_eq!(one(&apply_point_op(&p, PointOp::Subtract([150.0, 0.0, 5.0]))), [0, 200, 5, 128]);
        assert_eq!(one(&apply_point_op(&p, PointOp::Multiply([1.5, 0.5, 2.0]))), [150, 100, 20, 128]);
        assert_eq!(one(&apply_point_op(&p, PointOp::Brightness(-20.0))), [80, 180, 0, 128]);
    }

    #[test]
    fn test_divide_by_zero_yields_zero() {
        let p = px([100, 200, 10, 255]);
        assert_eq!(one(&apply_point_op(&p, PointOp::Divide([0.0, 2.0, 3.0]))), [0, 100, 3, 255]);
    }

    #[test]
    fn test_grayscale() {
        let p = px([10, 20, 31, 7]);
        assert_eq!(one(&apply_point_op(&p, PointOp::GrayscaleAverage)), [20, 20, 20, 7]);
        let p = px([255, 0, 0, 255]);
        // 0.21 * 255 = 53.55
        assert_eq!(one(&apply_point_op(&p, PointOp::GrayscaleLuminosity)), [54, 54, 54, 255]);
    }

    #[test]
    fn test_invert() {
        let p = px([0, 128, 255, 255]);
        assert_eq!(one(&apply_point_op(&p, PointOp::Invert)), [255, 127, 0, 255]);
    }

    #[test]
    fn test_map_pixels_leaves_source() {
        let p = px([1, 2, 3, 4]);
        let out = map_pixels(&p, |_| [300.0, -1.0, 2.4, 2.6]);
        assert_eq!(one(&out), [255, 0, 2, 3]);
        assert_eq!(one(&p), [1, 2, 3, 4]);
    }
}
