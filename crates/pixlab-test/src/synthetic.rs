//! Synthetic test images
//!
//! Small deterministic buffers used by the regression tests in place of
//! checked-in image files.

use pixlab_core::PixelBuffer;

/// Uniform gray image with every R, G and B sample set to `value`.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn uniform(width: u32, height: u32, value: u8) -> PixelBuffer {
    PixelBuffer::new_filled(width, height, [value, value, value, 255])
        .expect("synthetic dimensions must be nonzero")
}

/// Horizontal gray ramp from `lo` at the left edge to `hi` at the right.
pub fn ramp(width: u32, height: u32, lo: u8, hi: u8) -> PixelBuffer {
    let mut pix = uniform(width, height, lo);
    let span = hi as f64 - lo as f64;
    for y in 0..height {
        for x in 0..width {
            let t = if width > 1 {
                x as f64 / (width - 1) as f64
            } else {
                0.0
            };
            let v = (lo as f64 + t * span).round() as u8;
            pix.set_rgba_unchecked(x, y, [v, v, v, 255]);
        }
    }
    pix
}

/// Checkerboard of `cell`-sized squares alternating between `dark` and
/// `light`, starting with `dark` at the origin.
pub fn checkerboard(width: u32, height: u32, cell: u32, dark: u8, light: u8) -> PixelBuffer {
    let cell = cell.max(1);
    let mut pix = uniform(width, height, dark);
    for y in 0..height {
        for x in 0..width {
            if ((x / cell) + (y / cell)) % 2 == 1 {
                pix.set_rgba_unchecked(x, y, [light, light, light, 255]);
            }
        }
    }
    pix
}

/// Black image with white axis-aligned rectangles `(x, y, w, h)` painted
/// on it. Rectangles are clipped to the image.
pub fn binary_rects(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> PixelBuffer {
    let mut pix = uniform(width, height, 0);
    for &(rx, ry, rw, rh) in rects {
        for y in ry..ry.saturating_add(rh).min(height) {
            for x in rx..rx.saturating_add(rw).min(width) {
                pix.set_rgba_unchecked(x, y, [255, 255, 255, 255]);
            }
        }
    }
    pix
}

/// Deterministic pseudo-random color noise.
///
/// Uses a fixed linear congruential generator so every run produces the
/// same image for a given `seed`.
pub fn noise(width: u32, height: u32, seed: u32) -> PixelBuffer {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    let mut next = move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 24) as u8
    };
    let mut pix = uniform(width, height, 0);
    for px in pix.pixels_mut() {
        px[0] = next();
        px[1] = next();
        px[2] = next();
    }
    pix
}

/// Number of pixels whose R, G and B samples are all above 128.
pub fn foreground_area(pix: &PixelBuffer) -> usize {
    pix.count_foreground(128)
}
