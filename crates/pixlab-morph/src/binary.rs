//! Hit-or-miss transform
//!
//! The input is treated as a binary image: a pixel is foreground when
//! each of R, G and B is above [`FOREGROUND_THRESHOLD`] and background
//! when each is at or below it. Mixed pixels are neither.

use crate::{MorphResult, Sel};
use pixlab_core::{PixelBuffer, color};

/// Samples above this value count as foreground.
pub const FOREGROUND_THRESHOLD: u8 = 128;

/// Whether an RGBA pixel is foreground.
#[inline]
pub fn is_foreground(px: [u8; 4]) -> bool {
    px[..3].iter().all(|&v| v > FOREGROUND_THRESHOLD)
}

/// Whether an RGBA pixel is background.
#[inline]
pub fn is_background(px: [u8; 4]) -> bool {
    px[..3].iter().all(|&v| v <= FOREGROUND_THRESHOLD)
}

/// Hit-miss transform
///
/// A pixel matches when every in-image hit cell covers foreground and
/// every in-image miss cell covers background; cells falling outside the
/// image are not checked. Matches become opaque white, everything else
/// opaque black.
pub fn hit_miss_transform(pix: &PixelBuffer, sel: &Sel) -> MorphResult<PixelBuffer> {
    let (w, h) = pix.dimensions();
    let hit_offsets: Vec<_> = sel.hit_offsets().collect();
    let miss_offsets: Vec<_> = sel.miss_offsets().collect();

    let neighbor = |x: u32, y: u32, dx: i32, dy: i32| -> Option<[u8; 4]> {
        let sx = x as i64 + dx as i64;
        let sy = y as i64 + dy as i64;
        if sx >= 0 && sx < w as i64 && sy >= 0 && sy < h as i64 {
            Some(pix.get_rgba_unchecked(sx as u32, sy as u32))
        } else {
            None
        }
    };

    let white = color::compose_rgb(255, 255, 255);
    let black = color::compose_rgb(0, 0, 0);
    let mut out = pix.new_like();
    let mut matches = 0usize;

    for y in 0..h {
        for x in 0..w {
            // Check if all hits match foreground
            let hits_match = hit_offsets
                .iter()
                .all(|&(dx, dy)| neighbor(x, y, dx, dy).is_none_or(is_foreground));

            // Check if all misses match background
            let misses_match = hits_match
                && miss_offsets
                    .iter()
                    .all(|&(dx, dy)| neighbor(x, y, dx, dy).is_none_or(is_background));

            if misses_match {
                matches += 1;
                out.set_rgba_unchecked(x, y, white);
            } else {
                out.set_rgba_unchecked(x, y, black);
            }
        }
    }

    tracing::debug!(matches, "hit-miss transform");
    Ok(out)
}
