//! Color morphology
//!
//! Dilation and erosion applied to each of R, G and B independently,
//! with the hit cells of a [`Sel`] as the neighborhood. Alpha is copied
//! from the source.
//!
//! Dilation takes the maximum of `src(x - dx, y - dy)` and erosion the
//! minimum of `src(x + dx, y + dy)` over hit offsets `(dx, dy)`, so
//! opening never brightens and closing never darkens a pixel, whatever
//! the shape of the SEL.

use crate::{MorphResult, Sel};
use pixlab_core::{BorderPolicy, PixelBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Max,
    Min,
}

fn morph_color(pix: &PixelBuffer, sel: &Sel, op: Extremum, border: BorderPolicy) -> PixelBuffer {
    let (w, h) = pix.dimensions();
    let offsets: Vec<(i64, i64)> = sel
        .hit_offsets()
        .map(|(dx, dy)| match op {
            Extremum::Max => (-(dx as i64), -(dy as i64)),
            Extremum::Min => (dx as i64, dy as i64),
        })
        .collect();
    // value when no neighbor participates
    let init = match op {
        Extremum::Max => 0u8,
        Extremum::Min => 255u8,
    };

    let mut out = pix.clone();
    for y in 0..h {
        for x in 0..w {
            let mut acc = [init; 3];
            for &(dx, dy) in &offsets {
                let Some((sx, sy)) = border.resolve_xy(x as i64 + dx, y as i64 + dy, w, h) else {
                    continue;
                };
                let px = pix.get_rgba_unchecked(sx, sy);
                for c in 0..3 {
                    acc[c] = match op {
                        Extremum::Max => acc[c].max(px[c]),
                        Extremum::Min => acc[c].min(px[c]),
                    };
                }
            }
            let mut rgba = pix.get_rgba_unchecked(x, y);
            rgba[..3].copy_from_slice(&acc);
            out.set_rgba_unchecked(x, y, rgba);
        }
    }
    out
}

/// Color dilation. Out-of-image neighbors are ignored.
pub fn dilate_color(pix: &PixelBuffer, sel: &Sel) -> MorphResult<PixelBuffer> {
    dilate_color_with_border(pix, sel, BorderPolicy::Ignore)
}

/// Color dilation with an explicit border policy.
pub fn dilate_color_with_border(
    pix: &PixelBuffer,
    sel: &Sel,
    border: BorderPolicy,
) -> MorphResult<PixelBuffer> {
    tracing::debug!(sw = sel.width(), sh = sel.height(), ?border, "dilate");
    Ok(morph_color(pix, sel, Extremum::Max, border))
}

/// Color erosion. Out-of-image neighbors are ignored.
pub fn erode_color(pix: &PixelBuffer, sel: &Sel) -> MorphResult<PixelBuffer> {
    erode_color_with_border(pix, sel, BorderPolicy::Ignore)
}

/// Color erosion with an explicit border policy.
pub fn erode_color_with_border(
    pix: &PixelBuffer,
    sel: &Sel,
    border: BorderPolicy,
) -> MorphResult<PixelBuffer> {
    tracing::debug!(sw = sel.width(), sh = sel.height(), ?border, "erode");
    Ok(morph_color(pix, sel, Extremum::Min, border))
}

/// Color opening: erosion followed by dilation
pub fn open_color(pix: &PixelBuffer, sel: &Sel) -> MorphResult<PixelBuffer> {
    open_color_with_border(pix, sel, BorderPolicy::Ignore)
}

/// Color opening with an explicit border policy.
pub fn open_color_with_border(
    pix: &PixelBuffer,
    sel: &Sel,
    border: BorderPolicy,
) -> MorphResult<PixelBuffer> {
    let eroded = erode_color_with_border(pix, sel, border)?;
    dilate_color_with_border(&eroded, sel, border)
}

/// Color closing: dilation followed by erosion
pub fn close_color(pix: &PixelBuffer, sel: &Sel) -> MorphResult<PixelBuffer> {
    close_color_with_border(pix, sel, BorderPolicy::Ignore)
}

/// Color closing with an explicit border policy.
pub fn close_color_with_border(
    pix: &PixelBuffer,
    sel: &Sel,
    border: BorderPolicy,
) -> MorphResult<PixelBuffer> {
    let dilated = dilate_color_with_border(pix, sel, border)?;
    erode_color_with_border(&dilated, sel, border)
}
