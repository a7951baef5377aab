//! Color space conversion
//!
//! Conversion between 8-bit RGB and CMYK expressed in whole percent.

use crate::{ColorError, ColorResult};

/// CMYK color with each component in percent `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

impl Cmyk {
    /// Create a new CMYK color
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidParameters`] if a component exceeds 100.
    pub fn new(c: u8, m: u8, y: u8, k: u8) -> ColorResult<Self> {
        if let Some(bad) = [c, m, y, k].into_iter().find(|&v| v > 100) {
            return Err(ColorError::InvalidParameters(format!(
                "CMYK component must be a percentage, got {}",
                bad
            )));
        }
        Ok(Self { c, m, y, k })
    }
}

fn percent(v: f64) -> u8 {
    (v * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Convert an RGB color to CMYK.
///
/// `k = 1 - max(r, g, b) / 255`, and each of c, m, y is
/// `(1 - channel / 255 - k) / (1 - k)`. Pure black gives `(0, 0, 0, 100)`.
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> Cmyk {
    let [r, g, b] = [r, g, b].map(|v| v as f64 / 255.0);
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return Cmyk {
            c: 0,
            m: 0,
            y: 0,
            k: 100,
        };
    }
    let scale = 1.0 - k;
    Cmyk {
        c: percent((1.0 - r - k) / scale),
        m: percent((1.0 - g - k) / scale),
        y: percent((1.0 - b - k) / scale),
        k: percent(k),
    }
}

/// Convert a CMYK color to RGB: `channel = 255 * (1 - x) * (1 - k)`.
pub fn cmyk_to_rgb(cmyk: Cmyk) -> (u8, u8, u8) {
    let k = 1.0 - cmyk.k as f64 / 100.0;
    let conv = |x: u8| (255.0 * (1.0 - x as f64 / 100.0) * k).round().clamp(0.0, 255.0) as u8;
    (conv(cmyk.c), conv(cmyk.m), conv(cmyk.y))
}
