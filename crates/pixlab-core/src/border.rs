//! Border handling for neighborhood operations
//!
//! Convolution, rank filters and morphology all read neighbors that may
//! fall outside the image. The policy that decides what such a read
//! returns is named here so the kernel math never hard-codes it.

/// How a neighbor coordinate outside `[0, len)` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderPolicy {
    /// Replicate the nearest edge pixel.
    #[default]
    Clamp,
    /// Wrap around to the opposite edge.
    Wrap,
    /// The neighbor does not exist and takes no part in the operation.
    ///
    /// In a convolution this is equivalent to zero padding.
    Ignore,
}

impl BorderPolicy {
    /// Resolve a possibly out-of-range coordinate along an axis of
    /// length `len`.
    ///
    /// Returns `None` when the neighbor must be skipped.
    #[inline]
    pub fn resolve(self, coord: i64, len: u32) -> Option<u32> {
        let len = len as i64;
        if (0..len).contains(&coord) {
            return Some(coord as u32);
        }
        match self {
            BorderPolicy::Clamp => Some(coord.clamp(0, len - 1) as u32),
            BorderPolicy::Wrap => Some(coord.rem_euclid(len) as u32),
            BorderPolicy::Ignore => None,
        }
    }

    /// Resolve a 2D neighbor; `None` if either axis is skipped.
    #[inline]
    pub fn resolve_xy(self, x: i64, y: i64, width: u32, height: u32) -> Option<(u32, u32)> {
        Some((self.resolve(x, width)?, self.resolve(y, height)?))
    }
}
