//! Convolution kernels
//!
//! Defines kernel structures for image convolution operations.
//!
//! Both sides of a kernel are odd, so the center `(width / 2, height / 2)`
//! is a real cell and the kernel is symmetric about the output pixel.

use crate::{FilterError, FilterResult};

/// How a kernel's weights are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConvolveMode {
    /// Divide by the sum of weights when that sum is nonzero
    #[default]
    Normalize,
    /// Apply the weights as given
    Raw,
}

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

fn check_side(name: &str, v: u32) -> FilterResult<()> {
    if v == 0 || v % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel {} must be a positive odd number, got {}",
            name, v
        )));
    }
    Ok(())
}

impl Kernel {
    /// Create a new zero-filled kernel with the given dimensions.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidKernel`] if either side is zero or even, or
    /// the cell count does not fit in a `u32`.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        check_side("width", width)?;
        check_side("height", height)?;
        let len = width.checked_mul(height).ok_or_else(|| {
            FilterError::InvalidKernel(format!("kernel {}x{} is too large", width, height))
        })?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len as usize],
        })
    }

    /// Create a kernel from a row-major slice of values.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidKernel`] for even or zero sides, a length
    /// mismatch, or a non-finite weight.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} weights for a {}x{} kernel, got {}",
                kernel.data.len(),
                width,
                height,
                data.len()
            )));
        }
        if let Some(bad) = data.iter().find(|v| !v.is_finite()) {
            return Err(FilterError::InvalidKernel(format!(
                "kernel weight is not finite: {}",
                bad
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a kernel from rows of weights.
    ///
    /// All rows must have the same odd length and the row count must be
    /// odd.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> FilterResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().len()) as u32;
        if rows.iter().any(|r| r.as_ref().len() as u32 != width) {
            return Err(FilterError::InvalidKernel(
                "kernel rows have different lengths".to_string(),
            ));
        }
        let flat: Vec<f32> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::from_slice(width, height, &flat)
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size, size)?;
        let v = 1.0 / kernel.data.len() as f32;
        kernel.data.fill(v);
        Ok(kernel)
    }

    /// Create a normalized Gaussian kernel of odd `size`.
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(FilterError::InvalidParameters(format!(
                "gaussian sigma must be positive, got {}",
                sigma
            )));
        }
        let mut kernel = Self::new(size, size)?;
        let c = (size / 2) as f32;
        let denom = 2.0 * sigma * sigma;
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - c;
                let dy = y as f32 - c;
                kernel.set(x, y, (-(dx * dx + dy * dy) / denom).exp());
            }
        }
        kernel.normalize();
        Ok(kernel)
    }

    /// Sobel kernel responding to horizontal edges (vertical gradient).
    pub fn sobel_horizontal() -> Self {
        Self::fixed3([-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
    }

    /// Sobel kernel responding to vertical edges (horizontal gradient).
    pub fn sobel_vertical() -> Self {
        Self::fixed3([-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0])
    }

    /// 4-neighbor Laplacian.
    pub fn laplacian() -> Self {
        Self::fixed3([0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0])
    }

    /// Sharpening kernel (identity plus negated 4-neighbor Laplacian).
    pub fn sharpen() -> Self {
        Self::fixed3([0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0])
    }

    fn fixed3(data: [f32; 9]) -> Self {
        Self {
            width: 3,
            height: 3,
            data: data.to_vec(),
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.width / 2
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.height / 2
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel whose sum is zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Copy of the kernel with `mode` folded into its weights.
    pub fn prepared(&self, mode: ConvolveMode) -> Self {
        let mut k = self.clone();
        if mode == ConvolveMode::Normalize {
            k.normalize();
        }
        k
    }
}
