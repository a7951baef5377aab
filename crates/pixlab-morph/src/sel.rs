//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Each cell is a hit, a miss, or ignored; the origin is the
//! cell placed over the pixel being computed and defaults to
//! `(width / 2, height / 2)`.
//!
//! SELs can be built from
//!
//! - binary rows (`1` hit, `0` don't care), for dilation and erosion
//! - ternary rows (`Some(true)` hit, `Some(false)` miss, `None` don't
//!   care), for the hit-or-miss transform
//! - a text pattern
//! - a JSON matrix such as `[[true, null, false], [1, 0, 1]]`

use crate::{MorphError, MorphResult};
use serde::Deserialize;

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - must match foreground (set pixels)
    Hit = 1,
    /// Miss - must match background (unset pixels)
    Miss = 2,
}

/// One cell of a JSON matrix.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCell {
    Flag(Option<bool>),
    Bit(u8),
}

/// Side `2 * radius + 1` of a radial SEL.
fn disk_side(radius: u32) -> MorphResult<u32> {
    radius
        .checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .ok_or_else(|| MorphError::InvalidSel(format!("SEL radius {} is too large", radius)))
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
    name: Option<String>,
}

impl Sel {
    /// Create a new structuring element with every cell set to don't care
    ///
    /// Even sides are allowed; the origin is `(width / 2, height / 2)`.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "SEL dimensions must be nonzero, got {}x{}",
                width, height
            )));
        }
        let len = width.checked_mul(height).ok_or_else(|| {
            MorphError::InvalidSel(format!("SEL {}x{} is too large", width, height))
        })?;
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; len as usize],
            name: None,
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(SelElement::Hit);
        Ok(sel)
    }

    /// Create a square structuring element with all hits
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// Create a horizontal line structuring element
    pub fn create_horizontal(length: u32) -> MorphResult<Self> {
        Self::create_brick(length, 1)
    }

    /// Create a vertical line structuring element
    pub fn create_vertical(length: u32) -> MorphResult<Self> {
        Self::create_brick(1, length)
    }

    /// Create a cross (+) structuring element
    ///
    /// Hits fill the middle row and middle column of a `size x size` grid.
    pub fn create_cross(size: u32) -> MorphResult<Self> {
        let mut sel = Self::new(size, size)?;
        let mid = size / 2;
        for i in 0..size {
            sel.set_element(mid, i, SelElement::Hit);
            sel.set_element(i, mid, SelElement::Hit);
        }
        Ok(sel)
    }

    /// Create a diamond structuring element (`|dx| + |dy| <= radius`)
    pub fn create_diamond(radius: u32) -> MorphResult<Self> {
        let size = disk_side(radius)?;
        let mut sel = Self::new(size, size)?;
        let r = radius as i64;
        for y in 0..size {
            for x in 0..size {
                if (x as i64 - r).abs() + (y as i64 - r).abs() <= r {
                    sel.set_element(x, y, SelElement::Hit);
                }
            }
        }
        Ok(sel)
    }

    /// Create a disk (approximate circle) structuring element
    pub fn create_disk(radius: u32) -> MorphResult<Self> {
        let size = disk_side(radius)?;
        let mut sel = Self::new(size, size)?;
        let r = radius as i64;
        for y in 0..size {
            for x in 0..size {
                let dx = x as i64 - r;
                let dy = y as i64 - r;
                if dx * dx + dy * dy <= r * r {
                    sel.set_element(x, y, SelElement::Hit);
                }
            }
        }
        Ok(sel)
    }

    /// Build a SEL from a rectangular grid of elements.
    fn from_grid(rows: Vec<Vec<SelElement>>) -> MorphResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        if height == 0 || width == 0 {
            return Err(MorphError::InvalidSel("empty SEL matrix".to_string()));
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() as u32 != width)
        {
            return Err(MorphError::InvalidSel(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                width
            )));
        }
        let mut sel = Self::new(width, height)?;
        sel.data = rows.into_iter().flatten().collect();
        Ok(sel)
    }

    /// Create a SEL from binary rows: `1` is a hit, `0` is don't care.
    ///
    /// # Errors
    ///
    /// [`MorphError::InvalidSel`] for empty or ragged matrices and for
    /// values other than 0 and 1.
    pub fn from_binary_rows<R: AsRef<[u8]>>(rows: &[R]) -> MorphResult<Self> {
        let grid = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&v| match v {
                        0 => Ok(SelElement::DontCare),
                        1 => Ok(SelElement::Hit),
                        other => Err(MorphError::InvalidSel(format!(
                            "binary SEL value must be 0 or 1, got {}",
                            other
                        ))),
                    })
                    .collect::<MorphResult<Vec<_>>>()
            })
            .collect::<MorphResult<Vec<_>>>()?;
        Self::from_grid(grid)
    }

    /// Create a SEL from ternary rows for the hit-or-miss transform.
    ///
    /// `Some(true)` is a hit, `Some(false)` a miss, `None` don't care.
    pub fn from_ternary_rows<R: AsRef<[Option<bool>]>>(rows: &[R]) -> MorphResult<Self> {
        let grid = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&v| match v {
                        Some(true) => SelElement::Hit,
                        Some(false) => SelElement::Miss,
                        None => SelElement::DontCare,
                    })
                    .collect()
            })
            .collect();
        Self::from_grid(grid)
    }

    /// Parse a SEL from a JSON matrix.
    ///
    /// Cells may be `true` (hit), `false` (miss), `null` (don't care),
    /// `1` (hit) or `0` (don't care).
    ///
    /// # Examples
    ///
    /// ```
    /// use pixlab_morph::{Sel, SelElement};
    ///
    /// let sel = Sel::from_json("[[true, null, false]]").unwrap();
    /// assert_eq!(sel.get_element(0, 0), Some(SelElement::Hit));
    /// assert_eq!(sel.get_element(2, 0), Some(SelElement::Miss));
    /// ```
    pub fn from_json(json: &str) -> MorphResult<Self> {
        let rows: Vec<Vec<JsonCell>> = serde_json::from_str(json)
            .map_err(|e| MorphError::InvalidSel(format!("invalid SEL JSON: {}", e)))?;
        let grid = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell {
                        JsonCell::Flag(Some(true)) | JsonCell::Bit(1) => Ok(SelElement::Hit),
                        JsonCell::Flag(Some(false)) => Ok(SelElement::Miss),
                        JsonCell::Flag(None) | JsonCell::Bit(0) => Ok(SelElement::DontCare),
                        JsonCell::Bit(other) => Err(MorphError::InvalidSel(format!(
                            "numeric SEL cell must be 0 or 1, got {}",
                            other
                        ))),
                    })
                    .collect::<MorphResult<Vec<_>>>()
            })
            .collect::<MorphResult<Vec<_>>>()?;
        Self::from_grid(grid)
    }

    /// Create a structuring element from a string pattern
    ///
    /// Rows are separated by newlines. `x` is a hit, `o` a miss, and `.`
    /// or a space is don't care. An uppercase `X` or `O` also marks the
    /// origin; without one the origin is the center cell.
    pub fn from_string(pattern: &str) -> MorphResult<Self> {
        let mut origin = None;
        let mut grid = Vec::new();
        for (y, line) in pattern.lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let elem = match ch {
                    'x' | 'X' => SelElement::Hit,
                    'o' | 'O' => SelElement::Miss,
                    '.' | ' ' => SelElement::DontCare,
                    other => {
                        return Err(MorphError::InvalidSel(format!(
                            "unexpected character {:?} in SEL pattern",
                            other
                        )));
                    }
                };
                if ch == 'X' || ch == 'O' {
                    if origin.is_some() {
                        return Err(MorphError::InvalidSel(
                            "SEL pattern marks more than one origin".to_string(),
                        ));
                    }
                    origin = Some((x as u32, y as u32));
                }
                row.push(elem);
            }
            grid.push(row);
        }
        let mut sel = Self::from_grid(grid)?;
        if let Some((cx, cy)) = origin {
            sel.set_origin(cx, cy)?;
        }
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidParameters(format!(
                "origin ({}, {}) outside {}x{} SEL",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set an element at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = elem;
        }
    }

    /// Get raw element data
    pub fn data(&self) -> &[SelElement] {
        &self.data
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Count the number of miss elements
    pub fn miss_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Miss).count()
    }

    /// Create the reflected (180-degree rotated) SEL
    pub fn reflect(&self) -> Self {
        let mut data = self.data.clone();
        data.reverse();
        Self {
            width: self.width,
            height: self.height,
            cx: self.width - 1 - self.cx,
            cy: self.height - 1 - self.cy,
            data,
            name: self.name.clone(),
        }
    }

    /// Rotate the SEL by 90 degrees clockwise, `rotation` times (mod 4)
    pub fn rotate_orth(&self, rotation: u32) -> Self {
        let mut sel = self.clone();
        for _ in 0..(rotation % 4) {
            let (w, h) = (sel.width, sel.height);
            let mut data = vec![SelElement::DontCare; sel.data.len()];
            for y in 0..h {
                for x in 0..w {
                    // (x, y) -> (h - 1 - y, x) in a h-wide grid
                    let nx = h - 1 - y;
                    let ny = x;
                    data[(ny * h + nx) as usize] = sel.data[(y * w + x) as usize];
                }
            }
            sel = Self {
                width: h,
                height: w,
                cx: h - 1 - sel.cy,
                cy: sel.cx,
                data,
                name: sel.name,
            };
        }
        sel
    }

    fn offsets_of(&self, kind: SelElement) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &elem)| {
                if elem == kind {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets_of(SelElement::Hit)
    }

    /// Iterate over miss positions relative to origin
    pub fn miss_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets_of(SelElement::Miss)
    }
}
