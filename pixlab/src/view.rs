//! Display mapping for pan and zoom
//!
//! A [`ViewTransform`] maps image coordinates to canvas coordinates as
//! `canvas = image * scale + offset`. It never touches pixel data.

/// Default scale factor per zoom step.
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.05;

/// Zoom step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomDirection {
    /// Multiply the scale by the zoom factor
    In,
    /// Divide the scale by the zoom factor
    Out,
}

impl ZoomDirection {
    /// Direction for a mouse wheel delta: scrolling up (negative) zooms in.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y < 0.0 { Self::In } else { Self::Out }
    }
}

/// Axis-aligned rectangle in floating-point coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Overlap of two rectangles, `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        (r > x && b > y).then(|| Rect::new(x, y, r - x, b - y))
    }
}

/// Source and destination rectangles for drawing the visible part of an
/// image onto a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRegion {
    /// Visible part of the image, in image coordinates
    pub src: Rect,
    /// Where it lands on the canvas
    pub dst: Rect,
}

/// Scale and offset of the displayed image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Identity transform
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// Back to scale 1 and no offset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scale the image to fit inside the canvas and center it.
    ///
    /// The scale follows the width when the image is relatively wider
    /// than the canvas, the height otherwise. Zero dimensions leave the
    /// transform unchanged.
    pub fn fit_to_canvas(&mut self, canvas_w: u32, canvas_h: u32, img_w: u32, img_h: u32) {
        if canvas_w == 0 || canvas_h == 0 || img_w == 0 || img_h == 0 {
            return;
        }
        let (cw, ch) = (canvas_w as f64, canvas_h as f64);
        let (iw, ih) = (img_w as f64, img_h as f64);
        self.scale = if iw / ih > cw / ch { cw / iw } else { ch / ih };
        self.offset_x = (cw - iw * self.scale) / 2.0;
        self.offset_y = (ch - ih * self.scale) / 2.0;
    }

    /// Zoom by `factor` keeping the image point under `(px, py)` fixed.
    pub fn zoom_at(&mut self, px: f64, py: f64, direction: ZoomDirection, factor: f64) {
        let (ix, iy) = self.to_image(px, py);
        match direction {
            ZoomDirection::In => self.scale *= factor,
            ZoomDirection::Out => self.scale /= factor,
        }
        self.offset_x = px - ix * self.scale;
        self.offset_y = py - iy * self.scale;
    }

    /// Shift the image by a canvas-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Image point to canvas point.
    #[inline]
    pub fn to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }

    /// Canvas point to image point.
    #[inline]
    pub fn to_image(&self, px: f64, py: f64) -> (f64, f64) {
        (
            (px - self.offset_x) / self.scale,
            (py - self.offset_y) / self.scale,
        )
    }

    /// Canvas-space bounding box of an `img_w x img_h` image.
    pub fn image_bounds(&self, img_w: u32, img_h: u32) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            img_w as f64 * self.scale,
            img_h as f64 * self.scale,
        )
    }

    /// Rectangles to draw the visible part of the image.
    ///
    /// `None` when the image lies entirely outside the canvas.
    pub fn draw_region(
        &self,
        canvas_w: u32,
        canvas_h: u32,
        img_w: u32,
        img_h: u32,
    ) -> Option<DrawRegion> {
        let canvas = Rect::new(0.0, 0.0, canvas_w as f64, canvas_h as f64);
        let dst = self.image_bounds(img_w, img_h).intersect(&canvas)?;
        let (sx, sy) = self.to_image(dst.x, dst.y);
        let src = Rect::new(sx, sy, dst.width / self.scale, dst.height / self.scale);
        Some(DrawRegion { src, dst })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fit_wide_image() {
        let mut v = ViewTransform::new();
        v.fit_to_canvas(800, 600, 400, 100);
        assert!(close(v.scale(), 2.0));
        assert_eq!(v.offset(), (0.0, 200.0));
    }

    #[test]
    fn test_fit_tall_image() {
        let mut v = ViewTransform::new();
        v.fit_to_canvas(800, 600, 100, 300);
        assert!(close(v.scale(), 2.0));
        assert_eq!(v.offset(), (300.0, 0.0));
    }

    #[test]
    fn test_fit_zero_is_noop() {
        let mut v = ViewTransform::new();
        v.pan(3.0, 4.0);
        let before = v;
        v.fit_to_canvas(0, 600, 100, 100);
        v.fit_to_canvas(800, 600, 100, 0);
        assert_eq!(v, before);
    }

    #[test]
    fn test_zoom_keeps_cursor_point() {
        let mut v = ViewTransform::new();
        v.pan(10.0, -5.0);
        let before = v.to_image(120.0, 80.0);
        v.zoom_at(120.0, 80.0, ZoomDirection::In, DEFAULT_ZOOM_FACTOR);
        assert!(close(v.scale(), 1.05));
        let after = v.to_image(120.0, 80.0);
        assert!(close(before.0, after.0) && close(before.1, after.1));
        v.zoom_at(120.0, 80.0, ZoomDirection::Out, DEFAULT_ZOOM_FACTOR);
        assert!(close(v.scale(), 1.0));
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(ZoomDirection::from_wheel_delta(-3.0), ZoomDirection::In);
        assert_eq!(ZoomDirection::from_wheel_delta(3.0), ZoomDirection::Out);
        assert_eq!(ZoomDirection::from_wheel_delta(0.0), ZoomDirection::Out);
    }

    #[test]
    fn test_mapping_round_trip() {
        let mut v = ViewTransform::new();
        v.fit_to_canvas(640, 480, 320, 320);
        let (cx, cy) = v.to_canvas(10.0, 20.0);
        let (x, y) = v.to_image(cx, cy);
        assert!(close(x, 10.0) && close(y, 20.0));
        v.reset();
        assert_eq!(v, ViewTransform::default());
    }

    #[test]
    fn test_draw_region_clips() {
        let mut v = ViewTransform::new();
        v.pan(-50.0, 20.0);
        let region = v.draw_region(100, 100, 200, 50).unwrap();
        assert_eq!(region.dst, Rect::new(0.0, 20.0, 100.0, 50.0));
        assert_eq!(region.src, Rect::new(50.0, 0.0, 100.0, 50.0));

        v.pan(500.0, 0.0);
        assert!(v.draw_region(100, 100, 200, 50).is_none());
    }
}
