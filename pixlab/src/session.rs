//! Editing session
//!
//! A [`Session`] owns the current image, the view transform and the
//! engine configuration. Pixel operations compute a complete new buffer
//! and only then replace the current one, so a failing operation leaves
//! the image untouched.

use crate::config::EngineConfig;
use crate::view::{ViewTransform, ZoomDirection};
use crate::{Error, Result};
use pixlab_color::{GreenCoverage, IterativeThresholdOptions};
use pixlab_core::color::Channel;
use pixlab_core::{Histogram, PixelBuffer};
use pixlab_filter::{ConvolveMode, Kernel, PointOp};
use pixlab_io::{ImageFormat, PpmVariant, WriteOptions};
use pixlab_morph::Sel;

/// Export target for [`Session::export`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// PPM with an ASCII body (`P3`)
    PpmAscii,
    /// PPM with a binary body (`P6`)
    PpmBinary,
    /// JPEG at the configured quality
    Jpeg,
}

/// Owner of the current image and its view
#[derive(Debug, Default)]
pub struct Session {
    config: EngineConfig,
    image: Option<PixelBuffer>,
    view: ViewTransform,
    canvas: Option<(u32, u32)>,
}

impl Session {
    /// Session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with a validated configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current image, if any.
    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    fn current(&self) -> Result<&PixelBuffer> {
        self.image.as_ref().ok_or(Error::NoImage)
    }

    /// Run `op` on the current image and publish its result.
    fn replace<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&PixelBuffer) -> Result<PixelBuffer>,
    {
        let next = op(self.current()?)?;
        self.image = Some(next);
        Ok(())
    }

    // ---------------------------------------------------------------
    //  Loading
    // ---------------------------------------------------------------

    /// Install a decoded buffer as the current image.
    ///
    /// The view is reset, then fitted if a canvas size is known.
    pub fn load_buffer(&mut self, pix: PixelBuffer) {
        tracing::info!(width = pix.width(), height = pix.height(), "image loaded");
        self.view.reset();
        if let Some((cw, ch)) = self.canvas {
            self.view.fit_to_canvas(cw, ch, pix.width(), pix.height());
        }
        self.image = Some(pix);
    }

    /// Decode and load a PPM (`P3` or `P6`).
    pub fn load_ppm(&mut self, data: &[u8]) -> Result<()> {
        let pix = pixlab_io::read_image_format(data, ImageFormat::Ppm)?;
        self.load_buffer(pix);
        Ok(())
    }

    /// Decode and load a JPEG.
    pub fn load_jpeg(&mut self, data: &[u8]) -> Result<()> {
        let pix = pixlab_io::read_image_format(data, ImageFormat::Jpeg)?;
        self.load_buffer(pix);
        Ok(())
    }

    /// Decode and load an image, detecting the format from its bytes.
    pub fn load_image(&mut self, data: &[u8]) -> Result<()> {
        let pix = pixlab_io::read_image_mem(data)?;
        self.load_buffer(pix);
        Ok(())
    }

    /// Load an RGBA buffer decoded elsewhere.
    pub fn load_decoded_image(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> Result<()> {
        let pix = PixelBuffer::from_rgba(width, height, rgba)?;
        self.load_buffer(pix);
        Ok(())
    }

    /// Drop the current image and reset the view.
    pub fn clear(&mut self) {
        self.image = None;
        self.view.reset();
    }

    // ---------------------------------------------------------------
    //  View
    // ---------------------------------------------------------------

    /// Pan the view by a canvas-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.view.pan(dx, dy);
    }

    /// Zoom one step about the canvas point `(px, py)`.
    pub fn zoom(&mut self, px: f64, py: f64, direction: ZoomDirection) {
        self.view.zoom_at(px, py, direction, self.config.zoom_factor);
    }

    /// Remember the canvas size and fit the current image to it.
    ///
    /// Without an image only the canvas size is recorded.
    pub fn fit_to_canvas(&mut self, canvas_w: u32, canvas_h: u32) {
        self.canvas = Some((canvas_w, canvas_h));
        if let Some(pix) = &self.image {
            self.view
                .fit_to_canvas(canvas_w, canvas_h, pix.width(), pix.height());
        }
    }

    // ---------------------------------------------------------------
    //  Point and neighborhood filters
    // ---------------------------------------------------------------

    /// Apply a per-pixel function; outputs are rounded and clamped.
    pub fn point_transform<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut([u8; 4]) -> [f64; 4],
    {
        self.replace(|pix| Ok(pixlab_filter::map_pixels(pix, f)))
    }

    /// Apply a built-in point operation.
    pub fn apply_point_op(&mut self, op: PointOp) -> Result<()> {
        tracing::debug!(?op, "point op");
        self.replace(|pix| Ok(pixlab_filter::apply_point_op(pix, op)))
    }

    /// Convolve with clamp-to-edge borders.
    pub fn convolve(&mut self, kernel: &Kernel, mode: ConvolveMode) -> Result<()> {
        self.replace(|pix| Ok(pixlab_filter::convolve(pix, kernel, mode)?))
    }

    /// Median filter over a square window of odd side.
    pub fn median_filter(&mut self, window_size: u32) -> Result<()> {
        self.replace(|pix| Ok(pixlab_filter::median_filter(pix, window_size)?))
    }

    // ---------------------------------------------------------------
    //  Morphology
    // ---------------------------------------------------------------

    pub fn dilate(&mut self, sel: &Sel) -> Result<()> {
        self.replace(|pix| Ok(pixlab_morph::dilate_color(pix, sel)?))
    }

    pub fn erode(&mut self, sel: &Sel) -> Result<()> {
        self.replace(|pix| Ok(pixlab_morph::erode_color(pix, sel)?))
    }

    pub fn open(&mut self, sel: &Sel) -> Result<()> {
        self.replace(|pix| Ok(pixlab_morph::open_color(pix, sel)?))
    }

    pub fn close(&mut self, sel: &Sel) -> Result<()> {
        self.replace(|pix| Ok(pixlab_morph::close_color(pix, sel)?))
    }

    /// Hit-or-miss transform; the result is a black and white image.
    pub fn hit_or_miss(&mut self, sel: &Sel) -> Result<()> {
        self.replace(|pix| Ok(pixlab_morph::hit_miss_transform(pix, sel)?))
    }

    // ---------------------------------------------------------------
    //  Histogram and threshold
    // ---------------------------------------------------------------

    pub fn histogram_stretch(&mut self) -> Result<()> {
        self.replace(|pix| Ok(pixlab_color::stretch_histogram(pix)?))
    }

    pub fn histogram_equalize(&mut self) -> Result<()> {
        self.replace(|pix| Ok(pixlab_color::equalize_histogram(pix)?))
    }

    /// Histogram of one channel of the current image.
    pub fn histogram(&self, channel: Channel) -> Result<Histogram> {
        Ok(Histogram::from_channel(self.current()?, channel))
    }

    /// Binarize at a fixed luma threshold.
    pub fn threshold(&mut self, threshold: u8) -> Result<()> {
        self.replace(|pix| Ok(pixlab_color::threshold_manual(pix, threshold)))
    }

    /// Binarize so that `percent`% of the pixels turn black; returns the
    /// threshold used.
    pub fn percent_black_threshold(&mut self, percent: f64) -> Result<u8> {
        let (out, t) = pixlab_color::threshold_percent_black(self.current()?, percent)?;
        self.image = Some(out);
        Ok(t)
    }

    /// Binarize at the iteratively selected threshold; returns it.
    pub fn iterative_threshold(&mut self) -> Result<u8> {
        let opts: IterativeThresholdOptions = self.config.iterative_options();
        let (out, t) = pixlab_color::threshold_iterative(self.current()?, &opts);
        self.image = Some(out);
        Ok(t)
    }

    /// Make non-green pixels transparent; returns the green percentage.
    ///
    /// `margin` falls back to the configured one when `None`.
    pub fn green_coverage(&mut self, margin: Option<u8>) -> Result<f64> {
        let margin = margin.unwrap_or(self.config.green_margin);
        let GreenCoverage {
            masked, percent, ..
        } = pixlab_color::green_coverage(self.current()?, margin)?;
        self.image = Some(masked);
        Ok(percent)
    }

    // ---------------------------------------------------------------
    //  Export
    // ---------------------------------------------------------------

    /// Encode the current image.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        let pix = self.current()?;
        let mut options = WriteOptions {
            jpeg_quality: self.config.jpeg_quality,
            ..WriteOptions::default()
        };
        let image_format = match format {
            ExportFormat::PpmAscii => {
                options.ppm_variant = PpmVariant::Ascii;
                ImageFormat::Ppm
            }
            ExportFormat::PpmBinary => {
                options.ppm_variant = PpmVariant::Binary;
                ImageFormat::Ppm
            }
            ExportFormat::Jpeg => ImageFormat::Jpeg,
        };
        let bytes = pixlab_io::write_image_mem_with(pix, image_format, &options)?;
        tracing::info!(?format, len = bytes.len(), "image exported");
        Ok(bytes)
    }
}
