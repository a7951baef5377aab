//! pixlab-io - Image I/O for the pixlab image engine
//!
//! Decodes image containers into a [`PixelBuffer`] and encodes buffers
//! back out.
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PPM `P3` / `P6` | yes | yes | `pnm` |
//! | JPEG | yes | yes | `jpeg` |
//!
//! Images already decoded elsewhere enter the engine through
//! [`PixelBuffer::from_rgba`] and need nothing from this crate.

pub mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
#[cfg(feature = "pnm")]
pub use pnm::{PpmHeader, PpmVariant};

use pixlab_core::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encoder settings for [`write_image_with`] and [`write_image_mem_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// PPM body encoding
    #[cfg(feature = "pnm")]
    pub ppm_variant: PpmVariant,
    /// JPEG quality, 1..=100
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            #[cfg(feature = "pnm")]
            ppm_variant: PpmVariant::Binary,
            jpeg_quality: 90,
        }
    }
}

/// Read an image from a file path
///
/// The format is detected from the file contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from memory, detecting the format by magic bytes.
pub fn read_image_mem(data: &[u8]) -> IoResult<PixelBuffer> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(data, format)
}

/// Read an image from memory as a specific format.
pub fn read_image_format(data: &[u8], format: ImageFormat) -> IoResult<PixelBuffer> {
    match format {
        #[cfg(feature = "pnm")]
        ImageFormat::Ppm => pnm::read_ppm(data),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg_mem(data),

        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!("{:?}", format))),
    }
}

/// Write an image to a file path with default encoder settings
pub fn write_image<P: AsRef<Path>>(
    pix: &PixelBuffer,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    write_image_with(pix, path, format, &WriteOptions::default())
}

/// Write an image to a file path
pub fn write_image_with<P: AsRef<Path>>(
    pix: &PixelBuffer,
    path: P,
    format: ImageFormat,
    options: &WriteOptions,
) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_to(pix, &mut writer, format, options)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory with default encoder settings
pub fn write_image_mem(pix: &PixelBuffer, format: ImageFormat) -> IoResult<Vec<u8>> {
    write_image_mem_with(pix, format, &WriteOptions::default())
}

/// Encode an image into memory
pub fn write_image_mem_with(
    pix: &PixelBuffer,
    format: ImageFormat,
    options: &WriteOptions,
) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_image_to(pix, &mut out, format, options)?;
    Ok(out)
}

fn write_image_to<W: Write>(
    pix: &PixelBuffer,
    writer: W,
    format: ImageFormat,
    options: &WriteOptions,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "pnm")]
        ImageFormat::Ppm => pnm::write_ppm(pix, writer, options.ppm_variant),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer, options.jpeg_quality),

        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!("{:?}", format))),
    }
}
