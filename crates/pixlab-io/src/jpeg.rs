//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Grayscale, RGB and CMYK sources are all expanded to
//! opaque RGBA.

use crate::{IoError, IoResult};
use pixlab_core::{PixelBuffer, color};
use std::io::{Read, Write};

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG info unavailable".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let npix = width as usize * height as usize;

    let mut rgba = Vec::with_capacity(npix * color::CHANNELS);
    match info.pixel_format {
        jpeg_decoder::PixelFormat::L8 => {
            for &v in data.iter().take(npix) {
                rgba.extend_from_slice(&color::compose_rgb(v, v, v));
            }
        }
        jpeg_decoder::PixelFormat::L16 => {
            // big-endian samples; keep the high byte
            for s in data.chunks_exact(2).take(npix) {
                rgba.extend_from_slice(&color::compose_rgb(s[0], s[0], s[0]));
            }
        }
        jpeg_decoder::PixelFormat::RGB24 => {
            for s in data.chunks_exact(3).take(npix) {
                rgba.extend_from_slice(&color::compose_rgb(s[0], s[1], s[2]));
            }
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            for s in data.chunks_exact(4).take(npix) {
                let k = s[3] as u32;
                let ch = |c: u8| ((255 - c as u32) * (255 - k) / 255) as u8;
                rgba.extend_from_slice(&color::compose_rgb(ch(s[0]), ch(s[1]), ch(s[2])));
            }
        }
    }

    let pix = PixelBuffer::from_rgba(width, height, rgba)?;
    tracing::debug!(width, height, format = ?info.pixel_format, "decoded JPEG");
    Ok(pix)
}

/// Decode a JPEG image held in memory.
pub fn read_jpeg_mem(data: &[u8]) -> IoResult<PixelBuffer> {
    read_jpeg(data)
}

/// Write a buffer as a baseline RGB JPEG. Alpha is dropped.
///
/// # Arguments
/// * `quality` - Encoder quality, 1..=100
///
/// # Errors
///
/// [`IoError::EncodeError`] for a quality outside 1..=100 or a dimension
/// above 65535.
pub fn write_jpeg<W: Write>(pix: &PixelBuffer, writer: W, quality: u8) -> IoResult<()> {
    if !(1..=100).contains(&quality) {
        return Err(IoError::EncodeError(format!(
            "JPEG quality must be in 1..=100, got {}",
            quality
        )));
    }
    let (width, height) = pix.dimensions();
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(IoError::EncodeError(format!(
            "image too large for JPEG: {}x{}",
            width, height
        )));
    };

    let encoder = jpeg_encoder::Encoder::new(writer, quality);
    encoder
        .encode(&pix.to_rgb_bytes(), w, h, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    tracing::debug!(width, height, quality, "encoded JPEG");
    Ok(())
}

/// Write a buffer as JPEG into a new byte vector.
pub fn write_jpeg_mem(pix: &PixelBuffer, quality: u8) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_jpeg(pix, &mut out, quality)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_uniform() {
        let pix = PixelBuffer::new_filled(16, 8, [200, 100, 50, 255]).unwrap();
        let bytes = write_jpeg_mem(&pix, DEFAULT_QUALITY).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let back = read_jpeg_mem(&bytes).unwrap();
        assert_eq!(back.dimensions(), (16, 8));
        let px = back.get_rgba(8, 4).unwrap();
        assert!((px[0] as i32 - 200).abs() <= 4);
        assert!((px[1] as i32 - 100).abs() <= 4);
        assert!((px[2] as i32 - 50).abs() <= 4);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_bad_quality() {
        let pix = PixelBuffer::new(2, 2).unwrap();
        assert!(matches!(
            write_jpeg_mem(&pix, 0),
            Err(IoError::EncodeError(_))
        ));
        assert!(write_jpeg_mem(&pix, 101).is_err());
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            read_jpeg_mem(&[0xFF, 0xD8, 0x00, 0x01]),
            Err(IoError::DecodeError(_))
        ));
    }
}
