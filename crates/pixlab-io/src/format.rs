//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header,
//! or by file extension when only a name is available.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image container formats known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable pixmap, `P3` or `P6`
    Ppm,
    /// JPEG/JFIF
    Jpeg,
}

impl ImageFormat {
    /// Canonical file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Ppm => "ppm",
            ImageFormat::Jpeg => "jpg",
        }
    }

    /// Guess the format from a file name's extension (case-insensitive).
    ///
    /// Returns `None` for unknown or missing extensions.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ppm" => Some(ImageFormat::Ppm),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

/// Magic numbers for image format detection
mod magic {
    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// PPM ASCII
    pub const PPM_ASCII: &[u8] = b"P3";

    /// PPM binary
    pub const PPM_BINARY: &[u8] = b"P6";
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; 12];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
///
/// Leading whitespace before a PPM magic number is tolerated, matching
/// the PPM reader.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    // Check JPEG
    if data.len() >= 3 && data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }

    // Check PPM formats
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let rest = &data[start..];
    if rest.starts_with(magic::PPM_ASCII) || rest.starts_with(magic::PPM_BINARY) {
        return Ok(ImageFormat::Ppm);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_jpeg() {
        let data = [
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_ppm() {
        assert_eq!(
            detect_format_from_bytes(b"P3\n100 100\n255\n").unwrap(),
            ImageFormat::Ppm
        );
        assert_eq!(
            detect_format_from_bytes(b"P6\n100 100\n255\n").unwrap(),
            ImageFormat::Ppm
        );
        assert_eq!(
            detect_format_from_bytes(b"\n P6 1 1 255\n").unwrap(),
            ImageFormat::Ppm
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(
            detect_format_from_bytes(b"P5\n1 1\n255\n"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format_from_bytes(b"BM\x00\x00"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format_from_bytes(b"P"),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageFormat::from_extension("a/b.PPM"), Some(ImageFormat::Ppm));
        assert_eq!(ImageFormat::from_extension("x.jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("x.JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("x.png"), None);
        assert_eq!(ImageFormat::from_extension("noext"), None);
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
    }
}
