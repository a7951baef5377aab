//! PPM (Portable Pixmap) format support
//!
//! Reads and writes the two RGB members of the PNM family:
//!
//! - `P3`: ASCII samples separated by whitespace
//! - `P6`: binary samples, one byte each
//!
//! The header is `magic width height maxval`, with `#` comments allowed
//! between any two tokens. Samples are scaled to 8 bits and expanded to
//! opaque RGBA.

use crate::{IoError, IoResult};
use pixlab_core::{PixelBuffer, color};
use std::io::Write;

/// Largest maxval accepted by an ASCII pixmap.
pub const MAX_ASCII_MAXVAL: u32 = 65535;

/// PPM encoding variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PpmVariant {
    /// `P3`, ASCII samples
    Ascii,
    /// `P6`, raw bytes
    #[default]
    Binary,
}

impl PpmVariant {
    /// The two-character magic number.
    pub fn magic(self) -> &'static str {
        match self {
            PpmVariant::Ascii => "P3",
            PpmVariant::Binary => "P6",
        }
    }

    fn from_magic(token: &[u8]) -> Option<Self> {
        match token {
            b"P3" => Some(PpmVariant::Ascii),
            b"P6" => Some(PpmVariant::Binary),
            _ => None,
        }
    }
}

/// Parsed PPM header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmHeader {
    /// Encoding variant
    pub variant: PpmVariant,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Maximum sample value declared in the header
    pub max_value: u32,
    /// Byte offset of the first sample (P6) or of the sample text (P3)
    pub data_offset: usize,
}

impl PpmHeader {
    /// Number of samples the body must supply (`width * height * 3`).
    pub fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Byte cursor over the whole file.
struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Skip whitespace and `#` comments, which run to end of line.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.skip_whitespace();
            if self.pos < self.data.len() && self.data[self.pos] == b'#' {
                while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                return;
            }
        }
    }

    /// Next token, ending at whitespace or the start of a comment.
    fn token(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        while self.pos < self.data.len()
            && !self.data[self.pos].is_ascii_whitespace()
            && self.data[self.pos] != b'#'
        {
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.data[start..self.pos])
    }

    fn header_field(&mut self, name: &str) -> IoResult<u32> {
        self.skip_whitespace_and_comments();
        let tok = self
            .token()
            .ok_or_else(|| IoError::Truncated(format!("missing PPM {}", name)))?;
        parse_decimal(tok).ok_or_else(|| {
            IoError::InvalidHeader(format!(
                "PPM {} is not a decimal integer: {:?}",
                name,
                String::from_utf8_lossy(tok)
            ))
        })
    }
}

fn parse_decimal(tok: &[u8]) -> Option<u32> {
    if tok.is_empty() || !tok.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(tok).ok()?.parse().ok()
}

/// Parse a PPM header without reading pixel data.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] for a magic other than `P3`/`P6`
/// - [`IoError::InvalidHeader`] for non-numeric fields, zero dimensions
///   or an unsupported maxval
/// - [`IoError::Truncated`] when a header field is missing
pub fn read_header_ppm(data: &[u8]) -> IoResult<PpmHeader> {
    let mut sc = Scanner::new(data);
    sc.skip_whitespace();
    let magic = sc
        .token()
        .ok_or_else(|| IoError::Truncated("empty PPM file".to_string()))?;
    let variant = PpmVariant::from_magic(magic).ok_or_else(|| {
        IoError::UnsupportedFormat(format!(
            "unsupported PPM magic number: {:?}",
            String::from_utf8_lossy(magic)
        ))
    })?;

    let width = sc.header_field("width")?;
    let height = sc.header_field("height")?;
    let max_value = sc.header_field("maxval")?;

    if width == 0 || height == 0 {
        return Err(IoError::InvalidHeader(format!(
            "invalid PPM dimensions: {}x{}",
            width, height
        )));
    }

    let max_ok = match variant {
        PpmVariant::Binary => max_value == 255,
        PpmVariant::Ascii => (255..=MAX_ASCII_MAXVAL).contains(&max_value),
    };
    if !max_ok {
        return Err(IoError::InvalidHeader(format!(
            "unsupported {} maxval: {}",
            variant.magic(),
            max_value
        )));
    }

    let data_offset = match variant {
        PpmVariant::Ascii => sc.pos,
        // exactly one whitespace byte separates maxval from the raster
        PpmVariant::Binary => match data.get(sc.pos) {
            Some(b) if b.is_ascii_whitespace() => sc.pos + 1,
            Some(_) => {
                return Err(IoError::InvalidHeader(
                    "missing whitespace after P6 maxval".to_string(),
                ));
            }
            None => {
                return Err(IoError::Truncated("P6 raster missing".to_string()));
            }
        },
    };

    Ok(PpmHeader {
        variant,
        width,
        height,
        max_value,
        data_offset,
    })
}

/// Scale a sample to 8 bits: `floor(v / maxval * 255)`.
#[inline]
fn scale_sample(v: u32, max_value: u32) -> u8 {
    if max_value == 255 {
        v as u8
    } else {
        (v as u64 * 255 / max_value as u64) as u8
    }
}

/// Decode a P3 or P6 image from memory.
///
/// # Examples
///
/// ```
/// use pixlab_io::pnm::read_ppm;
///
/// let pix = read_ppm(b"P3\n1 1\n255\n10 20 30\n").unwrap();
/// assert_eq!(pix.get_rgba(0, 0), Some([10, 20, 30, 255]));
/// ```
pub fn read_ppm(data: &[u8]) -> IoResult<PixelBuffer> {
    let header = read_header_ppm(data)?;
    let rgb = match header.variant {
        PpmVariant::Ascii => read_ascii_samples(data, &header)?,
        PpmVariant::Binary => read_binary_samples(data, &header)?,
    };
    let pix = PixelBuffer::from_rgb(header.width, header.height, &rgb)?;
    tracing::debug!(
        variant = header.variant.magic(),
        width = header.width,
        height = header.height,
        "decoded PPM"
    );
    Ok(pix)
}

fn read_ascii_samples(data: &[u8], header: &PpmHeader) -> IoResult<Vec<u8>> {
    let needed = header.sample_count();
    let mut sc = Scanner::new(data);
    sc.pos = header.data_offset;

    let mut rgb = Vec::with_capacity(needed);
    while rgb.len() < needed {
        sc.skip_whitespace_and_comments();
        let Some(tok) = sc.token() else {
            return Err(IoError::Truncated(format!(
                "P3 raster has {} of {} samples",
                rgb.len(),
                needed
            )));
        };
        let v = parse_decimal(tok).ok_or_else(|| {
            IoError::InvalidData(format!(
                "P3 sample is not a decimal integer: {:?}",
                String::from_utf8_lossy(tok)
            ))
        })?;
        if v > header.max_value {
            return Err(IoError::InvalidData(format!(
                "P3 sample {} exceeds maxval {}",
                v, header.max_value
            )));
        }
        rgb.push(scale_sample(v, header.max_value));
    }
    Ok(rgb)
}

fn read_binary_samples(data: &[u8], header: &PpmHeader) -> IoResult<Vec<u8>> {
    let needed = header.sample_count();
    let raster = &data[header.data_offset..];
    if raster.len() < needed {
        return Err(IoError::Truncated(format!(
            "P6 raster has {} of {} bytes",
            raster.len(),
            needed
        )));
    }
    Ok(raster[..needed].to_vec())
}

/// Write a buffer as PPM. Alpha is dropped.
///
/// The header is `P{n}\n{w} {h}\n255\n`. `P3` bodies put one pixel per
/// line with samples separated by single spaces.
pub fn write_ppm<W: Write>(pix: &PixelBuffer, mut writer: W, variant: PpmVariant) -> IoResult<()> {
    write!(
        writer,
        "{}\n{} {}\n255\n",
        variant.magic(),
        pix.width(),
        pix.height()
    )?;
    match variant {
        PpmVariant::Ascii => {
            for px in pix.pixels() {
                writeln!(
                    writer,
                    "{} {} {}",
                    px[color::RED],
                    px[color::GREEN],
                    px[color::BLUE]
                )?;
            }
        }
        PpmVariant::Binary => writer.write_all(&pix.to_rgb_bytes())?,
    }
    writer.flush()?;
    Ok(())
}

/// Write a buffer as PPM into a new byte vector.
pub fn write_ppm_mem(pix: &PixelBuffer, variant: PpmVariant) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_ppm(pix, &mut out, variant)?;
    Ok(out)
}
