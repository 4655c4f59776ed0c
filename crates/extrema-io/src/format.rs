//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// PNM formats
    pub const PBM_ASCII: &[u8] = b"P1";
    pub const PGM_ASCII: &[u8] = b"P2";
    pub const PPM_ASCII: &[u8] = b"P3";
    pub const PBM_BINARY: &[u8] = b"P4";
    pub const PGM_BINARY: &[u8] = b"P5";
    pub const PPM_BINARY: &[u8] = b"P6";
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable graymap (P2 / P5)
    Pnm,
    /// Portable Network Graphics
    Png,
}

impl ImageFormat {
    /// Usual file extension
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Pnm => "pgm",
            ImageFormat::Png => "png",
        }
    }

    /// Pick a format from a file extension, defaulting to PNM
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => ImageFormat::Png,
            _ => ImageFormat::Pnm,
        }
    }
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; 8];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    let first_two = &data[..2];
    if first_two == magic::PGM_ASCII || first_two == magic::PGM_BINARY {
        return Ok(ImageFormat::Pnm);
    }
    if first_two == magic::PBM_ASCII
        || first_two == magic::PPM_ASCII
        || first_two == magic::PBM_BINARY
        || first_two == magic::PPM_BINARY
    {
        return Err(IoError::UnsupportedFormat(format!(
            "{} is not a graymap",
            String::from_utf8_lossy(first_two)
        )));
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}
