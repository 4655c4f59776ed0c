//! extrema-io - Grayscale image I/O
//!
//! Supported formats:
//!
//! - PGM: ASCII (P2) and binary (P5) read, binary write, 8 and 16 bits
//! - PNG: grayscale read and write, 8 and 16 bits
//!
//! Images are exchanged as [`GrayImage`], which holds either an 8-bit or a
//! 16-bit [`Image`].

mod error;
mod format;
pub mod png;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor};
use std::path::Path;

use extrema_core::Image;

/// Grayscale image as stored in a file
#[derive(Debug, Clone, PartialEq)]
pub enum GrayImage {
    /// 8 bits per pixel
    Gray8(Image<u8>),
    /// 16 bits per pixel
    Gray16(Image<u16>),
}

impl GrayImage {
    /// Get the image dimensions as (width, height, depth)
    pub fn dimensions(&self) -> (u32, u32, u32) {
        match self {
            GrayImage::Gray8(img) => img.dimensions(),
            GrayImage::Gray16(img) => img.dimensions(),
        }
    }

    /// Bits per sample
    pub fn bit_depth(&self) -> u32 {
        match self {
            GrayImage::Gray8(_) => 8,
            GrayImage::Gray16(_) => 16,
        }
    }
}

impl From<Image<u8>> for GrayImage {
    fn from(image: Image<u8>) -> Self {
        GrayImage::Gray8(image)
    }
}

impl From<Image<u16>> for GrayImage {
    fn from(image: Image<u16>) -> Self {
        GrayImage::Gray16(image)
    }
}

fn read_from<R: BufRead + std::io::Seek>(mut reader: R) -> IoResult<GrayImage> {
    let format = detect_format_from_bytes(reader.fill_buf()?)?;
    match format {
        ImageFormat::Pnm => pnm::read_pnm(reader),
        ImageFormat::Png => png::read_png(reader),
    }
}

/// Read an image from a file, detecting its format from the content
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<GrayImage> {
    let file = File::open(path)?;
    read_from(BufReader::new(file))
}

/// Read an image from memory
pub fn read_image_mem(data: &[u8]) -> IoResult<GrayImage> {
    read_from(Cursor::new(data))
}

/// Write an image to a file
pub fn write_image<P: AsRef<Path>>(
    image: &GrayImage,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    match format {
        ImageFormat::Pnm => pnm::write_pnm(image, writer),
        ImageFormat::Png => png::write_png(image, writer),
    }
}

/// Encode an image into memory
pub fn write_image_mem(image: &GrayImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        ImageFormat::Pnm => pnm::write_pnm(image, &mut buffer)?,
        ImageFormat::Png => png::write_png(image, &mut buffer)?,
    }
    Ok(buffer)
}
