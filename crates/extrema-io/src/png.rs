//! PNG image format support
//!
//! Grayscale images only. Low bit depths are expanded to 8 bits on read and
//! an alpha channel is dropped; color images are rejected.

use std::io::{BufRead, Seek, Write};

use log::debug;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};

use extrema_core::Image;

use crate::{GrayImage, IoError, IoResult};

/// Read a grayscale PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<GrayImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let (color_type, bit_depth) = reader.output_color_type();
    debug!("PNG {width}x{height}, {color_type:?} {bit_depth:?}");

    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNG color type {:?} is not grayscale",
                color_type
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let rows = data.chunks_exact(bytes_per_row).take(height as usize);

    match bit_depth {
        BitDepth::Eight => {
            let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
            for row in rows {
                pixels.extend(row.chunks_exact(samples).take(width as usize).map(|s| s[0]));
            }
            Ok(GrayImage::Gray8(Image::from_data(width, height, pixels)?))
        }
        BitDepth::Sixteen => {
            let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
            for row in rows {
                pixels.extend(
                    row.chunks_exact(2 * samples)
                        .take(width as usize)
                        .map(|s| u16::from_be_bytes([s[0], s[1]])),
                );
            }
            Ok(GrayImage::Gray16(Image::from_data(width, height, pixels)?))
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG bit depth {:?}",
            other
        ))),
    }
}

/// Write a grayscale PNG image
///
/// # Errors
///
/// Returns `IoError::UnsupportedFormat` for 3D images.
pub fn write_png<W: Write>(image: &GrayImage, writer: W) -> IoResult<()> {
    let (width, height, depth) = image.dimensions();
    if depth > 1 {
        return Err(IoError::UnsupportedFormat(
            "PNG holds a single plane".into(),
        ));
    }

    let (bit_depth, data) = match image {
        GrayImage::Gray8(img) => (BitDepth::Eight, img.data().to_vec()),
        GrayImage::Gray16(img) => (
            BitDepth::Sixteen,
            img.data().iter().flat_map(|v| v.to_be_bytes()).collect(),
        ),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
