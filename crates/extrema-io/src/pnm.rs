//! PGM (portable graymap) format support
//!
//! Reads ASCII (P2) and binary (P5) graymaps and writes binary ones.
//! Samples are stored as-is, without rescaling by maxval: a maxval up to 255
//! yields an 8-bit image, up to 65535 a 16-bit image (big-endian samples in
//! P5).

use std::io::{BufRead, Write};

use log::debug;

use extrema_core::Image;

use crate::{GrayImage, IoError, IoResult};

/// Read the next byte, `None` at end of input
fn read_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let buf = reader.fill_buf()?;
    let Some(&byte) = buf.first() else {
        return Ok(None);
    };
    reader.consume(1);
    Ok(Some(byte))
}

/// Read one whitespace-delimited header token, skipping `#` comments.
///
/// The single whitespace byte ending the token is consumed.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = Vec::new();
    loop {
        let Some(byte) = read_byte(reader)? else {
            break;
        };
        if byte == b'#' && token.is_empty() {
            while let Some(b) = read_byte(reader)? {
                if b == b'\n' || b == b'\r' {
                    break;
                }
            }
        } else if byte.is_ascii_whitespace() {
            if !token.is_empty() {
                break;
            }
        } else {
            token.push(byte);
        }
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("unexpected end of PGM data".into()));
    }
    String::from_utf8(token).map_err(|_| IoError::InvalidData("non-ASCII PGM header".into()))
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid {what} {token:?}")))
}

/// Read a PGM image (P2 or P5).
///
/// # Errors
///
/// Returns `IoError::UnsupportedFormat` for other PNM variants and
/// `IoError::InvalidData` for malformed headers, samples above maxval or
/// truncated data.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<GrayImage> {
    let magic = read_token(&mut reader)?;
    let ascii = match magic.as_str() {
        "P2" => true,
        "P5" => false,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM type {other} is not supported"
            )));
        }
    };
    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("maxval {maxval} out of range")));
    }
    debug!("PGM {magic}: {width}x{height}, maxval {maxval}");

    let count = (width as usize) * (height as usize);
    let samples: Vec<u32> = if ascii {
        (0..count)
            .map(|_| read_number(&mut reader, "sample"))
            .collect::<IoResult<_>>()?
    } else {
        let bytes_per_sample = if maxval < 256 { 1 } else { 2 };
        let mut raw = vec![0u8; count * bytes_per_sample];
        reader.read_exact(&mut raw)?;
        if bytes_per_sample == 1 {
            raw.into_iter().map(u32::from).collect()
        } else {
            raw.chunks_exact(2)
                .map(|pair| u32::from(u16::from_be_bytes([pair[0], pair[1]])))
                .collect()
        }
    };

    if let Some(bad) = samples.iter().find(|&&v| v > maxval) {
        return Err(IoError::InvalidData(format!(
            "sample {bad} exceeds maxval {maxval}"
        )));
    }

    if maxval < 256 {
        let data = samples.into_iter().map(|v| v as u8).collect();
        Ok(GrayImage::Gray8(Image::from_data(width, height, data)?))
    } else {
        let data = samples.into_iter().map(|v| v as u16).collect();
        Ok(GrayImage::Gray16(Image::from_data(width, height, data)?))
    }
}

/// Write a binary PGM (P5) image.
///
/// 8-bit images are written with maxval 255, 16-bit images with maxval
/// 65535.
///
/// # Errors
///
/// Returns `IoError::UnsupportedFormat` for 3D images.
pub fn write_pnm<W: Write>(image: &GrayImage, mut writer: W) -> IoResult<()> {
    let (width, height, depth) = image.dimensions();
    if depth > 1 {
        return Err(IoError::UnsupportedFormat(
            "PGM holds a single plane".into(),
        ));
    }

    match image {
        GrayImage::Gray8(img) => {
            write!(writer, "P5\n{width} {height}\n255\n")?;
            writer.write_all(img.data())?;
        }
        GrayImage::Gray16(img) => {
            write!(writer, "P5\n{width} {height}\n65535\n")?;
            let bytes: Vec<u8> = img.data().iter().flat_map(|v| v.to_be_bytes()).collect();
            writer.write_all(&bytes)?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_ascii_with_comments() {
        let data = b"P2\n# created by hand\n3 2\n# maxval\n9\n0 1 2\n7 8 9\n";
        let image = read_pnm(Cursor::new(&data[..])).unwrap();
        let GrayImage::Gray8(img) = image else {
            panic!("expected 8-bit image");
        };
        assert_eq!(img.dimensions(), (3, 2, 1));
        assert_eq!(img.data(), &[0, 1, 2, 7, 8, 9]);
    }

    #[test]
    fn test_read_binary_16() {
        let mut data = b"P5 2 1 1000\n".to_vec();
        data.extend_from_slice(&[0x03, 0xE8, 0x00, 0x05]);
        let image = read_pnm(Cursor::new(data)).unwrap();
        let GrayImage::Gray16(img) = image else {
            panic!("expected 16-bit image");
        };
        assert_eq!(img.data(), &[1000, 5]);
    }

    #[test]
    fn test_binary_data_starting_with_whitespace_byte() {
        let mut data = b"P5\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[b'\n', b' ']);
        let image = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(image, GrayImage::Gray8(Image::from_data(2, 1, vec![10, 32]).unwrap()));
    }

    #[test]
    fn test_write_then_read() {
        let img = Image::from_rows(&[[0u16, 300], [65535, 7]]).unwrap();
        let mut buffer = Vec::new();
        write_pnm(&GrayImage::Gray16(img.clone()), &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P5\n2 2\n65535\n"));
        let back = read_pnm(Cursor::new(buffer)).unwrap();
        assert_eq!(back, GrayImage::Gray16(img));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P6\n1 1\n255\n\0\0\0".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(read_pnm(Cursor::new(b"P5\n4 4\n255\n\0\0".to_vec())).is_err());
        assert!(read_pnm(Cursor::new(b"P2\n1 1\n5\n6\n".to_vec())).is_err());
        assert!(read_pnm(Cursor::new(b"P2\n1 1\n70000\n6\n".to_vec())).is_err());
        assert!(read_pnm(Cursor::new(b"P2\nx 1\n5\n1\n".to_vec())).is_err());
    }

    #[test]
    fn test_write_3d_rejected() {
        let img = Image::new_3d(2, 2, 2, 0u8).unwrap();
        assert!(write_pnm(&GrayImage::Gray8(img), Vec::new()).is_err());
    }
}
