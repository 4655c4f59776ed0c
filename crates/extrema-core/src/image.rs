//! Image - Generic 2D/3D raster
//!
//! `Image<T>` stores one value of type `T` per pixel in a flat buffer.
//! A 2D image is an image with `depth == 1`.
//!
//! # Memory Layout
//!
//! Data is stored in row-major order, plane after plane, with no padding.
//! The pixel at (x, y, z) is at index `(z * height + y) * width + x`.
//!
//! # Examples
//!
//! ```
//! use extrema_core::Image;
//!
//! let mut image = Image::new(4, 3, 0u8).unwrap();
//! image.set_pixel(1, 2, 7).unwrap();
//! assert_eq!(image.get_pixel(1, 2), Some(7));
//! assert_eq!(image.get_pixel(4, 0), None);
//! ```

use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// Generic raster with one `T` per pixel (or voxel).
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Number of planes (1 for 2D images)
    depth: u32,
    /// Pixel data (row-major, plane after plane)
    data: Vec<T>,
}

fn check_dimensions(width: u32, height: u32, depth: u32) -> Result<usize> {
    if width == 0 || height == 0 || depth == 0 {
        return Err(Error::InvalidDimension {
            width,
            height,
            depth,
        });
    }
    Ok((width as usize) * (height as usize) * (depth as usize))
}

impl<T: Copy> Image<T> {
    /// Create a 2D image with every pixel set to `value`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32, value: T) -> Result<Self> {
        Self::new_3d(width, height, 1, value)
    }

    /// Create a 3D image with every voxel set to `value`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any dimension is 0.
    pub fn new_3d(width: u32, height: u32, depth: u32, value: T) -> Result<Self> {
        let size = check_dimensions(width, height, depth)?;
        Ok(Image {
            width,
            height,
            depth,
            data: vec![value; size],
        })
    }

    /// Create a 2D image from row-major data.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        Self::from_data_3d(width, height, 1, data)
    }

    /// Create a 3D image from data laid out plane after plane.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data_3d(width: u32, height: u32, depth: u32, data: Vec<T>) -> Result<Self> {
        let expected_size = check_dimensions(width, height, depth)?;
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                depth,
                expected_size
            )));
        }
        Ok(Image {
            width,
            height,
            depth,
            data,
        })
    }

    /// Build a 2D image from equally long rows.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, rows are empty or ragged.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.as_ref().len()) as u32;
        check_dimensions(width, height, 1)?;

        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width as usize {
                return Err(Error::InvalidParameter(format!(
                    "row {} has {} pixels, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_data(width, height, data)
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of planes
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Get the image dimensions as (width, height, depth)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.depth)
    }

    /// True for images with more than one plane
    #[inline]
    pub fn is_3d(&self) -> bool {
        self.depth > 1
    }

    /// Total number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: images have at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw pixel data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable raw pixel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its buffer
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Flat buffer index of (x, y, z), without bounds checks.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32, z: u32) -> usize {
        ((z as usize) * (self.height as usize) + (y as usize)) * (self.width as usize)
            + (x as usize)
    }

    /// Get a pixel of the first plane, `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<T> {
        self.get_voxel(x, y, 0)
    }

    /// Get a voxel, `None` outside the image.
    #[inline]
    pub fn get_voxel(&self, x: u32, y: u32, z: u32) -> Option<T> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(self.data[self.index_of(x, y, z)])
    }

    /// Get a voxel from signed coordinates, `None` outside the image.
    ///
    /// Used by window scans, where neighbor coordinates may be negative.
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64, z: i64) -> Option<T> {
        if x < 0
            || y < 0
            || z < 0
            || x >= i64::from(self.width)
            || y >= i64::from(self.height)
            || z >= i64::from(self.depth)
        {
            return None;
        }
        Some(self.data[self.index_of(x as u32, y as u32, z as u32)])
    }

    /// Set a pixel of the first plane.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` for coordinates outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        self.set_voxel(x, y, 0, value)
    }

    /// Set a voxel.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` for coordinates outside the image.
    pub fn set_voxel(&mut self, x: u32, y: u32, z: u32, value: T) -> Result<()> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return Err(Error::OutOfBounds {
                x,
                y,
                z,
                width: self.width,
                height: self.height,
                depth: self.depth,
            });
        }
        let idx = self.index_of(x, y, z);
        self.data[idx] = value;
        Ok(())
    }

    /// Apply `f` to every pixel, keeping the dimensions.
    pub fn map<U, F: FnMut(T) -> U>(&self, f: F) -> Image<U> {
        Image {
            width: self.width,
            height: self.height,
            depth: self.depth,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Check that `other` has the same dimensions.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` when the sizes differ.
    pub fn check_same_size<U>(&self, other: &Image<U>) -> Result<()> {
        if self.dimensions() != (other.width, other.height, other.depth) {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: (other.width, other.height, other.depth),
            });
        }
        Ok(())
    }
}

impl<T: Pixel> Image<T> {
    /// Smallest and largest pixel value, in the pixel total order.
    pub fn min_max(&self) -> (T, T) {
        let first = self.data[0];
        self.data[1..]
            .iter()
            .fold((first, first), |(lo, hi), &v| {
                let lo = if v.total_order(&lo).is_lt() { v } else { lo };
                let hi = if v.total_order(&hi).is_gt() { v } else { hi };
                (lo, hi)
            })
    }

    /// Number of pixels equal to `value`.
    pub fn count_value(&self, value: T) -> usize {
        self.data
            .iter()
            .filter(|v| v.total_order(&value).is_eq())
            .count()
    }
}
