//! extrema-core - Basic data structures for local extremum detection
//!
//! This crate provides the types shared by the rest of the workspace:
//!
//! - [`Image`] - Generic 2D/3D raster, one value per pixel
//! - [`Pixel`] - Representable range and total order of a pixel type
//! - [`SmallRange`] - Pixel types small enough to be counted in a table
//! - [`Error`] / [`Result`] - Error handling

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::Image;
pub use pixel::{Pixel, SmallRange};
