//! Error types for extrema-core
//!
//! Provides a unified error type for the image container and pixel
//! conversions. Each variant carries enough context for diagnostics.

use thiserror::Error;

/// extrema-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}x{depth}")]
    InvalidDimension { width: u32, height: u32, depth: u32 },

    /// Coordinate outside the image
    #[error("coordinate ({x}, {y}, {z}) outside {width}x{height}x{depth} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        z: u32,
        width: u32,
        height: u32,
        depth: u32,
    },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {:?}, got {:?}", .expected, .actual)]
    DimensionMismatch {
        expected: (u32, u32, u32),
        actual: (u32, u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for extrema-core operations
pub type Result<T> = std::result::Result<T, Error>;
