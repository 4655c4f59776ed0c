//! extrema - Local minima and maxima detection for Rust
//!
//! Marks the pixels of a 2D or 3D image that are the smallest (or largest)
//! value of the window a structuring element defines around them. Windows
//! are tracked with moving histograms, so each step of the scan only touches
//! the pixels entering and leaving the window.
//!
//! # Example
//!
//! ```
//! use extrema::morph::{ExtremaFilter, Kernel};
//! use extrema::Image;
//!
//! let image = Image::from_rows(&[
//!     [0u8, 0, 0, 0],
//!     [0, 9, 0, 0],
//!     [0, 0, 0, 7],
//! ])
//! .unwrap();
//! let kernel = Kernel::box_2d(1, 1).unwrap();
//! let maxima = ExtremaFilter::<u8, u8>::maxima()
//!     .with_flat_to_foreground(false)
//!     .apply(&image, &kernel)
//!     .unwrap();
//! assert_eq!(maxima.get_pixel(1, 1), Some(255));
//! assert_eq!(maxima.get_pixel(3, 2), Some(255));
//! assert_eq!(maxima.count_value(255), 2);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use extrema_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use extrema_io as io;
pub use extrema_morph as morph;
