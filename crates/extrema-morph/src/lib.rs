//! extrema-morph - Local extremum detection with moving histograms
//!
//! This crate provides:
//!
//! - [`Kernel`] - structuring elements defining the window of each pixel
//! - [`ExtremaHistogram`] - sliding-window multiset that classifies a center
//!   value as a local minimum or maximum, backed by [`DenseCounts`] for
//!   small-range pixel types and [`SparseCounts`] for the others
//! - [`ExtremaFilter`] - detection parameters and histogram factory
//! - [`scan_image`] - moving-window scan driving any [`WindowHistogram`]
//! - [`local_minima`] / [`local_maxima`] - one-call detection with defaults

mod error;
pub mod extrema;
pub mod histogram;
pub mod kernel;
pub mod moving;

pub use error::{MorphError, MorphResult};
pub use extrema::{ExtremaConfig, ExtremaFilter, ExtremumKind, local_maxima, local_minima};
pub use histogram::{DenseCounts, ExtremaHistogram, HistogramPixel, SparseCounts, WindowCounts};
pub use kernel::{Kernel, MAX_KERNEL_CELLS, Offset};
pub use moving::{WindowHistogram, scan_image};
