//! Local extremum filter
//!
//! [`ExtremaFilter`] owns the detection parameters and builds configured
//! [`ExtremaHistogram`]s. A pixel is marked as foreground when it is the
//! smallest (minima) or largest (maxima) value of the window defined by a
//! [`Kernel`] centered on it.
//!
//! # Parameters
//!
//! - `foreground_value` - output for extrema, default `O::max_value()`
//! - `background_value` - output for everything else, default `O::min_value()`
//! - `flat_to_foreground` - whether a window holding one distinct value counts
//!   as an extremum, default `true`
//! - `threshold` - minima above it (maxima below it) are rejected; defaults
//!   to `I::max_value()` for minima and `I::min_value()` for maxima, which
//!   disables thresholding
//!
//! # Examples
//!
//! ```
//! use extrema_core::Image;
//! use extrema_morph::{ExtremaFilter, Kernel};
//!
//! let image = Image::from_rows(&[[5u8, 5, 5], [5, 1, 5], [5, 5, 5]]).unwrap();
//! let kernel = Kernel::box_2d(1, 1).unwrap();
//! let minima = ExtremaFilter::<u8, u8>::minima()
//!     .with_flat_to_foreground(false)
//!     .apply(&image, &kernel)
//!     .unwrap();
//! assert_eq!(minima.get_pixel(1, 1), Some(255));
//! assert_eq!(minima.count_value(255), 1);
//! ```

use log::{debug, warn};

use extrema_core::{Image, Pixel};

use crate::histogram::{ExtremaHistogram, HistogramPixel, WindowCounts};
use crate::kernel::Kernel;
use crate::moving::scan_image;
use crate::MorphResult;

/// Direction of the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtremumKind {
    /// Local minima
    Minima,
    /// Local maxima
    Maxima,
}

impl ExtremumKind {
    /// Threshold that lets every value through
    pub fn default_threshold<I: Pixel>(self) -> I {
        match self {
            ExtremumKind::Minima => I::max_value(),
            ExtremumKind::Maxima => I::min_value(),
        }
    }

    /// Whether `center` lies on the wrong side of `threshold`
    ///
    /// Uses `PartialOrd`, like the window test: `-0.0` passes a `0.0`
    /// threshold in both directions.
    #[inline]
    pub fn rejects<I: Pixel>(self, center: I, threshold: I) -> bool {
        match self {
            ExtremumKind::Minima => center > threshold,
            ExtremumKind::Maxima => center < threshold,
        }
    }
}

/// Detection parameters copied into every histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremaConfig<I, O> {
    /// Minima or maxima
    pub kind: ExtremumKind,
    /// Output value for extrema
    pub foreground: O,
    /// Output value for other pixels
    pub background: O,
    /// Whether single-valued windows are extrema
    pub flat_to_foreground: bool,
    /// Cutoff on the center value
    pub threshold: I,
}

impl<I: Pixel, O: Pixel> ExtremaConfig<I, O> {
    /// Default parameters for the given direction
    pub fn new(kind: ExtremumKind) -> Self {
        ExtremaConfig {
            kind,
            foreground: O::max_value(),
            background: O::min_value(),
            flat_to_foreground: true,
            threshold: kind.default_threshold(),
        }
    }

    /// Default parameters for minima
    pub fn minima() -> Self {
        Self::new(ExtremumKind::Minima)
    }

    /// Default parameters for maxima
    pub fn maxima() -> Self {
        Self::new(ExtremumKind::Maxima)
    }
}

impl<I: Pixel, O: Pixel> Default for ExtremaConfig<I, O> {
    fn default() -> Self {
        Self::minima()
    }
}

/// Local minima / maxima filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremaFilter<I, O> {
    config: ExtremaConfig<I, O>,
}

impl<I: HistogramPixel, O: Pixel> ExtremaFilter<I, O> {
    /// Create a filter with default parameters
    pub fn new(kind: ExtremumKind) -> Self {
        ExtremaFilter {
            config: ExtremaConfig::new(kind),
        }
    }

    /// Create a local minima filter
    pub fn minima() -> Self {
        Self::new(ExtremumKind::Minima)
    }

    /// Create a local maxima filter
    pub fn maxima() -> Self {
        Self::new(ExtremumKind::Maxima)
    }

    /// Create a filter from explicit parameters
    pub fn from_config(config: ExtremaConfig<I, O>) -> Self {
        ExtremaFilter { config }
    }

    /// Get the parameters
    #[inline]
    pub fn config(&self) -> &ExtremaConfig<I, O> {
        &self.config
    }

    /// Get the direction
    #[inline]
    pub fn kind(&self) -> ExtremumKind {
        self.config.kind
    }

    /// Get the output value for extrema
    #[inline]
    pub fn foreground_value(&self) -> O {
        self.config.foreground
    }

    /// Set the output value for extrema
    pub fn set_foreground_value(&mut self, value: O) {
        self.config.foreground = value;
    }

    /// Get the output value for other pixels
    #[inline]
    pub fn background_value(&self) -> O {
        self.config.background
    }

    /// Set the output value for other pixels
    pub fn set_background_value(&mut self, value: O) {
        self.config.background = value;
    }

    /// Whether single-valued windows are extrema
    #[inline]
    pub fn flat_to_foreground(&self) -> bool {
        self.config.flat_to_foreground
    }

    /// Set whether single-valued windows are extrema
    pub fn set_flat_to_foreground(&mut self, flat: bool) {
        self.config.flat_to_foreground = flat;
    }

    /// Get the threshold
    #[inline]
    pub fn threshold(&self) -> I {
        self.config.threshold
    }

    /// Set the threshold
    pub fn set_threshold(&mut self, threshold: I) {
        self.config.threshold = threshold;
    }

    /// Set the output value for extrema
    pub fn with_foreground_value(mut self, value: O) -> Self {
        self.set_foreground_value(value);
        self
    }

    /// Set the output value for other pixels
    pub fn with_background_value(mut self, value: O) -> Self {
        self.set_background_value(value);
        self
    }

    /// Set whether single-valued windows are extrema
    pub fn with_flat_to_foreground(mut self, flat: bool) -> Self {
        self.set_flat_to_foreground(flat);
        self
    }

    /// Set the threshold
    pub fn with_threshold(mut self, threshold: I) -> Self {
        self.set_threshold(threshold);
        self
    }

    /// Build an empty histogram carrying the current parameters
    ///
    /// Later changes to the filter do not affect histograms already built.
    pub fn new_histogram(&self) -> ExtremaHistogram<I, O> {
        ExtremaHistogram::new(self.config)
    }

    /// Build an empty histogram backed by the count store `C`
    pub fn new_histogram_with<C: WindowCounts<I>>(&self) -> ExtremaHistogram<I, O, C> {
        ExtremaHistogram::new(self.config)
    }

    /// Run the filter over an image
    ///
    /// # Arguments
    ///
    /// * `image` - 2D or 3D input image
    /// * `kernel` - neighborhood of each pixel
    ///
    /// # Errors
    ///
    /// Returns `MorphError::InvalidKernel` if the kernel has no hits.
    pub fn apply(&self, image: &Image<I>, kernel: &Kernel) -> MorphResult<Image<O>> {
        debug!(
            "{:?} filter on {:?} image: {:?}",
            self.kind(),
            image.dimensions(),
            self.config
        );
        if self.config.foreground.total_order(&self.config.background).is_eq() {
            warn!(
                "foreground and background are both {:?}; output will be uniform",
                self.config.foreground
            );
        }
        scan_image(image, kernel, &self.new_histogram())
    }
}

/// Mark local minima with 255 and everything else with 0
///
/// # Errors
///
/// Returns `MorphError::InvalidKernel` if the kernel has no hits.
pub fn local_minima<I: HistogramPixel>(
    image: &Image<I>,
    kernel: &Kernel,
) -> MorphResult<Image<u8>> {
    ExtremaFilter::minima().apply(image, kernel)
}

/// Mark local maxima with 255 and everything else with 0
///
/// # Errors
///
/// Returns `MorphError::InvalidKernel` if the kernel has no hits.
pub fn local_maxima<I: HistogramPixel>(
    image: &Image<I>,
    kernel: &Kernel,
) -> MorphResult<Image<u8>> {
    ExtremaFilter::maxima().apply(image, kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::SparseCounts;

    #[test]
    fn test_defaults() {
        let filter = ExtremaFilter::<u16, u8>::minima();
        assert_eq!(filter.foreground_value(), 255);
        assert_eq!(filter.background_value(), 0);
        assert!(filter.flat_to_foreground());
        assert_eq!(filter.threshold(), u16::MAX);

        let filter = ExtremaFilter::<f32, i16>::maxima();
        assert_eq!(filter.foreground_value(), i16::MAX);
        assert_eq!(filter.background_value(), i16::MIN);
        assert_eq!(filter.threshold(), f32::NEG_INFINITY);
    }

    #[test]
    fn test_setters() {
        let mut filter = ExtremaFilter::<i32, u8>::minima();
        filter.set_foreground_value(1);
        filter.set_background_value(2);
        filter.set_flat_to_foreground(false);
        filter.set_threshold(-7);
        let config = filter.config();
        assert_eq!(config.foreground, 1);
        assert_eq!(config.background, 2);
        assert!(!config.flat_to_foreground);
        assert_eq!(config.threshold, -7);
        assert_eq!(filter.kind(), ExtremumKind::Minima);
    }

    #[test]
    fn test_histogram_snapshot() {
        let mut filter = ExtremaFilter::<u8, u8>::minima().with_threshold(10);
        let mut hist = filter.new_histogram();
        filter.set_threshold(0);

        hist.add_pixel(1);
        assert_eq!(hist.evaluate(1), 255);
        let mut later = filter.new_histogram();
        later.add_pixel(1);
        assert_eq!(later.evaluate(1), 0);
    }

    #[test]
    fn test_sparse_histogram_from_filter() {
        let filter = ExtremaFilter::<u8, u8>::maxima().with_foreground_value(1);
        let mut hist = filter.new_histogram_with::<SparseCounts<u8>>();
        hist.add_pixel(3);
        hist.add_pixel(9);
        assert_eq!(hist.evaluate(9), 1);
        assert_eq!(hist.evaluate(3), 0);
    }

    #[test]
    fn test_rejects() {
        assert!(ExtremumKind::Minima.rejects(11u8, 10));
        assert!(!ExtremumKind::Minima.rejects(10u8, 10));
        assert!(ExtremumKind::Maxima.rejects(9u8, 10));
        assert!(!ExtremumKind::Maxima.rejects(10u8, 10));
        assert!(!ExtremumKind::Minima.rejects(f64::INFINITY, f64::INFINITY));
        assert!(!ExtremumKind::Minima.rejects(0.0f32, -0.0));
        assert!(!ExtremumKind::Maxima.rejects(-0.0f32, 0.0));
    }

    #[test]
    fn test_apply_minima_plateau() {
        let image = Image::from_rows(&[
            [9u8, 9, 9, 9, 9],
            [9, 2, 2, 9, 9],
            [9, 9, 9, 9, 1],
        ])
        .unwrap();
        let kernel = Kernel::box_2d(1, 1).unwrap();
        let result = local_minima(&image, &kernel).unwrap();
        // The top-right corner only sees 9s, a flat window
        let expected = Image::from_rows(&[
            [0u8, 0, 0, 0, 255],
            [0, 255, 255, 0, 0],
            [0, 0, 0, 0, 255],
        ])
        .unwrap();
        assert_eq!(result, expected);

        let strict = ExtremaFilter::<u8, u8>::minima()
            .with_flat_to_foreground(false)
            .apply(&image, &kernel)
            .unwrap();
        assert_eq!(strict.get_pixel(4, 0), Some(0));
        assert_eq!(strict.count_value(255), 3);
    }

    #[test]
    fn test_apply_maxima_3d() {
        let mut image = Image::new_3d(3, 3, 3, 0i32).unwrap();
        image.set_voxel(1, 1, 1, 5).unwrap();
        let kernel = Kernel::box_3d(1, 1, 1).unwrap();
        let result = ExtremaFilter::<i32, u8>::maxima()
            .with_flat_to_foreground(false)
            .apply(&image, &kernel)
            .unwrap();
        assert_eq!(result.count_value(255), 1);
        assert_eq!(result.get_voxel(1, 1, 1), Some(255));
    }

    #[test]
    fn test_apply_rejects_empty_kernel() {
        let image = Image::new(4, 4, 0u8).unwrap();
        let kernel = Kernel::new(1, 1, 0).unwrap();
        assert!(local_maxima(&image, &kernel).is_err());
    }
}
