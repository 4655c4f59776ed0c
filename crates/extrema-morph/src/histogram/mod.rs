//! Moving histogram for local extremum detection
//!
//! An [`ExtremaHistogram`] holds the multiset of pixel values currently inside
//! a sliding window and decides whether a center value is a local extremum of
//! that window.
//!
//! Two count stores implement [`WindowCounts`]:
//!
//! - [`DenseCounts`] - one slot per representable value, for `bool` and
//!   8/16-bit integers
//! - [`SparseCounts`] - an ordered map, for 32/64-bit integers and floats
//!
//! The store is chosen statically from the input type through
//! [`HistogramPixel::Counts`]. Both stores stay nameable so that a small-range
//! type can also be run through the sparse store.

mod dense;
mod sparse;

use std::fmt::Debug;

use extrema_core::Pixel;

use crate::extrema::{ExtremaConfig, ExtremumKind};

pub use dense::DenseCounts;
pub use sparse::SparseCounts;

/// Multiset of pixel values with access to its smallest and largest member.
pub trait WindowCounts<T: Pixel>: Clone + Debug + Default + Send {
    /// Add one occurrence of `value`.
    fn insert(&mut self, value: T);

    /// Remove one occurrence of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the multiset.
    fn remove(&mut self, value: T);

    /// Total number of occurrences.
    fn len(&self) -> usize;

    /// True when nothing is counted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of occurrences of `value`.
    fn count(&self, value: T) -> usize;

    /// Smallest and largest counted value, `None` when empty.
    ///
    /// Takes `&mut self` so that stores may drop stale entries while
    /// answering.
    fn bounds(&mut self) -> Option<(T, T)>;

    /// Remove everything.
    fn clear(&mut self);
}

/// Pixel type with a default count store.
pub trait HistogramPixel: Pixel {
    /// Store used by [`ExtremaHistogram`] unless another one is named.
    type Counts: WindowCounts<Self>;
}

macro_rules! histogram_pixel {
    ($store:ident: $($t:ty),*) => {
        $(
            impl HistogramPixel for $t {
                type Counts = $store<$t>;
            }
        )*
    };
}

histogram_pixel!(DenseCounts: bool, u8, i8, u16, i16);
histogram_pixel!(SparseCounts: u32, i32, u64, i64, f32, f64);

/// Sliding-window histogram that classifies center pixels.
///
/// `I` is the input pixel type, `O` the output type and `C` the count store.
#[derive(Debug, Clone)]
pub struct ExtremaHistogram<I: HistogramPixel, O, C = <I as HistogramPixel>::Counts> {
    counts: C,
    config: ExtremaConfig<I, O>,
}

impl<I, O, C> ExtremaHistogram<I, O, C>
where
    I: HistogramPixel,
    O: Pixel,
    C: WindowCounts<I>,
{
    /// Create an empty histogram with the given configuration
    pub fn new(config: ExtremaConfig<I, O>) -> Self {
        ExtremaHistogram {
            counts: C::default(),
            config,
        }
    }

    /// Get the configuration
    #[inline]
    pub fn config(&self) -> &ExtremaConfig<I, O> {
        &self.config
    }

    /// Add a pixel value entering the window
    #[inline]
    pub fn add_pixel(&mut self, value: I) {
        self.counts.insert(value);
    }

    /// Remove a pixel value leaving the window
    ///
    /// # Panics
    ///
    /// Panics if `value` is not currently in the window.
    #[inline]
    pub fn remove_pixel(&mut self, value: I) {
        self.counts.remove(value);
    }

    /// Classify `center` against the current window
    ///
    /// Returns the background value when the threshold rejects `center` or the
    /// window is empty. Otherwise, for minima, `center` is foreground when no
    /// window value is below it; for maxima, when none is above it. If
    /// `flat_to_foreground` is false, a window holding a single distinct value
    /// is background.
    ///
    /// The center is compared with `PartialOrd`, so signed zeros are equal
    /// and a NaN center is background. The window bounds themselves follow
    /// [`Pixel::total_order`].
    pub fn evaluate(&mut self, center: I) -> O {
        let config = self.config;
        if config.kind.rejects(center, config.threshold) {
            return config.background;
        }
        let Some((lo, hi)) = self.counts.bounds() else {
            return config.background;
        };

        // IEEE comparisons: -0.0 and 0.0 are one value here, NaN never passes.
        let is_extremum = match config.kind {
            ExtremumKind::Minima => center <= lo && (config.flat_to_foreground || center != hi),
            ExtremumKind::Maxima => center >= hi && (config.flat_to_foreground || center != lo),
        };

        if is_extremum {
            config.foreground
        } else {
            config.background
        }
    }

    /// Empty the window, keeping the configuration
    pub fn reset(&mut self) {
        self.counts.clear();
    }

    /// Number of pixels in the window
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when the window holds no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of `value` in the window
    pub fn count(&self, value: I) -> usize {
        self.counts.count(value)
    }

    /// Smallest and largest value in the window
    pub fn bounds(&mut self) -> Option<(I, I)> {
        self.counts.bounds()
    }

    /// Smallest value in the window
    pub fn min(&mut self) -> Option<I> {
        self.bounds().map(|(lo, _)| lo)
    }

    /// Largest value in the window
    pub fn max(&mut self) -> Option<I> {
        self.bounds().map(|(_, hi)| hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minima(threshold: u8, flat: bool) -> ExtremaHistogram<u8, u8> {
        ExtremaHistogram::new(ExtremaConfig {
            threshold,
            flat_to_foreground: flat,
            ..ExtremaConfig::minima()
        })
    }

    fn filled<C: WindowCounts<u8>>(
        mut hist: ExtremaHistogram<u8, u8, C>,
        values: &[u8],
    ) -> ExtremaHistogram<u8, u8, C> {
        for &v in values {
            hist.add_pixel(v);
        }
        hist
    }

    #[test]
    fn test_minima_window() {
        let mut hist = filled(minima(10, true), &[3, 3, 5, 1, 1]);
        assert_eq!(hist.evaluate(1), 255);
        assert_eq!(hist.evaluate(3), 0);
        assert_eq!(hist.evaluate(5), 0);
    }

    #[test]
    fn test_flat_policy() {
        let mut hist = filled(minima(10, false), &[2, 2, 2]);
        assert_eq!(hist.evaluate(2), 0);

        let mut hist = filled(minima(10, true), &[2, 2, 2]);
        assert_eq!(hist.evaluate(2), 255);
    }

    #[test]
    fn test_threshold_precedes() {
        let mut hist = filled(minima(0, true), &[1, 1, 2]);
        assert_eq!(hist.evaluate(1), 0);
    }

    #[test]
    fn test_empty_window_is_background() {
        let mut hist = minima(255, true);
        assert_eq!(hist.evaluate(0), 0);
    }

    #[test]
    fn test_maxima() {
        let config = ExtremaConfig::<f32, u8>::maxima();
        let mut hist: ExtremaHistogram<f32, u8> = ExtremaHistogram::new(config);
        for v in [0.5, 2.0, -1.0, 2.0] {
            hist.add_pixel(v);
        }
        assert_eq!(hist.evaluate(2.0), 255);
        assert_eq!(hist.evaluate(0.5), 0);

        let mut flat = ExtremaHistogram::<f32, u8>::new(ExtremaConfig {
            flat_to_foreground: false,
            ..config
        });
        flat.add_pixel(4.0);
        assert_eq!(flat.evaluate(4.0), 0);
    }

    #[test]
    fn test_maxima_threshold() {
        let mut hist = ExtremaHistogram::<i32, u8>::new(ExtremaConfig {
            threshold: 10,
            ..ExtremaConfig::maxima()
        });
        hist.add_pixel(7);
        hist.add_pixel(3);
        assert_eq!(hist.evaluate(7), 0);
        hist.add_pixel(12);
        assert_eq!(hist.evaluate(12), 255);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = filled(minima(255, true), &[4, 6]);
        let mut copy = original.clone();
        copy.add_pixel(1);
        copy.remove_pixel(6);

        assert_eq!(original.len(), 2);
        assert_eq!(original.bounds(), Some((4, 6)));
        assert_eq!(copy.bounds(), Some((1, 4)));
        assert_eq!(original.evaluate(4), 255);
        assert_eq!(copy.evaluate(4), 0);
    }

    #[test]
    fn test_reset_keeps_config() {
        let mut hist = filled(minima(9, false), &[1, 2, 3]);
        hist.reset();
        assert!(hist.is_empty());
        assert_eq!(hist.min(), None);
        assert_eq!(hist.config().threshold, 9);
        assert!(!hist.config().flat_to_foreground);
    }

    #[test]
    fn test_sparse_store_for_u8() {
        let hist = ExtremaHistogram::<u8, u8, SparseCounts<u8>>::new(ExtremaConfig {
            threshold: 10,
            ..ExtremaConfig::minima()
        });
        let mut hist = filled(hist, &[3, 3, 5, 1, 1]);
        hist.remove_pixel(1);
        hist.remove_pixel(1);
        assert_eq!(hist.min(), Some(3));
        assert_eq!(hist.max(), Some(5));
        assert_eq!(hist.evaluate(3), 255);
        assert_eq!(hist.count(1), 0);
    }

    #[test]
    fn test_custom_output_values() {
        let mut hist = ExtremaHistogram::<u16, i8>::new(ExtremaConfig {
            foreground: 1,
            background: -1,
            ..ExtremaConfig::minima()
        });
        hist.add_pixel(300);
        assert_eq!(hist.evaluate(300), 1);
        hist.add_pixel(100);
        assert_eq!(hist.evaluate(300), -1);
    }

    #[test]
    fn test_signed_zero_window_is_flat() {
        let mut strict = ExtremaHistogram::<f32, u8>::new(ExtremaConfig {
            flat_to_foreground: false,
            ..ExtremaConfig::minima()
        });
        strict.add_pixel(0.0);
        strict.add_pixel(-0.0);
        assert_eq!(strict.evaluate(-0.0), 0);
        assert_eq!(strict.evaluate(0.0), 0);

        let mut flat = ExtremaHistogram::<f32, u8>::new(ExtremaConfig::minima());
        for v in [0.0, -0.0, 1.0] {
            flat.add_pixel(v);
        }
        assert_eq!(flat.evaluate(0.0), 255);
        assert_eq!(flat.evaluate(-0.0), 255);

        let mut maxima = ExtremaHistogram::<f64, u8>::new(ExtremaConfig {
            flat_to_foreground: false,
            ..ExtremaConfig::maxima()
        });
        for v in [-0.0, 0.0, -2.0] {
            maxima.add_pixel(v);
        }
        assert_eq!(maxima.evaluate(-0.0), 255);
        assert_eq!(maxima.evaluate(0.0), 255);
    }

    #[test]
    fn test_nan_center_is_background() {
        let mut hist = ExtremaHistogram::<f32, u8>::new(ExtremaConfig::minima());
        hist.add_pixel(1.0);
        assert_eq!(hist.evaluate(f32::NAN), 0);
    }

    #[test]
    #[should_panic]
    fn test_remove_from_empty_panics() {
        let mut hist = minima(255, true);
        hist.remove_pixel(3);
    }
}
