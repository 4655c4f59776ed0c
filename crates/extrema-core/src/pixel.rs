//! Pixel value traits
//!
//! [`Pixel`] is the numeric-range utility every image value type implements:
//! the smallest and largest representable value and a total order. Floats use
//! the whole extended line, so `min_value()` is negative infinity and NaN is
//! placed by IEEE-754 `totalOrder`.
//!
//! [`SmallRange`] marks the types whose whole range fits in a lookup table
//! (`bool`, 8-bit and 16-bit integers) and maps each value to its slot.

use std::cmp::Ordering;
use std::fmt::Debug;

/// Value stored in an [`Image`](crate::Image).
pub trait Pixel: Copy + PartialEq + PartialOrd + Debug + Send + Sync + 'static {
    /// Smallest representable value.
    fn min_value() -> Self;

    /// Largest representable value.
    fn max_value() -> Self;

    /// Total order used wherever pixel values are sorted or compared.
    fn total_order(&self, other: &Self) -> Ordering;
}

/// Pixel type with a range small enough to index a table by value.
///
/// Offsets run from `0` (for `min_value()`) to `CARDINALITY - 1`
/// (for `max_value()`).
pub trait SmallRange: Pixel {
    /// Number of representable values.
    const CARDINALITY: usize;

    /// Table slot of this value.
    fn to_offset(self) -> usize;

    /// Value stored at a table slot.
    fn from_offset(offset: usize) -> Self;
}

macro_rules! pixel_for_int {
    ($($int:ty),*) => {
        $(
            impl Pixel for $int {
                #[inline]
                fn min_value() -> $int {
                    <$int>::MIN
                }

                #[inline]
                fn max_value() -> $int {
                    <$int>::MAX
                }

                #[inline]
                fn total_order(&self, other: &$int) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

macro_rules! pixel_for_float {
    ($($float:ty),*) => {
        $(
            impl Pixel for $float {
                #[inline]
                fn min_value() -> $float {
                    <$float>::NEG_INFINITY
                }

                #[inline]
                fn max_value() -> $float {
                    <$float>::INFINITY
                }

                #[inline]
                fn total_order(&self, other: &$float) -> Ordering {
                    <$float>::total_cmp(self, other)
                }
            }
        )*
    };
}

// Offsets are computed in i32, which holds `max - min` for every 16-bit type.
macro_rules! small_range_for_int {
    ($($int:ty),*) => {
        $(
            impl SmallRange for $int {
                const CARDINALITY: usize = (<$int>::MAX as i32 - <$int>::MIN as i32 + 1) as usize;

                #[inline]
                fn to_offset(self) -> usize {
                    (self as i32 - <$int>::MIN as i32) as usize
                }

                #[inline]
                fn from_offset(offset: usize) -> $int {
                    (offset as i32 + <$int>::MIN as i32) as $int
                }
            }
        )*
    };
}

pixel_for_int!(u8, i8, u16, i16, u32, i32, u64, i64);
pixel_for_float!(f32, f64);
small_range_for_int!(u8, i8, u16, i16);

impl Pixel for bool {
    #[inline]
    fn min_value() -> bool {
        false
    }

    #[inline]
    fn max_value() -> bool {
        true
    }

    #[inline]
    fn total_order(&self, other: &bool) -> Ordering {
        Ord::cmp(self, other)
    }
}

impl SmallRange for bool {
    const CARDINALITY: usize = 2;

    #[inline]
    fn to_offset(self) -> usize {
        usize::from(self)
    }

    #[inline]
    fn from_offset(offset: usize) -> bool {
        offset != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_offsets<T: SmallRange>() {
        assert_eq!(T::min_value().to_offset(), 0);
        assert_eq!(T::max_value().to_offset(), T::CARDINALITY - 1);
        assert_eq!(T::from_offset(0), T::min_value());
        assert_eq!(T::from_offset(T::CARDINALITY - 1), T::max_value());
    }

    #[test]
    fn test_cardinality() {
        assert_eq!(bool::CARDINALITY, 2);
        assert_eq!(u8::CARDINALITY, 256);
        assert_eq!(i8::CARDINALITY, 256);
        assert_eq!(u16::CARDINALITY, 65536);
        assert_eq!(i16::CARDINALITY, 65536);
    }

    #[test]
    fn test_offsets_span_range() {
        check_offsets::<bool>();
        check_offsets::<u8>();
        check_offsets::<i8>();
        check_offsets::<u16>();
        check_offsets::<i16>();
    }

    #[test]
    fn test_signed_offsets() {
        assert_eq!((-128i8).to_offset(), 0);
        assert_eq!(0i8.to_offset(), 128);
        assert_eq!(i8::from_offset(129), 1);
        assert_eq!((-1i16).to_offset(), 32767);
        assert_eq!(i16::from_offset(32768), 0);
    }

    #[test]
    fn test_float_range_is_extended() {
        assert_eq!(f32::min_value(), f32::NEG_INFINITY);
        assert_eq!(f64::max_value(), f64::INFINITY);
    }

    #[test]
    fn test_total_order_floats() {
        assert_eq!(1.0f32.total_order(&2.0), Ordering::Less);
        assert_eq!(f64::NAN.total_order(&f64::INFINITY), Ordering::Greater);
        assert_eq!((-0.0f32).total_order(&0.0), Ordering::Less);
    }

    #[test]
    fn test_bool_range() {
        assert!(!bool::min_value());
        assert!(bool::max_value());
        assert_eq!(false.total_order(&true), Ordering::Less);
    }

    #[test]
    fn test_total_order_ints() {
        assert_eq!(5u32.total_order(&5), Ordering::Equal);
        assert_eq!((-3i64).total_order(&2), Ordering::Less);
        assert_eq!(true.total_order(&false), Ordering::Greater);
    }
}
