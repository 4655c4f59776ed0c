//! Table-backed window counts for small-range pixel types

use std::fmt;
use std::marker::PhantomData;

use extrema_core::SmallRange;

use super::WindowCounts;

/// Window counts stored in a table with one slot per representable value.
///
/// Running minimum and maximum slots are maintained on every insertion and
/// removal. When the window is empty they hold inverted sentinels
/// (`min = CARDINALITY - 1`, `max = 0`) so that the next insertion sets both.
#[derive(Clone)]
pub struct DenseCounts<T: SmallRange> {
    counts: Vec<usize>,
    min: usize,
    max: usize,
    total: usize,
    _marker: PhantomData<T>,
}

impl<T: SmallRange> DenseCounts<T> {
    /// Create an empty table
    pub fn new() -> Self {
        DenseCounts {
            counts: vec![0; T::CARDINALITY],
            min: T::CARDINALITY - 1,
            max: 0,
            total: 0,
            _marker: PhantomData,
        }
    }

    fn reset_bounds(&mut self) {
        self.min = T::CARDINALITY - 1;
        self.max = 0;
    }
}

impl<T: SmallRange> Default for DenseCounts<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SmallRange> fmt::Debug for DenseCounts<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bounds = (self.total > 0)
            .then(|| (T::from_offset(self.min), T::from_offset(self.max)));
        f.debug_struct("DenseCounts")
            .field("total", &self.total)
            .field("bounds", &bounds)
            .finish()
    }
}

impl<T: SmallRange> WindowCounts<T> for DenseCounts<T> {
    #[inline]
    fn insert(&mut self, value: T) {
        let offset = value.to_offset();
        self.counts[offset] += 1;
        self.total += 1;
        self.min = self.min.min(offset);
        self.max = self.max.max(offset);
    }

    fn remove(&mut self, value: T) {
        let offset = value.to_offset();
        let slot = &mut self.counts[offset];
        assert!(*slot > 0, "removing {value:?}, which is not in the window");
        *slot -= 1;
        self.total -= 1;

        if self.total == 0 {
            self.reset_bounds();
            return;
        }
        // At least one slot is nonzero, so both walks stop inside the table.
        while self.counts[self.max] == 0 {
            self.max -= 1;
        }
        while self.counts[self.min] == 0 {
            self.min += 1;
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.total
    }

    #[inline]
    fn count(&self, value: T) -> usize {
        self.counts[value.to_offset()]
    }

    #[inline]
    fn bounds(&mut self) -> Option<(T, T)> {
        (self.total > 0).then(|| (T::from_offset(self.min), T::from_offset(self.max)))
    }

    fn clear(&mut self) {
        if self.total > 0 {
            self.counts[self.min..=self.max].fill(0);
        }
        self.total = 0;
        self.reset_bounds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let mut counts = DenseCounts::<u8>::new();
        assert!(counts.is_empty());
        assert_eq!(counts.bounds(), None);
        assert_eq!(counts.count(17), 0);
    }

    #[test]
    fn test_bounds_walk_inward() {
        let mut counts = DenseCounts::<u8>::new();
        for v in [10, 200, 50, 10] {
            counts.insert(v);
        }
        assert_eq!(counts.bounds(), Some((10, 200)));

        counts.remove(200);
        assert_eq!(counts.bounds(), Some((10, 50)));
        counts.remove(10);
        assert_eq!(counts.bounds(), Some((10, 50)));
        counts.remove(10);
        assert_eq!(counts.bounds(), Some((50, 50)));
        counts.remove(50);
        assert_eq!(counts.bounds(), None);

        counts.insert(3);
        assert_eq!(counts.bounds(), Some((3, 3)));
    }

    #[test]
    fn test_signed_and_bool() {
        let mut counts = DenseCounts::<i16>::new();
        counts.insert(-300);
        counts.insert(i16::MAX);
        assert_eq!(counts.bounds(), Some((-300, i16::MAX)));

        let mut flags = DenseCounts::<bool>::new();
        flags.insert(true);
        assert_eq!(flags.bounds(), Some((true, true)));
        flags.insert(false);
        assert_eq!(flags.bounds(), Some((false, true)));
    }

    #[test]
    fn test_clear() {
        let mut counts = DenseCounts::<u16>::new();
        for v in [1000, 2000, 1500] {
            counts.insert(v);
        }
        counts.clear();
        assert!(counts.is_empty());
        assert_eq!(counts.count(1500), 0);
        assert_eq!(counts.bounds(), None);
    }

    #[test]
    #[should_panic(expected = "not in the window")]
    fn test_remove_absent_panics() {
        let mut counts = DenseCounts::<u8>::new();
        counts.insert(4);
        counts.remove(5);
    }
}
