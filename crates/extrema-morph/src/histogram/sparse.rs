//! Ordered-map window counts for wide-range pixel types

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use extrema_core::Pixel;

use super::WindowCounts;

/// Map key ordering pixel values by [`Pixel::total_order`].
#[derive(Clone, Copy, Debug)]
struct OrderedKey<T>(T);

impl<T: Pixel> PartialEq for OrderedKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_order(&other.0).is_eq()
    }
}

impl<T: Pixel> Eq for OrderedKey<T> {}

impl<T: Pixel> PartialOrd for OrderedKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Pixel> Ord for OrderedKey<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_order(&other.0)
    }
}

/// Window counts stored in an ordered map from value to count.
///
/// Removing the last occurrence of a value leaves a zero-count ("stale")
/// entry behind. Stale entries at either end of the map are dropped before
/// the bounds are read, and the whole map is swept once stale entries
/// outnumber live ones.
#[derive(Clone)]
pub struct SparseCounts<T: Pixel> {
    counts: BTreeMap<OrderedKey<T>, usize>,
    total: usize,
    stale: usize,
}

impl<T: Pixel> SparseCounts<T> {
    /// Create an empty map
    pub fn new() -> Self {
        SparseCounts {
            counts: BTreeMap::new(),
            total: 0,
            stale: 0,
        }
    }

    /// Number of map entries, stale ones included
    pub fn entries(&self) -> usize {
        self.counts.len()
    }

    fn purge(&mut self) {
        while let Some(entry) = self.counts.first_entry() {
            if *entry.get() > 0 {
                break;
            }
            entry.remove();
            self.stale -= 1;
        }
        while let Some(entry) = self.counts.last_entry() {
            if *entry.get() > 0 {
                break;
            }
            entry.remove();
            self.stale -= 1;
        }

        if self.stale > self.counts.len() - self.stale {
            self.counts.retain(|_, count| *count > 0);
            self.stale = 0;
        }
    }
}

impl<T: Pixel> Default for SparseCounts<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pixel> fmt::Debug for SparseCounts<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseCounts")
            .field("total", &self.total)
            .field("entries", &self.counts.len())
            .field("stale", &self.stale)
            .finish()
    }
}

impl<T: Pixel> WindowCounts<T> for SparseCounts<T> {
    #[inline]
    fn insert(&mut self, value: T) {
        match self.counts.entry(OrderedKey(value)) {
            Entry::Occupied(mut entry) => {
                if *entry.get() == 0 {
                    self.stale -= 1;
                }
                *entry.get_mut() += 1;
            }
            Entry::Vacant(entry) => {
                entry.insert(1);
            }
        }
        self.total += 1;
    }

    fn remove(&mut self, value: T) {
        let count = match self.counts.get_mut(&OrderedKey(value)) {
            Some(count) if *count > 0 => count,
            _ => panic!("removing {value:?}, which is not in the window"),
        };
        *count -= 1;
        if *count == 0 {
            self.stale += 1;
        }
        self.total -= 1;
    }

    #[inline]
    fn len(&self) -> usize {
        self.total
    }

    fn count(&self, value: T) -> usize {
        self.counts.get(&OrderedKey(value)).copied().unwrap_or(0)
    }

    fn bounds(&mut self) -> Option<(T, T)> {
        if self.total == 0 {
            self.counts.clear();
            self.stale = 0;
            return None;
        }
        self.purge();
        let lo = self.counts.first_key_value()?.0.0;
        let hi = self.counts.last_key_value()?.0.0;
        Some((lo, hi))
    }

    fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
        self.stale = 0;
    }
}
