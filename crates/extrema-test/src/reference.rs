//! Brute-force reference detector
//!
//! Recomputes every window from scratch, so results of incremental scans can
//! be checked against it.

use extrema_core::{Image, Pixel};

/// Values of `image` at `offsets` from `center`, skipping those outside
pub fn window_values<T: Copy>(
    image: &Image<T>,
    center: [u32; 3],
    offsets: &[[i32; 3]],
) -> Vec<T> {
    offsets
        .iter()
        .filter_map(|o| {
            image.get_signed(
                i64::from(center[0]) + i64::from(o[0]),
                i64::from(center[1]) + i64::from(o[1]),
                i64::from(center[2]) + i64::from(o[2]),
            )
        })
        .collect()
}

/// Call `f(window, center)` at every pixel and collect the results
pub fn brute_force_scan<T, U, F>(image: &Image<T>, offsets: &[[i32; 3]], mut f: F) -> Image<U>
where
    T: Copy,
    U: Copy,
    F: FnMut(&[T], T) -> U,
{
    let (width, height, _) = image.dimensions();
    let width = width as usize;
    let plane = width * height as usize;
    let mut index = 0usize;
    image.map(|center| {
        let x = (index % width) as u32;
        let y = ((index % plane) / width) as u32;
        let z = (index / plane) as u32;
        index += 1;
        let window = window_values(image, [x, y, z], offsets);
        f(&window, center)
    })
}

/// Parameters of [`is_local_extremum`]
#[derive(Debug, Clone, Copy)]
pub struct ReferenceRule<T> {
    /// Search minima (true) or maxima (false)
    pub minima: bool,
    /// Whether single-valued windows are extrema
    pub flat_to_foreground: bool,
    /// Cutoff on the center value
    pub threshold: T,
}

/// Decide from a full window whether `center` is a local extremum
///
/// Unless flat windows count, some window value must differ from `center`.
/// Values compare with `PartialOrd`, so `-0.0 == 0.0`.
pub fn is_local_extremum<T: Pixel>(window: &[T], center: T, rule: &ReferenceRule<T>) -> bool {
    let rejected = if rule.minima {
        center > rule.threshold
    } else {
        center < rule.threshold
    };
    if rejected || window.is_empty() {
        return false;
    }

    let distinct = window.iter().any(|&v| v != center);
    let extreme = if rule.minima {
        window.iter().all(|&v| center <= v)
    } else {
        window.iter().all(|&v| center >= v)
    };
    extreme && (rule.flat_to_foreground || distinct)
}

/// Mark pixels accepted by [`is_local_extremum`] with `foreground`
pub fn reference_extrema<T: Pixel, U: Copy>(
    image: &Image<T>,
    offsets: &[[i32; 3]],
    rule: &ReferenceRule<T>,
    foreground: U,
    background: U,
) -> Image<U> {
    brute_force_scan(image, offsets, |window, center| {
        if is_local_extremum(window, center, rule) {
            foreground
        } else {
            background
        }
    })
}
