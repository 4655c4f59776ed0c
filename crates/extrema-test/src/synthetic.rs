//! Generated test images
//!
//! Deterministic images standing in for the photographs usually loaded by
//! regression tests.

use extrema_core::Image;
use rand::prelude::*;

/// Noise image with `levels` distinct values `0..levels`
///
/// # Panics
///
/// Panics if a dimension is zero.
pub fn noise_3d(width: u32, height: u32, depth: u32, levels: u32, seed: u64) -> Image<u32> {
    let levels = levels.max(1);
    let count = (width as usize) * (height as usize) * (depth as usize);
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..count).map(|_| rng.random_range(0..levels)).collect();
    Image::from_data_3d(width, height, depth, data).expect("noise dimensions must be nonzero")
}

/// 2D noise image with `levels` distinct values `0..levels`
pub fn noise(width: u32, height: u32, levels: u32, seed: u64) -> Image<u32> {
    noise_3d(width, height, 1, levels, seed)
}

/// Smooth 8-bit landscape of bumps and pits
///
/// Values are a sum of cosine waves, so extrema are isolated points or
/// small plateaus spread over the image.
///
/// # Panics
///
/// Panics if a dimension is zero.
pub fn landscape(width: u32, height: u32) -> Image<u8> {
    let mut data = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            let fx = f64::from(x) / 7.0;
            let fy = f64::from(y) / 5.0;
            let v = 127.5 + 60.0 * fx.cos() * fy.sin() + 40.0 * ((fx + fy) / 2.3).cos();
            data.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }
    Image::from_data(width, height, data).expect("landscape dimensions must be nonzero")
}
