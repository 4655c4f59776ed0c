//! Moving-window scan
//!
//! [`scan_image`] slides a kernel-shaped window over every pixel of an image
//! and feeds a [`WindowHistogram`] with the pixels entering and leaving the
//! window, so that each step costs work proportional to the kernel border
//! rather than its area.
//!
//! The scan runs x-fastest. The histogram of the first pixel of each line is
//! derived from the previous line start by a y step (a z step at the start
//! of a plane), then cloned and slid along x.

use log::{debug, trace};

use extrema_core::Image;

use crate::histogram::{ExtremaHistogram, HistogramPixel, WindowCounts};
use crate::kernel::{Kernel, Offset};
use crate::{MorphError, MorphResult};

/// Incremental window state driven by [`scan_image`].
///
/// For every window position, all [`add_pixel`](Self::add_pixel) and
/// [`remove_pixel`](Self::remove_pixel) calls for that position happen before
/// [`evaluate`](Self::evaluate) is called on its center.
pub trait WindowHistogram<I>: Clone {
    /// Value written to the output image
    type Output;

    /// A pixel enters the window
    fn add_pixel(&mut self, value: I);

    /// A pixel leaves the window
    fn remove_pixel(&mut self, value: I);

    /// Compute the output for the current window centered on `center`
    fn evaluate(&mut self, center: I) -> Self::Output;

    /// Empty the window
    fn reset(&mut self);
}

impl<I, O, C> WindowHistogram<I> for ExtremaHistogram<I, O, C>
where
    I: HistogramPixel,
    O: extrema_core::Pixel,
    C: WindowCounts<I>,
{
    type Output = O;

    #[inline]
    fn add_pixel(&mut self, value: I) {
        ExtremaHistogram::add_pixel(self, value);
    }

    #[inline]
    fn remove_pixel(&mut self, value: I) {
        ExtremaHistogram::remove_pixel(self, value);
    }

    #[inline]
    fn evaluate(&mut self, center: I) -> O {
        ExtremaHistogram::evaluate(self, center)
    }

    fn reset(&mut self) {
        ExtremaHistogram::reset(self);
    }
}

/// Kernel offsets that change when the window moves one pixel along an axis.
///
/// Both lists are relative to the center after the move.
#[derive(Debug, Clone, Default)]
struct Step {
    enter: Vec<Offset>,
    leave: Vec<Offset>,
}

impl Step {
    fn along(kernel: &Kernel, axis: usize) -> Self {
        let mut step = Step::default();
        for offset in kernel.hit_offsets() {
            let mut ahead = offset;
            ahead[axis] += 1;
            if !kernel.contains(ahead) {
                step.enter.push(offset);
            }

            let mut behind = offset;
            behind[axis] -= 1;
            if !kernel.contains(behind) {
                step.leave.push(behind);
            }
        }
        step
    }

    fn apply<I: Copy, H: WindowHistogram<I>>(
        &self,
        hist: &mut H,
        image: &Image<I>,
        center: [i64; 3],
    ) {
        for offset in &self.enter {
            if let Some(value) = neighbor(image, center, *offset) {
                hist.add_pixel(value);
            }
        }
        for offset in &self.leave {
            if let Some(value) = neighbor(image, center, *offset) {
                hist.remove_pixel(value);
            }
        }
    }
}

#[inline]
fn neighbor<I: Copy>(image: &Image<I>, center: [i64; 3], offset: Offset) -> Option<I> {
    image.get_signed(
        center[0] + i64::from(offset[0]),
        center[1] + i64::from(offset[1]),
        center[2] + i64::from(offset[2]),
    )
}

/// Evaluate a window histogram at every pixel of an image
///
/// The window at a pixel holds the image values at the kernel's hit offsets
/// from it; offsets falling outside the image are skipped. `prototype` is
/// cloned and reset before use, so its contents do not matter.
///
/// # Arguments
///
/// * `image` - 2D or 3D input image
/// * `kernel` - window shape
/// * `prototype` - configured histogram to clone for each line
///
/// # Errors
///
/// Returns `MorphError::InvalidKernel` if the kernel has no hits.
pub fn scan_image<I, H>(
    image: &Image<I>,
    kernel: &Kernel,
    prototype: &H,
) -> MorphResult<Image<H::Output>>
where
    I: Copy,
    H: WindowHistogram<I>,
    H::Output: Copy,
{
    let offsets: Vec<Offset> = kernel.hit_offsets().collect();
    if offsets.is_empty() {
        return Err(MorphError::InvalidKernel("kernel has no hits".into()));
    }

    let steps = [
        Step::along(kernel, 0),
        Step::along(kernel, 1),
        Step::along(kernel, 2),
    ];
    let (width, height, depth) = image.dimensions();
    debug!(
        "scanning {}x{}x{} image with {} kernel hits ({} / {} / {} entering per x / y / z step)",
        width,
        height,
        depth,
        offsets.len(),
        steps[0].enter.len(),
        steps[1].enter.len(),
        steps[2].enter.len()
    );

    let mut output = Vec::with_capacity(image.len());
    let mut plane_start = prototype.clone();
    plane_start.reset();
    for offset in &offsets {
        if let Some(value) = neighbor(image, [0, 0, 0], *offset) {
            plane_start.add_pixel(value);
        }
    }

    for z in 0..depth {
        trace!("plane {z}");
        if z > 0 {
            steps[2].apply(&mut plane_start, image, [0, 0, i64::from(z)]);
        }

        let mut line_start = plane_start.clone();
        for y in 0..height {
            if y > 0 {
                steps[1].apply(&mut line_start, image, [0, i64::from(y), i64::from(z)]);
            }

            let mut line = line_start.clone();
            for x in 0..width {
                if x > 0 {
                    steps[0].apply(&mut line, image, [i64::from(x), i64::from(y), i64::from(z)]);
                }
                let center = image.data()[image.index_of(x, y, z)];
                output.push(line.evaluate(center));
            }
        }
    }

    Ok(Image::from_data_3d(width, height, depth, output)?)
}
