//! Structuring element (kernel) for moving-window operations
//!
//! A kernel defines which neighbors of a pixel belong to its window. It is a
//! boolean grid of size `(2rx+1) x (2ry+1) x (2rz+1)` whose center cell is the
//! origin; cells set to `true` ("hits") are part of the window.

use crate::{MorphError, MorphResult};

/// Offset of a kernel hit relative to the origin, as `[dx, dy, dz]`.
pub type Offset = [i32; 3];

/// Largest number of grid cells a kernel may have.
///
/// Also keeps every extent `2r + 1` inside an `Offset` component.
pub const MAX_KERNEL_CELLS: usize = 1 << 28;

/// Flat structuring element centered on the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    radius: [u32; 3],
    data: Vec<bool>,
    name: Option<String>,
}

impl Kernel {
    /// Create an empty kernel with the given radii
    pub fn new(rx: u32, ry: u32, rz: u32) -> MorphResult<Self> {
        let size = [rx, ry, rz]
            .iter()
            .try_fold(1usize, |acc, &r| {
                acc.checked_mul(2 * r as usize + 1)
                    .filter(|&cells| cells <= MAX_KERNEL_CELLS)
            })
            .ok_or_else(|| {
                MorphError::InvalidKernel(format!("radius {rx}x{ry}x{rz} is too large"))
            })?;

        Ok(Kernel {
            radius: [rx, ry, rz],
            data: vec![false; size],
            name: None,
        })
    }

    /// Create a 2D rectangular kernel with all hits
    pub fn box_2d(rx: u32, ry: u32) -> MorphResult<Self> {
        Self::box_3d(rx, ry, 0)
    }

    /// Create a 3D box kernel with all hits
    pub fn box_3d(rx: u32, ry: u32, rz: u32) -> MorphResult<Self> {
        let mut kernel = Self::new(rx, ry, rz)?;
        kernel.data.fill(true);
        kernel.name = Some(format!("box {rx}x{ry}x{rz}"));
        Ok(kernel)
    }

    /// Create a 2D disk of radius `r`
    pub fn ball_2d(r: u32) -> MorphResult<Self> {
        Self::ellipsoid(r, r, 0)
    }

    /// Create a 3D ball of radius `r`
    pub fn ball_3d(r: u32) -> MorphResult<Self> {
        Self::ellipsoid(r, r, r)
    }

    /// Create an axis-aligned ellipsoid
    ///
    /// A cell is a hit when `sum((d_i / r_i)^2) <= 1`. Axes with a zero
    /// radius only contribute the center plane.
    pub fn ellipsoid(rx: u32, ry: u32, rz: u32) -> MorphResult<Self> {
        let mut kernel = Self::new(rx, ry, rz)?;
        let radius = kernel.radius;
        for offset in kernel.grid_offsets().collect::<Vec<_>>() {
            let dist: f64 = offset
                .iter()
                .zip(radius)
                .filter(|&(_, r)| r > 0)
                .map(|(&d, r)| {
                    let q = f64::from(d) / f64::from(r);
                    q * q
                })
                .sum();
            if dist <= 1.0 {
                kernel.set(offset, true);
            }
        }
        kernel.name = Some(format!("ellipsoid {rx}x{ry}x{rz}"));
        Ok(kernel)
    }

    /// Create a 2D cross (+) kernel with arms of length `r`
    pub fn cross(r: u32) -> MorphResult<Self> {
        let mut kernel = Self::new(r, r, 0)?;
        for offset in kernel.grid_offsets().collect::<Vec<_>>() {
            if offset[0] == 0 || offset[1] == 0 {
                kernel.set(offset, true);
            }
        }
        kernel.name = Some(format!("cross {r}"));
        Ok(kernel)
    }

    /// Create a 2D kernel from a text pattern
    ///
    /// Each non-empty line is one row; `x` marks a hit and `.` an empty
    /// cell. Rows must have the same odd length and the number of rows must
    /// be odd, so that the center cell is the origin.
    ///
    /// ```
    /// use extrema_morph::Kernel;
    ///
    /// let kernel = Kernel::from_pattern(
    ///     ".x.
    ///      xxx
    ///      .x.",
    /// )
    /// .unwrap();
    /// assert_eq!(kernel.hit_count(), 5);
    /// ```
    pub fn from_pattern(pattern: &str) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if height % 2 == 0 || width % 2 == 0 {
            return Err(MorphError::InvalidKernel(format!(
                "pattern must have odd dimensions, got {width}x{height}"
            )));
        }

        let rx = (width / 2) as u32;
        let ry = (height / 2) as u32;
        let mut kernel = Self::new(rx, ry, 0)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(MorphError::InvalidKernel(format!(
                    "pattern row {y} has length {}, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let hit = match c {
                    'x' | 'X' => true,
                    '.' => false,
                    other => {
                        return Err(MorphError::InvalidKernel(format!(
                            "unexpected character {other:?} in pattern"
                        )));
                    }
                };
                kernel.set([x as i32 - rx as i32, y as i32 - ry as i32, 0], hit);
            }
        }
        Ok(kernel)
    }

    /// Create a kernel holding exactly the given offsets
    pub fn from_offsets<I: IntoIterator<Item = Offset>>(offsets: I) -> MorphResult<Self> {
        let offsets: Vec<Offset> = offsets.into_iter().collect();
        if offsets.is_empty() {
            return Err(MorphError::InvalidKernel("no offsets given".into()));
        }

        let mut radius = [0u32; 3];
        for offset in &offsets {
            for (r, d) in radius.iter_mut().zip(offset) {
                *r = (*r).max(d.unsigned_abs());
            }
        }
        let mut kernel = Self::new(radius[0], radius[1], radius[2])?;
        for offset in offsets {
            kernel.set(offset, true);
        }
        Ok(kernel)
    }

    /// Get the radii as `[rx, ry, rz]`
    #[inline]
    pub fn radius(&self) -> [u32; 3] {
        self.radius
    }

    /// Get the grid width (`2 * rx + 1`)
    #[inline]
    pub fn width(&self) -> u32 {
        2 * self.radius[0] + 1
    }

    /// Get the grid height (`2 * ry + 1`)
    #[inline]
    pub fn height(&self) -> u32 {
        2 * self.radius[1] + 1
    }

    /// Get the grid depth (`2 * rz + 1`)
    #[inline]
    pub fn depth(&self) -> u32 {
        2 * self.radius[2] + 1
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    fn index(&self, offset: Offset) -> Option<usize> {
        let mut index = 0usize;
        let dims = [self.width(), self.height(), self.depth()];
        for axis in (0..3).rev() {
            let r = self.radius[axis] as i32;
            if offset[axis] < -r || offset[axis] > r {
                return None;
            }
            index = index * dims[axis] as usize + (offset[axis] + r) as usize;
        }
        Some(index)
    }

    /// Whether `offset` is a hit. Offsets outside the grid are not.
    #[inline]
    pub fn contains(&self, offset: Offset) -> bool {
        self.index(offset).is_some_and(|idx| self.data[idx])
    }

    /// Set or clear a hit. Offsets outside the grid are ignored.
    pub fn set(&mut self, offset: Offset, hit: bool) {
        if let Some(idx) = self.index(offset) {
            self.data[idx] = hit;
        }
    }

    /// Count the number of hits
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&hit| hit).count()
    }

    fn grid_offsets(&self) -> impl Iterator<Item = Offset> + use<> {
        let [rx, ry, rz] = self.radius.map(|r| r as i32);
        (-rz..=rz).flat_map(move |dz| {
            (-ry..=ry).flat_map(move |dy| (-rx..=rx).map(move |dx| [dx, dy, dz]))
        })
    }

    /// Iterate over hit offsets, in x-fastest grid order
    pub fn hit_offsets(&self) -> impl Iterator<Item = Offset> + '_ {
        self.grid_offsets()
            .zip(&self.data)
            .filter_map(|(offset, &hit)| hit.then_some(offset))
    }

    /// Create the reflected (point-mirrored) kernel
    pub fn reflect(&self) -> Self {
        let mut reflected = Kernel {
            radius: self.radius,
            data: vec![false; self.data.len()],
            name: self.name.clone(),
        };
        for [dx, dy, dz] in self.hit_offsets() {
            reflected.set([-dx, -dy, -dz], true);
        }
        reflected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_counts() {
        let kernel = Kernel::box_2d(2, 1).unwrap();
        assert_eq!(kernel.width(), 5);
        assert_eq!(kernel.height(), 3);
        assert_eq!(kernel.depth(), 1);
        assert_eq!(kernel.hit_count(), 15);
        assert!(kernel.contains([-2, 1, 0]));
        assert!(!kernel.contains([3, 0, 0]));

        let cube = Kernel::box_3d(1, 1, 1).unwrap();
        assert_eq!(cube.hit_count(), 27);
    }

    #[test]
    fn test_radius_too_large() {
        assert!(Kernel::new(u32::MAX, 0, 0).is_err());
        assert!(Kernel::box_3d(1 << 20, 1 << 20, 1 << 20).is_err());
        assert!(matches!(
            Kernel::box_2d(5_000_000, 5_000_000),
            Err(MorphError::InvalidKernel(_))
        ));
        assert!(Kernel::ball_3d(1 << 12).is_err());
        assert!(Kernel::new(1000, 1000, 0).is_ok());
    }

    #[test]
    fn test_ball_2d() {
        let disk = Kernel::ball_2d(2).unwrap();
        // 5x5 grid minus the four corners and the eight cells next to them
        assert_eq!(disk.hit_count(), 13);
        assert!(disk.contains([0, 2, 0]));
        assert!(!disk.contains([2, 2, 0]));
        assert!(!disk.contains([1, 2, 0]));
    }

    #[test]
    fn test_ball_3d_is_symmetric() {
        let ball = Kernel::ball_3d(1).unwrap();
        assert_eq!(ball.hit_count(), 7);
        assert_eq!(ball.reflect(), ball);
    }

    #[test]
    fn test_zero_radius_is_single_point() {
        let point = Kernel::ball_2d(0).unwrap();
        assert_eq!(point.hit_count(), 1);
        assert_eq!(point.hit_offsets().collect::<Vec<_>>(), vec![[0, 0, 0]]);
    }

    #[test]
    fn test_cross() {
        let cross = Kernel::cross(2).unwrap();
        assert_eq!(cross.hit_count(), 9);
        assert!(cross.contains([0, -2, 0]));
        assert!(!cross.contains([1, 1, 0]));
    }

    #[test]
    fn test_from_pattern() {
        let kernel = Kernel::from_pattern(
            "xx.
             .x.
             ...",
        )
        .unwrap();
        assert_eq!(kernel.radius(), [1, 1, 0]);
        let hits: Vec<Offset> = kernel.hit_offsets().collect();
        assert_eq!(hits, vec![[-1, -1, 0], [0, -1, 0], [0, 0, 0]]);
    }

    #[test]
    fn test_from_pattern_errors() {
        assert!(Kernel::from_pattern("xx\nxx").is_err());
        assert!(Kernel::from_pattern("x.x\nxx\nx.x").is_err());
        assert!(Kernel::from_pattern("x?x").is_err());
        assert!(Kernel::from_pattern("").is_err());
    }

    #[test]
    fn test_from_offsets() {
        let kernel = Kernel::from_offsets([[0, 0, 0], [3, -1, 0], [0, 0, 2]]).unwrap();
        assert_eq!(kernel.radius(), [3, 1, 2]);
        assert_eq!(kernel.hit_count(), 3);
        assert!(kernel.contains([3, -1, 0]));
        assert!(Kernel::from_offsets([]).is_err());
    }

    #[test]
    fn test_reflect() {
        let kernel = Kernel::from_offsets([[1, 0, 0], [0, 2, 0]]).unwrap();
        let reflected = kernel.reflect();
        assert!(reflected.contains([-1, 0, 0]));
        assert!(reflected.contains([0, -2, 0]));
        assert!(!reflected.contains([1, 0, 0]));
    }
}
