#![forbid(unsafe_code)]

//! Grid/pixel coordinate transforms.
//!
//! Pure, stateless conversions between grid units (whole cells) and
//! pixels given a cell size. Snapping is a round-trip through grid
//! units rather than a raw modulo, so snapped pixel values are always
//! the nearest exact multiple of the cell dimension.
//!
//! All rounding is half-to-even.

use crate::geometry::{Frame, Vec2, zip_with, zip_with3};

/// Convert one grid-unit value to pixels: `round(v * cell_dim)`.
#[inline]
#[must_use]
pub fn grid_to_px(v: f64, cell_dim: f64) -> f64 {
    (v * cell_dim).round_ties_even()
}

/// Convert one pixel value to grid units: `round(v / cell_dim)`.
#[inline]
#[must_use]
pub fn px_to_grid(v: f64, cell_dim: f64) -> f64 {
    (v / cell_dim).round_ties_even()
}

/// Snap a pixel value to the nearest multiple of `cell_dim`.
#[inline]
#[must_use]
pub fn snap_to_grid(v: f64, cell_dim: f64) -> f64 {
    grid_to_px(px_to_grid(v, cell_dim), cell_dim)
}

/// Clamp `v` into `[min, max]`. Callers guarantee `min <= max`.
#[inline]
#[must_use]
pub fn cap(v: f64, min: f64, max: f64) -> f64 {
    v.max(min).min(max)
}

/// Convert a grid-unit frame to a pixel frame, element-wise.
#[must_use]
pub fn frame_grid_to_px(frame: Frame, cell: Vec2) -> Frame {
    Frame::from_parts(
        zip_with(grid_to_px, frame.origin, cell),
        zip_with(grid_to_px, frame.size, cell),
    )
}

/// Convert a pixel frame to a grid-unit frame, element-wise.
#[must_use]
pub fn frame_px_to_grid(frame: Frame, cell: Vec2) -> Frame {
    Frame::from_parts(
        zip_with(px_to_grid, frame.origin, cell),
        zip_with(px_to_grid, frame.size, cell),
    )
}

/// Snap a pixel frame's origin and size to the grid, element-wise.
///
/// Returns a pixel-space frame whose values are grid-aligned.
#[must_use]
pub fn frame_snap(frame: Frame, cell: Vec2) -> Frame {
    Frame::from_parts(
        zip_with(snap_to_grid, frame.origin, cell),
        zip_with(snap_to_grid, frame.size, cell),
    )
}

/// Clamp a pixel tuple into `[min, max]`, element-wise.
#[must_use]
pub fn cap2(v: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    zip_with3(cap, v, min, max)
}

/// Container geometry plus grid dimensions, with the derived cell size.
///
/// The cell size is `round(container[axis] / grid_dim[axis])` and is
/// recomputed whenever the container size or grid dimensions change;
/// otherwise it is constant for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    container: Vec2,
    rows: u16,
    cols: u16,
    cell: Vec2,
}

impl GridMetrics {
    /// Build metrics for a container divided into `rows` × `cols` cells.
    pub fn new(container: Vec2, rows: u16, cols: u16) -> Result<Self, GridMetricsError> {
        if rows == 0 || cols == 0 {
            return Err(GridMetricsError::ZeroGridDimension { rows, cols });
        }
        if !(container[0] > 0.0 && container[1] > 0.0) {
            return Err(GridMetricsError::NonPositiveContainer { container });
        }
        Ok(Self {
            container,
            rows,
            cols,
            cell: derive_cell(container, rows, cols),
        })
    }

    /// Container size in pixels.
    #[inline]
    #[must_use]
    pub const fn container(&self) -> Vec2 {
        self.container
    }

    /// Grid row count.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Grid column count.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Pixel size of one grid cell.
    #[inline]
    #[must_use]
    pub const fn cell(&self) -> Vec2 {
        self.cell
    }

    /// Replace the container size, recomputing the cell size.
    pub fn set_container(&mut self, container: Vec2) -> Result<(), GridMetricsError> {
        if !(container[0] > 0.0 && container[1] > 0.0) {
            return Err(GridMetricsError::NonPositiveContainer { container });
        }
        self.container = container;
        self.cell = derive_cell(container, self.rows, self.cols);
        Ok(())
    }

    /// Replace the grid dimensions, recomputing the cell size.
    pub fn set_grid(&mut self, rows: u16, cols: u16) -> Result<(), GridMetricsError> {
        if rows == 0 || cols == 0 {
            return Err(GridMetricsError::ZeroGridDimension { rows, cols });
        }
        self.rows = rows;
        self.cols = cols;
        self.cell = derive_cell(self.container, rows, cols);
        Ok(())
    }

    /// Pixel-space rendition of a committed grid-unit frame.
    #[must_use]
    pub fn frame_to_px(&self, frame: Frame) -> Frame {
        frame_grid_to_px(frame, self.cell)
    }
}

fn derive_cell(container: Vec2, rows: u16, cols: u16) -> Vec2 {
    [
        (container[0] / f64::from(cols)).round_ties_even(),
        (container[1] / f64::from(rows)).round_ties_even(),
    ]
}

/// Invalid container/grid dimension inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridMetricsError {
    ZeroGridDimension { rows: u16, cols: u16 },
    NonPositiveContainer { container: Vec2 },
}

impl std::fmt::Display for GridMetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroGridDimension { rows, cols } => {
                write!(f, "grid dimensions must be non-zero (got {rows}x{cols})")
            }
            Self::NonPositiveContainer { container } => write!(
                f,
                "container size must be positive on both axes (got {}x{})",
                container[0], container[1]
            ),
        }
    }
}

impl std::error::Error for GridMetricsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn grid_to_px_scales_and_rounds() {
        assert_eq!(grid_to_px(9.0, 16.0), 144.0);
        assert_eq!(grid_to_px(0.0, 16.0), 0.0);
        assert_eq!(grid_to_px(3.0, 10.5), 32.0); // 31.5 rounds to even
    }

    #[test]
    fn px_to_grid_divides_and_rounds() {
        assert_eq!(px_to_grid(160.0, 16.0), 10.0);
        assert_eq!(px_to_grid(69.0, 16.0), 4.0);
        assert_eq!(px_to_grid(164.0, 16.0), 10.0);
    }

    #[test]
    fn snap_is_nearest_multiple() {
        assert_eq!(snap_to_grid(164.0, 16.0), 160.0);
        assert_eq!(snap_to_grid(69.0, 16.0), 64.0);
        assert_eq!(snap_to_grid(106.0, 16.0), 112.0);
        assert_eq!(snap_to_grid(74.0, 16.0), 80.0);
        assert_eq!(snap_to_grid(0.0, 16.0), 0.0);
    }

    #[test]
    fn snap_ties_round_to_even_cell_count() {
        // 24px sits exactly between 16 and 32; 24/16 = 1.5 rounds to 2.
        assert_eq!(snap_to_grid(24.0, 16.0), 32.0);
        // 40/16 = 2.5 rounds to 2.
        assert_eq!(snap_to_grid(40.0, 16.0), 32.0);
    }

    #[test]
    fn cap_clamps() {
        assert_eq!(cap(5.0, 0.0, 10.0), 5.0);
        assert_eq!(cap(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(cap(11.0, 0.0, 10.0), 10.0);
        assert_eq!(cap2([-1.0, 11.0], [0.0, 0.0], [10.0, 10.0]), [0.0, 10.0]);
    }

    #[test]
    fn frame_round_trip_recovers_grid_values() {
        let cell = [16.0, 16.0];
        let grid = Frame::new(9.0, 4.0, 6.0, 4.0);
        let px = frame_grid_to_px(grid, cell);
        assert_eq!(px, Frame::new(144.0, 64.0, 96.0, 64.0));
        assert_eq!(frame_px_to_grid(px, cell), grid);
    }

    #[test]
    fn frame_snap_aligns_both_tuples() {
        let cell = [16.0, 16.0];
        let f = Frame::new(164.0, 69.0, 106.0, 74.0);
        assert_eq!(frame_snap(f, cell), Frame::new(160.0, 64.0, 112.0, 80.0));
    }

    #[test]
    fn metrics_derive_cell_from_container() {
        let m = GridMetrics::new([512.0, 512.0], 32, 32).unwrap();
        assert_eq!(m.cell(), [16.0, 16.0]);

        // Non-square grid: width divides by cols, height by rows.
        let m = GridMetrics::new([300.0, 200.0], 10, 30).unwrap();
        assert_eq!(m.cell(), [10.0, 20.0]);
    }

    #[test]
    fn metrics_recompute_on_container_change() {
        let mut m = GridMetrics::new([512.0, 512.0], 32, 32).unwrap();
        m.set_container([256.0, 256.0]).unwrap();
        assert_eq!(m.cell(), [8.0, 8.0]);
        m.set_grid(16, 16).unwrap();
        assert_eq!(m.cell(), [16.0, 16.0]);
    }

    #[test]
    fn metrics_reject_degenerate_inputs() {
        assert!(matches!(
            GridMetrics::new([512.0, 512.0], 0, 32),
            Err(GridMetricsError::ZeroGridDimension { .. })
        ));
        assert!(matches!(
            GridMetrics::new([0.0, 512.0], 32, 32),
            Err(GridMetricsError::NonPositiveContainer { .. })
        ));
        let mut m = GridMetrics::new([512.0, 512.0], 32, 32).unwrap();
        assert!(m.set_container([-1.0, 512.0]).is_err());
        assert!(m.set_grid(32, 0).is_err());
    }

    proptest! {
        // For all grid values and positive integer cell sizes,
        // px -> grid recovers the grid value exactly.
        #[test]
        fn round_trip_grid_px_grid(v in -10_000i32..10_000, cell in 1u16..=512) {
            let v = f64::from(v);
            let cell = f64::from(cell);
            prop_assert_eq!(px_to_grid(grid_to_px(v, cell), cell), v);
        }

        #[test]
        fn snap_is_idempotent(v in -1e6f64..1e6, cell in 1u16..=512) {
            let cell = f64::from(cell);
            let once = snap_to_grid(v, cell);
            prop_assert_eq!(snap_to_grid(once, cell), once);
        }

        #[test]
        fn snapped_values_are_exact_multiples(v in -1e6f64..1e6, cell in 1u16..=512) {
            let cell = f64::from(cell);
            let snapped = snap_to_grid(v, cell);
            prop_assert_eq!(snapped % cell, 0.0);
            // Nearest multiple: never further than half a cell away
            // (tolerance for division rounding at the tie boundary).
            prop_assert!((snapped - v).abs() <= cell / 2.0 + 1e-6);
        }

        #[test]
        fn cap_stays_in_bounds(v in -1e6f64..1e6, a in -1e3f64..1e3, b in -1e3f64..1e3) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let capped = cap(v, min, max);
            prop_assert!(min <= capped && capped <= max);
            if min <= v && v <= max {
                prop_assert_eq!(capped, v);
            }
        }
    }
}
