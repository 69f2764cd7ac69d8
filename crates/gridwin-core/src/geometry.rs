#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are plain `f64` pairs: the same [`Frame`] shape carries
//! grid-unit geometry (whole cells) and pixel geometry (continuous,
//! sub-cell during gestures). Which space a value lives in is a property
//! of the call site, not the type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2-tuple of numbers: `[x, y]` for positions, `[w, h]` for sizes.
pub type Vec2 = [f64; 2];

/// Apply a binary function element-wise over two equal-length tuples.
///
/// Keeps x/y (or width/height) handling symmetric so per-axis logic is
/// written once.
#[inline]
pub fn zip_with<const N: usize>(f: impl Fn(f64, f64) -> f64, a: [f64; N], b: [f64; N]) -> [f64; N] {
    std::array::from_fn(|i| f(a[i], b[i]))
}

/// Apply a ternary function element-wise over three equal-length tuples.
#[inline]
pub fn zip_with3<const N: usize>(
    f: impl Fn(f64, f64, f64) -> f64,
    a: [f64; N],
    b: [f64; N],
    c: [f64; N],
) -> [f64; N] {
    std::array::from_fn(|i| f(a[i], b[i], c[i]))
}

/// A rectangle: top-left origin plus size.
///
/// Immutable; updates produce a new frame. Invariant: both size axes
/// are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Top-left corner `[x, y]`.
    pub origin: Vec2,
    /// Extent `[width, height]`.
    pub size: Vec2,
}

impl Frame {
    /// Create a new frame.
    ///
    /// Debug-asserts the non-negative-size invariant; inputs are
    /// expected to be well-formed numbers per the call contract.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "frame size must be >= 0");
        Self {
            origin: [x, y],
            size: [width, height],
        }
    }

    /// Create a frame from origin and size tuples.
    #[must_use]
    pub fn from_parts(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin[0], origin[1], size[0], size[1])
    }

    /// New frame with a replaced origin, size unchanged.
    #[must_use]
    pub fn with_origin(self, origin: Vec2) -> Self {
        Self::from_parts(origin, self.size)
    }

    /// New frame with a replaced size, origin unchanged.
    #[must_use]
    pub fn with_size(self, size: Vec2) -> Self {
        Self::from_parts(self.origin, size)
    }

    /// Bottom-right corner (`origin + size`).
    #[inline]
    #[must_use]
    pub fn far_corner(&self) -> Vec2 {
        zip_with(|o, s| o + s, self.origin, self.size)
    }

    /// Check if the frame has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size[0] == 0.0 || self.size[1] == 0.0
    }
}
