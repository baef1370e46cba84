//! Foundation types shared by every rasterizer.
//!
//! Points, rectangles and the rounding helpers that convert real-valued
//! geometry to pixel coordinates.

// ============================================================================
// Rounding
// ============================================================================

/// Round a double to the nearest integer (round half away from zero).
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Pixel-space point.
pub type PointI = PointBase<i32>;
/// Real-valued point used while interpolating curves.
pub type PointD = PointBase<f64>;

impl PointI {
    /// Widen to a real-valued point.
    #[inline]
    pub fn to_f64(self) -> PointD {
        PointD::new(self.x as f64, self.y as f64)
    }
}

impl PointD {
    /// Round both coordinates to the nearest pixel.
    #[inline]
    pub fn round(self) -> PointI {
        PointI::new(iround(self.x), iround(self.y))
    }
}

impl From<(i32, i32)> for PointI {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle defined by two corner points (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;

impl RectI {
    /// Smallest rectangle containing every point, or `None` for no points.
    pub fn bounding(points: &[PointI]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut r = Self::new(first.x, first.y, first.x, first.y);
        for p in rest {
            r.x1 = r.x1.min(p.x);
            r.y1 = r.y1.min(p.y);
            r.x2 = r.x2.max(p.x);
            r.y2 = r.y2.max(p.y);
        }
        Some(r)
    }
}

// ============================================================================
// Tests
// ============================================================================
