//! Axis-aligned rectangle outlines.
//!
//! A rectangle is given by two opposite corners in any order. Its outline
//! is four Bresenham lines drawn top, right, bottom, left.

use crate::basics::{PointI, RectI};
use crate::line_bresenham::rasterize_line;

/// The four corners of a rectangle spanned by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectangleCorners {
    pub top_left: PointI,
    pub top_right: PointI,
    pub bottom_left: PointI,
    pub bottom_right: PointI,
}

impl RectangleCorners {
    pub fn new(p0: PointI, p1: PointI) -> Self {
        let x = p0.x.min(p1.x);
        let y = p0.y.min(p1.y);
        let width = (p1.x - p0.x).abs();
        let height = (p1.y - p0.y).abs();
        Self {
            top_left: PointI::new(x, y),
            top_right: PointI::new(x + width, y),
            bottom_left: PointI::new(x, y + height),
            bottom_right: PointI::new(x + width, y + height),
        }
    }

    /// Corners of the bounding box of a rectangle.
    pub fn from_rect(r: &RectI) -> Self {
        Self::new(PointI::new(r.x1, r.y1), PointI::new(r.x2, r.y2))
    }

    pub fn width(&self) -> i32 {
        self.top_right.x - self.top_left.x
    }

    pub fn height(&self) -> i32 {
        self.bottom_left.y - self.top_left.y
    }

    /// Edges in drawing order: top, right, bottom, left (clockwise).
    pub fn edges(&self) -> [(PointI, PointI); 4] {
        [
            (self.top_left, self.top_right),
            (self.top_right, self.bottom_right),
            (self.bottom_right, self.bottom_left),
            (self.bottom_left, self.top_left),
        ]
    }
}

/// Outline pixels of the rectangle with opposite corners `p0` and `p1`.
///
/// Corner pixels are shared by two edges and appear twice. Zero width or
/// height collapses the outline to a line, zero both to a single point.
pub fn rasterize_rectangle(p0: PointI, p1: PointI) -> Vec<PointI> {
    RectangleCorners::new(p0, p1)
        .edges()
        .iter()
        .flat_map(|&(a, b)| rasterize_line(a, b))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn p(x: i32, y: i32) -> PointI {
        PointI::new(x, y)
    }

    #[test]
    fn test_corners_any_order() {
        let a = RectangleCorners::new(p(50, 30), p(10, 10));
        let b = RectangleCorners::new(p(10, 30), p(50, 10));
        assert_eq!(a, b);
        assert_eq!(a.top_left, p(10, 10));
        assert_eq!(a.top_right, p(50, 10));
        assert_eq!(a.bottom_left, p(10, 30));
        assert_eq!(a.bottom_right, p(50, 30));
        assert_eq!(a.width(), 40);
        assert_eq!(a.height(), 20);
    }

    #[test]
    fn test_edge_order() {
        let e = RectangleCorners::new(p(0, 0), p(4, 2)).edges();
        assert_eq!(e[0], (p(0, 0), p(4, 0)));
        assert_eq!(e[1], (p(4, 0), p(4, 2)));
        assert_eq!(e[2], (p(4, 2), p(0, 2)));
        assert_eq!(e[3], (p(0, 2), p(0, 0)));
    }

    #[test]
    fn test_outline_is_exact_boundary() {
        let got: HashSet<PointI> = rasterize_rectangle(p(10, 10), p(50, 30))
            .into_iter()
            .collect();
        let mut expected = HashSet::new();
        for x in 10..=50 {
            expected.insert(p(x, 10));
            expected.insert(p(x, 30));
        }
        for y in 10..=30 {
            expected.insert(p(10, y));
            expected.insert(p(50, y));
        }
        assert_eq!(got, expected);
        assert!(got.iter().all(|q| !(q.x > 10 && q.x < 50 && q.y > 10 && q.y < 30)));
    }

    #[test]
    fn test_degenerate() {
        let line: HashSet<PointI> = rasterize_rectangle(p(5, 5), p(9, 5)).into_iter().collect();
        assert_eq!(line.len(), 5);
        assert!(line.iter().all(|q| q.y == 5));

        let point: HashSet<PointI> = rasterize_rectangle(p(5, 5), p(5, 5)).into_iter().collect();
        assert_eq!(point.len(), 1);
    }

    #[test]
    fn test_from_rect() {
        let c = RectangleCorners::from_rect(&RectI::new(0, 0, 10, 10));
        assert_eq!(c.bottom_right, p(10, 10));
    }
}
