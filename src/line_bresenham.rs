//! Integer Bresenham line scan conversion.
//!
//! Walks every octant with a single error term and no floating point. The
//! walk always starts from the lexicographically smaller endpoint so that a
//! line and its reverse cover exactly the same pixels; [`rasterize_line`]
//! then restores the caller's direction.

use crate::basics::PointI;

// ============================================================================
// LineBresenham
// ============================================================================

/// Bresenham line walker yielding pixels from `start` to `end` inclusive.
///
/// Yields exactly `max(|dx|, |dy|) + 1` points. Both axis updates may fire
/// in one step, which produces the diagonal moves of slope-one lines.
#[derive(Debug, Clone)]
pub struct LineBresenham {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    remaining: u32,
}

impl LineBresenham {
    pub fn new(start: PointI, end: PointI) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        Self {
            x: start.x,
            y: start.y,
            dx,
            dy,
            sx: if end.x >= start.x { 1 } else { -1 },
            sy: if end.y >= start.y { 1 } else { -1 },
            err: dx - dy,
            remaining: dx.max(dy) as u32 + 1,
        }
    }

    /// Walk between `p0` and `p1` starting from the lexicographically
    /// smaller endpoint, so both argument orders light the same pixels.
    pub fn canonical(p0: PointI, p1: PointI) -> Self {
        if p1 < p0 {
            Self::new(p1, p0)
        } else {
            Self::new(p0, p1)
        }
    }

    /// Number of steps along the major axis.
    #[inline]
    pub fn major_len(&self) -> u32 {
        self.dx.max(self.dy) as u32
    }
}

impl Iterator for LineBresenham {
    type Item = PointI;

    fn next(&mut self) -> Option<PointI> {
        if self.remaining == 0 {
            return None;
        }
        let p = PointI::new(self.x, self.y);
        self.remaining -= 1;
        if self.remaining > 0 {
            let e2 = 2 * self.err;
            if e2 > -self.dy {
                self.err -= self.dy;
                self.x += self.sx;
            }
            if e2 < self.dx {
                self.err += self.dx;
                self.y += self.sy;
            }
        }
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for LineBresenham {}

// ============================================================================
// rasterize_line
// ============================================================================

/// Pixels of the line from `p0` to `p1` in walk order, both ends included.
///
/// The first point is `p0`, the last is `p1`, consecutive points are
/// 8-connected, and swapping the endpoints yields the same pixel set in
/// reverse order.
pub fn rasterize_line(p0: PointI, p1: PointI) -> Vec<PointI> {
    let mut pts: Vec<PointI> = LineBresenham::canonical(p0, p1).collect();
    if pts.first() != Some(&p0) {
        pts.reverse();
    }
    pts
}

// ============================================================================
// Tests
// ============================================================================
