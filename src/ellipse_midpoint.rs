//! Midpoint ellipse outline.
//!
//! Steps the first quadrant of an axis-aligned ellipse with integer decision
//! variables, then mirrors each offset into the other three quadrants.
//! Region 1 (|slope| < 1) advances x one pixel per step; region 2 advances
//! y one pixel per step. Decision terms are kept scaled by 4 so the half
//! pixel offsets of the midpoint test stay integral. The terms grow like
//! r^4, so they are held in `i128` to cover the full `i32` radius range.

use crate::basics::PointI;
use crate::line_bresenham::rasterize_line;

// ============================================================================
// EllipseMidpoint
// ============================================================================

/// First-quadrant offsets `(dx, dy)` of an ellipse outline, both >= 0.
///
/// Starts at `(0, ry)` and ends at `(rx, 0)`. Radii must be positive; the
/// degenerate cases are handled by [`rasterize_ellipse`].
#[derive(Debug, Clone)]
pub struct EllipseMidpoint {
    rx: i128,
    rx2: i128,
    ry2: i128,
    x: i128,
    y: i128,
    // 2*ry^2*x and 2*rx^2*y
    px: i128,
    py: i128,
    d: i128,
    region2: bool,
    done: bool,
}

impl EllipseMidpoint {
    pub fn new(rx: i32, ry: i32) -> Self {
        let rx = rx.saturating_abs() as i128;
        let ry = ry.saturating_abs() as i128;
        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let mut e = Self {
            rx,
            rx2,
            ry2,
            x: 0,
            y: ry,
            px: 0,
            py: 2 * rx2 * ry,
            // 4 * (ry^2 - rx^2*ry + rx^2/4)
            d: 4 * ry2 - 4 * rx2 * ry + rx2,
            region2: false,
            done: false,
        };
        if e.px >= e.py {
            e.enter_region2();
        }
        e
    }

    fn enter_region2(&mut self) {
        self.region2 = true;
        // 4 * (ry^2*(x+1/2)^2 + rx^2*(y-1)^2 - rx^2*ry^2)
        let x2 = 2 * self.x + 1;
        let ym1 = self.y - 1;
        self.d = self.ry2 * x2 * x2 + 4 * self.rx2 * ym1 * ym1 - 4 * self.rx2 * self.ry2;
    }
}

impl Iterator for EllipseMidpoint {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        let cur = (self.x as i32, self.y as i32);

        if !self.region2 {
            self.x += 1;
            self.px += 2 * self.ry2;
            if self.d < 0 {
                self.d += 4 * (self.px + self.ry2);
            } else {
                self.y -= 1;
                self.py -= 2 * self.rx2;
                self.d += 4 * (self.px - self.py + self.ry2);
            }
            if self.px >= self.py {
                self.enter_region2();
            }
        } else if self.y == 0 {
            // Very flat ellipses leave region 2 short of the x extreme.
            if self.x < self.rx {
                self.x += 1;
            } else {
                self.done = true;
            }
        } else {
            self.y -= 1;
            self.py -= 2 * self.rx2;
            if self.d > 0 {
                self.d += 4 * (self.rx2 - self.py);
            } else {
                self.x += 1;
                self.px += 2 * self.ry2;
                self.d += 4 * (self.px - self.py + self.rx2);
            }
        }
        Some(cur)
    }
}

// ============================================================================
// rasterize_ellipse
// ============================================================================

/// Boundary pixels of the ellipse centered at `center` with radii `rx`, `ry`.
///
/// Every first-quadrant offset is emitted in all four reflections, so the
/// result is exactly symmetric about both axes through the center. Pixels
/// on an axis appear more than once. A zero radius collapses the outline to
/// the axis-aligned line through the center (or the center alone).
pub fn rasterize_ellipse(center: PointI, rx: i32, ry: i32) -> Vec<PointI> {
    let rx = rx.saturating_abs();
    let ry = ry.saturating_abs();
    let (cx, cy) = (center.x, center.y);

    if rx == 0 || ry == 0 {
        return rasterize_line(
            PointI::new(cx - rx, cy - ry),
            PointI::new(cx + rx, cy + ry),
        );
    }

    let mut pts = Vec::new();
    for (dx, dy) in EllipseMidpoint::new(rx, ry) {
        pts.push(PointI::new(cx + dx, cy + dy));
        pts.push(PointI::new(cx - dx, cy + dy));
        pts.push(PointI::new(cx + dx, cy - dy));
        pts.push(PointI::new(cx - dx, cy - dy));
    }
    pts
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn quadrant(rx: i32, ry: i32) -> Vec<(i32, i32)> {
        EllipseMidpoint::new(rx, ry).collect()
    }

    #[test]
    fn test_quadrant_endpoints() {
        for (rx, ry) in [(5, 5), (10, 3), (3, 10), (30, 60), (1, 1), (1, 7)] {
            let q = quadrant(rx, ry);
            assert_eq!(q[0], (0, ry), "rx={} ry={}", rx, ry);
            assert_eq!(*q.last().unwrap(), (rx, 0), "rx={} ry={}", rx, ry);
        }
    }

    #[test]
    fn test_quadrant_is_connected_and_monotone() {
        for (rx, ry) in [(5, 5), (10, 3), (3, 10), (30, 60), (60, 30), (1, 7)] {
            let q = quadrant(rx, ry);
            for w in q.windows(2) {
                let (x0, y0) = w[0];
                let (x1, y1) = w[1];
                assert!(x1 - x0 == 0 || x1 - x0 == 1, "x step {:?}", w);
                assert!(y0 - y1 == 0 || y0 - y1 == 1, "y step {:?}", w);
                assert!(w[0] != w[1]);
            }
        }
    }

    #[test]
    fn test_every_row_and_column_covered() {
        let q = quadrant(30, 60);
        let xs: HashSet<i32> = q.iter().map(|&(x, _)| x).collect();
        let ys: HashSet<i32> = q.iter().map(|&(_, y)| y).collect();
        assert_eq!(xs.len(), 31);
        assert_eq!(ys.len(), 61);
    }

    #[test]
    fn test_points_lie_on_ellipse() {
        let c = PointI::new(100, 100);
        let pts = rasterize_ellipse(c, 30, 60);
        assert!(!pts.is_empty());
        for p in &pts {
            let dx = (p.x - c.x) as f64;
            let dy = (p.y - c.y) as f64;
            let f = dx * dx / 900.0 + dy * dy / 3600.0;
            assert!((f - 1.0).abs() <= 0.1, "{:?} off the ellipse: {}", p, f);
        }
    }

    #[test]
    fn test_four_way_symmetry() {
        let c = PointI::new(100, 100);
        let set: HashSet<PointI> = rasterize_ellipse(c, 30, 60).into_iter().collect();
        for p in &set {
            let a = p.x - c.x;
            let b = p.y - c.y;
            assert!(set.contains(&PointI::new(c.x - a, c.y + b)));
            assert!(set.contains(&PointI::new(c.x + a, c.y - b)));
            assert!(set.contains(&PointI::new(c.x - a, c.y - b)));
        }
    }

    #[test]
    fn test_circle_extremes() {
        let set: HashSet<PointI> = rasterize_ellipse(PointI::new(0, 0), 5, 5)
            .into_iter()
            .collect();
        for p in [(5, 0), (-5, 0), (0, 5), (0, -5)] {
            assert!(set.contains(&PointI::from(p)));
        }
        assert!(!set.contains(&PointI::new(0, 0)));
    }

    #[test]
    fn test_degenerate_radii() {
        let c = PointI::new(10, 10);
        assert_eq!(rasterize_ellipse(c, 0, 0), vec![c]);

        let horiz = rasterize_ellipse(c, 3, 0);
        assert_eq!(horiz.len(), 7);
        assert!(horiz.iter().all(|p| p.y == 10));

        let vert = rasterize_ellipse(c, 0, 2);
        assert_eq!(vert.len(), 5);
        assert!(vert.iter().all(|p| p.x == 10));
    }

    #[test]
    fn test_huge_radii_do_not_overflow() {
        let q: Vec<_> = EllipseMidpoint::new(60_000, 60_000).collect();
        assert_eq!(q.first(), Some(&(0, 60_000)));
        assert_eq!(q.last(), Some(&(60_000, 0)));

        // Enters region 2 after one step with x^2 * ry^2 far beyond i64.
        let tall: Vec<_> = EllipseMidpoint::new(3, 2_000_000_000).take(6).collect();
        assert_eq!(tall[0], (0, 2_000_000_000));
        assert!(tall.windows(2).all(|w| w[1].1 < w[0].1 && w[1].0 >= w[0].0));
    }

    #[test]
    fn test_negative_radii_use_magnitude() {
        let c = PointI::new(0, 0);
        let a: HashSet<PointI> = rasterize_ellipse(c, -4, 7).into_iter().collect();
        let b: HashSet<PointI> = rasterize_ellipse(c, 4, 7).into_iter().collect();
        assert_eq!(a, b);
    }
}
