//! Shape primitives renderer.
//!
//! Draws lines, rectangles, ellipses, filled discs and sampled Bezier curves
//! straight into a [`PixelCanvas`] without anti-aliasing. Each call reports
//! how many pixel writes landed and how many were clipped off the canvas;
//! clipping never stops a shape part way.

use crate::basics::PointI;
use crate::color::Rgb8;
use crate::curves::BezierCurve;
use crate::ellipse_midpoint::rasterize_ellipse;
use crate::line_bresenham::LineBresenham;
use crate::pixel_canvas::PixelCanvas;
use crate::rectangle::RectangleCorners;

// ============================================================================
// DrawStats
// ============================================================================

/// Pixel write counts for one drawing call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Writes that landed on the canvas (repeats included).
    pub written: u32,
    /// Writes dropped because the coordinate was off the canvas.
    pub clipped: u32,
}

impl DrawStats {
    #[inline]
    fn record(&mut self, landed: bool) {
        if landed {
            self.written += 1;
        } else {
            self.clipped += 1;
        }
    }
}

impl core::ops::Add for DrawStats {
    type Output = DrawStats;

    fn add(self, rhs: DrawStats) -> DrawStats {
        DrawStats {
            written: self.written + rhs.written,
            clipped: self.clipped + rhs.clipped,
        }
    }
}

impl core::ops::AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: DrawStats) {
        *self = *self + rhs;
    }
}

// ============================================================================
// RendererPrimitives
// ============================================================================

/// Basic shape primitives renderer.
///
/// Outlines (lines, rectangles, ellipses) use the line color. Filled discs,
/// and therefore click markers and curve samples, use the fill color. Keeps
/// a current position for `move_to` / `line_to` polylines.
pub struct RendererPrimitives<'a> {
    canvas: &'a mut PixelCanvas,
    fill_color: Rgb8,
    line_color: Rgb8,
    curr: PointI,
}

impl<'a> RendererPrimitives<'a> {
    pub fn new(canvas: &'a mut PixelCanvas) -> Self {
        Self {
            canvas,
            fill_color: Rgb8::default(),
            line_color: Rgb8::default(),
            curr: PointI::default(),
        }
    }

    pub fn set_fill_color(&mut self, c: Rgb8) {
        self.fill_color = c;
    }

    pub fn set_line_color(&mut self, c: Rgb8) {
        self.line_color = c;
    }

    pub fn fill_color(&self) -> Rgb8 {
        self.fill_color
    }

    pub fn line_color(&self) -> Rgb8 {
        self.line_color
    }

    /// Write every point in the line color.
    pub fn plot<I>(&mut self, points: I) -> DrawStats
    where
        I: IntoIterator<Item = PointI>,
    {
        let mut stats = DrawStats::default();
        for p in points {
            stats.record(self.canvas.write_pixel(p.x, p.y, self.line_color));
        }
        stats
    }

    /// Draw a Bresenham line from `p0` to `p1`, both ends included.
    pub fn line(&mut self, p0: PointI, p1: PointI) -> DrawStats {
        self.plot(LineBresenham::canonical(p0, p1))
    }

    /// Draw an outlined rectangle from two opposite corners.
    pub fn rectangle(&mut self, p0: PointI, p1: PointI) -> DrawStats {
        let mut stats = DrawStats::default();
        for (a, b) in RectangleCorners::new(p0, p1).edges() {
            stats += self.line(a, b);
        }
        stats
    }

    /// Draw an outlined ellipse.
    pub fn ellipse(&mut self, center: PointI, rx: i32, ry: i32) -> DrawStats {
        self.plot(rasterize_ellipse(center, rx, ry))
    }

    /// Draw a solid disc of `radius` around `center` in the fill color.
    ///
    /// Covers every pixel within `radius` of the center. Radius 0 (or
    /// negative) stamps the center pixel only.
    pub fn solid_disc(&mut self, center: PointI, radius: i32) -> DrawStats {
        let r = radius.max(0);
        let r2 = r * r;
        let mut stats = DrawStats::default();
        let mut half = 0;
        // Walk from the top down; the half width grows then shrinks.
        for dy in -r..=r {
            let rem = r2 - dy * dy;
            while (half + 1) * (half + 1) <= rem {
                half += 1;
            }
            while half * half > rem {
                half -= 1;
            }
            let y = center.y + dy;
            let span = (2 * half + 1) as u32;
            let written = self
                .canvas
                .copy_hline(center.x - half, y, center.x + half, self.fill_color);
            stats.written += written;
            stats.clipped += span - written;
        }
        stats
    }

    /// Stamp `num_samples` evenly spaced samples of `curve` as discs of
    /// `marker_radius` in the fill color.
    pub fn curve(&mut self, curve: &BezierCurve, num_samples: u32, marker_radius: i32) -> DrawStats {
        let mut stats = DrawStats::default();
        let mut last = None;
        for p in curve.samples(num_samples) {
            // Dense sampling revisits the same pixel many times in a row.
            if last == Some(p) {
                continue;
            }
            last = Some(p);
            stats += self.solid_disc(p, marker_radius);
        }
        stats
    }

    /// Set the current position for `line_to`.
    pub fn move_to(&mut self, p: PointI) {
        self.curr = p;
    }

    /// Draw a line from the current position to `p` and move there.
    pub fn line_to(&mut self, p: PointI) -> DrawStats {
        let stats = self.line(self.curr, p);
        self.curr = p;
        stats
    }

    /// Closed outline through `points` in order, last point joined to first.
    pub fn closed_polyline(&mut self, points: &[PointI]) -> DrawStats {
        let Some((&first, rest)) = points.split_first() else {
            return DrawStats::default();
        };
        self.move_to(first);
        let mut stats = self.plot([first]);
        for &p in rest {
            stats += self.line_to(p);
        }
        if !rest.is_empty() {
            stats += self.line_to(first);
        }
        stats
    }

    pub fn canvas(&self) -> &PixelCanvas {
        self.canvas
    }
}

// ============================================================================
// Tests
// ============================================================================
