//! Interactive sketch session.
//!
//! A [`Sketch`] owns the canvas, the click buffer and the configuration for
//! one session. Hosts feed it clicks through [`Sketch::handle_click`]; each
//! call runs accumulate, maybe draw, commit to completion before returning.

use crate::basics::{PointI, RectI};
use crate::config::SketchConfig;
use crate::curves::BezierCurve;
use crate::error::Result;
use crate::pixel_canvas::PixelCanvas;
use crate::point_accumulator::{PointAccumulator, ShapeKind, Trigger};
use crate::rectangle::RectangleCorners;
use crate::renderer_primitives::{DrawStats, RendererPrimitives};
use tracing::{debug, trace};

// ============================================================================
// ClickOutcome
// ============================================================================

/// What a click or completion event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not enough points yet; the click is buffered.
    Buffered { buffered: usize, missing: usize },
    /// The shape waits for an explicit completion event.
    AwaitingCompletion { buffered: usize },
    /// A shape was rasterized.
    Drawn { shape: ShapeKind, stats: DrawStats },
    /// A completion event with nothing drawable; leftovers were dropped.
    Discarded { dropped: usize },
}

// ============================================================================
// Sketch
// ============================================================================

#[derive(Debug)]
pub struct Sketch {
    config: SketchConfig,
    canvas: PixelCanvas,
    accumulator: PointAccumulator,
    shape: ShapeKind,
}

impl Sketch {
    /// Start a session. Fails only if the configuration is invalid.
    pub fn new(config: SketchConfig) -> Result<Self> {
        config.validate()?;
        let canvas = PixelCanvas::with_background(config.width, config.height, config.background);
        let shape = ShapeKind::default();
        let accumulator = PointAccumulator::new(config.policy_for(shape));
        debug!(
            width = config.width,
            height = config.height,
            shape = %shape,
            "sketch session started"
        );
        Ok(Self {
            config,
            canvas,
            accumulator,
            shape,
        })
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn into_canvas(self) -> PixelCanvas {
        self.canvas
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Points buffered toward the next shape, in click order.
    pub fn pending_points(&self) -> &[PointI] {
        self.accumulator.points()
    }

    /// Switch the active primitive. Pending points are dropped.
    pub fn set_shape(&mut self, shape: ShapeKind) {
        if !self.accumulator.is_empty() {
            debug!(
                dropped = self.accumulator.len(),
                from = %self.shape,
                to = %shape,
                "shape switched with pending points"
            );
        }
        self.shape = shape;
        self.accumulator.set_policy(self.config.policy_for(shape));
    }

    /// Wipe the canvas to the background and drop pending points.
    pub fn clear(&mut self) {
        self.canvas.clear(self.config.background);
        self.accumulator.clear();
        debug!("sketch cleared");
    }

    /// Handle one `PointClicked(x, y)` event.
    pub fn handle_click(&mut self, p: PointI) -> ClickOutcome {
        trace!(x = p.x, y = p.y, shape = %self.shape, "click");
        if self.config.show_markers {
            let mut prim = RendererPrimitives::new(&mut self.canvas);
            prim.set_fill_color(self.config.marker_color);
            prim.solid_disc(p, self.config.marker_radius);
        }

        match self.accumulator.push(p) {
            Some(points) => {
                let stats = self.draw(&points, false);
                ClickOutcome::Drawn {
                    shape: self.shape,
                    stats,
                }
            }
            None if self.accumulator.policy().trigger == Trigger::OnComplete => {
                ClickOutcome::AwaitingCompletion {
                    buffered: self.accumulator.len(),
                }
            }
            None => ClickOutcome::Buffered {
                buffered: self.accumulator.len(),
                missing: self.accumulator.missing(),
            },
        }
    }

    /// Shape-completion event.
    pub fn complete_shape(&mut self) -> ClickOutcome {
        let buffered = self.accumulator.len();
        match self.accumulator.complete() {
            Some(points) => {
                let stats = self.draw(&points, true);
                ClickOutcome::Drawn {
                    shape: self.shape,
                    stats,
                }
            }
            None => {
                if buffered > 0 {
                    debug!(dropped = buffered, shape = %self.shape, "incomplete shape discarded");
                }
                ClickOutcome::Discarded { dropped: buffered }
            }
        }
    }

    /// Rasterize the active shape from `points`. `all_points` is set for
    /// completion events, where every buffered click belongs to the shape.
    fn draw(&mut self, points: &[PointI], all_points: bool) -> DrawStats {
        let shape = self.shape;
        let ellipse = self.config.ellipse;
        let samples = self.config.curve_samples;
        let curve_radius = self.config.curve_marker_radius;

        let mut prim = RendererPrimitives::new(&mut self.canvas);
        prim.set_line_color(self.config.stroke_color);
        prim.set_fill_color(self.config.curve_color);

        let (stats, used) = match shape {
            ShapeKind::Line if all_points => (prim.closed_polyline(points), points.len()),
            ShapeKind::Line => match points {
                [p0, p1, ..] => (prim.line(*p0, *p1), 2),
                _ => (DrawStats::default(), 0),
            },
            ShapeKind::Rectangle => match RectI::bounding(points) {
                Some(r) => {
                    let c = RectangleCorners::from_rect(&r);
                    (prim.rectangle(c.top_left, c.bottom_right), points.len())
                }
                None => (DrawStats::default(), 0),
            },
            ShapeKind::Ellipse => match ellipse.resolve(points) {
                Some((c, rx, ry)) => (prim.ellipse(c, rx, ry), ellipse.required_points()),
                None => (DrawStats::default(), 0),
            },
            ShapeKind::QuadraticBezier => match points {
                [p0, p1, p2, ..] => {
                    let curve = BezierCurve::quadratic(*p0, *p1, *p2);
                    (prim.curve(&curve, samples, curve_radius), 3)
                }
                _ => (DrawStats::default(), 0),
            },
            ShapeKind::CubicBezier => match points {
                [p0, p1, p2, p3, ..] => {
                    let curve = BezierCurve::cubic(*p0, *p1, *p2, *p3);
                    (prim.curve(&curve, samples, curve_radius), 4)
                }
                _ => (DrawStats::default(), 0),
            },
        };

        if used < points.len() {
            debug!(
                shape = %shape,
                dropped = points.len() - used,
                "extra points ignored"
            );
        }
        debug!(
            shape = %shape,
            points = points.len(),
            written = stats.written,
            clipped = stats.clipped,
            "shape drawn"
        );
        stats
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb8;
    use crate::config::EllipseRadii;

    fn p(x: i32, y: i32) -> PointI {
        PointI::new(x, y)
    }

    fn quiet_config() -> SketchConfig {
        SketchConfig {
            width: 64,
            height: 64,
            show_markers: false,
            ..SketchConfig::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SketchConfig {
            width: 0,
            ..SketchConfig::default()
        };
        assert!(Sketch::new(config).is_err());
    }

    #[test]
    fn test_click_marker() {
        let mut s = Sketch::new(SketchConfig::default()).unwrap();
        let out = s.handle_click(p(20, 20));
        assert_eq!(out, ClickOutcome::Buffered { buffered: 1, missing: 1 });
        assert_eq!(s.canvas().pixel(20, 20), Some(Rgb8::RED));
        assert_eq!(s.canvas().pixel(23, 20), Some(Rgb8::RED));
        assert_eq!(s.canvas().pixel(24, 20), Some(Rgb8::BLACK));
    }

    #[test]
    fn test_line_drawn_on_second_click() {
        let mut s = Sketch::new(quiet_config()).unwrap();
        s.handle_click(p(1, 1));
        match s.handle_click(p(11, 1)) {
            ClickOutcome::Drawn { shape, stats } => {
                assert_eq!(shape, ShapeKind::Line);
                assert_eq!(stats.written, 11);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(s.canvas().count_pixels(Rgb8::WHITE), 11);
        assert!(s.pending_points().is_empty());
    }

    #[test]
    fn test_fixed_ellipse_per_click() {
        let mut s = Sketch::new(SketchConfig {
            width: 200,
            height: 200,
            show_markers: false,
            ..SketchConfig::default()
        })
        .unwrap();
        s.set_shape(ShapeKind::Ellipse);
        assert!(matches!(s.handle_click(p(100, 100)), ClickOutcome::Drawn { .. }));
        assert_eq!(s.canvas().pixel(130, 100), Some(Rgb8::WHITE));
        assert_eq!(s.canvas().pixel(100, 160), Some(Rgb8::WHITE));
        assert_eq!(s.canvas().pixel(100, 100), Some(Rgb8::BLACK));
    }

    #[test]
    fn test_through_point_ellipse() {
        let mut s = Sketch::new(SketchConfig {
            width: 200,
            height: 200,
            show_markers: false,
            ellipse: EllipseRadii::ThroughPoint { rx: 1, ry: 1 },
            ..SketchConfig::default()
        })
        .unwrap();
        s.set_shape(ShapeKind::Ellipse);
        assert!(matches!(s.handle_click(p(100, 100)), ClickOutcome::Buffered { .. }));
        assert!(matches!(s.handle_click(p(120, 100)), ClickOutcome::Drawn { .. }));
        assert_eq!(s.canvas().pixel(80, 100), Some(Rgb8::WHITE));
        assert_eq!(s.canvas().pixel(100, 80), Some(Rgb8::WHITE));
    }

    #[test]
    fn test_quadratic_curve_colored() {
        let mut s = Sketch::new(quiet_config()).unwrap();
        s.set_shape(ShapeKind::QuadraticBezier);
        s.handle_click(p(5, 5));
        s.handle_click(p(30, 60));
        let out = s.handle_click(p(55, 5));
        assert!(matches!(out, ClickOutcome::Drawn { shape: ShapeKind::QuadraticBezier, .. }));
        assert_eq!(s.canvas().pixel(5, 5), Some(Rgb8::GREEN));
        assert_eq!(s.canvas().pixel(55, 5), Some(Rgb8::GREEN));
        assert_eq!(s.pending_points(), &[p(55, 5)]);
    }

    #[test]
    fn test_completed_curve_uses_leading_points() {
        use crate::point_accumulator::{Consumption, ShapePolicy};

        let mut config = quiet_config();
        config.policies.insert(
            ShapeKind::QuadraticBezier,
            ShapePolicy::new(3, Consumption::Clear, Trigger::OnComplete),
        );
        let mut s = Sketch::new(config).unwrap();
        s.set_shape(ShapeKind::QuadraticBezier);
        for q in [p(5, 5), p(30, 60), p(55, 5), p(60, 60), p(10, 60)] {
            assert!(matches!(s.handle_click(q), ClickOutcome::AwaitingCompletion { .. }));
        }
        assert!(matches!(
            s.complete_shape(),
            ClickOutcome::Drawn { shape: ShapeKind::QuadraticBezier, .. }
        ));
        assert!(s.pending_points().is_empty());
        assert_eq!(s.canvas().pixel(5, 5), Some(Rgb8::GREEN));
        assert_eq!(s.canvas().pixel(55, 5), Some(Rgb8::GREEN));
        // The curve peaks near y = 32; the two extra clicks stay untouched.
        assert_eq!(s.canvas().pixel(60, 60), Some(Rgb8::BLACK));
        assert_eq!(s.canvas().pixel(10, 60), Some(Rgb8::BLACK));
    }

    #[test]
    fn test_rectangle_from_bounding_corners() {
        let mut s = Sketch::new(quiet_config()).unwrap();
        s.set_shape(ShapeKind::Rectangle);
        s.handle_click(p(20, 4));
        assert!(matches!(s.handle_click(p(4, 12)), ClickOutcome::Drawn { .. }));
        for q in [p(4, 4), p(20, 4), p(4, 12), p(20, 12)] {
            assert_eq!(s.canvas().pixel(q.x, q.y), Some(Rgb8::WHITE));
        }
        assert_eq!(s.canvas().count_pixels(Rgb8::WHITE), 2 * 17 + 2 * 7);
    }

    #[test]
    fn test_set_shape_drops_pending() {
        let mut s = Sketch::new(quiet_config()).unwrap();
        s.handle_click(p(3, 3));
        s.set_shape(ShapeKind::Rectangle);
        assert!(s.pending_points().is_empty());
        assert_eq!(s.shape(), ShapeKind::Rectangle);
    }

    #[test]
    fn test_complete_discards_leftovers() {
        let mut s = Sketch::new(quiet_config()).unwrap();
        s.handle_click(p(3, 3));
        assert_eq!(s.complete_shape(), ClickOutcome::Discarded { dropped: 1 });
        assert!(s.pending_points().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut s = Sketch::new(SketchConfig::default()).unwrap();
        s.handle_click(p(3, 3));
        s.clear();
        assert!(s.pending_points().is_empty());
        assert_eq!(s.canvas().count_pixels(Rgb8::BLACK), 512 * 512);
    }
}
