//! Bezier curve evaluation (quadratic and cubic).
//!
//! Curves are evaluated directly from the Bernstein polynomials and sampled
//! at evenly spaced parameters. Samples are real-valued and rounded to the
//! nearest pixel only when handed to the canvas.

use crate::basics::{PointD, PointI};

/// Samples used when no explicit count is configured.
pub const DEFAULT_CURVE_SAMPLES: u32 = 1000;

// ============================================================================
// BezierCurve
// ============================================================================

/// A quadratic or cubic Bezier curve over pixel-space control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BezierCurve {
    Quadratic([PointD; 3]),
    Cubic([PointD; 4]),
}

impl BezierCurve {
    pub fn quadratic(p0: PointI, p1: PointI, p2: PointI) -> Self {
        Self::Quadratic([p0.to_f64(), p1.to_f64(), p2.to_f64()])
    }

    pub fn cubic(p0: PointI, p1: PointI, p2: PointI, p3: PointI) -> Self {
        Self::Cubic([p0.to_f64(), p1.to_f64(), p2.to_f64(), p3.to_f64()])
    }

    /// Build a curve from 3 (quadratic) or 4 (cubic) control points.
    /// Any other count yields `None`.
    pub fn from_control_points(cp: &[PointI]) -> Option<Self> {
        match *cp {
            [p0, p1, p2] => Some(Self::quadratic(p0, p1, p2)),
            [p0, p1, p2, p3] => Some(Self::cubic(p0, p1, p2, p3)),
            _ => None,
        }
    }

    /// Number of control points (3 or 4).
    pub fn order(&self) -> usize {
        match self {
            Self::Quadratic(_) => 3,
            Self::Cubic(_) => 4,
        }
    }

    /// Real-valued position at parameter `t`, clamped to `[0, 1]`.
    pub fn point_at(&self, t: f64) -> PointD {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        match self {
            Self::Quadratic([p0, p1, p2]) => {
                let b0 = mt * mt;
                let b1 = 2.0 * t * mt;
                let b2 = t * t;
                PointD::new(
                    b0 * p0.x + b1 * p1.x + b2 * p2.x,
                    b0 * p0.y + b1 * p1.y + b2 * p2.y,
                )
            }
            Self::Cubic([p0, p1, p2, p3]) => {
                let b0 = mt * mt * mt;
                let b1 = 3.0 * t * mt * mt;
                let b2 = 3.0 * t * t * mt;
                let b3 = t * t * t;
                PointD::new(
                    b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
                    b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
                )
            }
        }
    }

    /// Pixel at parameter `t`, rounded to the nearest integer coordinate.
    pub fn evaluate(&self, t: f64) -> PointI {
        self.point_at(t).round()
    }

    /// `num_samples` evenly spaced pixels from `t = 0` to `t = 1` inclusive.
    pub fn samples(&self, num_samples: u32) -> CurveSamples<'_> {
        CurveSamples::new(self, num_samples)
    }
}

/// Evaluate the curve defined by `cp` (3 or 4 control points) at `t`.
/// Returns `None` for any other control-point count.
pub fn evaluate(cp: &[PointI], t: f64) -> Option<PointI> {
    BezierCurve::from_control_points(cp).map(|c| c.evaluate(t))
}

// ============================================================================
// CurveSamples
// ============================================================================

/// Evenly spaced samples over `[0, 1]`, both ends included.
///
/// Fewer than two samples are raised to two so the endpoints are always
/// present.
#[derive(Debug, Clone)]
pub struct CurveSamples<'a> {
    curve: &'a BezierCurve,
    step: u32,
    num_steps: u32,
}

impl<'a> CurveSamples<'a> {
    fn new(curve: &'a BezierCurve, num_samples: u32) -> Self {
        Self {
            curve,
            step: 0,
            num_steps: num_samples.max(2) - 1,
        }
    }
}

impl Iterator for CurveSamples<'_> {
    type Item = PointI;

    fn next(&mut self) -> Option<PointI> {
        if self.step > self.num_steps {
            return None;
        }
        // Index-based parameter keeps t = 1 exact at the last sample.
        let t = self.step as f64 / self.num_steps as f64;
        self.step += 1;
        Some(self.curve.evaluate(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.num_steps + 1).saturating_sub(self.step) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CurveSamples<'_> {}

// ============================================================================
// Tests
// ============================================================================
