//! Click buffering and per-shape point consumption policy.
//!
//! The accumulator owns the ordered list of clicked points. A
//! [`ShapePolicy`] decides when enough points are buffered to draw, which
//! points make up the shape, and what is left in the buffer afterwards.

use crate::basics::PointI;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ShapeKind
// ============================================================================

/// The primitive families a sketch can draw.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Line,
    Rectangle,
    Ellipse,
    QuadraticBezier,
    CubicBezier,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Line,
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::QuadraticBezier,
        ShapeKind::CubicBezier,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::QuadraticBezier => "quadratic_bezier",
            ShapeKind::CubicBezier => "cubic_bezier",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ShapeKind::Line),
            "rectangle" | "rect" => Ok(ShapeKind::Rectangle),
            "ellipse" | "oval" => Ok(ShapeKind::Ellipse),
            "quadratic_bezier" | "quadratic" => Ok(ShapeKind::QuadraticBezier),
            "cubic_bezier" | "cubic" => Ok(ShapeKind::CubicBezier),
            _ => Err(format!("unknown shape kind '{}'", s)),
        }
    }
}

// ============================================================================
// ShapePolicy
// ============================================================================

/// What happens to the buffer after a shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consumption {
    /// Each draw uses the newest `required` points, which stay buffered.
    Keep,
    /// Drop this many leading points (sliding window).
    Advance(usize),
    /// Empty the buffer.
    Clear,
}

/// When the accumulator checks whether a shape is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// After every appended point.
    EveryPoint,
    /// Only on an explicit shape-completion event; the shape is built from
    /// every buffered point and the buffer is cleared.
    OnComplete,
}

/// Point grouping rules for one shape family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapePolicy {
    /// Minimum buffered points before a draw.
    pub required: usize,
    /// Buffer handling after an `EveryPoint` draw.
    pub consume: Consumption,
    pub trigger: Trigger,
}

impl ShapePolicy {
    pub const fn new(required: usize, consume: Consumption, trigger: Trigger) -> Self {
        Self {
            required,
            consume,
            trigger,
        }
    }

    /// Default policy per shape. `ellipse_points` is 1 when the clicked point
    /// is the center of a fixed-radius ellipse, 2 when a second click sets
    /// the radii.
    ///
    /// - line: disjoint segments, each pair of clicks is one segment
    /// - rectangle: each pair of clicks is one rectangle, then start fresh
    /// - ellipse: each click (or pair) is one ellipse, then start fresh
    /// - bezier: consecutive curves share their joining control point
    pub fn default_for(kind: ShapeKind, ellipse_points: usize) -> Self {
        use Consumption::*;
        use Trigger::*;
        match kind {
            ShapeKind::Line => Self::new(2, Advance(2), EveryPoint),
            ShapeKind::Rectangle => Self::new(2, Clear, EveryPoint),
            ShapeKind::Ellipse => Self::new(ellipse_points.max(1), Clear, EveryPoint),
            ShapeKind::QuadraticBezier => Self::new(3, Advance(2), EveryPoint),
            ShapeKind::CubicBezier => Self::new(4, Advance(3), EveryPoint),
        }
    }
}

// ============================================================================
// PointAccumulator
// ============================================================================

/// Ordered click buffer governed by a [`ShapePolicy`].
#[derive(Debug, Clone)]
pub struct PointAccumulator {
    points: Vec<PointI>,
    policy: ShapePolicy,
}

impl PointAccumulator {
    pub fn new(policy: ShapePolicy) -> Self {
        Self {
            points: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &ShapePolicy {
        &self.policy
    }

    /// Replace the policy. Buffered points belong to the old shape and are
    /// discarded.
    pub fn set_policy(&mut self, policy: ShapePolicy) {
        self.policy = policy;
        self.points.clear();
    }

    /// Buffered points in click order.
    pub fn points(&self) -> &[PointI] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points still missing before the next shape can be drawn.
    pub fn missing(&self) -> usize {
        self.policy.required.saturating_sub(self.points.len())
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Append a click. Returns the points of a completed shape when the
    /// policy fires, after applying its consumption rule.
    pub fn push(&mut self, p: PointI) -> Option<Vec<PointI>> {
        self.points.push(p);
        if self.policy.trigger != Trigger::EveryPoint || self.missing() > 0 {
            return None;
        }
        let required = self.policy.required;
        let shape = match self.policy.consume {
            Consumption::Keep => {
                // Only the newest window can take part in a later shape.
                let stale = self.points.len() - required;
                self.points.drain(..stale);
                self.points.clone()
            }
            Consumption::Advance(n) => {
                let shape = self.points[..required].to_vec();
                // A zero advance would redraw the same shape forever.
                let n = n.clamp(1, self.points.len());
                self.points.drain(..n);
                shape
            }
            Consumption::Clear => {
                let shape = self.points[..required].to_vec();
                self.points.clear();
                shape
            }
        };
        Some(shape)
    }

    /// Shape-completion event. For `OnComplete` policies returns every
    /// buffered point when there are enough of them. The buffer is always
    /// left empty: leftovers of an `EveryPoint` policy can never finish a
    /// shape on their own.
    pub fn complete(&mut self) -> Option<Vec<PointI>> {
        let ready = self.policy.trigger == Trigger::OnComplete && self.missing() == 0;
        let points = std::mem::take(&mut self.points);
        ready.then_some(points)
    }
}

// ============================================================================
// Tests
// ============================================================================
