//! Sketch session configuration.
//!
//! Every field has a default, so a partial (or empty) JSON file is a valid
//! configuration. Colors are written as `[r, g, b]`.

use crate::basics::{iround, PointI};
use crate::color::Rgb8;
use crate::curves::DEFAULT_CURVE_SAMPLES;
use crate::error::{Result, SketchError};
use crate::point_accumulator::{Consumption, ShapeKind, ShapePolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;
pub const DEFAULT_MARKER_RADIUS: i32 = 3;
pub const DEFAULT_CURVE_MARKER_RADIUS: i32 = 1;
pub const DEFAULT_ELLIPSE_RX: i32 = 30;
pub const DEFAULT_ELLIPSE_RY: i32 = 60;
/// Largest ellipse radius a session will draw.
pub const MAX_ELLIPSE_RADIUS: i32 = 1 << 16;

// ============================================================================
// EllipseRadii
// ============================================================================

/// How an ellipse gets its radii from clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EllipseRadii {
    /// One click is the center; the radii are these constants.
    Fixed { rx: i32, ry: i32 },
    /// The first click is the center, the second a point on the outline.
    /// `rx:ry` sets the aspect ratio, scaled so the outline passes through
    /// the second click.
    ThroughPoint { rx: i32, ry: i32 },
}

impl Default for EllipseRadii {
    fn default() -> Self {
        EllipseRadii::Fixed {
            rx: DEFAULT_ELLIPSE_RX,
            ry: DEFAULT_ELLIPSE_RY,
        }
    }
}

impl EllipseRadii {
    /// Clicks needed for one ellipse.
    pub fn required_points(&self) -> usize {
        match self {
            EllipseRadii::Fixed { .. } => 1,
            EllipseRadii::ThroughPoint { .. } => 2,
        }
    }

    /// Center and radii for the given clicks, or `None` with too few.
    /// Radii derived from clicks are capped at [`MAX_ELLIPSE_RADIUS`].
    pub fn resolve(&self, points: &[PointI]) -> Option<(PointI, i32, i32)> {
        match *self {
            EllipseRadii::Fixed { rx, ry } => points.first().map(|&c| (c, rx, ry)),
            EllipseRadii::ThroughPoint { rx, ry } => {
                let (&c, rest) = points.split_first()?;
                let &q = rest.first()?;
                let dx = q.x as f64 - c.x as f64;
                let dy = q.y as f64 - c.y as f64;
                let (ax, ay) = (rx.unsigned_abs() as f64, ry.unsigned_abs() as f64);
                let cap = |r: f64| iround(r).min(MAX_ELLIPSE_RADIUS);
                if ax == 0.0 || ay == 0.0 {
                    return Some((c, cap(dx.abs()), cap(dy.abs())));
                }
                let s = ((dx / ax).powi(2) + (dy / ay).powi(2)).sqrt();
                Some((c, cap(ax * s), cap(ay * s)))
            }
        }
    }
}

// ============================================================================
// SketchConfig
// ============================================================================

/// Constants a host hands to a sketch session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb8,
    /// Lines, rectangles and ellipses.
    pub stroke_color: Rgb8,
    pub curve_color: Rgb8,
    /// Click feedback discs.
    pub marker_color: Rgb8,
    pub show_markers: bool,
    pub marker_radius: i32,
    pub ellipse: EllipseRadii,
    /// Samples per Bezier curve, both ends included.
    pub curve_samples: u32,
    /// Disc radius stamped at each curve sample.
    pub curve_marker_radius: i32,
    /// Replaces the built-in policy for the listed shapes.
    pub policies: BTreeMap<ShapeKind, ShapePolicy>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: Rgb8::BLACK,
            stroke_color: Rgb8::WHITE,
            curve_color: Rgb8::GREEN,
            marker_color: Rgb8::RED,
            show_markers: true,
            marker_radius: DEFAULT_MARKER_RADIUS,
            ellipse: EllipseRadii::default(),
            curve_samples: DEFAULT_CURVE_SAMPLES,
            curve_marker_radius: DEFAULT_CURVE_MARKER_RADIUS,
            policies: BTreeMap::new(),
        }
    }
}

impl SketchConfig {
    /// Load from a JSON file. An empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SketchError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SketchError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.curve_samples < 2 {
            return Err(SketchError::InvalidConfig(format!(
                "curve_samples must be at least 2, got {}",
                self.curve_samples
            )));
        }
        match self.ellipse {
            EllipseRadii::ThroughPoint { rx, ry } if rx <= 0 || ry <= 0 => {
                return Err(SketchError::InvalidConfig(format!(
                    "through_point ellipse needs a positive aspect, got {}:{}",
                    rx, ry
                )));
            }
            EllipseRadii::Fixed { rx, ry } | EllipseRadii::ThroughPoint { rx, ry }
                if rx.unsigned_abs() > MAX_ELLIPSE_RADIUS as u32
                    || ry.unsigned_abs() > MAX_ELLIPSE_RADIUS as u32 =>
            {
                return Err(SketchError::InvalidConfig(format!(
                    "ellipse radii must not exceed {}, got {}x{}",
                    MAX_ELLIPSE_RADIUS, rx, ry
                )));
            }
            _ => {}
        }
        for (kind, policy) in &self.policies {
            if policy.required == 0 {
                return Err(SketchError::InvalidConfig(format!(
                    "policy for {} must require at least one point",
                    kind
                )));
            }
            if let Consumption::Advance(n) = policy.consume {
                if n == 0 || n > policy.required {
                    return Err(SketchError::InvalidConfig(format!(
                        "policy for {} must advance by 1..={} points, got {}",
                        kind, policy.required, n
                    )));
                }
            }
        }
        Ok(())
    }

    /// Effective policy for `kind`: the override if present, else the
    /// built-in default.
    pub fn policy_for(&self, kind: ShapeKind) -> ShapePolicy {
        self.policies
            .get(&kind)
            .copied()
            .unwrap_or_else(|| ShapePolicy::default_for(kind, self.ellipse.required_points()))
    }
}

// ============================================================================
// Tests
// ============================================================================
