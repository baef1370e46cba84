//! Replay scripts.
//!
//! One event per line:
//!
//! ```text
//! # comment
//! shape rectangle
//! click 10 20
//! complete
//! clear
//! ```
//!
//! Blank lines and text after `#` are ignored. Keywords are case-insensitive.

use anyhow::{anyhow, bail, Context, Result};
use raster_sketch::basics::PointI;
use raster_sketch::point_accumulator::ShapeKind;
use raster_sketch::sketch::{ClickOutcome, Sketch};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEvent {
    Shape(ShapeKind),
    Click(PointI),
    Complete,
    Clear,
}

/// Totals over one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub clicks: usize,
    pub shapes_drawn: usize,
    pub pixels_written: u64,
    pub pixels_clipped: u64,
    /// Points dropped by completion events that had nothing to draw.
    pub points_discarded: usize,
}

fn parse_coord(word: Option<&str>, what: &str) -> Result<i32> {
    let word = word.ok_or_else(|| anyhow!("missing {} coordinate", what))?;
    word.parse()
        .with_context(|| format!("invalid {} coordinate '{}'", what, word))
}

fn parse_line(line: &str) -> Result<Option<ScriptEvent>> {
    let line = line.split('#').next().unwrap_or("").trim();
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };

    let event = match keyword.to_ascii_lowercase().as_str() {
        "shape" => {
            let name = words.next().ok_or_else(|| anyhow!("missing shape name"))?;
            ScriptEvent::Shape(name.to_ascii_lowercase().parse().map_err(anyhow::Error::msg)?)
        }
        "click" => {
            let x = parse_coord(words.next(), "x")?;
            let y = parse_coord(words.next(), "y")?;
            ScriptEvent::Click(PointI::new(x, y))
        }
        "complete" => ScriptEvent::Complete,
        "clear" => ScriptEvent::Clear,
        other => bail!("unknown event '{}'", other),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected trailing '{}'", extra);
    }
    Ok(Some(event))
}

/// Parse a whole script. Errors name the offending line.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>> {
    let mut events = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(event) = parse_line(line).with_context(|| format!("line {}", idx + 1))? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Feed `events` into `sketch` in order.
pub fn replay(sketch: &mut Sketch, events: &[ScriptEvent]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for event in events {
        let outcome = match *event {
            ScriptEvent::Shape(kind) => {
                sketch.set_shape(kind);
                continue;
            }
            ScriptEvent::Clear => {
                sketch.clear();
                continue;
            }
            ScriptEvent::Click(p) => {
                summary.clicks += 1;
                sketch.handle_click(p)
            }
            ScriptEvent::Complete => sketch.complete_shape(),
        };
        match outcome {
            ClickOutcome::Drawn { stats, .. } => {
                summary.shapes_drawn += 1;
                summary.pixels_written += stats.written as u64;
                summary.pixels_clipped += stats.clipped as u64;
            }
            ClickOutcome::Discarded { dropped } => summary.points_discarded += dropped,
            ClickOutcome::Buffered { .. } | ClickOutcome::AwaitingCompletion { .. } => {}
        }
    }
    info!(
        events = events.len(),
        clicks = summary.clicks,
        shapes = summary.shapes_drawn,
        "replay finished"
    );
    summary
}

// ============================================================================
// Tests
// ============================================================================
