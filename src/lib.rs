//! # raster-sketch
//!
//! Interactive sketch rasterization core. Clicks go in, aliased shapes come
//! out on an in-memory RGB canvas.
//!
//! The crate provides:
//!
//! - Integer Bresenham lines and rectangle outlines
//! - Midpoint ellipses with four-way symmetry
//! - Quadratic and cubic Bezier evaluation with sampled curve rendering
//! - A per-shape point accumulation policy that decides when buffered
//!   clicks become a shape
//!
//! ## Architecture
//!
//! One click flows through three stages:
//!
//! 1. **Accumulator** buffers the click and, once the active shape has
//!    enough points, hands them out according to its `ShapePolicy`
//! 2. **Rasterizers** turn the points into pixel coordinates
//! 3. **Renderer** writes the pixels into the `PixelCanvas`, dropping the
//!    ones that fall outside it
//!
//! `sketch::Sketch` ties the stages together for a host.

// Foundation types
pub mod basics;
pub mod color;
pub mod error;

// Rasterizers
pub mod curves;
pub mod ellipse_midpoint;
pub mod line_bresenham;
pub mod rectangle;

// Canvas & renderer
pub mod pixel_canvas;
pub mod renderer_primitives;

// Session
pub mod config;
pub mod point_accumulator;
pub mod sketch;
