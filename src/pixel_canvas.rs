//! Owned RGB24 pixel canvas with clipped writes.
//!
//! The canvas stores `width * height` pixels row-major, top-down, three
//! bytes per pixel. Every write is bounds-checked: a coordinate outside the
//! canvas is dropped on its own and never aborts the caller's pass.

use crate::basics::PointI;
use crate::color::{OrderRgb, Rgb8};

/// Bytes per pixel for RGB24.
const BPP: usize = OrderRgb::N;

// ============================================================================
// PixelCanvas
// ============================================================================

/// An owned 2D buffer of RGB pixels.
#[derive(Clone)]
pub struct PixelCanvas {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelCanvas {
    /// Create a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * BPP],
            width,
            height,
        }
    }

    /// Create a canvas filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Rgb8) -> Self {
        let mut canvas = Self::new(width, height);
        canvas.clear(background);
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * BPP
    }

    /// True if (x, y) lies on the canvas.
    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.stride() + x as usize * BPP
    }

    /// Fill the entire canvas with one color.
    pub fn clear(&mut self, c: Rgb8) {
        for px in self.data.chunks_exact_mut(BPP) {
            c.write_to(px);
        }
    }

    /// Write one pixel. Returns `false` (and writes nothing) when the
    /// coordinate is off the canvas.
    #[inline]
    pub fn write_pixel(&mut self, x: i32, y: i32, c: Rgb8) -> bool {
        if !self.inbox(x, y) {
            return false;
        }
        let off = self.offset(x, y);
        c.write_to(&mut self.data[off..off + BPP]);
        true
    }

    /// Write a horizontal run from `x1` to `x2` inclusive, clipped to the
    /// canvas. Returns the number of pixels written.
    pub fn copy_hline(&mut self, x1: i32, y: i32, x2: i32, c: Rgb8) -> u32 {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        if y < 0 || y as u32 >= self.height || x2 < 0 || x1 >= self.width as i32 {
            return 0;
        }
        let x1 = x1.max(0);
        let x2 = x2.min(self.width as i32 - 1);
        let start = self.offset(x1, y);
        let end = self.offset(x2, y) + BPP;
        for px in self.data[start..end].chunks_exact_mut(BPP) {
            c.write_to(px);
        }
        (x2 - x1 + 1) as u32
    }

    /// Read one pixel, or `None` off the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb8> {
        if !self.inbox(x, y) {
            return None;
        }
        let off = self.offset(x, y);
        Some(Rgb8::from_slice(&self.data[off..off + BPP]))
    }

    /// Row `y` as raw RGB24 bytes.
    pub fn row_slice(&self, y: u32) -> &[u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// The whole buffer as RGB24 bytes, row-major, top-down.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of pixels currently holding exactly `c`.
    pub fn count_pixels(&self, c: Rgb8) -> usize {
        self.data
            .chunks_exact(BPP)
            .filter(|px| Rgb8::from_slice(px) == c)
            .count()
    }

    /// Coordinates of every pixel holding exactly `c`, in row-major order.
    pub fn find_pixels(&self, c: Rgb8) -> Vec<PointI> {
        let w = self.width as usize;
        self.data
            .chunks_exact(BPP)
            .enumerate()
            .filter(|(_, px)| Rgb8::from_slice(px) == c)
            .map(|(i, _)| PointI::new((i % w) as i32, (i / w) as i32))
            .collect()
    }
}

impl std::fmt::Debug for PixelCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let c = PixelCanvas::new(4, 3);
        assert_eq!(c.width(), 4);
        assert_eq!(c.height(), 3);
        assert_eq!(c.as_bytes().len(), 4 * 3 * 3);
        assert_eq!(c.count_pixels(Rgb8::BLACK), 12);
    }

    #[test]
    fn test_write_read_pixel() {
        let mut c = PixelCanvas::new(10, 10);
        assert!(c.write_pixel(3, 7, Rgb8::RED));
        assert_eq!(c.pixel(3, 7), Some(Rgb8::RED));
        assert_eq!(c.pixel(7, 3), Some(Rgb8::BLACK));
        let row = c.row_slice(7);
        assert_eq!(&row[9..12], &[255, 0, 0]);
    }

    #[test]
    fn test_later_write_overrides() {
        let mut c = PixelCanvas::new(2, 2);
        c.write_pixel(1, 1, Rgb8::RED);
        c.write_pixel(1, 1, Rgb8::GREEN);
        assert_eq!(c.pixel(1, 1), Some(Rgb8::GREEN));
    }

    #[test]
    fn test_out_of_bounds_write_is_dropped() {
        let mut c = PixelCanvas::new(5, 5);
        assert!(!c.write_pixel(-1, 0, Rgb8::WHITE));
        assert!(!c.write_pixel(0, 5, Rgb8::WHITE));
        assert!(!c.write_pixel(5, 0, Rgb8::WHITE));
        assert_eq!(c.count_pixels(Rgb8::WHITE), 0);
        assert_eq!(c.pixel(-1, 0), None);
    }

    #[test]
    fn test_copy_hline_clipped() {
        let mut c = PixelCanvas::new(8, 2);
        assert_eq!(c.copy_hline(-3, 1, 2, Rgb8::BLUE), 3);
        assert_eq!(c.copy_hline(9, 1, 6, Rgb8::BLUE), 2);
        assert_eq!(c.copy_hline(0, 2, 7, Rgb8::BLUE), 0);
        assert_eq!(c.count_pixels(Rgb8::BLUE), 5);
        assert_eq!(c.pixel(3, 1), Some(Rgb8::BLACK));
    }

    #[test]
    fn test_clear_and_find() {
        let mut c = PixelCanvas::with_background(3, 3, Rgb8::WHITE);
        assert_eq!(c.count_pixels(Rgb8::WHITE), 9);
        c.write_pixel(2, 1, Rgb8::RED);
        assert_eq!(c.find_pixels(Rgb8::RED), vec![PointI::new(2, 1)]);
        c.clear(Rgb8::BLACK);
        assert_eq!(c.count_pixels(Rgb8::BLACK), 9);
    }
}
