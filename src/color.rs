//! Color type for the RGB canvas.
//!
//! `Rgb8` is a plain 8-bit-per-channel color. It serializes as a `[r, g, b]`
//! array so configuration files stay compact.

use serde::{Deserialize, Serialize};

// ============================================================================
// Component order
// ============================================================================

/// RGB component order: R=0, G=1, B=2
pub struct OrderRgb;
impl OrderRgb {
    pub const R: usize = 0;
    pub const G: usize = 1;
    pub const B: usize = 2;
    pub const N: usize = 3;
}

// ============================================================================
// Rgb8
// ============================================================================

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const RED: Rgb8 = Rgb8::new(255, 0, 0);
    pub const GREEN: Rgb8 = Rgb8::new(0, 255, 0);
    pub const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Read a color from an RGB24 pixel slice.
    #[inline]
    pub fn from_slice(p: &[u8]) -> Self {
        Self::new(p[OrderRgb::R], p[OrderRgb::G], p[OrderRgb::B])
    }

    /// Store this color into an RGB24 pixel slice.
    #[inline]
    pub fn write_to(&self, p: &mut [u8]) {
        p[OrderRgb::R] = self.r;
        p[OrderRgb::G] = self.g;
        p[OrderRgb::B] = self.b;
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_roundtrip() {
        let mut px = [0u8; OrderRgb::N];
        Rgb8::new(1, 2, 3).write_to(&mut px);
        assert_eq!(px, [1, 2, 3]);
        assert_eq!(Rgb8::from_slice(&px), Rgb8::new(1, 2, 3));
    }

    #[test]
    fn test_serde_as_array() {
        let json = serde_json::to_string(&Rgb8::GREEN).unwrap();
        assert_eq!(json, "[0,255,0]");
        let c: Rgb8 = serde_json::from_str("[255,0,0]").unwrap();
        assert_eq!(c, Rgb8::RED);
    }
}
