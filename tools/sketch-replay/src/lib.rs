// Copyright 2025. Headless replay and pixel comparison library for raster-sketch.
//
// Provides canvas capture, buffer comparison, BMP I/O and diff image generation.

use anyhow::{ensure, Context, Result};
use raster_sketch::pixel_canvas::PixelCanvas;
use std::fs::File;
use std::io::{self, Read as IoRead, Write as IoWrite};
use std::path::Path;

pub mod logging;
pub mod script;

// ============================================================================
// Pixel Buffer
// ============================================================================

/// An RGBA pixel buffer with dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, row-major, top-to-bottom. Length = width * height * 4.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width * height * 4) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

impl From<&PixelCanvas> for PixelBuffer {
    /// Capture an RGB canvas as opaque RGBA.
    fn from(canvas: &PixelCanvas) -> Self {
        let mut buf = PixelBuffer::new(canvas.width(), canvas.height());
        let rgb = canvas.as_bytes().chunks_exact(3);
        for (dst, src) in buf.data.chunks_exact_mut(4).zip(rgb) {
            dst[..3].copy_from_slice(src);
            dst[3] = 255;
        }
        buf
    }
}

// ============================================================================
// Comparison Result
// ============================================================================

/// Information about a single pixel difference.
#[derive(Debug, Clone)]
pub struct DiffInfo {
    pub x: u32,
    pub y: u32,
    pub pixel_a: [u8; 4],
    pub pixel_b: [u8; 4],
}

/// Result of comparing two pixel buffers.
#[derive(Debug, Clone)]
pub struct CompareResult {
    pub identical: bool,
    pub total_pixels: u64,
    /// Pixels that differ by at least 1 in any channel.
    pub different_pixels: u64,
    pub max_channel_diff: u8,
    /// First differing pixel, scanning left-to-right, top-to-bottom.
    pub first_diff: Option<DiffInfo>,
}

impl std::fmt::Display for CompareResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.identical {
            return write!(f, "IDENTICAL: {} pixels match", self.total_pixels);
        }
        write!(
            f,
            "DIFFERENT: {}/{} pixels differ ({:.2}%), max_diff={}",
            self.different_pixels,
            self.total_pixels,
            self.different_pixels as f64 / self.total_pixels as f64 * 100.0,
            self.max_channel_diff,
        )?;
        if let Some(ref d) = self.first_diff {
            write!(
                f,
                "\n  First diff at ({}, {}): A={:?} B={:?}",
                d.x, d.y, d.pixel_a, d.pixel_b
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Buffer Comparison
// ============================================================================

/// Compare two RGBA pixel buffers pixel by pixel.
pub fn compare_buffers(a: &PixelBuffer, b: &PixelBuffer) -> Result<CompareResult> {
    ensure!(
        a.width == b.width && a.height == b.height,
        "size mismatch: {}x{} vs {}x{}",
        a.width,
        a.height,
        b.width,
        b.height
    );

    let mut different_pixels = 0u64;
    let mut max_channel_diff = 0u8;
    let mut first_diff = None;

    for y in 0..a.height {
        for x in 0..a.width {
            let pa = a.pixel(x, y);
            let pb = b.pixel(x, y);
            let diff = pa
                .iter()
                .zip(pb.iter())
                .map(|(&ca, &cb)| ca.abs_diff(cb))
                .max()
                .unwrap_or(0);
            if diff > 0 {
                different_pixels += 1;
                max_channel_diff = max_channel_diff.max(diff);
                if first_diff.is_none() {
                    first_diff = Some(DiffInfo {
                        x,
                        y,
                        pixel_a: pa,
                        pixel_b: pb,
                    });
                }
            }
        }
    }

    Ok(CompareResult {
        identical: different_pixels == 0,
        total_pixels: a.width as u64 * a.height as u64,
        different_pixels,
        max_channel_diff,
        first_diff,
    })
}

/// Visual diff: matching pixels dark gray, differing pixels red scaled by
/// the largest channel difference.
pub fn generate_diff_image(a: &PixelBuffer, b: &PixelBuffer) -> Result<PixelBuffer> {
    ensure!(
        a.width == b.width && a.height == b.height,
        "size mismatch: {}x{} vs {}x{}",
        a.width,
        a.height,
        b.width,
        b.height
    );

    let mut diff = PixelBuffer::new(a.width, a.height);
    let pixels = a.data.chunks_exact(4).zip(b.data.chunks_exact(4));
    for (out, (pa, pb)) in diff.data.chunks_exact_mut(4).zip(pixels) {
        let d = (0..3).map(|c| pa[c].abs_diff(pb[c])).max().unwrap_or(0);
        if d == 0 {
            out.copy_from_slice(&[40, 40, 40, 255]);
        } else {
            let v = (d as u16 * 10).min(255) as u8;
            out.copy_from_slice(&[v.max(64), 0, 0, 255]);
        }
    }
    Ok(diff)
}

// ============================================================================
// BMP I/O (32-bit BGRA, top-down)
// ============================================================================

/// Save a pixel buffer as a 32-bit BMP file (top-down, BGRA).
pub fn save_bmp(path: &Path, buf: &PixelBuffer) -> io::Result<()> {
    let w = buf.width;
    let h = buf.height;
    let row_size = w * 4;
    let image_size = row_size * h;
    let file_size = 14 + 40 + image_size;

    let mut f = File::create(path)?;

    // File header
    f.write_all(b"BM")?;
    f.write_all(&file_size.to_le_bytes())?;
    f.write_all(&[0u8; 4])?;
    f.write_all(&(14u32 + 40).to_le_bytes())?;

    // BITMAPINFOHEADER
    f.write_all(&40u32.to_le_bytes())?;
    f.write_all(&w.to_le_bytes())?;
    f.write_all(&(-(h as i32)).to_le_bytes())?; // negative height = top-down
    f.write_all(&1u16.to_le_bytes())?;
    f.write_all(&32u16.to_le_bytes())?;
    f.write_all(&0u32.to_le_bytes())?; // BI_RGB
    f.write_all(&image_size.to_le_bytes())?;
    f.write_all(&[0u8; 16])?;

    let mut row = vec![0u8; row_size as usize];
    for src_row in buf.data.chunks_exact(row_size.max(1) as usize) {
        for (dst, src) in row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            dst.copy_from_slice(&[src[2], src[1], src[0], src[3]]);
        }
        f.write_all(&row)?;
    }

    Ok(())
}

/// Load a 24-bit or 32-bit BMP file.
pub fn load_bmp(path: &Path) -> io::Result<PixelBuffer> {
    let mut data = Vec::new();
    File::open(path)?.read_to_end(&mut data)?;

    if data.len() < 54 || &data[0..2] != b"BM" {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "not a valid BMP file"));
    }

    let pixel_offset = u32::from_le_bytes([data[10], data[11], data[12], data[13]]) as usize;
    let w = i32::from_le_bytes([data[18], data[19], data[20], data[21]]);
    let h = i32::from_le_bytes([data[22], data[23], data[24], data[25]]);
    let bpp = u16::from_le_bytes([data[28], data[29]]) as usize;

    let bytes_pp = bpp / 8;
    if bytes_pp != 3 && bytes_pp != 4 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unsupported BMP depth: {} bits", bpp),
        ));
    }

    let width = w.unsigned_abs();
    let height = h.unsigned_abs();
    let top_down = h < 0;
    let row_stride = (width as usize * bytes_pp + 3) / 4 * 4;

    let mut buf = PixelBuffer::new(width, height);

    for y in 0..height as usize {
        let src_y = if top_down { y } else { height as usize - 1 - y };
        let row_offset = pixel_offset + src_y * row_stride;

        for x in 0..width as usize {
            let si = row_offset + x * bytes_pp;
            if si + bytes_pp > data.len() {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated BMP pixel data"));
            }
            let di = (y * width as usize + x) * 4;
            let alpha = if bytes_pp == 4 { data[si + 3] } else { 255 };
            buf.data[di..di + 4].copy_from_slice(&[data[si + 2], data[si + 1], data[si], alpha]);
        }
    }

    Ok(buf)
}

/// Save a canvas as BMP, creating parent directories as needed.
pub fn save_canvas(path: &Path, canvas: &PixelCanvas) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    save_bmp(path, &PixelBuffer::from(canvas))
        .with_context(|| format!("failed to write {}", path.display()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use raster_sketch::color::Rgb8;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sketch-replay-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_buffer_from_canvas() {
        let mut canvas = PixelCanvas::new(3, 2);
        canvas.write_pixel(2, 1, Rgb8::new(1, 2, 3));
        let buf = PixelBuffer::from(&canvas);
        assert_eq!(buf.pixel(2, 1), [1, 2, 3, 255]);
        assert_eq!(buf.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_compare_identical_and_different() {
        let a = PixelBuffer::new(4, 4);
        let mut b = a.clone();
        assert!(compare_buffers(&a, &b).unwrap().identical);

        // pixel (2, 1)
        b.data[(4 + 2) * 4] = 9;
        let r = compare_buffers(&a, &b).unwrap();
        assert!(!r.identical);
        assert_eq!(r.different_pixels, 1);
        assert_eq!(r.max_channel_diff, 9);
        let d = r.first_diff.unwrap();
        assert_eq!((d.x, d.y), (2, 1));
    }

    #[test]
    fn test_compare_size_mismatch() {
        assert!(compare_buffers(&PixelBuffer::new(2, 2), &PixelBuffer::new(3, 2)).is_err());
    }

    #[test]
    fn test_diff_image() {
        let a = PixelBuffer::new(2, 1);
        let mut b = a.clone();
        b.data[4] = 200;
        let diff = generate_diff_image(&a, &b).unwrap();
        assert_eq!(diff.pixel(0, 0), [40, 40, 40, 255]);
        assert_eq!(diff.pixel(1, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_bmp_save_load() {
        let mut canvas = PixelCanvas::new(5, 3);
        canvas.write_pixel(4, 2, Rgb8::RED);
        canvas.write_pixel(0, 1, Rgb8::GREEN);
        let path = temp_path("roundtrip.bmp");
        save_canvas(&path, &canvas).unwrap();
        let loaded = load_bmp(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, PixelBuffer::from(&canvas));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = temp_path("garbage.bmp");
        std::fs::write(&path, b"not a bitmap").unwrap();
        let err = load_bmp(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
