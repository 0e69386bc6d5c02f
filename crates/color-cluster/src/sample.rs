//! Pixel downsampling for clustering input
//!
//! Clustering cost grows with the number of samples, and grouping quality
//! barely changes past a few tens of thousands of pixels. Inputs are
//! therefore reduced with nearest-neighbor sampling so the longest edge
//! is at most [`DEFAULT_MAX_EDGE`] before any color math happens.

use crate::color::Rgb;

/// Longest-edge cap applied before clustering (150 * 150 = 22,500
/// samples worst case).
pub const DEFAULT_MAX_EDGE: u32 = 150;

/// Dimensions after capping the longest edge at `max_edge`, preserving
/// aspect ratio. Images already within the cap keep their size.
pub fn scaled_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_edge {
        return (width, height);
    }
    let scale = f64::from(max_edge) / f64::from(longest);
    let w = ((f64::from(width) * scale) as u32).max(1);
    let h = ((f64::from(height) * scale) as u32).max(1);
    (w, h)
}

/// Nearest-neighbor downsample of a row-major pixel buffer so the longest
/// edge is at most `max_edge`.
///
/// Returns the reduced buffer in row-major order. When the image is
/// already within the cap the buffer is returned unchanged (copied).
/// Deterministic: the same input always yields the same samples.
///
/// `pixels.len()` must equal `width * height`.
pub fn downsample(pixels: &[Rgb], width: u32, height: u32, max_edge: u32) -> Vec<Rgb> {
    debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));

    let (out_w, out_h) = scaled_dimensions(width, height, max_edge);
    if out_w == width && out_h == height {
        return pixels.to_vec();
    }

    let mut out = Vec::with_capacity((out_w as usize) * (out_h as usize));
    for y in 0..out_h {
        let src_y = (u64::from(y) * u64::from(height) / u64::from(out_h)) as usize;
        let row = src_y * width as usize;
        for x in 0..out_w {
            let src_x = (u64::from(x) * u64::from(width) / u64::from(out_w)) as usize;
            out.push(pixels[row + src_x]);
        }
    }
    out
}
