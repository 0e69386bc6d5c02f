//! Pixel target location
//!
//! Scans a chunk tile for pixels matching the selected colors and maps
//! each hit to the screen coordinate where it should be drawn.

use color_cluster::Rgb;

use crate::chunk::Tile;
use crate::models::{ChunkGeometry, ScreenPoint};

/// Find every tile pixel matching one of `target_colors` (within the
/// per-channel `tolerance`) and return the screen point at the center of
/// its enlarged footprint.
///
/// The scan is row-major and the output preserves scan order, so drawing
/// proceeds top-to-bottom, left-to-right. A pixel matching several target
/// colors is still a single target.
pub fn locate_targets(
    tile: &Tile,
    target_colors: &[Rgb],
    tolerance: u8,
    geometry: &ChunkGeometry,
) -> Vec<ScreenPoint> {
    debug_assert_eq!(
        tile.pixels.len(),
        (tile.width as usize) * (tile.height as usize)
    );

    let mut points = Vec::new();
    for y in 0..tile.height {
        let row = (y as usize) * (tile.width as usize);
        for x in 0..tile.width {
            let pixel = tile.pixels[row + x as usize];
            if target_colors
                .iter()
                .any(|&target| target.within_tolerance(pixel, tolerance))
            {
                points.push(geometry.screen_point(x, y));
            }
        }
    }
    points
}
