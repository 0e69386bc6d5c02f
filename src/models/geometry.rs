//! Calibration geometry
//!
//! The user outlines where the drawing canvas sits on screen; this module
//! turns that outline plus the chunk dimensions into a mapping from image
//! pixel coordinates to screen coordinates.

use crate::error::InputError;

/// An absolute screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The user-outlined screen rectangle covering the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CalibrationRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect with a zero edge cannot calibrate anything.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.width == 0 || self.height == 0 {
            return Err(InputError::InvalidCalibration {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Mapping from chunk pixel coordinates to screen coordinates.
///
/// Produced by [`ChunkGeometry::fit`]; one image pixel covers a
/// `pixel_scale` x `pixel_scale` square of screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkGeometry {
    /// Screen pixels per image pixel (uniform on both axes).
    pub pixel_scale: f64,
    /// Screen x of the chunk's left edge.
    pub origin_x: i32,
    /// Screen y of the chunk's top edge.
    pub origin_y: i32,
    pub chunk_width: u32,
    pub chunk_height: u32,
}

impl ChunkGeometry {
    /// Fit a chunk into a calibration rect: uniform scale chosen so the
    /// whole chunk fits (the smaller of the two axis ratios), placement
    /// centered on both axes.
    pub fn fit(
        rect: &CalibrationRect,
        chunk_width: u32,
        chunk_height: u32,
    ) -> Result<Self, InputError> {
        rect.validate()?;
        if chunk_width == 0 || chunk_height == 0 {
            return Err(InputError::InvalidChunk {
                width: chunk_width,
                height: chunk_height,
            });
        }

        let scale_x = f64::from(rect.width) / f64::from(chunk_width);
        let scale_y = f64::from(rect.height) / f64::from(chunk_height);
        let pixel_scale = scale_x.min(scale_y);

        let scaled_w = f64::from(chunk_width) * pixel_scale;
        let scaled_h = f64::from(chunk_height) * pixel_scale;
        let origin_x = rect.x + ((f64::from(rect.width) - scaled_w) / 2.0) as i32;
        let origin_y = rect.y + ((f64::from(rect.height) - scaled_h) / 2.0) as i32;

        Ok(Self {
            pixel_scale,
            origin_x,
            origin_y,
            chunk_width,
            chunk_height,
        })
    }

    /// Screen coordinate at the center of image pixel `(px, py)`'s
    /// enlarged footprint.
    #[inline]
    pub fn screen_point(&self, px: u32, py: u32) -> ScreenPoint {
        ScreenPoint {
            x: self.origin_x + ((f64::from(px) + 0.5) * self.pixel_scale) as i32,
            y: self.origin_y + ((f64::from(py) + 0.5) * self.pixel_scale) as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_area_rect_is_rejected() {
        let rect = CalibrationRect::new(10, 10, 0, 200);
        assert!(matches!(
            rect.validate(),
            Err(InputError::InvalidCalibration { width: 0, .. })
        ));
        assert!(ChunkGeometry::fit(&rect, 32, 32).is_err());
    }

    #[test]
    fn test_zero_chunk_dimensions_are_rejected() {
        let rect = CalibrationRect::new(0, 0, 400, 400);
        assert!(matches!(
            ChunkGeometry::fit(&rect, 0, 32),
            Err(InputError::InvalidChunk { width: 0, .. })
        ));
    }

    #[test]
    fn test_square_chunk_in_square_rect() {
        // 4x4 chunk in a 40x40 rect at (100, 100): scale 10, no centering
        // offset, pixel centers at origin + (idx + 0.5) * 10
        let rect = CalibrationRect::new(100, 100, 40, 40);
        let geometry = ChunkGeometry::fit(&rect, 4, 4).unwrap();

        assert_eq!(geometry.pixel_scale, 10.0);
        assert_eq!(geometry.origin_x, 100);
        assert_eq!(geometry.origin_y, 100);
        assert_eq!(geometry.screen_point(0, 0), ScreenPoint::new(105, 105));
        assert_eq!(geometry.screen_point(3, 3), ScreenPoint::new(135, 135));
    }

    #[test]
    fn test_wide_rect_centers_horizontally() {
        // 4x4 chunk in a 100x40 rect: scale limited by height to 10,
        // scaled chunk is 40 wide, so x offset is (100 - 40) / 2 = 30
        let rect = CalibrationRect::new(0, 0, 100, 40);
        let geometry = ChunkGeometry::fit(&rect, 4, 4).unwrap();

        assert_eq!(geometry.pixel_scale, 10.0);
        assert_eq!(geometry.origin_x, 30);
        assert_eq!(geometry.origin_y, 0);
    }

    #[test]
    fn test_tall_rect_centers_vertically() {
        let rect = CalibrationRect::new(50, 20, 40, 100);
        let geometry = ChunkGeometry::fit(&rect, 4, 4).unwrap();

        assert_eq!(geometry.pixel_scale, 10.0);
        assert_eq!(geometry.origin_x, 50);
        assert_eq!(geometry.origin_y, 20 + 30);
    }

    #[test]
    fn test_non_square_chunk_uses_smaller_ratio() {
        // 32x16 chunk in a 320x320 rect: width ratio 10, height ratio 20,
        // the chunk must fit so scale is 10
        let rect = CalibrationRect::new(0, 0, 320, 320);
        let geometry = ChunkGeometry::fit(&rect, 32, 16).unwrap();

        assert_eq!(geometry.pixel_scale, 10.0);
        assert_eq!(geometry.origin_x, 0);
        // Scaled height 160, centered in 320
        assert_eq!(geometry.origin_y, 80);
    }

    #[test]
    fn test_fractional_scale_truncates_screen_points() {
        // 3x3 chunk in a 10x10 rect: scale 10/3
        let rect = CalibrationRect::new(0, 0, 10, 10);
        let geometry = ChunkGeometry::fit(&rect, 3, 3).unwrap();

        assert!((geometry.pixel_scale - 10.0 / 3.0).abs() < 1e-9);
        // (0.5) * 3.333... = 1.666... -> 1
        assert_eq!(geometry.screen_point(0, 0), ScreenPoint::new(1, 1));
        // (2.5) * 3.333... = 8.333... -> 8
        assert_eq!(geometry.screen_point(2, 2), ScreenPoint::new(8, 8));
    }

    #[test]
    fn test_negative_rect_origin() {
        // Multi-monitor setups put rects at negative coordinates
        let rect = CalibrationRect::new(-200, -100, 40, 40);
        let geometry = ChunkGeometry::fit(&rect, 4, 4).unwrap();
        assert_eq!(geometry.screen_point(0, 0), ScreenPoint::new(-195, -95));
    }
}
