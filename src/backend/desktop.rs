//! Real OS backends behind the `desktop` feature
//!
//! Pointer injection goes through `enigo`; pixel reads go through `xcap`
//! by capturing the monitor under the requested point.

use color_cluster::Rgb;
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use xcap::Monitor;

use crate::models::ScreenPoint;

use super::{BackendError, PixelProbe, PointerDriver};

/// System pointer driven by `enigo`.
pub struct DesktopPointer {
    enigo: Enigo,
}

impl DesktopPointer {
    pub fn new() -> Result<Self, BackendError> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| BackendError::Pointer(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl PointerDriver for DesktopPointer {
    fn position(&mut self) -> Result<ScreenPoint, BackendError> {
        self.enigo
            .location()
            .map(|(x, y)| ScreenPoint::new(x, y))
            .map_err(|e| BackendError::Pointer(e.to_string()))
    }

    fn move_to(&mut self, point: ScreenPoint) -> Result<(), BackendError> {
        self.enigo
            .move_mouse(point.x, point.y, Coordinate::Abs)
            .map_err(|e| BackendError::Pointer(e.to_string()))
    }

    fn press(&mut self) -> Result<(), BackendError> {
        self.enigo
            .button(Button::Left, Direction::Press)
            .map_err(|e| BackendError::Pointer(e.to_string()))
    }

    fn release(&mut self) -> Result<(), BackendError> {
        self.enigo
            .button(Button::Left, Direction::Release)
            .map_err(|e| BackendError::Pointer(e.to_string()))
    }

    fn click(&mut self) -> Result<(), BackendError> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| BackendError::Pointer(e.to_string()))
    }
}

/// Screen pixel reader backed by `xcap` monitor capture.
///
/// Each read captures the monitor under the point. Captures are not
/// cached: verification needs the pixel as it is *now*, after the drawing
/// application has repainted.
pub struct DesktopProbe;

impl DesktopProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesktopProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen rectangle of one monitor, read out of the fallible `xcap`
/// attribute getters once per probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MonitorBounds {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl MonitorBounds {
    fn query(monitor: &Monitor) -> Result<Self, BackendError> {
        let capture_err = |e: xcap::XCapError| BackendError::Capture(e.to_string());
        Ok(Self {
            x: monitor.x().map_err(capture_err)?,
            y: monitor.y().map_err(capture_err)?,
            width: monitor.width().map_err(capture_err)?,
            height: monitor.height().map_err(capture_err)?,
        })
    }

    fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && i64::from(point.x) < i64::from(self.x) + i64::from(self.width)
            && i64::from(point.y) < i64::from(self.y) + i64::from(self.height)
    }

    /// Monitor-local coordinate of a contained point.
    fn local(&self, point: ScreenPoint) -> (u32, u32) {
        ((point.x - self.x) as u32, (point.y - self.y) as u32)
    }
}

impl PixelProbe for DesktopProbe {
    fn pixel_at(&mut self, point: ScreenPoint) -> Result<Rgb, BackendError> {
        let monitors = Monitor::all().map_err(|e| BackendError::Capture(e.to_string()))?;
        for monitor in monitors {
            let bounds = MonitorBounds::query(&monitor)?;
            if !bounds.contains(point) {
                continue;
            }

            let capture = monitor
                .capture_image()
                .map_err(|e| BackendError::Capture(e.to_string()))?;

            let (local_x, local_y) = bounds.local(point);
            if local_x >= capture.width() || local_y >= capture.height() {
                // HiDPI monitors can report logical bounds larger than the
                // captured bitmap
                return Err(BackendError::OutOfBounds {
                    x: point.x,
                    y: point.y,
                });
            }

            let pixel = capture.get_pixel(local_x, local_y);
            return Ok(Rgb::new(pixel.0[0], pixel.0[1], pixel.0[2]));
        }

        Err(BackendError::OutOfBounds {
            x: point.x,
            y: point.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_bounds_containment() {
        let bounds = MonitorBounds {
            x: -1920,
            y: 0,
            width: 1920,
            height: 1080,
        };

        assert!(bounds.contains(ScreenPoint::new(-1920, 0)));
        assert!(bounds.contains(ScreenPoint::new(-1, 1079)));
        assert!(!bounds.contains(ScreenPoint::new(0, 0)));
        assert!(!bounds.contains(ScreenPoint::new(-1921, 500)));
        assert!(!bounds.contains(ScreenPoint::new(-500, 1080)));
    }

    #[test]
    fn test_monitor_bounds_local_coordinates() {
        let bounds = MonitorBounds {
            x: -1920,
            y: 100,
            width: 1920,
            height: 1080,
        };

        assert_eq!(bounds.local(ScreenPoint::new(-1920, 100)), (0, 0));
        assert_eq!(bounds.local(ScreenPoint::new(-1000, 600)), (920, 500));
    }
}
