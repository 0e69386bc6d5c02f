//! Pointer and screen-capture backends
//!
//! The engine drives drawing through two narrow traits so tests can run
//! against scripted fakes and the `desktop` feature can plug in the real
//! OS backends.

use color_cluster::Rgb;
use thiserror::Error;

use crate::models::ScreenPoint;

#[cfg(feature = "desktop")]
mod desktop;

#[cfg(feature = "desktop")]
pub use desktop::{DesktopPointer, DesktopProbe};

/// Failure in a pointer or capture backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Pointer action failed: {0}")]
    Pointer(String),

    #[error("Screen capture failed: {0}")]
    Capture(String),

    #[error("Point ({x}, {y}) is outside the capturable screen")]
    OutOfBounds { x: i32, y: i32 },
}

/// Blocking control of the system pointer.
///
/// All methods are fallible: pointer injection can be refused by the OS
/// at any time (permissions revoked, display gone).
pub trait PointerDriver: Send {
    /// Current pointer position.
    fn position(&mut self) -> Result<ScreenPoint, BackendError>;

    /// Move the pointer to an absolute screen coordinate.
    fn move_to(&mut self, point: ScreenPoint) -> Result<(), BackendError>;

    /// Press the primary button and hold it.
    fn press(&mut self) -> Result<(), BackendError>;

    /// Release the primary button.
    fn release(&mut self) -> Result<(), BackendError>;

    /// Full primary-button click (press and release).
    fn click(&mut self) -> Result<(), BackendError>;
}

/// Blocking read of single screen pixels, used to verify drawn targets.
pub trait PixelProbe: Send {
    /// Color currently on screen at `point`.
    fn pixel_at(&mut self, point: ScreenPoint) -> Result<Rgb, BackendError>;
}
