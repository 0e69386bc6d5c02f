pub mod config;
pub mod geometry;

pub use config::{DrawConfig, MAX_TOLERANCE};
pub use geometry::{CalibrationRect, ChunkGeometry, ScreenPoint};
