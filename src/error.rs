use thiserror::Error;

use crate::backend::BackendError;

/// Errors for caller-supplied input: images, calibration, tolerances,
/// color selections, configuration.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to load image: {0}")]
    Image(#[from] image::ImageError),

    #[error("No target colors selected")]
    EmptyColorSelection,

    #[error("Invalid color: {0}")]
    Color(#[from] color_cluster::ParseColorError),

    #[error("Calibration rectangle has zero area ({width}x{height})")]
    InvalidCalibration { width: u32, height: u32 },

    #[error("Chunk dimensions must be non-zero ({width}x{height})")]
    InvalidChunk { width: u32, height: u32 },

    #[error("Tolerance {0} is outside the supported range 0-50")]
    ToleranceOutOfRange(u8),

    #[error("Chunk index {index} out of range (grid has {total} chunks)")]
    ChunkIndexOutOfRange { index: usize, total: usize },

    #[error("Action delay must not be negative, got {0}")]
    NegativeDelay(f64),

    #[error("Failed to parse config: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Errors for starting and finishing drawing runs.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("A drawing run is already in progress")]
    AlreadyRunning,

    #[error("No drawing run has been started")]
    NotStarted,

    #[error("Pointer backend failed: {0}")]
    Pointer(#[from] BackendError),

    #[error("Drawing worker panicked")]
    WorkerPanicked,
}
