//! Tracebrush - color-guided drawing automation
//!
//! Groups a reference image's colors into perceptual families, maps its
//! pixels onto a user-calibrated screen region, and drives the system
//! pointer to draw matching pixels with verification and retry.
//! This library exposes modules for integration testing.

pub mod backend;
pub mod chunk;
pub mod engine;
pub mod error;
pub mod locate;
pub mod models;

pub use color_cluster;
