//! Color types for grouping and matching
//!
//! Two representations with distinct jobs:
//!
//! - **Rgb**: 8-bit color as stored in images and reported to callers.
//!   Carries the tolerance-based similarity predicate used for pixel
//!   matching and draw verification.
//! - **Oklab**: perceptually uniform space used only for clustering
//!   distance. Conversion is one-way; results always refer back to the
//!   original Rgb values.

mod error;
mod oklab;
mod rgb;

pub use error::ParseColorError;
pub use oklab::Oklab;
pub use rgb::Rgb;
