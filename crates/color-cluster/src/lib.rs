//! color-cluster: perceptual color grouping for reference images
//!
//! This library takes the raw pixels of a reference image and groups them
//! into perceptually coherent color families, so a user (or an automated
//! drawing engine) can work one family at a time.
//!
//! # Quick Start
//!
//! [`group_colors`] is the primary entry point:
//!
//! ```
//! use color_cluster::{group_colors, GroupingOptions, Rgb};
//!
//! // A tiny image: 3 dark pixels, 1 light pixel
//! let pixels = vec![
//!     Rgb::new(10, 10, 10),
//!     Rgb::new(12, 11, 10),
//!     Rgb::new(11, 10, 12),
//!     Rgb::new(250, 250, 250),
//! ];
//! let groups = group_colors(&pixels, 2, 2, &GroupingOptions::default());
//!
//! // Below the clustering floor, all unique colors land in one family
//! assert_eq!(groups.len(), 1);
//! ```
//!
//! # Why a Perceptual Color Space
//!
//! Clustering happens in OKLab (Björn Ottosson, 2020), not in raw RGB.
//! Euclidean distance in RGB correlates poorly with perceived color
//! difference: a dark red and a bright red are numerically far apart but
//! belong to the same visual family, while two mid-tones with similar
//! byte values can look unrelated. In OKLab, equal numeric distances
//! correspond to roughly equal perceived differences, so a single
//! neighborhood radius behaves consistently across the whole gamut.
//!
//! The pipeline is:
//!
//! ```text
//! Rgb samples           (downsampled, longest edge <= 150)
//!     |
//!     v
//! unique colors + counts (dedup keeps clustering cheap, counts keep
//!     |                   density and ordering faithful to the image)
//!     v
//! Oklab                 (gamma decode + Ottosson matrices)
//!     |
//!     v
//! density or centroid clustering
//!     |
//!     v
//! ColorGroup list       (original Rgb values, ordered by pixel count)
//! ```
//!
//! Grouping reports the *original* RGB values; OKLab is only the space in
//! which neighborhoods are measured.
//!
//! # Similarity vs Equality
//!
//! [`Rgb`] equality is exact tuple equality. The tolerance-based relation
//! [`Rgb::within_tolerance`] (a per-channel Chebyshev bound) is a separate
//! predicate used by callers for pixel matching and verification; it plays
//! no role in clustering.

pub mod cluster;
pub mod color;
pub mod group;
pub mod sample;


pub use cluster::ClusterMode;
pub use color::{Oklab, ParseColorError, Rgb};
pub use group::{group_colors, ColorGroup, GroupLabel, GroupingOptions};
pub use sample::downsample;
