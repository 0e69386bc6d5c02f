//! Clustering strategies over Oklab samples
//!
//! Two interchangeable strategies produce per-sample labels:
//!
//! - **Density** (DBSCAN): groups emerge from neighborhoods of a fixed
//!   perceptual radius; sparse colors are labeled as noise. The natural
//!   default since the number of color families in an image is unknown
//!   up front.
//! - **Fixed** (k-means): exactly `groups` centroids, for callers that
//!   want a predetermined palette size.
//!
//! Both operate on deduplicated colors weighted by their sample counts,
//! so cost scales with the number of *unique* colors rather than pixels.

mod dbscan;
mod kmeans;

pub(crate) use dbscan::density_cluster;
pub(crate) use kmeans::centroid_cluster;

/// Default neighborhood radius for density clustering, in Oklab units.
///
/// Roughly the distance between adjacent shades of one hue; large enough
/// to merge gradient steps, small enough to keep distinct hues apart.
pub const DEFAULT_RADIUS: f32 = 0.06;

/// Strategy used to partition sampled colors into families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterMode {
    /// DBSCAN with the given neighborhood radius (perceptual sensitivity).
    /// Colors in no dense neighborhood end up unclustered.
    Density { radius: f32 },
    /// K-means with a caller-chosen number of groups. Every color is
    /// assigned; nothing is left unclustered.
    Fixed { groups: usize },
}

impl Default for ClusterMode {
    fn default() -> Self {
        ClusterMode::Density {
            radius: DEFAULT_RADIUS,
        }
    }
}
