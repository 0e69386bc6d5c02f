//! Color group assembly
//!
//! Turns raw pixels into an ordered list of [`ColorGroup`]s: downsample,
//! deduplicate, convert to Oklab, cluster, then map every label back to
//! the original RGB values. Oklab never leaks into the results.

use std::collections::BTreeMap;
use std::fmt;

use crate::cluster::{centroid_cluster, density_cluster, ClusterMode};
use crate::color::{Oklab, Rgb};
use crate::sample::{downsample, DEFAULT_MAX_EDGE};

/// Below this many samples, clustering density estimates are meaningless
/// and all colors fall into a single group.
const MIN_SAMPLES_FOR_CLUSTERING: usize = 50;

/// Core-point weight floor for density clustering, as a divisor of the
/// sample count (0.5% of samples, never below the absolute floor).
const MIN_WEIGHT_DIVISOR: usize = 200;
const MIN_WEIGHT_FLOOR: usize = 5;

/// Identity of a color group.
///
/// Structured rather than a display string so callers can branch on it
/// without parsing. Formatting lives in the `Display` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupLabel {
    /// A clustered color family; ordinals follow the output order
    /// (0 is the largest family).
    Family(usize),
    /// Colors belonging to no dense neighborhood (density mode only).
    Unclustered,
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::Family(ordinal) => write!(f, "Family {}", ordinal + 1),
            GroupLabel::Unclustered => write!(f, "Unclustered"),
        }
    }
}

/// One perceptual color family extracted from an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGroup {
    pub label: GroupLabel,
    /// The group's most frequent original color.
    pub representative: Rgb,
    /// Total samples across all member colors.
    pub pixel_count: usize,
    /// Deduplicated member colors, darkest first (ascending channel sum).
    pub colors: Vec<Rgb>,
}

/// Tuning for [`group_colors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupingOptions {
    pub mode: ClusterMode,
    /// Longest-edge cap applied before clustering.
    pub max_edge: u32,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            mode: ClusterMode::default(),
            max_edge: DEFAULT_MAX_EDGE,
        }
    }
}

/// Group the pixels of a row-major image into perceptual color families.
///
/// Groups are ordered by descending pixel count, with the `Unclustered`
/// group (if any) always last. `Family` ordinals match that order.
/// Every sampled color appears in exactly one group.
///
/// Deterministic: identical input and options produce identical output.
/// An empty pixel buffer produces an empty list.
pub fn group_colors(
    pixels: &[Rgb],
    width: u32,
    height: u32,
    options: &GroupingOptions,
) -> Vec<ColorGroup> {
    let samples = downsample(pixels, width, height, options.max_edge);
    if samples.is_empty() {
        return Vec::new();
    }

    // Dedupe with counts. BTreeMap keeps unique-color order stable.
    let mut counts: BTreeMap<Rgb, usize> = BTreeMap::new();
    for &pixel in &samples {
        *counts.entry(pixel).or_insert(0) += 1;
    }
    let unique: Vec<Rgb> = counts.keys().copied().collect();
    let weights: Vec<usize> = counts.values().copied().collect();

    // Too few samples for density to mean anything: one family
    if samples.len() < MIN_SAMPLES_FOR_CLUSTERING {
        return vec![assemble(GroupLabel::Family(0), &unique, &weights, |_| true)];
    }

    let labels: Vec<Option<usize>> = match options.mode {
        ClusterMode::Density { radius } => {
            let min_weight = (samples.len() / MIN_WEIGHT_DIVISOR).max(MIN_WEIGHT_FLOOR);
            let points: Vec<Oklab> = unique.iter().map(|&c| Oklab::from(c)).collect();
            density_cluster(&points, &weights, radius, min_weight)
        }
        ClusterMode::Fixed { groups } => {
            let k = groups.clamp(1, unique.len());
            let points: Vec<Oklab> = unique.iter().map(|&c| Oklab::from(c)).collect();
            centroid_cluster(&points, &weights, k)
                .into_iter()
                .map(Some)
                .collect()
        }
    };

    // Collect raw clusters plus the noise bucket
    let cluster_count = labels.iter().flatten().max().map_or(0, |&m| m + 1);
    let mut families: Vec<ColorGroup> = (0..cluster_count)
        .map(|id| {
            assemble(GroupLabel::Family(id), &unique, &weights, |i| {
                labels[i] == Some(id)
            })
        })
        .collect();

    // Largest family first; ordinals are reassigned to match
    families.sort_by(|a, b| b.pixel_count.cmp(&a.pixel_count).then(a.label.cmp(&b.label)));
    for (ordinal, family) in families.iter_mut().enumerate() {
        family.label = GroupLabel::Family(ordinal);
    }

    if labels.iter().any(Option::is_none) {
        families.push(assemble(GroupLabel::Unclustered, &unique, &weights, |i| {
            labels[i].is_none()
        }));
    }

    families
}

/// Build one group from the unique colors selected by `member`.
fn assemble(
    label: GroupLabel,
    unique: &[Rgb],
    weights: &[usize],
    member: impl Fn(usize) -> bool,
) -> ColorGroup {
    let mut colors: Vec<(Rgb, usize)> = unique
        .iter()
        .copied()
        .zip(weights.iter().copied())
        .enumerate()
        .filter(|&(i, _)| member(i))
        .map(|(_, pair)| pair)
        .collect();

    let pixel_count = colors.iter().map(|&(_, w)| w).sum();
    let representative = colors
        .iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map_or(Rgb::new(0, 0, 0), |&(c, _)| c);

    colors.sort_by(|a, b| a.0.channel_sum().cmp(&b.0.channel_sum()).then(a.0.cmp(&b.0)));

    ColorGroup {
        label,
        representative,
        pixel_count,
        colors: colors.into_iter().map(|(c, _)| c).collect(),
    }
}
