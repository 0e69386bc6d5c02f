//! Weighted DBSCAN over Oklab points
//!
//! Ester et al., "A Density-Based Algorithm for Discovering Clusters"
//! (KDD-96), adapted to weighted points: each point stands for all image
//! samples of one unique color, and density is measured as the weight
//! sum of a neighborhood rather than its point count.

use std::collections::VecDeque;

use crate::color::Oklab;

/// Label each point with a cluster id, or `None` for noise.
///
/// A point is a core point when the weights of everything within `radius`
/// of it (itself included) sum to at least `min_weight`. Clusters are the
/// connected components of core points plus the border points they reach.
///
/// Deterministic: points are visited in index order, so identical input
/// always produces identical labels. Border points reachable from two
/// clusters keep the first label they receive, as in the original
/// algorithm.
pub(crate) fn density_cluster(
    points: &[Oklab],
    weights: &[usize],
    radius: f32,
    min_weight: usize,
) -> Vec<Option<usize>> {
    debug_assert_eq!(points.len(), weights.len());
    let n = points.len();
    let radius_sq = radius * radius;

    // Neighborhoods include the point itself. O(n^2) is fine here: n is
    // the unique-color count, bounded by the downsampled pixel budget.
    let neighbors: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            (0..n)
                .filter(|&j| points[i].distance_squared(points[j]) <= radius_sq)
                .collect()
        })
        .collect();

    let core: Vec<bool> = neighbors
        .iter()
        .map(|ns| ns.iter().map(|&j| weights[j]).sum::<usize>() >= min_weight)
        .collect();

    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut expanded = vec![false; n];
    let mut next_id = 0;

    for seed in 0..n {
        if expanded[seed] || !core[seed] {
            continue;
        }
        let id = next_id;
        next_id += 1;

        let mut queue = VecDeque::new();
        queue.push_back(seed);
        expanded[seed] = true;
        labels[seed] = Some(id);

        while let Some(p) = queue.pop_front() {
            for &q in &neighbors[p] {
                if labels[q].is_none() {
                    labels[q] = Some(id);
                }
                if core[q] && !expanded[q] {
                    expanded[q] = true;
                    queue.push_back(q);
                }
            }
        }
    }

    labels
}
