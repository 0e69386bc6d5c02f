//! Weighted k-means over Oklab points
//!
//! Deterministic variant: no random seeding. The first centroid is the
//! heaviest point and the rest are chosen farthest-first, so identical
//! input always converges to identical assignments.

use crate::color::Oklab;

/// Iteration cap; Lloyd's algorithm on a few hundred unique colors
/// settles well before this.
const MAX_ITERATIONS: usize = 20;

/// Centroid movement (squared Oklab distance) below which iteration stops.
const CONVERGENCE_THRESHOLD: f32 = 1e-4;

/// Assign each point to one of `k` clusters, returning per-point cluster
/// ids in `0..k`.
///
/// Centroid updates are weighted by each point's sample count so a color
/// covering half the image pulls its centroid accordingly.
///
/// Callers must ensure `1 <= k <= points.len()`.
pub(crate) fn centroid_cluster(points: &[Oklab], weights: &[usize], k: usize) -> Vec<usize> {
    debug_assert_eq!(points.len(), weights.len());
    debug_assert!(k >= 1 && k <= points.len());
    let n = points.len();

    // Seed: heaviest point first, then farthest-first
    let mut centroids: Vec<Oklab> = Vec::with_capacity(k);
    let heaviest = (0..n)
        .max_by(|&a, &b| weights[a].cmp(&weights[b]).then(b.cmp(&a)))
        .unwrap_or(0);
    centroids.push(points[heaviest]);
    while centroids.len() < k {
        let farthest = (0..n)
            .max_by(|&a, &b| {
                let da = min_distance_sq(points[a], &centroids);
                let db = min_distance_sq(points[b], &centroids);
                da.total_cmp(&db).then(b.cmp(&a))
            })
            .unwrap_or(0);
        centroids.push(points[farthest]);
    }

    let mut assignments = vec![0usize; n];
    for _ in 0..MAX_ITERATIONS {
        // Assignment step
        for (i, point) in points.iter().enumerate() {
            assignments[i] = nearest_centroid(*point, &centroids);
        }

        // Weighted update step
        let mut sums = vec![(0.0f64, 0.0f64, 0.0f64, 0u64); k];
        for (i, point) in points.iter().enumerate() {
            let w = weights[i] as u64;
            let entry = &mut sums[assignments[i]];
            entry.0 += f64::from(point.l) * w as f64;
            entry.1 += f64::from(point.a) * w as f64;
            entry.2 += f64::from(point.b) * w as f64;
            entry.3 += w;
        }

        let mut max_shift = 0.0f32;
        for (c, &(sl, sa, sb, w)) in sums.iter().enumerate() {
            // An emptied cluster keeps its old centroid
            if w == 0 {
                continue;
            }
            let updated = Oklab::new(
                (sl / w as f64) as f32,
                (sa / w as f64) as f32,
                (sb / w as f64) as f32,
            );
            max_shift = max_shift.max(centroids[c].distance_squared(updated));
            centroids[c] = updated;
        }

        if max_shift < CONVERGENCE_THRESHOLD {
            break;
        }
    }

    // Final assignment against the settled centroids
    for (i, point) in points.iter().enumerate() {
        assignments[i] = nearest_centroid(*point, &centroids);
    }
    assignments
}

fn min_distance_sq(point: Oklab, centroids: &[Oklab]) -> f32 {
    centroids
        .iter()
        .map(|&c| point.distance_squared(c))
        .fold(f32::INFINITY, f32::min)
}

fn nearest_centroid(point: Oklab, centroids: &[Oklab]) -> usize {
    let mut best = 0;
    let mut best_d = f32::INFINITY;
    for (c, &centroid) in centroids.iter().enumerate() {
        let d = point.distance_squared(centroid);
        if d < best_d {
            best_d = d;
            best = c;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_equals_one_assigns_everything_to_zero() {
        let points = vec![
            Oklab::new(0.1, 0.0, 0.0),
            Oklab::new(0.5, 0.2, -0.1),
            Oklab::new(0.9, -0.1, 0.3),
        ];
        let assignments = centroid_cluster(&points, &[1, 1, 1], 1);
        assert_eq!(assignments, vec![0, 0, 0]);
    }

    #[test]
    fn test_separated_blobs_split_cleanly() {
        let points = vec![
            Oklab::new(0.2, 0.0, 0.0),
            Oklab::new(0.22, 0.01, 0.0),
            Oklab::new(0.8, 0.2, 0.2),
            Oklab::new(0.82, 0.21, 0.19),
        ];
        let assignments = centroid_cluster(&points, &[5, 5, 5, 5], 2);

        assert_eq!(assignments[0], assignments[1]);
        assert_eq!(assignments[2], assignments[3]);
        assert_ne!(assignments[0], assignments[2]);
    }

    #[test]
    fn test_k_equals_n_gives_each_point_its_own_cluster() {
        let points = vec![
            Oklab::new(0.1, 0.0, 0.0),
            Oklab::new(0.5, 0.1, 0.0),
            Oklab::new(0.9, 0.0, 0.2),
        ];
        let assignments = centroid_cluster(&points, &[2, 3, 4], 3);
        let mut seen = assignments.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 3, "every point should own a cluster");
    }

    #[test]
    fn test_deterministic_assignments() {
        let points: Vec<Oklab> = (0..30)
            .map(|i| Oklab::new(0.1 + 0.025 * (i % 11) as f32, 0.01 * (i % 5) as f32, 0.0))
            .collect();
        let weights: Vec<usize> = (0..30).map(|i| 1 + i % 6).collect();

        let a = centroid_cluster(&points, &weights, 4);
        let b = centroid_cluster(&points, &weights, 4);
        assert_eq!(a, b);
    }
}
