//! Star discrepancy of point sets, used to pick the most uniform batch
//! out of a precomputed set.

use crate::math::Point2d;
use itertools::Itertools;

/// The squared L2-star discrepancy of a set of points in the unit square,
/// computed with Warnock's formula. Lower is more uniform.
pub fn l2_star_discrepancy(points: &[Point2d]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let n = points.len() as f64;
    let products = points
        .iter()
        .map(|p| (1.0 - p.x * p.x) * (1.0 - p.y * p.y))
        .sum::<f64>();
    let pairs = points
        .iter()
        .cartesian_product(points)
        .map(|(p, q)| (1.0 - p.x.max(q.x)) * (1.0 - p.y.max(q.y)))
        .sum::<f64>();
    1.0 / 9.0 - products / (2.0 * n) + pairs / (n * n)
}

/// Splits the points into consecutive batches of `n` and finds the one with the
/// lowest discrepancy. Any partial batch at the end is ignored.
///
/// Returns the index of the best batch and its discrepancy, or `None` if there
/// is no complete batch.
pub fn best_batch(points: &[Point2d], n: usize) -> Option<(usize, f64)> {
    if n == 0 {
        return None;
    }
    points
        .chunks_exact(n)
        .map(l2_star_discrepancy)
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}
