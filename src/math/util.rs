use super::Point2d;
use cgmath::prelude::*;

/// The Euclidean distance between two points, truncated towards zero.
///
/// Roadmap edge costs and the search heuristic are measured in whole map units,
/// so neighbour selection and path search agree on what "nearest" means.
pub fn truncated_distance(p1: Point2d, p2: Point2d) -> u32 {
    p1.distance(p2) as u32
}

/// Blends two points, weighting `p1` by `u` and `p2` by `1 - u`.
///
/// Note the argument order: `u = 0` yields `p2` and `u = 1` yields `p1`.
pub fn blend(p1: Point2d, p2: Point2d, u: f64) -> Point2d {
    Point2d::from_vec(p1.to_vec() * u + p2.to_vec() * (1.0 - u))
}

/// The points `blend(p1, p2, i / steps)` for `i` in `0..=steps`.
pub fn blended_points(p1: Point2d, p2: Point2d, steps: usize) -> impl Iterator<Item = Point2d> {
    let steps = steps.max(1);
    (0..=steps).map(move |i| blend(p1, p2, i as f64 / steps as f64))
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn distance_is_truncated() {
        let a = Point2d::new(0.0, 0.0);
        assert_eq!(truncated_distance(a, Point2d::new(3.0, 4.0)), 5);
        assert_eq!(truncated_distance(a, Point2d::new(1.0, 1.0)), 1);
        assert_eq!(truncated_distance(a, Point2d::new(0.0, 0.99)), 0);
        assert_eq!(
            truncated_distance(Point2d::new(50.0, 50.0), Point2d::new(540.0, 380.0)),
            590
        );
    }

    #[test]
    fn blend_weights_first_point_by_u() {
        let p1 = Point2d::new(10.0, 20.0);
        let p2 = Point2d::new(30.0, 60.0);
        assert_eq!(blend(p1, p2, 0.0), p2);
        assert_eq!(blend(p1, p2, 1.0), p1);
        let mid = blend(p1, p2, 0.5);
        assert_approx_eq!(mid.x, 20.0);
        assert_approx_eq!(mid.y, 40.0);
    }

    #[test]
    fn blended_points_include_both_ends() {
        let p1 = Point2d::new(0.0, 0.0);
        let p2 = Point2d::new(100.0, 0.0);
        let points = blended_points(p1, p2, 100).collect::<Vec<_>>();
        assert_eq!(points.len(), 101);
        assert_eq!(points[0], p2);
        assert_eq!(points[100], p1);
        assert_approx_eq!(points[25].x, 75.0);
    }
}
