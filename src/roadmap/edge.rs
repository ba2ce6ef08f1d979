use crate::math::blended_points;
use crate::{Configuration, ObstacleSet};

/// The default number of steps used to sample an edge, giving 101 sample points.
pub const DEFAULT_EDGE_RESOLUTION: usize = 100;

/// Checks whether the straight move from `a` to `b` passes through an obstacle.
///
/// The segment between the two centres is sampled at `resolution + 1` evenly spaced points,
/// and the robot's footprint is tested at each of them. An obstacle thinner than the gap
/// between two samples can be missed, so `resolution` trades accuracy for speed.
pub fn crosses_obstacle(
    a: &Configuration,
    b: &Configuration,
    obstacles: &ObstacleSet,
    resolution: usize,
) -> bool {
    obstacles.iter().any(|rect| {
        blended_points(a.pos(), b.pos(), resolution)
            .any(|pos| rect.intersects(&b.footprint_at(pos)))
    })
}
