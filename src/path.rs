use crate::math::{blend, Point2d};
use crate::{ConfigId, ConfigPool};
use arrayvec::ArrayVec;
use cgmath::prelude::*;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of interpolation steps per path segment.
const SMOOTHING_STEPS: usize = 20;

/// A path through the roadmap, ordered from start to goal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    /// The configurations visited.
    ids: Vec<ConfigId>,
    /// The centres of the configurations visited.
    waypoints: Vec<Point2d>,
}

impl Path {
    /// Creates a path from a sequence of configurations ordered from start to goal.
    pub fn new(ids: Vec<ConfigId>, pool: &ConfigPool) -> Self {
        let waypoints = ids.iter().map(|id| pool[*id].pos()).collect();
        Self { ids, waypoints }
    }

    /// The configurations visited, from start to goal.
    pub fn ids(&self) -> &[ConfigId] {
        &self.ids
    }

    /// The waypoints, from start to goal.
    pub fn waypoints(&self) -> &[Point2d] {
        &self.waypoints
    }

    /// Returns an iterator over the straight segments of the path.
    pub fn segments(&self) -> impl Iterator<Item = (Point2d, Point2d)> + '_ {
        self.waypoints.iter().copied().tuple_windows()
    }

    /// The total length of the path.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Interpolates the path into a dense trajectory. See [smooth_waypoints].
    pub fn smooth(&self) -> Vec<Point2d> {
        smooth_waypoints(&self.waypoints)
    }
}

/// Interpolates a sequence of waypoints into a dense trajectory for playback.
///
/// Each segment contributes 21 evenly spaced points, including both of its ends,
/// so the trajectory has `21 * (waypoints.len() - 1)` points and visits every
/// interior waypoint twice. Fewer than two waypoints give an empty trajectory.
pub fn smooth_waypoints(waypoints: &[Point2d]) -> Vec<Point2d> {
    waypoints
        .iter()
        .tuple_windows()
        .flat_map(|(from, to)| interpolate(*to, *from))
        .collect()
}

/// Computes `p1 * u + p2 * (1 - u)` for `u` stepping from 0 to 1,
/// so the points run from `p2` to `p1`.
fn interpolate(p1: Point2d, p2: Point2d) -> ArrayVec<Point2d, { SMOOTHING_STEPS + 1 }> {
    (0..=SMOOTHING_STEPS)
        .map(|i| blend(p1, p2, i as f64 / SMOOTHING_STEPS as f64))
        .collect()
}
