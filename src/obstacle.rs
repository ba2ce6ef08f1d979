use crate::math::{Point2d, Rect};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The static obstacles of a map, each an axis-aligned rectangle.
///
/// The set is read-only for the lifetime of a planning episode.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObstacleSet {
    rects: Vec<Rect>,
}

/// Something which can supply the obstacles for a map.
pub trait ObstacleSource {
    /// Gets the obstacles of the given level.
    fn obstacles(&self, level: u32) -> ObstacleSet;
}

impl ObstacleSet {
    /// Creates an empty obstacle set.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a rectangular obstacle.
    pub fn add(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    /// Returns an iterator over the obstacles.
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Returns true if the region overlaps any obstacle.
    pub fn intersects(&self, region: &Rect) -> bool {
        self.rects.iter().any(|rect| rect.intersects(region))
    }

    /// Checks whether a robot of the given radius centred on `pos` is clear of every obstacle.
    ///
    /// The robot is tested by its bounding square, so a robot touching
    /// an obstacle along an edge is still considered free.
    pub fn is_free(&self, pos: Point2d, radius: f64) -> bool {
        !self.intersects(&Rect::square(pos, radius))
    }
}

impl FromIterator<Rect> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        Self {
            rects: iter.into_iter().collect(),
        }
    }
}

impl ObstacleSource for ObstacleSet {
    fn obstacles(&self, _level: u32) -> ObstacleSet {
        self.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_set_is_always_free() {
        let obstacles = ObstacleSet::new();
        assert!(obstacles.is_empty());
        for (x, y) in [(0.0, 0.0), (320.0, 240.0), (-50.0, 1e6)] {
            assert!(obstacles.is_free(Point2d::new(x, y), 10.0));
        }
    }

    #[test]
    fn robot_footprint_is_checked() {
        let obstacles = [Rect::new(100.0, 100.0, 50.0, 150.0)]
            .into_iter()
            .collect::<ObstacleSet>();

        // Centre inside the obstacle
        assert!(!obstacles.is_free(Point2d::new(120.0, 120.0), 10.0));
        // Centre outside, but the footprint overlaps
        assert!(!obstacles.is_free(Point2d::new(95.0, 120.0), 10.0));
        // Footprint touches the left edge only
        assert!(obstacles.is_free(Point2d::new(90.0, 120.0), 10.0));
        assert!(obstacles.is_free(Point2d::new(300.0, 300.0), 10.0));
    }

    #[test]
    fn feasibility_is_repeatable() {
        let obstacles = [
            Rect::new(75.0, 150.0, 37.0, 150.0),
            Rect::new(300.0, 150.0, 50.0, 150.0),
        ]
        .into_iter()
        .collect::<ObstacleSet>();
        let pos = Point2d::new(310.0, 140.0);
        let first = obstacles.is_free(pos, 10.0);
        for _ in 0..10 {
            assert_eq!(obstacles.is_free(pos, 10.0), first);
        }
        assert_eq!(obstacles.obstacles(3), obstacles);
    }
}
