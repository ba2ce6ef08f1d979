use crate::math::{Point2d, Rect};
use crate::{ConfigId, ObstacleSet, PlannerAttributes};
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

/// A candidate robot position: a disk of fixed radius centred on a point.
///
/// Two configurations at the same point are still distinct; identity is
/// the [ConfigId] assigned when the configuration joins a [ConfigPool].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Configuration {
    /// The centre of the robot in map coordinates.
    pos: Point2d,
    /// The robot radius.
    radius: f64,
}

impl Configuration {
    /// Creates a new configuration.
    pub const fn new(pos: Point2d, radius: f64) -> Self {
        Self { pos, radius }
    }

    /// Gets the centre of the configuration.
    pub fn pos(&self) -> Point2d {
        self.pos
    }

    /// Gets the robot radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The bounding square used for collision tests.
    pub fn footprint(&self) -> Rect {
        self.footprint_at(self.pos)
    }

    /// The bounding square this configuration would have if it were centred on `pos`.
    pub fn footprint_at(&self, pos: Point2d) -> Rect {
        Rect::square(pos, self.radius)
    }

    /// Checks whether the configuration overlaps none of the obstacles.
    pub fn is_free(&self, obstacles: &ObstacleSet) -> bool {
        !obstacles.intersects(&self.footprint())
    }
}

/// The candidate configurations of a planning episode.
///
/// The start and goal always come first, followed by the accepted
/// samples in the order they were generated.
#[derive(Clone, Debug)]
pub struct ConfigPool {
    configs: SlotMap<ConfigId, Configuration>,
    start: ConfigId,
    goal: ConfigId,
}

impl ConfigPool {
    /// Creates a pool holding only the start and goal configurations.
    ///
    /// Neither is checked for feasibility.
    pub fn new(start: Point2d, goal: Point2d, radius: f64) -> Self {
        let mut configs = SlotMap::with_key();
        let start = configs.insert(Configuration::new(start, radius));
        let goal = configs.insert(Configuration::new(goal, radius));
        Self {
            configs,
            start,
            goal,
        }
    }

    /// Builds the candidate pool for an episode.
    ///
    /// Each unit-square sample is scaled onto the map, snapped down to whole map units,
    /// and kept only if the robot would be clear of every obstacle there.
    ///
    /// # Parameters
    /// * `start` - The start position, in map coordinates
    /// * `goal` - The goal position, in map coordinates
    /// * `samples` - Points in the unit square
    /// * `attribs` - The map dimensions and robot radius
    /// * `obstacles` - The obstacles on the map
    pub fn generate(
        start: Point2d,
        goal: Point2d,
        samples: &[Point2d],
        attribs: &PlannerAttributes,
        obstacles: &ObstacleSet,
    ) -> Self {
        let mut pool = Self::new(start, goal, attribs.robot_radius);
        for sample in samples {
            let pos = Point2d::new(
                (sample.x * attribs.map_width).trunc(),
                (sample.y * attribs.map_height).trunc(),
            );
            let config = Configuration::new(pos, attribs.robot_radius);
            if config.is_free(obstacles) {
                pool.configs.insert(config);
            }
        }
        debug!(
            "accepted {} of {} samples ({} configurations)",
            pool.len() - 2,
            samples.len(),
            pool.len()
        );
        pool
    }

    /// Adds a configuration to the pool without checking its feasibility.
    pub fn insert(&mut self, pos: Point2d) -> ConfigId {
        let radius = self.configs[self.start].radius;
        self.configs.insert(Configuration::new(pos, radius))
    }

    /// The ID of the start configuration.
    pub fn start(&self) -> ConfigId {
        self.start
    }

    /// The ID of the goal configuration.
    pub fn goal(&self) -> ConfigId {
        self.goal
    }

    /// Gets the configuration with the given ID, if it belongs to this pool.
    pub fn get(&self, id: ConfigId) -> Option<&Configuration> {
        self.configs.get(id)
    }

    /// The number of configurations in the pool, including the start and goal.
    ///
    /// This is the "cardinality" reported by benchmarks.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Returns an iterator over the configurations in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfigId, &Configuration)> {
        self.configs.iter()
    }
}

impl std::ops::Index<ConfigId> for ConfigPool {
    type Output = Configuration;

    fn index(&self, id: ConfigId) -> &Configuration {
        &self.configs[id]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn attribs() -> PlannerAttributes {
        PlannerAttributes {
            map_width: 640.0,
            map_height: 480.0,
            robot_radius: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn start_and_goal_come_first() {
        let samples = [Point2d::new(0.5, 0.5), Point2d::new(0.25, 0.75)];
        let pool = ConfigPool::generate(
            Point2d::new(50.0, 50.0),
            Point2d::new(540.0, 380.0),
            &samples,
            &attribs(),
            &ObstacleSet::new(),
        );

        let positions = pool.iter().map(|(_, c)| c.pos()).collect::<Vec<_>>();
        assert_eq!(
            positions,
            vec![
                Point2d::new(50.0, 50.0),
                Point2d::new(540.0, 380.0),
                Point2d::new(320.0, 240.0),
                Point2d::new(160.0, 360.0),
            ]
        );
        assert_eq!(pool[pool.start()].pos(), Point2d::new(50.0, 50.0));
        assert_eq!(pool[pool.goal()].pos(), Point2d::new(540.0, 380.0));
    }

    #[test]
    fn samples_are_snapped_to_map_units() {
        let samples = [Point2d::new(0.1234, 0.9999)];
        let pool = ConfigPool::generate(
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 1.0),
            &samples,
            &attribs(),
            &ObstacleSet::new(),
        );
        let (_, config) = pool.iter().nth(2).unwrap();
        assert_eq!(config.pos(), Point2d::new(78.0, 479.0));
        assert_eq!(config.radius(), 10.0);
    }

    #[test]
    fn infeasible_samples_are_dropped() {
        let obstacles = [Rect::new(280.0, 200.0, 80.0, 80.0)]
            .into_iter()
            .collect::<ObstacleSet>();
        // The start is inside the obstacle, but is never checked
        let samples = [
            Point2d::new(0.5, 0.5),
            Point2d::new(0.1, 0.1),
            Point2d::new(0.44, 0.5),
        ];
        let pool = ConfigPool::generate(
            Point2d::new(300.0, 220.0),
            Point2d::new(600.0, 400.0),
            &samples,
            &attribs(),
            &obstacles,
        );
        assert_eq!(pool.len(), 3);
        assert!(!pool[pool.start()].is_free(&obstacles));
        let (_, accepted) = pool.iter().nth(2).unwrap();
        assert_eq!(accepted.pos(), Point2d::new(64.0, 48.0));
    }
}
