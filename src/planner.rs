use crate::math::Point2d;
use crate::roadmap::DEFAULT_EDGE_RESOLUTION;
use crate::{
    AStar, ConfigPool, Distribution, EdgeValidation, ObstacleSet, Path, PlanError, Result,
    Roadmap, Sampler,
};
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The attributes of a planner.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannerAttributes {
    /// The width of the map in map units.
    pub map_width: f64,
    /// The height of the map in map units.
    pub map_height: f64,
    /// The radius of the robot in map units.
    pub robot_radius: f64,
    /// The number of points to request from the sampler.
    pub num_samples: usize,
    /// The number of nearest neighbours each configuration is connected to.
    pub k: usize,
    /// When roadmap edges are checked against the obstacles.
    pub edge_validation: EdgeValidation,
    /// The number of steps used to sample each edge when checking it.
    pub edge_resolution: usize,
}

impl Default for PlannerAttributes {
    fn default() -> Self {
        Self {
            map_width: 640.0,
            map_height: 480.0,
            robot_radius: 10.0,
            num_samples: 32,
            k: 15,
            edge_validation: EdgeValidation::Lazy,
            edge_resolution: DEFAULT_EDGE_RESOLUTION,
        }
    }
}

impl PlannerAttributes {
    /// Checks that the attributes describe a usable map and robot.
    pub fn validate(&self) -> Result<()> {
        if !(self.map_width > 0.0 && self.map_height > 0.0) {
            return Err(PlanError::InvalidAttributes("map dimensions must be positive"));
        }
        if !(self.robot_radius > 0.0) {
            return Err(PlanError::InvalidAttributes("robot radius must be positive"));
        }
        if self.edge_resolution == 0 {
            return Err(PlanError::InvalidAttributes("edge resolution must be at least 1"));
        }
        Ok(())
    }
}

/// Plans paths with a probabilistic roadmap.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    attributes: PlannerAttributes,
}

/// The result of a single planning episode.
#[derive(Clone, Debug)]
pub struct Episode {
    /// The candidate configurations.
    pool: ConfigPool,
    /// The roadmap built over the candidates.
    roadmap: Roadmap,
    /// Whether a path was found.
    outcome: EpisodeOutcome,
    /// Debugging geometry recorded for the episode.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

/// Whether an episode found a path.
#[derive(Clone, Debug, PartialEq)]
pub enum EpisodeOutcome {
    /// A path was found.
    Success {
        /// The path through the roadmap.
        path: Path,
        /// The path interpolated for playback.
        trajectory: Vec<Point2d>,
    },
    /// The roadmap does not connect the start to the goal.
    Miss,
}

impl Planner {
    /// Creates a new planner.
    pub fn new(attributes: PlannerAttributes) -> Self {
        Self { attributes }
    }

    /// Gets the planner's attributes.
    pub fn attributes(&self) -> &PlannerAttributes {
        &self.attributes
    }

    /// Builds the candidate pool and roadmap for an episode, without searching it.
    ///
    /// Use this with [AStar] to drive the search step by step.
    ///
    /// # Parameters
    /// * `start` - The start position, in map coordinates
    /// * `goal` - The goal position, in map coordinates
    /// * `obstacles` - The obstacles on the map
    /// * `samples` - Points in the unit square, as produced by a [Sampler]
    pub fn build_roadmap(
        &self,
        start: Point2d,
        goal: Point2d,
        obstacles: &ObstacleSet,
        samples: &[Point2d],
    ) -> Result<(ConfigPool, Roadmap)> {
        self.attributes.validate()?;
        let pool = ConfigPool::generate(start, goal, samples, &self.attributes, obstacles);
        let roadmap = Roadmap::build(&pool, obstacles, &self.attributes)?;
        Ok((pool, roadmap))
    }

    /// Plans a path from `start` to `goal` through a roadmap built from the given samples.
    ///
    /// Not finding a path is not an error; see [Episode::is_success].
    pub fn plan(
        &self,
        start: Point2d,
        goal: Point2d,
        obstacles: &ObstacleSet,
        samples: &[Point2d],
    ) -> Result<Episode> {
        let (pool, roadmap) = self.build_roadmap(start, goal, obstacles, samples)?;
        let search = AStar::new(&pool, &roadmap, obstacles, self.attributes.edge_resolution);
        let path = search.run()?;
        let episode = Episode::new(pool, roadmap, path);

        debug!(
            "episode finished: success = {}, cardinality = {}, length = {:?}",
            episode.is_success(),
            episode.cardinality(),
            episode.path_length()
        );
        #[cfg(feature = "debug")]
        let episode = episode.with_debug(obstacles, self.attributes.edge_resolution);

        Ok(episode)
    }

    /// Draws `num_samples` points from the sampler, then plans as in [Planner::plan].
    ///
    /// The sampler validates the request before any planning work starts.
    pub fn plan_with_sampler(
        &self,
        start: Point2d,
        goal: Point2d,
        obstacles: &ObstacleSet,
        sampler: &mut impl Sampler,
        distribution: Distribution,
    ) -> Result<Episode> {
        let samples = sampler.sample(self.attributes.num_samples, distribution)?;
        self.plan(start, goal, obstacles, &samples)
    }
}

impl Episode {
    /// Packages the result of searching a roadmap.
    pub fn new(pool: ConfigPool, roadmap: Roadmap, path: Option<Path>) -> Self {
        let outcome = match path {
            Some(path) => EpisodeOutcome::Success {
                trajectory: path.smooth(),
                path,
            },
            None => EpisodeOutcome::Miss,
        };
        Self {
            pool,
            roadmap,
            outcome,
            #[cfg(feature = "debug")]
            debug: serde_json::Value::Null,
        }
    }

    /// Whether a path was found.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, EpisodeOutcome::Success { .. })
    }

    pub fn outcome(&self) -> &EpisodeOutcome {
        &self.outcome
    }

    /// The path found, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            EpisodeOutcome::Success { path, .. } => Some(path),
            EpisodeOutcome::Miss => None,
        }
    }

    /// The length of the path found, if any.
    pub fn path_length(&self) -> Option<f64> {
        self.path().map(Path::length)
    }

    /// The smoothed trajectory, which is empty if no path was found.
    pub fn trajectory(&self) -> &[Point2d] {
        match &self.outcome {
            EpisodeOutcome::Success { trajectory, .. } => trajectory,
            EpisodeOutcome::Miss => &[],
        }
    }

    /// The number of candidate configurations, including the start and goal.
    pub fn cardinality(&self) -> usize {
        self.pool.len()
    }

    pub fn pool(&self) -> &ConfigPool {
        &self.pool
    }

    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    /// Gets the debugging geometry recorded for this episode as a JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&self) -> &serde_json::Value {
        &self.debug
    }

    /// Records the configurations, free edges and path as debugging geometry.
    #[cfg(feature = "debug")]
    fn with_debug(mut self, obstacles: &ObstacleSet, resolution: usize) -> Self {
        use crate::debug::{debug_circle, debug_line, take_debug_frame};

        for (_, config) in self.pool.iter() {
            debug_circle("configuration", config.pos(), config.radius());
        }
        for (a, b) in self.roadmap.free_edges(&self.pool, obstacles, resolution) {
            debug_line("edge", self.pool[a].pos(), self.pool[b].pos());
        }
        if let Some(path) = self.path() {
            for (a, b) in path.segments() {
                debug_line("path", a, b);
            }
        }
        self.debug = take_debug_frame();
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Rect;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn default_attributes_are_valid() {
        let attribs = PlannerAttributes::default();
        assert_eq!(attribs.validate(), Ok(()));
        assert_eq!(attribs.k, 15);
        assert_eq!(attribs.edge_resolution, 100);
    }

    #[test]
    fn invalid_attributes_are_rejected() {
        let cases = [
            PlannerAttributes {
                map_width: 0.0,
                ..Default::default()
            },
            PlannerAttributes {
                robot_radius: f64::NAN,
                ..Default::default()
            },
            PlannerAttributes {
                edge_resolution: 0,
                ..Default::default()
            },
        ];
        for attribs in cases {
            let planner = Planner::new(attribs);
            let result = planner.plan(
                Point2d::new(10.0, 10.0),
                Point2d::new(20.0, 20.0),
                &ObstacleSet::new(),
                &[],
            );
            assert!(matches!(result, Err(PlanError::InvalidAttributes(_))));
        }
    }

    #[test]
    fn too_few_samples_for_k() {
        let planner = Planner::new(PlannerAttributes {
            k: 3,
            ..Default::default()
        });
        let samples = [Point2d::new(0.5, 0.5)];
        let result = planner.build_roadmap(
            Point2d::new(50.0, 50.0),
            Point2d::new(540.0, 380.0),
            &ObstacleSet::new(),
            &samples,
        );
        assert_eq!(
            result.map(|_| ()),
            Err(PlanError::InsufficientPool { pool: 3, k: 3 })
        );
    }

    #[test]
    fn miss_is_not_an_error() {
        let planner = Planner::new(PlannerAttributes {
            k: 1,
            ..Default::default()
        });
        // A wall across the whole map
        let obstacles = [Rect::new(0.0, 200.0, 640.0, 40.0)]
            .into_iter()
            .collect::<ObstacleSet>();
        let samples = [Point2d::new(0.5, 0.1), Point2d::new(0.5, 0.9)];
        let episode = planner
            .plan(
                Point2d::new(50.0, 50.0),
                Point2d::new(540.0, 380.0),
                &obstacles,
                &samples,
            )
            .unwrap();

        assert!(!episode.is_success());
        assert_eq!(episode.outcome(), &EpisodeOutcome::Miss);
        assert_eq!(episode.path(), None);
        assert_eq!(episode.path_length(), None);
        assert!(episode.trajectory().is_empty());
        assert_eq!(episode.cardinality(), 4);
    }

    #[test]
    fn success_carries_trajectory() {
        let planner = Planner::default();
        let samples = (0..16)
            .map(|i| Point2d::new((i % 4) as f64 * 0.25 + 0.1, (i / 4) as f64 * 0.25 + 0.1))
            .collect::<Vec<_>>();
        let episode = planner
            .plan(
                Point2d::new(50.0, 50.0),
                Point2d::new(540.0, 380.0),
                &ObstacleSet::new(),
                &samples,
            )
            .unwrap();

        assert!(episode.is_success());
        assert_eq!(episode.cardinality(), 18);
        assert_eq!(episode.roadmap().len(), 18);
        let path = episode.path().unwrap();
        assert_eq!(path.ids().first(), Some(&episode.pool().start()));
        assert_eq!(path.ids().last(), Some(&episode.pool().goal()));
        assert_eq!(episode.trajectory().len(), 21 * (path.ids().len() - 1));
        assert_approx_eq!(episode.path_length().unwrap(), path.length());
    }
}
