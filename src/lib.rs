//! A probabilistic roadmap (PRM) planner for a disk-shaped robot among
//! axis-aligned rectangular obstacles, built to compare how different
//! point sampling strategies affect roadmap connectivity and path quality.
//!
//! A planning episode runs in four stages:
//! 1. Unit-square samples are scaled onto the map and filtered for feasibility ([`ConfigPool`]).
//! 2. Each configuration is connected to its `k` nearest neighbours ([`Roadmap`]).
//! 3. A* searches the roadmap, rejecting edges which cross obstacles ([`AStar`]).
//! 4. The resulting waypoints are interpolated into a trajectory ([`Path::smooth`]).
//!
//! [`Planner`] drives all four stages and returns an [`Episode`].

pub use bench::{random_start_goal, BenchmarkSummary};
pub use cgmath;
pub use configuration::{ConfigPool, Configuration};
pub use error::{PlanError, Result, SamplerError};
pub use obstacle::{ObstacleSet, ObstacleSource};
pub use path::{smooth_waypoints, Path};
pub use planner::{Episode, EpisodeOutcome, Planner, PlannerAttributes};
pub use roadmap::{
    crosses_obstacle, nearest_neighbours, EdgeValidation, Neighbours, Roadmap,
    DEFAULT_EDGE_RESOLUTION,
};
pub use sampler::{Distribution, PointSampler, Sampler};
pub use search::{find_path, AStar, SearchStep};
use slotmap::new_key_type;
pub use slotmap::{Key, KeyData};

mod bench;
mod configuration;
#[cfg(feature = "debug")]
mod debug;
mod error;
pub mod math;
mod obstacle;
mod path;
mod planner;
mod roadmap;
pub mod sampler;
mod search;
mod util;

pub use util::Interval;

new_key_type! {
    /// Unique ID of a [Configuration], assigned in creation order.
    pub struct ConfigId;
}
