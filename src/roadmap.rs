pub use edge::{crosses_obstacle, DEFAULT_EDGE_RESOLUTION};
use log::debug;
pub use neighbors::{nearest_neighbours, Neighbours};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

use crate::{ConfigId, ConfigPool, ObstacleSet, PlanError, PlannerAttributes, Result};

mod edge;
mod neighbors;

/// When roadmap edges are checked against the obstacles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeValidation {
    /// Store the geometric k-nearest neighbours and reject blocked edges during search.
    /// Construction is cheap, and only the edges the search reaches are ever checked.
    #[default]
    Lazy,
    /// Check every edge while building the roadmap and only store the free ones.
    Eager,
}

/// A graph of configurations, each connected to (up to) its `k` nearest neighbours.
///
/// Adjacency is not symmetric: `b` may be among `a`'s nearest neighbours
/// without `a` being among `b`'s.
#[derive(Clone, Debug, Default)]
pub struct Roadmap {
    /// The neighbours of each configuration, nearest first.
    neighbours: SecondaryMap<ConfigId, Neighbours>,
    /// Whether the stored edges have already been checked against the obstacles.
    validation: EdgeValidation,
}

impl Roadmap {
    /// Creates an empty roadmap.
    pub fn new(validation: EdgeValidation) -> Self {
        Self {
            neighbours: SecondaryMap::new(),
            validation,
        }
    }

    /// Connects every configuration in the pool to its `k` nearest neighbours.
    ///
    /// Fails before doing any work if the pool has `k` or fewer configurations.
    pub fn build(
        pool: &ConfigPool,
        obstacles: &ObstacleSet,
        attribs: &PlannerAttributes,
    ) -> Result<Self> {
        let k = attribs.k;
        if k >= pool.len() {
            return Err(PlanError::InsufficientPool { pool: pool.len(), k });
        }

        let mut roadmap = Self::new(attribs.edge_validation);
        for (id, config) in pool.iter() {
            roadmap.k_nearest(pool, id, k);
            if roadmap.validation == EdgeValidation::Eager {
                if let Some(near) = roadmap.neighbours.get_mut(id) {
                    near.retain(|other| {
                        !crosses_obstacle(config, &pool[*other], obstacles, attribs.edge_resolution)
                    });
                }
            }
        }

        debug!(
            "built {:?} roadmap with {} nodes and {} edges",
            roadmap.validation,
            roadmap.len(),
            roadmap.edge_count()
        );
        Ok(roadmap)
    }

    /// Finds the `k` configurations nearest to `query` and records them as its neighbours,
    /// replacing any previously recorded.
    pub fn k_nearest(&mut self, pool: &ConfigPool, query: ConfigId, k: usize) -> &[ConfigId] {
        let near = nearest_neighbours(pool, query, k);
        self.neighbours.insert(query, near);
        &self.neighbours[query]
    }

    /// Gets the recorded neighbours of a configuration, nearest first.
    ///
    /// Returns `None` if the configuration has never been connected.
    pub fn neighbours(&self, id: ConfigId) -> Option<&[ConfigId]> {
        self.neighbours.get(id).map(|near| near.as_slice())
    }

    /// Whether the stored edges have already been checked against the obstacles.
    pub fn validation(&self) -> EdgeValidation {
        self.validation
    }

    /// The number of connected configurations.
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// The number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.neighbours.values().map(|near| near.len()).sum()
    }

    /// Returns an iterator over the directed edges of the roadmap.
    pub fn edges(&self) -> impl Iterator<Item = (ConfigId, ConfigId)> + '_ {
        self.neighbours
            .iter()
            .flat_map(|(id, near)| near.iter().map(move |other| (id, *other)))
    }

    /// Returns an iterator over the edges which do not cross an obstacle.
    pub fn free_edges<'a>(
        &'a self,
        pool: &'a ConfigPool,
        obstacles: &'a ObstacleSet,
        resolution: usize,
    ) -> impl Iterator<Item = (ConfigId, ConfigId)> + 'a {
        self.edges()
            .filter(move |(a, b)| !crosses_obstacle(&pool[*a], &pool[*b], obstacles, resolution))
    }
}
