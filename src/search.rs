//! A* search over a [Roadmap].

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, trace, warn};
use slotmap::SecondaryMap;

use crate::math::truncated_distance;
use crate::{
    crosses_obstacle, ConfigId, ConfigPool, EdgeValidation, ObstacleSet, Path, PlanError, Result,
    Roadmap,
};

/// An A* search from the start to the goal of a [ConfigPool], over its [Roadmap].
///
/// The search advances one expansion per call to [AStar::step], so callers can interleave
/// it with other work or abandon it between steps. [AStar::run] steps until completion.
///
/// Edge costs and the heuristic are straight-line distances truncated to whole map units.
/// When the roadmap was built with [EdgeValidation::Lazy], each edge is checked against the
/// obstacles the first time it would improve a neighbour's cost.
///
/// Open configurations with equal f-scores are expanded in ID order, that is,
/// in the order they were created.
pub struct AStar<'a> {
    /// The configurations being searched.
    pool: &'a ConfigPool,
    /// The roadmap being searched.
    roadmap: &'a Roadmap,
    /// The obstacles edges must avoid.
    obstacles: &'a ObstacleSet,
    /// The number of steps used to sample an edge.
    resolution: usize,
    /// The best known cost from the start to each configuration.
    g_score: SecondaryMap<ConfigId, u32>,
    /// The predecessor of each configuration on its best known path.
    came_from: SecondaryMap<ConfigId, ConfigId>,
    /// The open set, as (f-score, ID) pairs.
    /// May contain stale entries, which are skipped when popped.
    open: BinaryHeap<Reverse<(u32, ConfigId)>>,
    /// The number of configurations expanded so far.
    expansions: usize,
}

/// The result of a single [AStar::step].
#[derive(Clone, Debug, PartialEq)]
pub enum SearchStep {
    /// The configuration was expanded and the search continues.
    Expanded(ConfigId),
    /// The goal was reached.
    Found(Path),
    /// The open set is empty: no path exists through the roadmap.
    Exhausted,
}

impl<'a> AStar<'a> {
    /// Creates a new search, with only the start configuration open.
    pub fn new(
        pool: &'a ConfigPool,
        roadmap: &'a Roadmap,
        obstacles: &'a ObstacleSet,
        resolution: usize,
    ) -> Self {
        let start = pool.start();
        let mut g_score = SecondaryMap::new();
        g_score.insert(start, 0);
        let mut open = BinaryHeap::new();
        open.push(Reverse((heuristic(pool, start), start)));
        Self {
            pool,
            roadmap,
            obstacles,
            resolution,
            g_score,
            came_from: SecondaryMap::new(),
            open,
            expansions: 0,
        }
    }

    /// The number of configurations expanded so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// The best known cost from the start to a configuration, if it has been reached.
    pub fn g_score(&self, id: ConfigId) -> Option<u32> {
        self.g_score.get(id).copied()
    }

    /// Expands the open configuration with the lowest f-score.
    ///
    /// After the search finishes, the open set is empty and further
    /// calls return [SearchStep::Exhausted].
    pub fn step(&mut self) -> Result<SearchStep> {
        let current = match self.pop() {
            Some(current) => current,
            None => return Ok(SearchStep::Exhausted),
        };

        if current == self.pool.goal() {
            self.open.clear();
            let path = self.reconstruct_path(current);
            debug!(
                "found path with {} waypoints after {} expansions",
                path.ids().len(),
                self.expansions
            );
            return Ok(SearchStep::Found(path));
        }

        let roadmap = self.roadmap;
        let neighbours = match roadmap.neighbours(current) {
            Some(neighbours) => neighbours,
            None => {
                warn!("abandoning search: {:?} is not in the roadmap", current);
                self.open.clear();
                return Err(PlanError::MissingRoadmapNode(current));
            }
        };

        self.expansions += 1;
        let pool = self.pool;
        let config = &pool[current];
        let current_g = self.g_score[current];

        for &neighbour in neighbours {
            let other = &pool[neighbour];
            let tentative_g = current_g + truncated_distance(config.pos(), other.pos());
            if self.g_score(neighbour).map_or(false, |g| tentative_g >= g) {
                continue;
            }
            if roadmap.validation() == EdgeValidation::Lazy
                && crosses_obstacle(config, other, self.obstacles, self.resolution)
            {
                trace!("edge {:?} -> {:?} crosses an obstacle", current, neighbour);
                continue;
            }

            self.came_from.insert(neighbour, current);
            self.g_score.insert(neighbour, tentative_g);
            let f_score = tentative_g + heuristic(pool, neighbour);
            self.open.push(Reverse((f_score, neighbour)));
        }

        Ok(SearchStep::Expanded(current))
    }

    /// Steps the search until it reaches the goal or runs out of configurations.
    ///
    /// Returns `None` if there is no path.
    pub fn run(mut self) -> Result<Option<Path>> {
        loop {
            match self.step()? {
                SearchStep::Expanded(_) => continue,
                SearchStep::Found(path) => return Ok(Some(path)),
                SearchStep::Exhausted => {
                    debug!("no path after {} expansions", self.expansions);
                    return Ok(None);
                }
            }
        }
    }

    /// Pops the open configuration with the lowest f-score, skipping stale entries.
    fn pop(&mut self) -> Option<ConfigId> {
        while let Some(Reverse((f_score, id))) = self.open.pop() {
            let current_f = self.g_score[id] + heuristic(self.pool, id);
            if f_score == current_f {
                trace!("expanding {:?} (f = {})", id, f_score);
                return Some(id);
            }
        }
        None
    }

    /// Walks the predecessors back from `current` to the start.
    fn reconstruct_path(&self, mut current: ConfigId) -> Path {
        let mut ids = vec![current];
        while let Some(prev) = self.came_from.get(current) {
            current = *prev;
            ids.push(current);
        }
        ids.reverse();
        Path::new(ids, self.pool)
    }
}

/// Finds the cheapest path through the roadmap in one call, using the `pathfinding` crate.
///
/// This follows the same cost model as [AStar], but cannot be interrupted.
pub fn find_path(
    pool: &ConfigPool,
    roadmap: &Roadmap,
    obstacles: &ObstacleSet,
    resolution: usize,
) -> Option<(Path, u32)> {
    let check_edges = roadmap.validation() == EdgeValidation::Lazy;
    let (ids, cost) = pathfinding::directed::astar::astar(
        &pool.start(),
        |id| {
            let config = pool[*id];
            roadmap
                .neighbours(*id)
                .unwrap_or_default()
                .iter()
                .filter(move |other| {
                    let other = &pool[**other];
                    !check_edges || !crosses_obstacle(&config, other, obstacles, resolution)
                })
                .map(move |other| (*other, truncated_distance(config.pos(), pool[*other].pos())))
                .collect::<Vec<_>>()
        },
        |id| heuristic(pool, *id),
        |id| *id == pool.goal(),
    )?;
    Some((Path::new(ids, pool), cost))
}

/// The estimated cost from a configuration to the goal.
fn heuristic(pool: &ConfigPool, id: ConfigId) -> u32 {
    truncated_distance(pool[id].pos(), pool[pool.goal()].pos())
}
