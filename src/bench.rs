//! Accumulates planning episodes into per-distribution statistics.

use crate::math::Point2d;
use crate::Episode;
use rand::Rng;

/// Picks a start in the top sixth of the map and a goal in the bottom sixth,
/// both on whole map units.
pub fn random_start_goal(rng: &mut impl Rng, width: u32, height: u32) -> (Point2d, Point2d) {
    let band = (height / 6).max(1);
    let start = Point2d::new(
        rng.gen_range(0..width.max(1)) as f64,
        rng.gen_range(0..band) as f64,
    );
    let goal = Point2d::new(
        rng.gen_range(0..width.max(1)) as f64,
        rng.gen_range(height.saturating_sub(band)..height.max(1)) as f64,
    );
    (start, goal)
}

/// Statistics over a series of planning episodes.
///
/// Path length and cardinality are only recorded for successful episodes.
#[derive(Clone, Debug, Default)]
pub struct BenchmarkSummary {
    episodes: usize,
    lengths: Vec<f64>,
    cardinalities: Vec<f64>,
}

impl BenchmarkSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of an episode.
    pub fn record(&mut self, episode: &Episode) {
        self.episodes += 1;
        if let Some(length) = episode.path_length() {
            self.lengths.push(length);
            self.cardinalities.push(episode.cardinality() as f64);
        }
    }

    /// The number of episodes recorded.
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// The number of episodes which found a path.
    pub fn successes(&self) -> usize {
        self.lengths.len()
    }

    /// The percentage of episodes which did not find a path, or zero if none were recorded.
    pub fn miss_rate(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        100.0 * (self.episodes - self.successes()) as f64 / self.episodes as f64
    }

    /// The percentage of episodes which found a path.
    pub fn success_rate(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        100.0 - self.miss_rate()
    }

    pub fn mean_length(&self) -> Option<f64> {
        mean(&self.lengths)
    }

    /// The population standard deviation of the path lengths.
    pub fn std_length(&self) -> Option<f64> {
        std_dev(&self.lengths)
    }

    pub fn mean_cardinality(&self) -> Option<f64> {
        mean(&self.cardinalities)
    }

    pub fn std_cardinality(&self) -> Option<f64> {
        std_dev(&self.cardinalities)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}
