//! Errors raised while sampling configurations or planning a path.
//!
//! Failing to find a path is not an error: it is reported as
//! [`EpisodeOutcome::Miss`](crate::EpisodeOutcome::Miss).

use crate::ConfigId;

/// A specialized result type for planning operations.
pub type Result<T, E = PlanError> = std::result::Result<T, E>;

/// Errors raised at the sampler boundary, before any planning work starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SamplerError {
    /// The distribution name is not one of the supported distributions.
    #[error("unknown sampling distribution `{0}`")]
    UnknownDistribution(String),

    /// The distribution only supports a fixed set of sample counts.
    #[error("{distribution} does not support {n} samples (expected one of {allowed:?})")]
    UnsupportedSampleCount {
        /// The name of the distribution.
        distribution: &'static str,
        /// The requested number of samples.
        n: usize,
        /// The sample counts the distribution supports.
        allowed: &'static [usize],
    },

    /// A precomputed distribution was requested but no point set was supplied.
    #[error("no precomputed point set was supplied for {0}")]
    MissingPointSet(&'static str),

    /// The precomputed point set holds fewer points than one batch.
    #[error("precomputed point set has {available} points, fewer than the {n} requested")]
    InsufficientPointSet {
        /// The number of points in the set.
        available: usize,
        /// The requested number of samples.
        n: usize,
    },
}

/// Errors raised while planning an episode.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PlanError {
    /// The candidate pool is too small to connect each configuration to `k` others.
    #[error("cannot connect {k} nearest neighbours in a pool of {pool} configurations")]
    InsufficientPool {
        /// The number of configurations in the pool.
        pool: usize,
        /// The requested number of neighbours.
        k: usize,
    },

    /// The planner attributes are out of range.
    #[error("invalid planner attributes: {0}")]
    InvalidAttributes(&'static str),

    /// A configuration reached during search has no entry in the roadmap.
    ///
    /// This means the roadmap was built from a different pool than the one being searched.
    #[error("configuration {0:?} has no roadmap entry")]
    MissingRoadmapNode(ConfigId),

    /// The sampler rejected the request.
    #[error(transparent)]
    Sampler(#[from] SamplerError),
}
