//! Point samplers which produce batches of points in the unit square.
//!
//! Scaling the points onto the map is the planner's job. See
//! [ConfigPool::generate](crate::ConfigPool::generate).

pub use discrepancy::{best_batch, l2_star_discrepancy};
pub use lattice::{sukharev, triangular};
pub use sequence::{halton, radical_inverse, scrambled_halton, scrambled_sobol, sobol};

use crate::math::Point2d;
use crate::SamplerError;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution as _, Uniform};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod discrepancy;
mod lattice;
mod sequence;

/// The sample counts supported by every distribution except [Distribution::Uniform].
pub const ALLOWED_SIZES: &[usize] = &[32, 64, 128, 256, 512, 1024];

/// A strategy for placing points in the unit square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Distribution {
    /// Independent uniformly distributed points.
    Uniform,
    /// The Sobol sequence with a random digital shift.
    SobolScrambled,
    /// The Sobol sequence.
    SobolUnscrambled,
    /// The Halton sequence with randomly permuted digits.
    HaltonScrambled,
    /// The Halton sequence in bases 2 and 3.
    HaltonUnscrambled,
    /// A centred triangular lattice.
    TriangularLattice,
    /// A cell-centred square grid.
    Sukharev,
    /// The most uniform batch of a precomputed point set.
    Mpmc,
}

impl Distribution {
    /// Every distribution, in the order they are benchmarked.
    pub const ALL: [Distribution; 8] = [
        Distribution::Uniform,
        Distribution::SobolScrambled,
        Distribution::SobolUnscrambled,
        Distribution::HaltonScrambled,
        Distribution::HaltonUnscrambled,
        Distribution::TriangularLattice,
        Distribution::Sukharev,
        Distribution::Mpmc,
    ];

    /// The short name of the distribution.
    pub fn name(self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::SobolScrambled => "sobol_scram",
            Distribution::SobolUnscrambled => "sobol_unscr",
            Distribution::HaltonScrambled => "halton_scram",
            Distribution::HaltonUnscrambled => "halton_unscr",
            Distribution::TriangularLattice => "tri_lat",
            Distribution::Sukharev => "sukharev",
            Distribution::Mpmc => "mpmc",
        }
    }

    /// Whether two batches of the same size can differ.
    pub fn is_randomised(self) -> bool {
        matches!(
            self,
            Distribution::Uniform | Distribution::SobolScrambled | Distribution::HaltonScrambled
        )
    }

    /// The sample counts the distribution supports, or `None` if any count is allowed.
    pub fn allowed_sizes(self) -> Option<&'static [usize]> {
        match self {
            Distribution::Uniform => None,
            _ => Some(ALLOWED_SIZES),
        }
    }

    /// Checks that the distribution supports `n` samples.
    pub fn validate(self, n: usize) -> Result<(), SamplerError> {
        match self.allowed_sizes() {
            Some(allowed) if !allowed.contains(&n) => Err(SamplerError::UnsupportedSampleCount {
                distribution: self.name(),
                n,
                allowed,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Distribution::ALL
            .into_iter()
            .find(|dist| dist.name() == s)
            .ok_or_else(|| SamplerError::UnknownDistribution(s.to_owned()))
    }
}

/// Produces batches of points in the unit square.
pub trait Sampler {
    /// Draws `n` points from the given distribution.
    ///
    /// Fails without drawing anything if the distribution does not support `n` points.
    fn sample(&mut self, n: usize, distribution: Distribution)
        -> Result<Vec<Point2d>, SamplerError>;
}

/// A sampler which supports every [Distribution].
///
/// [Distribution::Mpmc] draws from a precomputed point set, which must be
/// supplied with [PointSampler::with_point_set].
#[derive(Clone, Debug)]
pub struct PointSampler {
    rng: StdRng,
    point_set: Vec<Point2d>,
}

impl PointSampler {
    /// Creates a sampler driven by the given random number generator.
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            point_set: Vec::new(),
        }
    }

    /// Creates a sampler with a reproducible random seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a sampler seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Supplies the precomputed points used by [Distribution::Mpmc].
    pub fn with_point_set(mut self, points: Vec<Point2d>) -> Self {
        self.point_set = points;
        self
    }

    fn mpmc(&self, n: usize) -> Result<Vec<Point2d>, SamplerError> {
        if self.point_set.is_empty() {
            return Err(SamplerError::MissingPointSet(Distribution::Mpmc.name()));
        }
        let (index, disc) =
            best_batch(&self.point_set, n).ok_or(SamplerError::InsufficientPointSet {
                available: self.point_set.len(),
                n,
            })?;
        debug!("mpmc batch {} has L2-star discrepancy {:.3e}", index, disc);
        Ok(self.point_set[index * n..(index + 1) * n].to_vec())
    }
}

impl Sampler for PointSampler {
    fn sample(
        &mut self,
        n: usize,
        distribution: Distribution,
    ) -> Result<Vec<Point2d>, SamplerError> {
        distribution.validate(n)?;
        let points = match distribution {
            Distribution::Uniform => {
                let unit = Uniform::new(0.0, 1.0);
                (0..n)
                    .map(|_| {
                        Point2d::new(unit.sample(&mut self.rng), unit.sample(&mut self.rng))
                    })
                    .collect()
            }
            Distribution::SobolScrambled => scrambled_sobol(n, &mut self.rng),
            Distribution::SobolUnscrambled => sobol(n),
            Distribution::HaltonScrambled => scrambled_halton(n, &mut self.rng),
            Distribution::HaltonUnscrambled => halton(n),
            Distribution::TriangularLattice => triangular(n, &mut self.rng),
            Distribution::Sukharev => sukharev(n, &mut self.rng),
            Distribution::Mpmc => self.mpmc(n)?,
        };
        Ok(points)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        for dist in Distribution::ALL {
            assert_eq!(dist.name().parse::<Distribution>(), Ok(dist));
            assert_eq!(dist.to_string(), dist.name());
        }
        assert_eq!(
            "gaussian".parse::<Distribution>(),
            Err(SamplerError::UnknownDistribution("gaussian".into()))
        );
    }

    #[test]
    fn sample_counts_are_validated() {
        let mut sampler = PointSampler::seeded(1);
        assert_eq!(sampler.sample(33, Distribution::Uniform).unwrap().len(), 33);
        assert_eq!(
            sampler.sample(33, Distribution::Sukharev),
            Err(SamplerError::UnsupportedSampleCount {
                distribution: "sukharev",
                n: 33,
                allowed: ALLOWED_SIZES,
            })
        );
    }

    #[test]
    fn every_distribution_fills_the_unit_square() {
        let mut sampler = PointSampler::seeded(2).with_point_set(halton(256));
        for dist in Distribution::ALL {
            let points = sampler.sample(64, dist).unwrap();
            assert_eq!(points.len(), 64, "{}", dist);
            for p in points {
                assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y), "{}", dist);
            }
        }
    }

    #[test]
    fn seeded_samplers_repeat() {
        for dist in Distribution::ALL.into_iter().filter(|d| d.is_randomised()) {
            let a = PointSampler::seeded(3).sample(32, dist).unwrap();
            let b = PointSampler::seeded(3).sample(32, dist).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn mpmc_needs_a_point_set() {
        let mut sampler = PointSampler::seeded(4);
        assert_eq!(
            sampler.sample(32, Distribution::Mpmc),
            Err(SamplerError::MissingPointSet("mpmc"))
        );

        let mut sampler = sampler.with_point_set(halton(40));
        assert_eq!(
            sampler.sample(64, Distribution::Mpmc),
            Err(SamplerError::InsufficientPointSet { available: 40, n: 64 })
        );
        assert_eq!(sampler.sample(32, Distribution::Mpmc).unwrap(), halton(32));
    }
}
