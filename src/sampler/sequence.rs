//! Low-discrepancy sequences in the unit square.

use crate::math::Point2d;
use rand::seq::SliceRandom;
use rand::Rng;

/// The number of bits in each Sobol coordinate.
const SOBOL_BITS: usize = 32;

/// The scale which maps a Sobol coordinate onto `[0, 1)`.
const SOBOL_SCALE: f64 = 1.0 / (1u64 << SOBOL_BITS) as f64;

/// Reflects the base-`base` digits of `index` about the radix point.
pub fn radical_inverse(base: u64, mut index: u64) -> f64 {
    let mut result = 0.0;
    let mut scale = 1.0 / base as f64;
    while index > 0 {
        result += (index % base) as f64 * scale;
        index /= base;
        scale /= base as f64;
    }
    result
}

/// The first `n` points of the Halton sequence in bases 2 and 3, starting from the origin.
pub fn halton(n: usize) -> Vec<Point2d> {
    (0..n as u64)
        .map(|i| Point2d::new(radical_inverse(2, i), radical_inverse(3, i)))
        .collect()
}

/// The first `n` points of a Halton sequence whose digits are randomly permuted.
///
/// Each digit position of each base gets its own permutation.
pub fn scrambled_halton(n: usize, rng: &mut impl Rng) -> Vec<Point2d> {
    let perms_x = DigitScramble::new(2, 32, rng);
    let perms_y = DigitScramble::new(3, 20, rng);
    (0..n as u64)
        .map(|i| Point2d::new(perms_x.radical_inverse(i), perms_y.radical_inverse(i)))
        .collect()
}

/// The first `n` points of the two-dimensional Sobol sequence, starting from the origin.
pub fn sobol(n: usize) -> Vec<Point2d> {
    sobol_with_shift(n, [0, 0])
}

/// The first `n` points of the Sobol sequence with a random digital shift applied.
///
/// The shift preserves the sequence's stratification: for `n` a power of two, every
/// interval `[i / n, (i + 1) / n)` of either axis still holds exactly one point.
pub fn scrambled_sobol(n: usize, rng: &mut impl Rng) -> Vec<Point2d> {
    sobol_with_shift(n, [rng.gen(), rng.gen()])
}

fn sobol_with_shift(n: usize, shift: [u32; 2]) -> Vec<Point2d> {
    let directions = sobol_directions();
    (0..n as u64)
        .map(|i| {
            let mut x = shift;
            for (bit, dirs) in directions.iter().enumerate() {
                if (i >> bit) & 1 == 1 {
                    x[0] ^= dirs[0];
                    x[1] ^= dirs[1];
                }
            }
            Point2d::new(x[0] as f64 * SOBOL_SCALE, x[1] as f64 * SOBOL_SCALE)
        })
        .collect()
}

/// The direction numbers of both dimensions, indexed by bit.
///
/// The first dimension is the base-2 radical inverse. The second uses the
/// primitive polynomial `x + 1`, so each number is the previous XOR itself shifted.
fn sobol_directions() -> [[u32; 2]; SOBOL_BITS] {
    let mut dirs = [[0; 2]; SOBOL_BITS];
    dirs[0] = [1 << 31, 1 << 31];
    for bit in 1..SOBOL_BITS {
        let prev = dirs[bit - 1][1];
        dirs[bit] = [1 << (31 - bit), prev ^ (prev >> 1)];
    }
    dirs
}

/// Random digit permutations for a scrambled radical inverse.
struct DigitScramble {
    base: u64,
    perms: Vec<Vec<u64>>,
}

impl DigitScramble {
    fn new(base: u64, digits: usize, rng: &mut impl Rng) -> Self {
        let perms = (0..digits)
            .map(|_| {
                let mut perm = (0..base).collect::<Vec<_>>();
                perm.shuffle(rng);
                perm
            })
            .collect();
        Self { base, perms }
    }

    fn radical_inverse(&self, mut index: u64) -> f64 {
        let mut result = 0.0;
        let mut scale = 1.0 / self.base as f64;
        for perm in &self.perms {
            result += perm[(index % self.base) as usize] as f64 * scale;
            index /= self.base;
            scale /= self.base as f64;
        }
        result
    }
}
