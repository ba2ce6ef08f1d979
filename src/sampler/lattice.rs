//! Deterministic lattices in the unit square, topped up with random neighbours
//! when the lattice alone has fewer than `n` points.

use crate::math::{Point2d, Rect, Vector2d};
use cgmath::prelude::*;
use itertools::iproduct;
use log::warn;
use rand::Rng;

/// The number of fill-in attempts allowed per requested point.
const FILL_ATTEMPTS_PER_POINT: usize = 100;

/// Points closer than this are treated as duplicates.
const DUPLICATE_EPSILON: f64 = 1e-9;

/// The cell-centred Sukharev grid of `floor(sqrt(n))` points per side.
///
/// The remaining points are corners of grid cells, each placed diagonally
/// half a cell away from a randomly chosen point.
pub fn sukharev(n: usize, rng: &mut impl Rng) -> Vec<Point2d> {
    let side = side_length(n);
    let step = 1.0 / side as f64;
    let mut points = iproduct!(0..side, 0..side)
        .map(|(i, j)| Point2d::new((i as f64 + 0.5) * step, (j as f64 + 0.5) * step))
        .collect::<Vec<_>>();

    fill(&mut points, n, rng, "sukharev", |rng| {
        let dx = if rng.gen() { 0.5 } else { -0.5 };
        let dy = if rng.gen() { 0.5 } else { -0.5 };
        cgmath::vec2(dx * step, dy * step)
    });
    points
}

/// A triangular lattice with rows `1 / floor(sqrt(n))` apart, centred in the unit square.
///
/// Odd rows are offset by half a column. The remaining points are placed
/// two thirds of a row above or below a randomly chosen point.
pub fn triangular(n: usize, rng: &mut impl Rng) -> Vec<Point2d> {
    let side = side_length(n);
    let row = 1.0 / side as f64;
    let column = row / (3.0f64.sqrt() / 2.0);
    let mut points = iproduct!(0..side, 0..side)
        .map(|(i, j)| {
            let offset = if j % 2 == 1 { column / 2.0 } else { 0.0 };
            Point2d::new(i as f64 * column + offset, j as f64 * row)
        })
        .filter(|p| p.x <= 1.0 && p.y <= 1.0)
        .collect::<Vec<_>>();

    // Centre the lattice
    let max_x = points.iter().map(|p| p.x).fold(0.0, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(0.0, f64::max);
    let shift = cgmath::vec2((1.0 - max_x) / 2.0, (1.0 - max_y) / 2.0);
    for point in &mut points {
        *point += shift;
    }

    fill(&mut points, n, rng, "tri_lat", |rng| {
        let dy = if rng.gen() { 2.0 } else { -2.0 };
        cgmath::vec2(0.0, dy * row / 3.0)
    });
    points
}

fn side_length(n: usize) -> usize {
    (n as f64).sqrt().floor() as usize
}

/// Adds points near existing ones until there are `n`, or the attempts run out.
fn fill<R: Rng>(
    points: &mut Vec<Point2d>,
    n: usize,
    rng: &mut R,
    name: &str,
    mut offset: impl FnMut(&mut R) -> Vector2d,
) {
    let unit = Rect::new(0.0, 0.0, 1.0, 1.0);
    let mut attempts = FILL_ATTEMPTS_PER_POINT * n;
    while points.len() < n && !points.is_empty() {
        if attempts == 0 {
            warn!("{} lattice stopped at {} of {} points", name, points.len(), n);
            return;
        }
        attempts -= 1;

        let base = points[rng.gen_range(0..points.len())];
        let candidate = base + offset(rng);
        let duplicate = points
            .iter()
            .any(|p| p.distance2(candidate) < DUPLICATE_EPSILON);
        if unit.contains(candidate) && !duplicate {
            points.push(candidate);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::from_seed(*b"Vegemite sandwhich is not fun...")
    }

    fn assert_distinct_in_unit_square(points: &[Point2d]) {
        let unit = Rect::new(0.0, 0.0, 1.0, 1.0);
        for (i, p) in points.iter().enumerate() {
            assert!(unit.contains(*p), "{:?} outside unit square", p);
            for q in &points[i + 1..] {
                assert!(p.distance2(*q) >= DUPLICATE_EPSILON, "{:?} duplicated", p);
            }
        }
    }

    #[test]
    fn sukharev_perfect_square_is_cell_centred() {
        let points = sukharev(1024, &mut rng());
        assert_eq!(points.len(), 1024);
        assert_approx_eq!(points[0].x, 1.0 / 64.0);
        assert_approx_eq!(points[0].y, 1.0 / 64.0);
        assert_approx_eq!(points[1].y, 3.0 / 64.0);
        assert_distinct_in_unit_square(&points);
    }

    #[test]
    fn sukharev_fills_up_to_n() {
        for n in [32, 64, 128, 256, 512] {
            let points = sukharev(n, &mut rng());
            assert_eq!(points.len(), n);
            assert_distinct_in_unit_square(&points);
        }
    }

    #[test]
    fn triangular_lattice_is_centred() {
        let points = triangular(32, &mut rng());
        assert_eq!(points.len(), 32);
        assert_distinct_in_unit_square(&points);

        // The first 23 points are the lattice itself
        let lattice = &points[..23];
        let min_y = lattice.iter().map(|p| p.y).fold(1.0, f64::min);
        let max_y = lattice.iter().map(|p| p.y).fold(0.0, f64::max);
        assert_approx_eq!(min_y, 1.0 - max_y);
    }

    #[test]
    fn triangular_fills_up_to_n() {
        for n in [64, 128, 256, 512, 1024] {
            let points = triangular(n, &mut rng());
            assert_eq!(points.len(), n);
            assert_distinct_in_unit_square(&points);
        }
    }
}
