use crate::math::truncated_distance;
use crate::{ConfigId, ConfigPool};
use smallvec::SmallVec;

/// A configuration's roadmap neighbours, nearest first.
pub type Neighbours = SmallVec<[ConfigId; 16]>;

/// Finds the `k` configurations in the pool nearest to `query`, excluding `query` itself.
///
/// Distances are truncated to whole map units. The `k` closest are picked with a partial
/// selection and only those are sorted. Candidates at equal distance are ordered by ID,
/// so the result is the same on every run and every platform.
///
/// If the pool holds fewer than `k + 1` configurations, all of them are returned.
pub fn nearest_neighbours(pool: &ConfigPool, query: ConfigId, k: usize) -> Neighbours {
    let origin = pool[query].pos();
    let mut candidates = pool
        .iter()
        .filter(|(id, _)| *id != query)
        .map(|(id, config)| (truncated_distance(origin, config.pos()), id))
        .collect::<Vec<_>>();

    let k = usize::min(k, candidates.len());
    if k == 0 {
        return Neighbours::new();
    }
    if k < candidates.len() {
        candidates.select_nth_unstable(k - 1);
        candidates.truncate(k);
    }
    candidates.sort_unstable();

    candidates.into_iter().map(|(_, id)| id).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point2d;
    use itertools::Itertools;

    fn line_pool() -> (ConfigPool, Vec<ConfigId>) {
        let mut pool = ConfigPool::new(Point2d::new(0.0, 0.0), Point2d::new(100.0, 0.0), 1.0);
        let mut ids = vec![pool.start(), pool.goal()];
        for x in [30.0, 10.0, 60.0, 20.0, 90.0, 40.0] {
            ids.push(pool.insert(Point2d::new(x, 0.0)));
        }
        (pool, ids)
    }

    #[test]
    fn nearest_are_sorted_by_distance() {
        let (pool, ids) = line_pool();
        let near = nearest_neighbours(&pool, pool.start(), 3);
        // 10, 20, 30
        assert_eq!(near.as_slice(), &[ids[3], ids[5], ids[2]]);

        let near = nearest_neighbours(&pool, ids[4], 4);
        let dists = near
            .iter()
            .map(|id| truncated_distance(pool[ids[4]].pos(), pool[*id].pos()))
            .collect::<Vec<_>>();
        assert_eq!(dists, vec![20, 30, 30, 40]);
    }

    #[test]
    fn query_is_excluded() {
        let (pool, ids) = line_pool();
        for id in &ids {
            let near = nearest_neighbours(&pool, *id, ids.len() - 1);
            assert_eq!(near.len(), ids.len() - 1);
            assert!(!near.contains(id));
            assert_eq!(near.iter().unique().count(), near.len());
        }
    }

    #[test]
    fn ties_are_broken_by_id() {
        let mut pool = ConfigPool::new(Point2d::new(50.0, 50.0), Point2d::new(0.0, 0.0), 1.0);
        let a = pool.insert(Point2d::new(60.0, 50.0));
        let b = pool.insert(Point2d::new(40.0, 50.0));
        let c = pool.insert(Point2d::new(50.0, 60.0));
        let d = pool.insert(Point2d::new(50.0, 40.0));

        let near = nearest_neighbours(&pool, pool.start(), 2);
        assert_eq!(near.as_slice(), &[a, b]);
        let near = nearest_neighbours(&pool, pool.start(), 4);
        assert_eq!(near.as_slice(), &[a, b, c, d]);
        assert_eq!(nearest_neighbours(&pool, pool.start(), 4), near);
    }

    #[test]
    fn small_pools_return_everything() {
        let pool = ConfigPool::new(Point2d::new(0.0, 0.0), Point2d::new(5.0, 5.0), 1.0);
        assert_eq!(nearest_neighbours(&pool, pool.start(), 10).as_slice(), &[pool.goal()]);
        assert!(nearest_neighbours(&pool, pool.start(), 0).is_empty());
    }
}
