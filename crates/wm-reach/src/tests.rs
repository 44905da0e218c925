//! Unit tests for wm-reach.

#[cfg(test)]
mod helpers {
    use wm_core::{Detector, DetectorId, DetectorIndex, EdgePoint, Point, VertexId};

    pub fn detector(i: u32, x: f64, y: f64, radius: f64) -> Detector {
        Detector {
            id:           DetectorId(100 + i),
            index:        DetectorIndex(i),
            at:           EdgePoint::new(VertexId(0), VertexId(1), 0.0),
            position:     Point::new(x, y),
            radius,
            active:       false,
            active_since: 0,
        }
    }

    /// 10×10 lattice of detectors, spacing 1, radius 0.6.
    pub fn lattice() -> Vec<Detector> {
        (0..100)
            .map(|i| detector(i, (i % 10) as f64, (i / 10) as f64, 0.6))
            .collect()
    }

    /// Brute-force reference: every detector whose disc contains `p`.
    pub fn brute_force(detectors: &[Detector], p: Point) -> Vec<DetectorIndex> {
        let mut out: Vec<_> = detectors.iter().filter(|d| d.in_reach(p)).map(|d| d.index).collect();
        out.sort();
        out
    }
}

// ── DetectorGrid ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use proptest::prelude::*;
    use wm_core::{DetectorIndex, Point};
    use crate::DetectorGrid;
    use super::helpers::{brute_force, detector, lattice};

    #[test]
    fn default_cells_per_side() {
        assert_eq!(DetectorGrid::build(&lattice()).cells_per_side(), 3); // ⌊√√100⌋
        assert_eq!(DetectorGrid::build(&lattice()[..16]).cells_per_side(), 2);
        assert_eq!(DetectorGrid::build(&lattice()[..15]).cells_per_side(), 1);
        assert_eq!(DetectorGrid::build(&lattice()[..1]).cells_per_side(), 1);
    }

    #[test]
    fn empty_grid_yields_nothing() {
        let grid = DetectorGrid::build(&[]);
        assert!(grid.is_empty());
        assert_eq!(grid.query(Point::new(0.0, 0.0)).count(), 0);
    }

    #[test]
    fn boundary_is_inclusive() {
        let grid = DetectorGrid::build(&[detector(0, 0.0, 0.0, 2.0)]);
        assert_eq!(grid.reach(Point::new(2.0, 0.0)), vec![DetectorIndex(0)]);
        assert!(grid.reach(Point::new(2.0001, 0.0)).is_empty());
    }

    #[test]
    fn large_radius_reaches_across_cells() {
        // One detector's disc covers points far outside its own cell.
        let mut ds = lattice();
        ds[0].radius = 50.0;
        let grid = DetectorGrid::build(&ds);
        let hits = grid.reach(Point::new(9.0, 9.0));
        assert!(hits.contains(&DetectorIndex(0)));
        assert!(hits.contains(&DetectorIndex(99)));
    }

    #[test]
    fn iterator_is_fused() {
        let grid = DetectorGrid::build(&lattice());
        let mut it = grid.query(Point::new(0.0, 0.0));
        assert_eq!(it.next(), Some(DetectorIndex(0)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    proptest! {
        #[test]
        fn query_matches_exact_distance(
            k in 1usize..6,
            x in -1.0f64..10.0,
            y in -1.0f64..10.0,
        ) {
            let ds = lattice();
            let grid = DetectorGrid::with_cells_per_side(&ds, k);
            let mut got = grid.reach(Point::new(x, y));
            got.sort();
            prop_assert_eq!(got, brute_force(&ds, Point::new(x, y)));
        }

        #[test]
        fn scattered_detectors_match_brute_force(
            raw in proptest::collection::vec((0.0f64..20.0, 0.0f64..20.0, 0.1f64..4.0), 1..60),
            x in 0.0f64..20.0,
            y in 0.0f64..20.0,
        ) {
            let ds: Vec<_> = raw
                .iter()
                .enumerate()
                .map(|(i, &(dx, dy, r))| detector(i as u32, dx, dy, r))
                .collect();
            let grid = DetectorGrid::build(&ds);
            let mut got = grid.reach(Point::new(x, y));
            got.sort();
            prop_assert_eq!(got, brute_force(&ds, Point::new(x, y)));
        }
    }
}

// ── ProximityEvaluator ────────────────────────────────────────────────────────

#[cfg(test)]
mod evaluator {
    use std::sync::Arc;

    use wm_core::Point;
    use crate::{DetectorGrid, ProximityEvaluator, WorkerPool};
    use super::helpers::lattice;

    fn walk(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new((i % 97) as f64 * 0.1, (i % 89) as f64 * 0.1)).collect()
    }

    #[test]
    fn no_grid_gives_empty_sets() {
        let ev = ProximityEvaluator::new(2).unwrap();
        let out = ev.precompute(&walk(100));
        assert_eq!(out.len(), 100);
        assert!(out.iter().all(Vec::is_empty));
    }

    #[test]
    fn job_count_is_capped() {
        let ev = ProximityEvaluator::new(4).unwrap();
        assert_eq!(ev.job_count(0), 0);
        assert_eq!(ev.job_count(31), 0);
        assert_eq!(ev.job_count(64), 2);
        assert_eq!(ev.job_count(10_000), 4);
    }

    #[test]
    fn one_worker_matches_many() {
        let grid = Arc::new(DetectorGrid::build(&lattice()));
        let positions = walk(5_000);

        let mut single = ProximityEvaluator::new(1).unwrap();
        single.set_grid(Some(Arc::clone(&grid)));
        let mut many = ProximityEvaluator::new(8).unwrap();
        many.set_grid(Some(Arc::clone(&grid)));

        let a = single.precompute(&positions);
        let b = many.precompute(&positions);
        assert_eq!(a, b);
        for (p, set) in positions.iter().zip(&a) {
            assert_eq!(set, &grid.reach(*p));
        }
    }

    #[test]
    fn small_batch_is_still_evaluated() {
        let mut ev = ProximityEvaluator::new(4).unwrap();
        ev.set_grid(Some(Arc::new(DetectorGrid::build(&lattice()))));
        let out = ev.precompute(&[Point::new(0.0, 0.0), Point::new(50.0, 50.0)]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].len(), 1);
        assert!(out[1].is_empty());
    }

    #[test]
    fn pool_is_reused_across_batches() {
        let mut ev = ProximityEvaluator::new(3).unwrap();
        ev.set_grid(Some(Arc::new(DetectorGrid::build(&lattice()))));
        for n in [64, 1_000, 7, 4_096] {
            assert_eq!(ev.precompute(&walk(n)).len(), n);
        }
        assert_eq!(ev.workers(), 3);
    }

    #[test]
    fn pool_runs_queued_jobs_before_shutdown() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = WorkerPool::new(2).unwrap();
            for _ in 0..6 {
                let c = Arc::clone(&counter);
                assert!(pool.execute(Box::new(move || { c.fetch_add(1, Ordering::SeqCst); })).is_ok());
            }
        } // Drop joins.
        assert_eq!(counter.load(Ordering::SeqCst), 6);
    }
}
