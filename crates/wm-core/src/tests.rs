//! Unit tests for wm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DetectorIndex, VertexId};

    #[test]
    fn index_roundtrip() {
        let id = DetectorIndex(42);
        assert_eq!(id.index(), 42);
        assert_eq!(DetectorIndex::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(VertexId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(VertexId(7).to_string(), "VertexId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{EdgeKey, EdgePoint, Point, VertexId};

    #[test]
    fn distance_and_within() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert!(a.within(b, 5.0)); // closed disc
        assert!(!a.within(b, 4.999));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(3.0, 5.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(2.0, 3.0));
    }

    #[test]
    fn edge_key_normalizes() {
        let e = EdgeKey::new(VertexId(5), VertexId(2));
        assert_eq!(e.lo, VertexId(2));
        assert_eq!(e.hi, VertexId(5));
        assert_eq!(e, EdgeKey::new(VertexId(2), VertexId(5)));
    }

    #[test]
    fn edge_point_mirrors_reversed_fraction() {
        let p = EdgePoint::new(VertexId(4), VertexId(1), 0.25);
        assert_eq!(p.edge, EdgeKey::new(VertexId(1), VertexId(4)));
        assert!((p.fraction - 0.75).abs() < 1e-12);
    }

    #[test]
    fn edge_point_clamps() {
        assert_eq!(EdgePoint::new(VertexId(0), VertexId(1), 1.5).fraction, 1.0);
        assert_eq!(EdgePoint::new(VertexId(0), VertexId(1), -0.5).fraction, 0.0);
    }
}

#[cfg(test)]
mod detector {
    use crate::{Detector, DetectorId, DetectorIndex, EdgePoint, Point, VertexId};

    fn detector() -> Detector {
        Detector {
            id:           DetectorId(9),
            index:        DetectorIndex(0),
            at:           EdgePoint::new(VertexId(0), VertexId(1), 0.5),
            position:     Point::new(0.5, 0.0),
            radius:       1.0,
            active:       false,
            active_since: 7,
        }
    }

    #[test]
    fn reach_uses_own_radius() {
        let d = detector();
        assert!(d.in_reach(Point::new(1.5, 0.0)));
        assert!(!d.in_reach(Point::new(1.6, 0.0)));
        assert!(d.within(Point::new(1.6, 0.0), 2.0));
    }

    #[test]
    fn activate_resets_window() {
        let mut d = detector();
        d.activate();
        assert!(d.active);
        assert_eq!(d.active_since, 0);
        d.deactivate();
        assert!(!d.active);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut a = SimRng::new(3);
        let first: Vec<f64> = (0..4).map(|_| a.unit()).collect();
        a.reseed(3);
        let again: Vec<f64> = (0..4).map(|_| a.unit()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn unit_in_range() {
        let mut r = SimRng::new(11);
        for _ in 0..1000 {
            let x = r.unit();
            assert!((0.0..1.0).contains(&x));
        }
    }
}

#[cfg(test)]
mod config {
    use crate::time::DEFAULT_BATCH_SIZE;
    use crate::{CoreError, EngineConfig, Tick};

    #[test]
    fn defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(cfg.seed, None);
        assert!(cfg.resolved_workers() >= 1);
    }

    #[test]
    fn explicit_zero_workers_resolves_to_one() {
        let cfg = EngineConfig { worker_threads: Some(0), ..EngineConfig::seeded(1) };
        assert_eq!(cfg.resolved_workers(), 1);
    }

    #[test]
    fn zero_batch_size_rejected() {
        let cfg = EngineConfig { batch_size: 0, ..EngineConfig::seeded(1) };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
        assert!(EngineConfig::seeded(1).validate().is_ok());
    }

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(3).offset(2), Tick(5));
    }
}
