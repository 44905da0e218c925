//! Unit tests for wm-graph.
//!
//! All tests use hand-built graphs; no map files are needed.

#[cfg(test)]
mod helpers {
    use wm_core::{Point, VertexId};
    use crate::{StreetGraph, StreetGraphBuilder};

    /// Small graph with a unique shortest path 0 → 4.
    ///
    /// ```text
    ///   3:(0,5) ─────────── 4:(2,1)
    ///   │                    │
    ///   0:(0,0) ── 1:(1,0) ── 2:(2,0)
    /// ```
    ///
    /// 0→1→2→4 has length 3; 0→3→4 has length 5 + √20.
    pub fn grid() -> StreetGraph {
        let mut b = StreetGraphBuilder::new();
        b.add_vertex(VertexId(0), Point::new(0.0, 0.0));
        b.add_vertex(VertexId(1), Point::new(1.0, 0.0));
        b.add_vertex(VertexId(2), Point::new(2.0, 0.0));
        b.add_vertex(VertexId(3), Point::new(0.0, 5.0));
        b.add_vertex(VertexId(4), Point::new(2.0, 1.0));
        for (a, c) in [(0, 1), (1, 2), (2, 4), (0, 3), (3, 4)] {
            b.add_edge(VertexId(a), VertexId(c)).unwrap();
        }
        b.build()
    }

    /// Triangle 0-1-2 plus a separate edge 3-4.
    pub fn two_components() -> StreetGraph {
        let mut b = StreetGraphBuilder::new();
        b.add_vertex(VertexId(0), Point::new(0.0, 0.0));
        b.add_vertex(VertexId(1), Point::new(1.0, 0.0));
        b.add_vertex(VertexId(2), Point::new(0.0, 1.0));
        b.add_vertex(VertexId(3), Point::new(9.0, 9.0));
        b.add_vertex(VertexId(4), Point::new(9.0, 8.0));
        for (a, c) in [(0, 1), (1, 2), (2, 0), (3, 4)] {
            b.add_edge(VertexId(a), VertexId(c)).unwrap();
        }
        b.build()
    }

    pub fn v(i: u32) -> VertexId {
        VertexId(i)
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use wm_core::{EdgeKey, EdgePoint, Point, VertexId};
    use crate::{GraphError, StreetGraphBuilder};
    use super::helpers::{grid, v};

    #[test]
    fn empty_build() {
        let g = StreetGraphBuilder::new().build();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn edge_weight_is_euclidean() {
        let g = grid();
        assert_eq!(g.edge_length(EdgeKey::new(v(0), v(1))), Some(1.0));
        assert_eq!(g.edge_length(EdgeKey::new(v(4), v(2))), Some(1.0));
        assert_eq!(g.edge_length(EdgeKey::new(v(0), v(3))), Some(5.0));
        assert_eq!(g.edge_length(EdgeKey::new(v(0), v(4))), None);
    }

    #[test]
    fn adjacency_is_undirected() {
        let g = grid();
        assert_eq!(g.degree(v(0)), 2);
        assert_eq!(g.degree(v(1)), 2);
        assert_eq!(g.degree(v(4)), 2);
        assert!(g.neighbors(v(2)).any(|(n, _)| n == v(4)));
        assert!(g.neighbors(v(4)).any(|(n, _)| n == v(2)));
    }

    #[test]
    fn unknown_vertex_rejected() {
        let mut b = StreetGraphBuilder::new();
        b.add_vertex(VertexId(0), Point::new(0.0, 0.0));
        let err = b.add_edge(VertexId(0), VertexId(7)).unwrap_err();
        assert!(matches!(err, GraphError::UnknownVertex { missing, .. } if missing == VertexId(7)));
    }

    #[test]
    fn point_position_interpolates() {
        let g = grid();
        let p = g.point_position(EdgePoint::new(v(1), v(2), 0.25));
        assert_eq!(p, Point::new(1.25, 0.0));
        // Reversed orientation describes the same location.
        let q = g.point_position(EdgePoint::new(v(2), v(1), 0.75));
        assert!(p.distance(q) < 1e-12);
    }
}

// ── Shortest paths ────────────────────────────────────────────────────────────

#[cfg(test)]
mod paths {
    use wm_core::{Point, VertexId};
    use crate::{GraphError, StreetGraphBuilder};
    use super::helpers::{grid, v};

    #[test]
    fn shortest_path_correct() {
        let g = grid();
        let p = g.shortest_path(v(0), v(4));
        assert_eq!(p.vertices, vec![v(0), v(1), v(2), v(4)]);
        assert_eq!(p.length, 3.0);
    }

    #[test]
    fn length_matches_edge_sum() {
        let g = grid();
        for dest in 0..5 {
            let p = g.shortest_path(v(3), v(dest));
            let sum: f64 = p.edges().map(|e| g.edge_length(e).unwrap()).sum();
            assert!((sum - p.length).abs() < 1e-9, "dest {dest}");
        }
    }

    #[test]
    fn trivial_same_vertex() {
        let g = grid();
        let p = g.shortest_path(v(2), v(2));
        assert_eq!(p.vertices, vec![v(2)]);
        assert_eq!(p.length, 0.0);
    }

    #[test]
    fn disconnected_is_empty_and_zero() {
        let mut b = StreetGraphBuilder::new();
        b.add_vertex(VertexId(0), Point::new(0.0, 0.0));
        b.add_vertex(VertexId(1), Point::new(1.0, 0.0));
        let g = b.build();
        let p = g.shortest_path(v(0), v(1));
        assert!(p.is_empty());
        assert_eq!(p.length, 0.0);
        assert!(matches!(g.route(v(0), v(1)), Err(GraphError::NoPath { .. })));
    }

    #[test]
    fn from_edge_continues_forward() {
        let g = grid();
        let p = g.shortest_path_from_edge(v(1), v(2), v(4));
        assert_eq!(p.vertices, vec![v(2), v(4)]);
        assert_eq!(p.length, 2.0);
    }

    #[test]
    fn from_edge_turns_back() {
        let g = grid();
        let p = g.shortest_path_from_edge(v(1), v(2), v(0));
        assert_eq!(p.vertices, vec![v(1), v(0)]);
        assert_eq!(p.length, 1.0);
    }

    #[test]
    fn from_edge_to_own_start_vertex() {
        let g = grid();
        let p = g.shortest_path_from_edge(v(1), v(2), v(1));
        assert_eq!(p.vertices, vec![v(1)]);
        assert_eq!(p.length, 0.0);
    }

    #[test]
    fn single_source_matches_point_queries() {
        let g = grid();
        let dist = g.single_source(v(0));
        for dest in 0..5 {
            assert!((dist[dest as usize] - g.shortest_path(v(0), v(dest)).length).abs() < 1e-9);
        }
    }

    #[test]
    fn weighted_distances_use_given_weights() {
        let g = grid();
        // Every edge costs 1 → hop count.
        let hops = g.weighted_distances(v(0), &vec![1; g.edge_count()]);
        assert_eq!(hops, vec![0, 1, 2, 1, 2]);
    }
}

// ── Network distance ──────────────────────────────────────────────────────────

#[cfg(test)]
mod distance {
    use proptest::prelude::*;
    use wm_core::{EdgePoint, Point, VertexId};
    use crate::StreetGraphBuilder;
    use super::helpers::{grid, v};

    #[test]
    fn across_edges() {
        let mut g = grid();
        let d = g.network_distance(
            EdgePoint::new(v(0), v(1), 0.5),
            EdgePoint::new(v(2), v(4), 0.5),
        );
        assert!((d - 2.0).abs() < 1e-9, "got {d}");
    }

    #[test]
    fn same_edge_direct_stretch() {
        let mut g = grid();
        let d = g.network_distance(
            EdgePoint::new(v(0), v(1), 0.2),
            EdgePoint::new(v(0), v(1), 0.7),
        );
        assert!((d - 0.5).abs() < 1e-9, "got {d}");
    }

    #[test]
    fn sources_are_memoized() {
        let mut g = grid();
        let a = EdgePoint::new(v(0), v(1), 0.5);
        g.network_distance(a, EdgePoint::new(v(2), v(4), 0.1));
        assert_eq!(g.cached_sources(), 2);
        g.network_distance(a, EdgePoint::new(v(3), v(4), 0.9));
        assert_eq!(g.cached_sources(), 2);
        g.clear_distance_cache();
        assert_eq!(g.cached_sources(), 0);
    }

    #[test]
    fn disconnected_is_infinite() {
        let mut b = StreetGraphBuilder::new();
        for (i, x) in [0.0, 1.0, 5.0, 6.0].into_iter().enumerate() {
            b.add_vertex(VertexId(i as u32), Point::new(x, 0.0));
        }
        b.add_edge(VertexId(0), VertexId(1)).unwrap();
        b.add_edge(VertexId(2), VertexId(3)).unwrap();
        let mut g = b.build();
        let d = g.network_distance(
            EdgePoint::new(v(0), v(1), 0.5),
            EdgePoint::new(v(2), v(3), 0.5),
        );
        assert!(d.is_infinite());
    }

    const EDGES: [(u32, u32); 5] = [(0, 1), (1, 2), (2, 4), (0, 3), (3, 4)];

    proptest! {
        #[test]
        fn symmetric(e1 in 0usize..5, f1 in 0.0f64..=1.0, e2 in 0usize..5, f2 in 0.0f64..=1.0) {
            let mut g = grid();
            let p1 = EdgePoint::new(v(EDGES[e1].0), v(EDGES[e1].1), f1);
            let p2 = EdgePoint::new(v(EDGES[e2].0), v(EDGES[e2].1), f2);
            let there = g.network_distance(p1, p2);
            let back  = g.network_distance(p2, p1);
            prop_assert!((there - back).abs() < 1e-9, "{there} vs {back}");
        }

        #[test]
        fn never_shorter_than_straight_line(e1 in 0usize..5, f1 in 0.0f64..=1.0, e2 in 0usize..5, f2 in 0.0f64..=1.0) {
            let mut g = grid();
            let p1 = EdgePoint::new(v(EDGES[e1].0), v(EDGES[e1].1), f1);
            let p2 = EdgePoint::new(v(EDGES[e2].0), v(EDGES[e2].1), f2);
            let euclid = g.point_position(p1).distance(g.point_position(p2));
            prop_assert!(g.network_distance(p1, p2) + 1e-9 >= euclid);
        }
    }
}

// ── Components ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod components {
    use wm_core::EdgeKey;
    use super::helpers::{grid, two_components, v};

    #[test]
    fn largest_component_picks_triangle() {
        let g = two_components();
        assert_eq!(g.largest_component(), vec![v(0), v(1), v(2)]);
        let (_, count) = g.component_labels();
        assert_eq!(count, 2);
    }

    #[test]
    fn spanning_edges_of_triangle() {
        let g = two_components();
        let spanned = g.spanning_edges(&g.largest_component());
        let keys: Vec<EdgeKey> = spanned.iter().map(|(e, _)| *e).collect();
        assert_eq!(keys, vec![
            EdgeKey::new(v(0), v(1)),
            EdgeKey::new(v(1), v(2)),
            EdgeKey::new(v(0), v(2)),
        ]);
    }

    #[test]
    fn connected_graph_is_one_component() {
        let g = grid();
        assert_eq!(g.largest_component().len(), 5);
        assert_eq!(g.spanning_edges(&g.largest_component()).len(), 5);
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod serde_derives {
    use crate::Path;

    fn assert_serde<T: serde::Serialize + serde::de::DeserializeOwned>() {}

    #[test]
    fn path_is_serializable() {
        assert_serde::<Path>();
    }
}
