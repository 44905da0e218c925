//! Memoized point-to-point network distance.
//!
//! A query between points on edges `(a, b)` and `(c, d)` needs single-source
//! distance vectors from `a` and from `b`.  Maps have far more vertices than
//! there are distinct query sources, so each vector is computed once and
//! kept for the lifetime of the graph.

use rustc_hash::FxHashMap;
use tracing::trace;

use wm_core::{EdgePoint, VertexId};

use crate::StreetGraph;

/// Single-source distance vectors keyed by source vertex.
#[derive(Default)]
pub(crate) struct DistanceCache {
    by_source: FxHashMap<VertexId, Box<[f64]>>,
}

impl StreetGraph {
    /// Shortest distance along the network between two points on edges.
    ///
    /// Takes the minimum over the four endpoint pairings of the two edges,
    /// each padded with the partial edge lengths from the points to the
    /// chosen endpoints.  Points on the same edge also consider the direct
    /// stretch between them.  Returns `f64::INFINITY` when disconnected.
    pub fn network_distance(&mut self, p1: EdgePoint, p2: EdgePoint) -> f64 {
        let (a, b) = (p1.edge.lo, p1.edge.hi);
        let (c, d) = (p2.edge.lo, p2.edge.hi);
        let len1 = self.edge_length(p1.edge).unwrap_or(0.0);
        let len2 = self.edge_length(p2.edge).unwrap_or(0.0);

        self.ensure_source(a);
        self.ensure_source(b);
        let cache = &self.distance_cache.by_source;
        let (from_a, from_b) = match (cache.get(&a), cache.get(&b)) {
            (Some(x), Some(y)) => (x, y),
            _ => return f64::INFINITY,
        };

        let near_a = p1.fraction * len1;
        let near_b = (1.0 - p1.fraction) * len1;
        let near_c = p2.fraction * len2;
        let near_d = (1.0 - p2.fraction) * len2;

        let mut best = (from_a[c.index()] + (near_a + near_c))
            .min(from_a[d.index()] + (near_a + near_d))
            .min(from_b[c.index()] + (near_b + near_c))
            .min(from_b[d.index()] + (near_b + near_d));

        if p1.edge == p2.edge {
            best = best.min((p1.fraction - p2.fraction).abs() * len1);
        }
        best
    }

    /// Number of source vertices with a cached distance vector.
    pub fn cached_sources(&self) -> usize {
        self.distance_cache.by_source.len()
    }

    /// Drop all cached distance vectors.
    pub fn clear_distance_cache(&mut self) {
        self.distance_cache.by_source.clear();
    }

    fn ensure_source(&mut self, v: VertexId) {
        if v.index() >= self.vertex_count() || self.distance_cache.by_source.contains_key(&v) {
            return;
        }
        trace!(source = v.0, "computing single-source distances");
        let dist = self.single_source(v).into_boxed_slice();
        self.distance_cache.by_source.insert(v, dist);
    }
}
