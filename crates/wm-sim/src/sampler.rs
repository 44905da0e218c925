//! Length-weighted random edge selection.
//!
//! The pool holds every edge spanned by the graph's largest connected
//! component, in insertion order.  Each edge owns the interval
//! `[start, end)` of the running length sum; a uniform draw scaled by the
//! total picks the interval containing it via binary search.  Zero-length
//! edges own empty intervals and are never picked while the total is
//! positive.

use wm_core::{EdgeKey, SimRng};
use wm_graph::StreetGraph;

#[derive(Clone, Debug, Default)]
pub struct EdgeSampler {
    edges: Vec<EdgeKey>,
    /// `ends[i]` is the running length sum through edge `i`.
    ends: Vec<f64>,
}

impl EdgeSampler {
    pub fn new(graph: &StreetGraph) -> Self {
        let spanned = graph.spanning_edges(&graph.largest_component());
        let mut edges = Vec::with_capacity(spanned.len());
        let mut ends = Vec::with_capacity(spanned.len());
        let mut total = 0.0;
        for (edge, len) in spanned {
            total += len;
            edges.push(edge);
            ends.push(total);
        }
        Self { edges, ends }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn total_length(&self) -> f64 {
        self.ends.last().copied().unwrap_or(0.0)
    }

    /// The edge owning position `u · total` for `u ∈ [0, 1)`.
    pub fn pick(&self, u: f64) -> Option<EdgeKey> {
        if self.edges.is_empty() {
            return None;
        }
        let point = u * self.total_length();
        let i = self.ends.partition_point(|&end| end <= point);
        Some(self.edges[i.min(self.edges.len() - 1)])
    }

    pub fn sample(&self, rng: &mut SimRng) -> Option<EdgeKey> {
        self.pick(rng.unit())
    }
}
