//! Dijkstra shortest paths over the street graph.
//!
//! # Disconnected vertices
//!
//! [`StreetGraph::shortest_path`] never fails: when `dest` is unreachable it
//! returns an empty [`Path`] with length 0.  Callers must treat a zero length
//! as "no connection", not as a legitimate zero-distance route.  Use
//! [`StreetGraph::route`] for a `Result`-returning wrapper.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use wm_core::{EdgeKey, VertexId};

use crate::{GraphError, GraphResult, StreetGraph};

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered vertex sequence plus its total length.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub length: f64,
}

impl Path {
    /// `true` if no path was found.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The undirected edges walked by consecutive vertex pairs.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.vertices.windows(2).map(|w| EdgeKey::new(w[0], w[1]))
    }
}

// ── Heap entry ────────────────────────────────────────────────────────────────

/// Min-heap entry ordered by cost, then vertex id for deterministic ties.
#[derive(Copy, Clone, PartialEq)]
struct Frontier {
    cost: f64,
    vertex: VertexId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

impl StreetGraph {
    /// Shortest path from `src` to `dest`, including both endpoints.
    ///
    /// `src == dest` yields the single-vertex path `[src]` of length 0.
    /// Unreachable `dest` yields an empty path of length 0.
    pub fn shortest_path(&self, src: VertexId, dest: VertexId) -> Path {
        let n = self.vertex_count();
        if src.index() >= n || dest.index() >= n {
            return Path::default();
        }

        let mut dist = vec![f64::INFINITY; n];
        let mut prev = vec![VertexId::INVALID; n];
        dist[src.index()] = 0.0;

        let mut heap = BinaryHeap::new();
        heap.push(Reverse(Frontier { cost: 0.0, vertex: src }));

        while let Some(Reverse(Frontier { cost, vertex })) = heap.pop() {
            if vertex == dest {
                return reconstruct(&prev, src, dest, cost);
            }
            // Skip stale heap entries.
            if cost > dist[vertex.index()] {
                continue;
            }
            for (next, edge) in self.neighbors(vertex) {
                let new_cost = cost + self.edge_len[edge];
                if new_cost < dist[next.index()] {
                    dist[next.index()] = new_cost;
                    prev[next.index()] = vertex;
                    heap.push(Reverse(Frontier { cost: new_cost, vertex: next }));
                }
            }
        }

        Path::default()
    }

    /// Shortest path to `dest` for a walker currently on the edge `from`–`to`.
    ///
    /// The search runs from `from`; the returned vertices are the walker's
    /// waypoints, excluding its current position.  The first waypoint is
    /// always an endpoint of the starting edge: `to` if the path leaves
    /// through it, otherwise `from` (the walker turns back first).  The
    /// length is that of the `from → dest` search, so 0 still signals "no
    /// connection".
    pub fn shortest_path_from_edge(&self, from: VertexId, to: VertexId, dest: VertexId) -> Path {
        let full = self.shortest_path(from, dest);
        let mut vertices: Vec<VertexId> = full.vertices.iter().skip(1).copied().collect();
        if vertices.first() != Some(&to) {
            vertices.insert(0, from);
        }
        Path { vertices, length: full.length }
    }

    /// `Result`-returning variant of [`shortest_path`](Self::shortest_path).
    pub fn route(&self, src: VertexId, dest: VertexId) -> GraphResult<Path> {
        let path = self.shortest_path(src, dest);
        if path.is_empty() {
            Err(GraphError::NoPath { from: src, to: dest })
        } else {
            Ok(path)
        }
    }

    /// Distances from `src` to every vertex (`f64::INFINITY` if unreachable).
    pub fn single_source(&self, src: VertexId) -> Vec<f64> {
        let n = self.vertex_count();
        let mut dist = vec![f64::INFINITY; n];
        if src.index() >= n {
            return dist;
        }
        dist[src.index()] = 0.0;

        let mut heap = BinaryHeap::new();
        heap.push(Reverse(Frontier { cost: 0.0, vertex: src }));

        while let Some(Reverse(Frontier { cost, vertex })) = heap.pop() {
            if cost > dist[vertex.index()] {
                continue;
            }
            for (next, edge) in self.neighbors(vertex) {
                let new_cost = cost + self.edge_len[edge];
                if new_cost < dist[next.index()] {
                    dist[next.index()] = new_cost;
                    heap.push(Reverse(Frontier { cost: new_cost, vertex: next }));
                }
            }
        }
        dist
    }

    /// Integer-weighted distances from `src`, with `weights[e]` as the cost
    /// of edge index `e`.  Unreachable vertices get `u32::MAX`.
    ///
    /// Used with per-edge detector counts to measure distance in detectors
    /// passed rather than in length.
    pub fn weighted_distances(&self, src: VertexId, weights: &[u32]) -> Vec<u32> {
        let n = self.vertex_count();
        let mut dist = vec![u32::MAX; n];
        if src.index() >= n {
            return dist;
        }
        dist[src.index()] = 0;

        let mut heap: BinaryHeap<Reverse<(u32, VertexId)>> = BinaryHeap::new();
        heap.push(Reverse((0, src)));

        while let Some(Reverse((cost, vertex))) = heap.pop() {
            if cost > dist[vertex.index()] {
                continue;
            }
            for (next, edge) in self.neighbors(vertex) {
                let new_cost = cost.saturating_add(weights[edge]);
                if new_cost < dist[next.index()] {
                    dist[next.index()] = new_cost;
                    heap.push(Reverse((new_cost, next)));
                }
            }
        }
        dist
    }
}

fn reconstruct(prev: &[VertexId], src: VertexId, dest: VertexId, length: f64) -> Path {
    let mut vertices = vec![dest];
    let mut cur = dest;
    while cur != src {
        cur = prev[cur.index()];
        vertices.push(cur);
    }
    vertices.reverse();
    Path { vertices, length }
}
