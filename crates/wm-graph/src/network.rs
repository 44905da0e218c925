//! Street graph representation and builder.
//!
//! # Data layout
//!
//! The graph is undirected; every edge appears twice in the adjacency arrays
//! (once per endpoint), stored in **Compressed Sparse Row (CSR)** form.
//! Given a `VertexId v`, its incident half-edges occupy the slice:
//!
//! ```text
//! adj_to[ adj_start[v] .. adj_start[v+1] ]
//! ```
//!
//! `adj_edge` maps each half-edge back to its edge index, so edge-level data
//! (`edges`, `edge_len`) is stored exactly once in insertion order.
//!
//! Edge weights are Euclidean endpoint distances, fixed when the edge is
//! added.

use rustc_hash::FxHashMap;
use tracing::debug;

use wm_core::{EdgeKey, EdgePoint, Point, VertexId};

use crate::distance::DistanceCache;
use crate::{GraphError, GraphResult};

// ── StreetGraph ───────────────────────────────────────────────────────────────

/// Undirected, Euclidean-weighted street graph in CSR form.
///
/// Do not construct directly; use [`StreetGraphBuilder`].
pub struct StreetGraph {
    // ── Vertex data ───────────────────────────────────────────────────────
    /// Position of each vertex.  Indexed by `VertexId`.
    pub positions: Vec<Point>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Length = `vertex_count + 1`.
    pub adj_start: Vec<u32>,
    /// Neighbour at the far end of each half-edge.
    pub adj_to: Vec<VertexId>,
    /// Edge index of each half-edge.
    pub adj_edge: Vec<u32>,

    // ── Edge data (indexed by insertion order) ────────────────────────────
    pub edges: Vec<EdgeKey>,
    pub edge_len: Vec<f64>,

    /// First edge index inserted for each key.  Parallel edges keep their
    /// own adjacency entries but share this lookup.
    edge_lookup: FxHashMap<EdgeKey, u32>,

    pub(crate) distance_cache: DistanceCache,
}

impl StreetGraph {
    /// Construct an empty graph with no vertices or edges.
    pub fn empty() -> Self {
        StreetGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over `(neighbour, edge_index)` for every edge incident to `v`.
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        let start = self.adj_start[v.index()] as usize;
        let end   = self.adj_start[v.index() + 1] as usize;
        (start..end).map(|i| (self.adj_to[i], self.adj_edge[i] as usize))
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        (self.adj_start[v.index() + 1] - self.adj_start[v.index()]) as usize
    }

    /// Index of the edge joining the key's endpoints, if any.
    #[inline]
    pub fn edge_index(&self, edge: EdgeKey) -> Option<usize> {
        self.edge_lookup.get(&edge).map(|&i| i as usize)
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self, v: VertexId) -> Point {
        self.positions[v.index()]
    }

    /// Length of `edge`, or `None` if the graph has no such edge.
    #[inline]
    pub fn edge_length(&self, edge: EdgeKey) -> Option<f64> {
        self.edge_index(edge).map(|i| self.edge_len[i])
    }

    /// Cartesian position of a point on an edge (linear interpolation
    /// between the endpoints).
    #[inline]
    pub fn point_position(&self, at: EdgePoint) -> Point {
        self.position(at.edge.lo).lerp(self.position(at.edge.hi), at.fraction)
    }
}

// ── StreetGraphBuilder ────────────────────────────────────────────────────────

/// Construct a [`StreetGraph`] incrementally, then call [`build`](Self::build).
///
/// Vertex ids are expected to be dense (`0..n`); ids skipped by the caller
/// become isolated vertices at the origin.
///
/// # Example
///
/// ```
/// use wm_core::{Point, VertexId};
/// use wm_graph::StreetGraphBuilder;
///
/// let mut b = StreetGraphBuilder::new();
/// b.add_vertex(VertexId(0), Point::new(0.0, 0.0));
/// b.add_vertex(VertexId(1), Point::new(3.0, 4.0));
/// b.add_edge(VertexId(0), VertexId(1)).unwrap();
/// let g = b.build();
/// assert_eq!(g.vertex_count(), 2);
/// assert_eq!(g.edge_count(), 1);
/// ```
#[derive(Default)]
pub struct StreetGraphBuilder {
    positions: Vec<Point>,
    present:   Vec<bool>,
    edges:     Vec<EdgeKey>,
    weights:   Vec<f64>,
}

impl StreetGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of vertices and edges.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            present:   Vec::with_capacity(vertices),
            edges:     Vec::with_capacity(edges),
            weights:   Vec::with_capacity(edges),
        }
    }

    /// Record the position of vertex `id`.  Re-adding an id overwrites it.
    pub fn add_vertex(&mut self, id: VertexId, pos: Point) {
        let i = id.index();
        if i >= self.positions.len() {
            self.positions.resize(i + 1, Point::default());
            self.present.resize(i + 1, false);
        }
        self.positions[i] = pos;
        self.present[i] = true;
    }

    /// Add an undirected edge.  Its weight is the Euclidean distance between
    /// the endpoint positions, so both endpoints must already be present.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> GraphResult<()> {
        for v in [a, b] {
            if !self.present.get(v.index()).copied().unwrap_or(false) {
                return Err(GraphError::UnknownVertex { from: a, to: b, missing: v });
            }
        }
        let w = self.positions[a.index()].distance(self.positions[b.index()]);
        self.edges.push(EdgeKey::new(a, b));
        self.weights.push(w);
        Ok(())
    }

    pub fn vertex_count(&self) -> usize { self.positions.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a read-only [`StreetGraph`].
    ///
    /// Time complexity: O(V + E).
    pub fn build(self) -> StreetGraph {
        let vertex_count = self.positions.len();
        let edge_count   = self.edges.len();

        // Degree count → CSR row pointer.
        let mut adj_start = vec![0u32; vertex_count + 1];
        for e in &self.edges {
            adj_start[e.lo.index() + 1] += 1;
            if e.hi != e.lo {
                adj_start[e.hi.index() + 1] += 1;
            }
        }
        for i in 1..=vertex_count {
            adj_start[i] += adj_start[i - 1];
        }

        // Scatter half-edges, preserving insertion order per vertex.
        let half_edges = adj_start[vertex_count] as usize;
        let mut cursor   = adj_start.clone();
        let mut adj_to   = vec![VertexId::INVALID; half_edges];
        let mut adj_edge = vec![0u32; half_edges];
        let mut edge_lookup = FxHashMap::default();

        for (i, e) in self.edges.iter().enumerate() {
            let i = i as u32;
            let slot = cursor[e.lo.index()] as usize;
            adj_to[slot]   = e.hi;
            adj_edge[slot] = i;
            cursor[e.lo.index()] += 1;
            if e.hi != e.lo {
                let slot = cursor[e.hi.index()] as usize;
                adj_to[slot]   = e.lo;
                adj_edge[slot] = i;
                cursor[e.hi.index()] += 1;
            }
            edge_lookup.entry(*e).or_insert(i);
        }

        debug!(vertices = vertex_count, edges = edge_count, "street graph built");

        StreetGraph {
            positions: self.positions,
            adj_start,
            adj_to,
            adj_edge,
            edges: self.edges,
            edge_len: self.weights,
            edge_lookup,
            distance_cache: DistanceCache::default(),
        }
    }
}
