//! k-smartest-neighbours: activation neighbourhoods measured in detectors
//! passed, not in metres.
//!
//! # Neighbourhood of detector `i` on edge `(u, v)`
//!
//! Detectors are grouped per edge and sorted by fraction (ties by index).
//! Each edge gets a weight equal to the number of detectors on it, so a
//! shortest-path distance over those weights counts detectors crossed.
//!
//! 1. Walk `i`'s own edge list outward: up to `k` neighbours towards `v`
//!    and up to `k` towards `u`.  Whatever is left of each budget is
//!    `k_large` (the `v` side) and `k_small` (the `u` side).
//! 2. Compute weighted distances from `u` and from `v`.
//! 3. Every vertex `w` with `remaining(w) = max(k_small − d_u(w),
//!    k_large − d_v(w)) > 0` recruits up to `remaining(w)` detectors from
//!    each incident edge, starting at the end of that edge nearest `w`.
//! 4. Keep the recruited detectors within `max_distance` (Euclidean) of `i`.
//!
//! # Eager vs lazy
//!
//! Eager mode computes every neighbourhood in `init` and shares the
//! weighted-distance vectors across detectors with a common edge endpoint.
//! Lazy mode computes a detector's neighbourhood the first time it is
//! activated, without sharing.

use rustc_hash::FxHashMap;
use tracing::debug;

use wm_core::{Detector, DetectorIndex, EdgeKey, VertexId};
use wm_graph::StreetGraph;

use crate::{ActivationStrategy, StrategyContext};

/// Weighted-distance vectors keyed by source vertex.
type DistanceCache = FxHashMap<VertexId, Vec<u32>>;

pub struct KSmartestNeighbors {
    pub k: u32,
    pub max_distance: f64,
    pub lazy: bool,

    /// Detectors on each edge, sorted by fraction from `lo` to `hi`.
    by_edge: FxHashMap<EdgeKey, Vec<DetectorIndex>>,
    /// Detector count per graph edge index.
    weights: Vec<u32>,
    /// `None` until computed (lazy mode only).
    neighborhoods: Vec<Option<Vec<DetectorIndex>>>,
}

impl KSmartestNeighbors {
    pub fn new(k: u32, max_distance: f64, lazy: bool) -> Self {
        Self {
            k,
            max_distance,
            lazy,
            by_edge: FxHashMap::default(),
            weights: Vec::new(),
            neighborhoods: Vec::new(),
        }
    }

    /// The computed neighbourhood of `index`, excluding `index` itself.
    pub fn neighborhood(&self, index: DetectorIndex) -> Option<&[DetectorIndex]> {
        self.neighborhoods.get(index.index())?.as_deref()
    }

    fn group_by_edge(&mut self, detectors: &[Detector], graph: &StreetGraph) {
        self.by_edge.clear();
        for d in detectors {
            self.by_edge.entry(d.at.edge).or_default().push(d.index);
        }
        for list in self.by_edge.values_mut() {
            list.sort_by(|a, b| {
                detectors[a.index()].at.fraction
                    .total_cmp(&detectors[b.index()].at.fraction)
                    .then(a.cmp(b))
            });
        }

        self.weights = vec![0; graph.edge_count()];
        for (edge, list) in &self.by_edge {
            if let Some(e) = graph.edge_index(*edge) {
                self.weights[e] = list.len() as u32;
            }
        }
    }

    fn compute(
        &self,
        i: DetectorIndex,
        detectors: &[Detector],
        graph: &StreetGraph,
        cache: &mut DistanceCache,
    ) -> Vec<DetectorIndex> {
        let me = &detectors[i.index()];
        let mut member = vec![false; detectors.len()];
        let k = self.k as usize;

        // Own edge, both directions.
        let (mut k_small, mut k_large) = (self.k as i64, self.k as i64);
        if let Some(list) = self.by_edge.get(&me.at.edge) {
            if let Some(pos) = list.iter().position(|&d| d == i) {
                for &d in list[pos + 1..].iter().take(k) {
                    member[d.index()] = true;
                    k_large -= 1;
                }
                for &d in list[..pos].iter().rev().take(k) {
                    member[d.index()] = true;
                    k_small -= 1;
                }
            }
        }

        let (u, v) = (me.at.edge.lo, me.at.edge.hi);
        for src in [u, v] {
            if !cache.contains_key(&src) {
                cache.insert(src, graph.weighted_distances(src, &self.weights));
            }
        }
        if let (Some(du), Some(dv)) = (cache.get(&u), cache.get(&v)) {
            for w in 0..graph.vertex_count() {
                let remaining = (k_small - du[w] as i64).max(k_large - dv[w] as i64);
                if remaining <= 0 {
                    continue;
                }
                let w = VertexId(w as u32);
                for (_, e) in graph.neighbors(w) {
                    let edge = graph.edges[e];
                    let Some(list) = self.by_edge.get(&edge) else { continue };
                    let take = remaining as usize;
                    if edge.lo == w {
                        list.iter().take(take).for_each(|d| member[d.index()] = true);
                    } else {
                        list.iter().rev().take(take).for_each(|d| member[d.index()] = true);
                    }
                }
            }
        }

        member
            .iter()
            .enumerate()
            .filter(|&(j, &m)| m && j != i.index())
            .filter(|&(j, _)| detectors[j].within(me.position, self.max_distance))
            .map(|(j, _)| DetectorIndex(j as u32))
            .collect()
    }

    fn activate_around(&mut self, i: DetectorIndex, ctx: &mut StrategyContext<'_>) {
        if i.index() >= ctx.detectors.len() {
            return;
        }
        if self.lazy && self.neighborhoods.get(i.index()).is_some_and(Option::is_none) {
            let list = self.compute(i, ctx.detectors, ctx.graph, &mut DistanceCache::default());
            self.neighborhoods[i.index()] = Some(list);
        }

        ctx.detectors[i.index()].activate();
        if let Some(Some(list)) = self.neighborhoods.get(i.index()) {
            ctx.activate_all(list);
        }
    }
}

impl ActivationStrategy for KSmartestNeighbors {
    fn name(&self) -> &'static str {
        "k_smartest_neighbors"
    }

    fn init(&mut self, ctx: &mut StrategyContext<'_>) {
        self.group_by_edge(ctx.detectors, ctx.graph);
        self.neighborhoods = vec![None; ctx.detectors.len()];
        if self.lazy {
            return;
        }

        let mut cache = DistanceCache::default();
        for i in 0..ctx.detectors.len() {
            let i = DetectorIndex(i as u32);
            let list = self.compute(i, ctx.detectors, ctx.graph, &mut cache);
            self.neighborhoods[i.index()] = Some(list);
        }
        debug!(
            detectors = ctx.detectors.len(),
            edges_with_detectors = self.by_edge.len(),
            cached_sources = cache.len(),
            "neighbourhoods computed",
        );
    }

    fn tick0(&mut self, seed: DetectorIndex, ctx: &mut StrategyContext<'_>) {
        self.activate_around(seed, ctx);
    }

    fn run(&mut self, ctx: &mut StrategyContext<'_>) {
        let sources = ctx.detecting();
        if sources.is_empty() {
            return;
        }
        ctx.deactivate_all();
        for source in sources {
            self.activate_around(source.index, ctx);
        }
    }
}
