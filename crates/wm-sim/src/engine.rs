//! The `Engine` struct: configuration, lifecycle, and accessors.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use wm_core::{
    Adversary, Detector, DetectorId, DetectorIndex, EdgeKey, EdgePoint, EngineConfig, Event,
    Point, SimRng, Tick, VertexId,
};
use wm_graph::{Path, StreetGraph, StreetGraphBuilder};
use wm_reach::{DetectorGrid, ProximityEvaluator};
use wm_strategy::{ActivationStrategy, StrategyConfig, StrategyContext};

use crate::{EdgeSampler, EngineObserver, SimError, SimResult};

/// Where the engine is in its run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No tick taken since the last reset.
    Idle,
    Running,
    /// Path fully walked and every precomputed position consumed.
    Done,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Single-threaded simulation of one adversary against a detector field.
///
/// Configure in this order: vertices and edges, [`build_graph`], detectors,
/// a strategy, then [`set_attacker`].  Tick with [`do_tick`] or
/// [`run_to_completion`].
///
/// Three reset levels allow reusing expensive state across runs:
///
/// | Call            | Clears                                   | Keeps                        |
/// |-----------------|------------------------------------------|------------------------------|
/// | [`reset`]       | tick, events, tallies, batch             | graph, detectors, strategy   |
/// | [`half_reset`]  | the above, detectors, strategy; reseeds  | graph, worker pool           |
/// | [`full_reset`]  | the above, graph                         | worker pool                  |
///
/// [`build_graph`]: Self::build_graph
/// [`set_attacker`]: Self::set_attacker
/// [`do_tick`]: Self::do_tick
/// [`run_to_completion`]: Self::run_to_completion
/// [`reset`]: Self::reset
/// [`half_reset`]: Self::half_reset
/// [`full_reset`]: Self::full_reset
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) rng: SimRng,

    // ── Static structures ─────────────────────────────────────────────────
    pub(crate) builder: StreetGraphBuilder,
    pub(crate) graph: StreetGraph,
    pub(crate) graph_built: bool,
    pub(crate) detectors: Vec<Detector>,
    pub(crate) strategy: Option<Box<dyn ActivationStrategy>>,
    pub(crate) evaluator: ProximityEvaluator,
    pub(crate) sampler: Option<EdgeSampler>,

    // ── Adversary and path ────────────────────────────────────────────────
    pub(crate) adversary: Adversary,
    /// Waypoints not yet reached by the batch walker.
    pub(crate) remaining: VecDeque<VertexId>,
    pub(crate) true_path: Path,
    /// Position of the batch walker, which runs ahead of `adversary`.
    pub(crate) walker: EdgePoint,
    pub(crate) path_consumed: bool,

    // ── Precomputed batch ─────────────────────────────────────────────────
    pub(crate) batch: Vec<(EdgePoint, Point)>,
    pub(crate) reach: Vec<Vec<DetectorIndex>>,
    pub(crate) cursor: usize,

    // ── Per-run state ─────────────────────────────────────────────────────
    pub(crate) state: EngineState,
    pub(crate) tick: Tick,
    pub(crate) events: Vec<Event>,
    pub(crate) active_ticks: u64,
    pub(crate) detected: FxHashSet<DetectorIndex>,
    pub(crate) possible: FxHashSet<DetectorIndex>,
    pub(crate) latest_detection: Tick,
    pub(crate) latest_possible: Tick,
    /// Edges the adversary was on when detected, starting with its start edge.
    pub(crate) detection_points: Vec<EdgeKey>,
}

impl Engine {
    /// Create an engine and start its worker pool.
    pub fn new(config: EngineConfig) -> SimResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SimRng::new(seed),
            None => SimRng::from_entropy(),
        };
        let workers = config.resolved_workers();
        let evaluator = ProximityEvaluator::new(workers)?;
        debug!(workers, batch_size = config.batch_size, seed = ?config.seed, "engine created");

        let origin = EdgePoint::new(VertexId(0), VertexId(0), 0.0);
        Ok(Self {
            config,
            rng,
            builder: StreetGraphBuilder::new(),
            graph: StreetGraph::empty(),
            graph_built: false,
            detectors: Vec::new(),
            strategy: None,
            evaluator,
            sampler: None,
            adversary: Adversary { at: origin, position: Point::default(), speed: 0.0, tx_prob: 0.0 },
            remaining: VecDeque::new(),
            true_path: Path::default(),
            walker: origin,
            path_consumed: false,
            batch: Vec::new(),
            reach: Vec::new(),
            cursor: 0,
            state: EngineState::Idle,
            tick: Tick::ZERO,
            events: Vec::new(),
            active_ticks: 0,
            detected: FxHashSet::default(),
            possible: FxHashSet::default(),
            latest_detection: Tick::ZERO,
            latest_possible: Tick::ZERO,
            detection_points: Vec::new(),
        })
    }

    // ── Graph ─────────────────────────────────────────────────────────────

    pub fn add_vertex(&mut self, id: VertexId, pos: Point) {
        self.builder.add_vertex(id, pos);
    }

    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> SimResult<()> {
        Ok(self.builder.add_edge(a, b)?)
    }

    /// Freeze the vertices and edges added so far.
    pub fn build_graph(&mut self) {
        let builder = std::mem::take(&mut self.builder);
        self.graph = builder.build();
        self.graph_built = true;
        self.sampler = None;
    }

    pub fn graph(&self) -> &StreetGraph {
        &self.graph
    }

    // ── Detectors ─────────────────────────────────────────────────────────

    /// Place a detector `fraction` of the way from `v1` to `v2`.
    ///
    /// Detectors must be added after [`build_graph`](Self::build_graph) and
    /// before the strategy is attached.
    pub fn add_detector(
        &mut self,
        id:       DetectorId,
        v1:       VertexId,
        v2:       VertexId,
        fraction: f64,
        radius:   f64,
    ) -> SimResult<DetectorIndex> {
        self.require_vertices(&[v1, v2])?;
        let index = DetectorIndex(self.detectors.len() as u32);
        let at = EdgePoint::new(v1, v2, fraction);
        self.detectors.push(Detector {
            id,
            index,
            at,
            position: self.graph.point_position(at),
            radius,
            active: false,
            active_since: 0,
        });
        Ok(index)
    }

    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    pub fn detector(&self, index: DetectorIndex) -> Option<&Detector> {
        self.detectors.get(index.index())
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    /// Index of the detector with external id `id`.
    ///
    /// Harnesses usually number detectors `0..n` in insertion order, so
    /// `index == id` is tried first.
    pub fn detector_index(&self, id: DetectorId) -> Option<DetectorIndex> {
        if let Some(d) = self.detectors.get(id.0 as usize) {
            if d.id == id {
                return Some(d.index);
            }
        }
        self.detectors.iter().find(|d| d.id == id).map(|d| d.index)
    }

    // ── Strategy ──────────────────────────────────────────────────────────

    /// Attach `strategy`, replacing any previous one.
    ///
    /// The old strategy is dropped first, then the spatial index is rebuilt
    /// over the current detectors and the new strategy is initialized.
    pub fn set_strategy(&mut self, mut strategy: Box<dyn ActivationStrategy>) {
        self.strategy = None;
        let grid = DetectorGrid::build(&self.detectors);
        self.evaluator.set_grid(Some(Arc::new(grid)));

        let mut ctx = StrategyContext::new(&mut self.detectors, &[], &mut self.graph, &mut self.rng);
        strategy.init(&mut ctx);
        debug!(strategy = strategy.name(), detectors = self.detectors.len(), "strategy attached");
        self.strategy = Some(strategy);
    }

    pub fn set_strategy_config(&mut self, config: &StrategyConfig) -> SimResult<()> {
        let strategy = config.build()?;
        self.set_strategy(strategy);
        Ok(())
    }

    pub fn strategy_name(&self) -> Option<&'static str> {
        self.strategy.as_ref().map(|s| s.name())
    }

    // ── Adversary ─────────────────────────────────────────────────────────

    /// Place the adversary `fraction` of the way from `v1` to `v2`, heading
    /// for `target`, and let the strategy pick its initial active set
    /// around `seed`.
    ///
    /// Returns whether the route is at least `min_path_len` long.  A short
    /// route is still set up and can be ticked; the flag only tells the
    /// harness whether to count the run.
    #[allow(clippy::too_many_arguments)]
    pub fn set_attacker(
        &mut self,
        v1:           VertexId,
        v2:           VertexId,
        target:       VertexId,
        fraction:     f64,
        speed:        f64,
        tx_prob:      f64,
        seed:         DetectorIndex,
        min_path_len: f64,
    ) -> SimResult<bool> {
        self.require_vertices(&[v1, v2, target])?;
        // The seed is only read by a strategy's `tick0`.
        if self.strategy.is_some() && seed.index() >= self.detectors.len() {
            return Err(SimError::NotConfigured(format!(
                "seed detector {seed} out of range ({} detectors)",
                self.detectors.len()
            )));
        }

        let at = EdgePoint::new(v1, v2, fraction);
        self.adversary = Adversary { at, position: self.graph.point_position(at), speed, tx_prob };
        self.walker = at;

        let path = self.graph.shortest_path_from_edge(v1, v2, target);
        self.remaining = path.vertices.iter().copied().collect();
        self.true_path = path;
        self.clear_batch();

        for d in self.detectors.iter_mut() {
            d.active = false;
            d.active_since = 0;
        }
        self.detection_points.push(at.edge);

        if let Some(strategy) = self.strategy.as_mut() {
            let mut ctx = StrategyContext::new(&mut self.detectors, &[], &mut self.graph, &mut self.rng);
            strategy.tick0(seed, &mut ctx);
        }

        let valid = self.true_path.length >= min_path_len;
        debug!(
            start = %at.edge,
            %target,
            length = self.true_path.length,
            waypoints = self.true_path.vertices.len(),
            valid,
            "adversary placed",
        );
        Ok(valid)
    }

    pub fn attacker(&self) -> &Adversary {
        &self.adversary
    }

    /// The adversary's full route: waypoints after its start position.
    pub fn true_path(&self) -> &Path {
        &self.true_path
    }

    // ── Run state ─────────────────────────────────────────────────────────

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn is_done(&self) -> bool {
        self.state == EngineState::Done
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Events of the most recent tick that have not been popped.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Remove and return the most recently produced event.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop()
    }

    /// Tick until done, reporting each tick to `observer`.
    pub fn run_to_completion<O: EngineObserver>(&mut self, observer: &mut O) {
        while !self.is_done() {
            let before = self.tick;
            self.do_tick();
            if self.tick != before {
                observer.on_tick_end(self.tick, &self.events);
            }
        }
        observer.on_run_end(self.tick);
    }

    // ── Randomness ────────────────────────────────────────────────────────

    /// Uniform draw in `[0, 1)` from the engine's generator.
    pub fn random_float(&mut self) -> f64 {
        self.rng.unit()
    }

    /// Uniform integer in `0..=max` from the engine's generator.
    pub fn random_int(&mut self, max: u32) -> u32 {
        self.rng.gen_range(0..=max)
    }

    /// Restart the generator from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// A random edge of the largest connected component, weighted by
    /// length.  `None` for an edgeless graph.
    pub fn random_weighted_edge(&mut self) -> Option<EdgeKey> {
        let sampler = self.sampler.get_or_insert_with(|| EdgeSampler::new(&self.graph));
        sampler.sample(&mut self.rng)
    }

    // ── Resets ────────────────────────────────────────────────────────────

    /// Clear per-run state.  Graph, detectors, and strategy stay.
    pub fn reset(&mut self) {
        self.events.clear();
        self.active_ticks = 0;
        self.detected.clear();
        self.possible.clear();
        self.latest_detection = Tick::ZERO;
        self.latest_possible = Tick::ZERO;
        self.detection_points.clear();
        self.clear_batch();
        self.tick = Tick::ZERO;
    }

    /// [`reset`](Self::reset), drop detectors and strategy, and reseed the
    /// generator if the engine has a fixed seed.
    pub fn half_reset(&mut self) {
        self.reset();
        self.strategy = None;
        self.evaluator.set_grid(None);
        self.detectors.clear();
        if let Some(seed) = self.config.seed {
            self.rng.reseed(seed);
        }
    }

    /// [`half_reset`](Self::half_reset) and discard the graph.
    pub fn full_reset(&mut self) {
        self.half_reset();
        self.builder = StreetGraphBuilder::new();
        self.graph = StreetGraph::empty();
        self.graph_built = false;
        self.sampler = None;
        info!("engine fully reset");
    }

    // ── Internals ─────────────────────────────────────────────────────────

    pub(crate) fn clear_batch(&mut self) {
        self.batch.clear();
        self.reach.clear();
        self.cursor = 0;
        self.path_consumed = false;
        self.state = EngineState::Idle;
    }

    fn require_vertices(&self, vertices: &[VertexId]) -> SimResult<()> {
        if !self.graph_built {
            return Err(SimError::NotConfigured("graph not built".into()));
        }
        if let Some(v) = vertices.iter().find(|v| v.index() >= self.graph.vertex_count()) {
            return Err(SimError::NotConfigured(format!("unknown vertex {v}")));
        }
        Ok(())
    }
}
