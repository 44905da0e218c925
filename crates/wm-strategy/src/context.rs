//! Live simulation state lent to every strategy callback.

use wm_core::{Detector, DetectorIndex, EdgePoint, Event, Point, SimRng};
use wm_graph::StreetGraph;

/// Mutable view of the engine state a strategy may read or change.
///
/// Built by the engine for the duration of a single `init`, `tick0`, or
/// `run` call.  Strategies only flip activation fields on `detectors`;
/// the graph is lent mutably so network-distance queries can fill its
/// distance cache.
pub struct StrategyContext<'a> {
    /// Every detector, indexed by `DetectorIndex`.
    pub detectors: &'a mut [Detector],

    /// Events emitted during the current tick (empty during `init`/`tick0`).
    pub events: &'a [Event],

    pub graph: &'a mut StreetGraph,

    /// The engine's generator; strategies draw from it in a fixed order so
    /// seeded runs stay reproducible.
    pub rng: &'a mut SimRng,
}

impl<'a> StrategyContext<'a> {
    #[inline]
    pub fn new(
        detectors: &'a mut [Detector],
        events:    &'a [Event],
        graph:     &'a mut StreetGraph,
        rng:       &'a mut SimRng,
    ) -> Self {
        Self { detectors, events, graph, rng }
    }

    pub fn detector(&self, index: DetectorIndex) -> Option<&Detector> {
        self.detectors.get(index.index())
    }

    /// `true` if any detector heard the adversary this tick.
    pub fn any_detect(&self) -> bool {
        self.events.iter().any(Event::is_detect)
    }

    /// Snapshots of the detectors that heard the adversary this tick, in
    /// emission order.
    pub fn detecting(&self) -> Vec<Detector> {
        self.events
            .iter()
            .filter(|e| e.is_detect())
            .map(|e| e.detector.clone())
            .collect()
    }

    /// Detectors within Euclidean `distance` of `center` (inclusive).
    pub fn within_euclidean(&self, center: Point, distance: f64) -> Vec<DetectorIndex> {
        self.detectors
            .iter()
            .filter(|d| d.within(center, distance))
            .map(|d| d.index)
            .collect()
    }

    /// Detectors whose network distance from `from` is strictly below
    /// `distance`.
    pub fn within_network(&mut self, from: EdgePoint, distance: f64) -> Vec<DetectorIndex> {
        let graph = &mut *self.graph;
        self.detectors
            .iter()
            .filter(|d| graph.network_distance(from, d.at) < distance)
            .map(|d| d.index)
            .collect()
    }

    pub fn activate_all(&mut self, indices: &[DetectorIndex]) {
        for &i in indices {
            if let Some(d) = self.detectors.get_mut(i.index()) {
                d.activate();
            }
        }
    }

    pub fn deactivate_all(&mut self) {
        for d in self.detectors.iter_mut() {
            d.deactivate();
        }
    }

    /// Switch off detectors that have been active for more than
    /// `max_active_ticks`.
    pub fn expire(&mut self, max_active_ticks: u32) {
        for d in self.detectors.iter_mut() {
            if d.active && d.active_since > max_active_ticks {
                d.deactivate();
            }
        }
    }
}
