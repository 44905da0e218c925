//! Batched movement model and per-tick event emission.
//!
//! # Movement
//!
//! The walker consumes `speed` distance per tick along its remaining
//! waypoints.  A leftover distance after reaching a vertex carries onto the
//! next edge within the same tick.  When the last waypoint is reached the
//! walker stops there, at fraction 0 or 1 according to which endpoint it
//! is.
//!
//! Positions are walked ahead in batches of up to `batch_size` ticks; each
//! batch's reach sets are computed in one call to the proximity evaluator.

use tracing::{debug, info, trace};

use wm_core::{EdgeKey, EdgePoint, Event, EventKind};
use wm_strategy::StrategyContext;

use crate::{Engine, EngineState};

impl Engine {
    /// Advance the simulation by one tick.  A no-op once done.
    pub fn do_tick(&mut self) {
        if self.state == EngineState::Done {
            return;
        }
        if self.cursor >= self.batch.len() {
            if self.path_consumed {
                self.state = EngineState::Done;
                info!(
                    tick = %self.tick,
                    detected = self.detected.len(),
                    possible = self.possible.len(),
                    "run complete",
                );
                return;
            }
            self.refill();
        }
        self.state = EngineState::Running;
        self.tick = self.tick + 1;
        self.events.clear();

        let (at, position) = self.batch[self.cursor];
        self.adversary.at = at;
        self.adversary.position = position;

        self.active_ticks += self.detectors.iter().filter(|d| d.active).count() as u64;

        let transmits = self.adversary.tx_prob > self.rng.unit();
        let mut detection = false;
        for &i in &self.reach[self.cursor] {
            let Some(d) = self.detectors.get(i.index()) else { continue };
            if transmits {
                let kind = if d.active { EventKind::Detect } else { EventKind::Miss };
                if d.active {
                    self.detected.insert(i);
                    self.latest_detection = self.tick;
                    detection = true;
                }
                self.events.push(Event { kind, tick: self.tick, detector: d.clone() });
            }
            self.possible.insert(i);
            self.latest_possible = self.tick;
        }
        if detection {
            self.detection_points.push(at.edge);
        }
        self.cursor += 1;

        for d in self.detectors.iter_mut() {
            if d.active {
                d.active_since += 1;
            }
        }

        if let Some(strategy) = self.strategy.as_mut() {
            let mut ctx = StrategyContext::new(
                &mut self.detectors,
                &self.events,
                &mut self.graph,
                &mut self.rng,
            );
            strategy.run(&mut ctx);
        }
        trace!(tick = %self.tick, transmits, events = self.events.len(), "tick");
    }

    /// Walk up to `batch_size` ticks ahead and evaluate their reach sets.
    fn refill(&mut self) {
        self.batch.clear();
        self.cursor = 0;

        let limit = self.config.batch_size.max(1);
        while self.batch.len() < limit {
            self.step();
            self.batch.push((self.walker, self.graph.point_position(self.walker)));
            if self.path_consumed {
                break;
            }
        }

        let positions: Vec<_> = self.batch.iter().map(|&(_, p)| p).collect();
        self.reach = self.evaluator.precompute(&positions);
        debug!(
            positions = positions.len(),
            jobs = self.evaluator.job_count(positions.len()),
            path_consumed = self.path_consumed,
            "batch precomputed",
        );
    }

    /// Move the walker one tick's worth of distance along its path.
    fn step(&mut self) {
        let mut distance = self.adversary.speed;
        while distance > 0.0 && !self.path_consumed {
            let Some(&next) = self.remaining.front() else {
                self.path_consumed = true;
                break;
            };
            let at = self.walker;
            let len = self.graph.edge_length(at.edge).unwrap_or(0.0);
            let forward = next == at.edge.hi;
            let left = if forward { 1.0 - at.fraction } else { at.fraction };

            if left * len > distance {
                let delta = distance / len;
                self.walker.fraction += if forward { delta } else { -delta };
                distance = 0.0;
                continue;
            }

            distance -= left * len;
            self.remaining.pop_front();
            self.walker.fraction = if forward { 1.0 } else { 0.0 };
            match self.remaining.front() {
                None => self.path_consumed = true,
                Some(&after) => {
                    let edge = EdgeKey::new(next, after);
                    let fraction = if next == edge.lo { 0.0 } else { 1.0 };
                    self.walker = EdgePoint { edge, fraction };
                }
            }
        }
    }
}
