//! Euclidean-radius policies that never clear the active set wholesale.

use tracing::trace;

use wm_core::DetectorIndex;

use crate::{ActivationStrategy, StrategyContext};

// ── Static ────────────────────────────────────────────────────────────────────

/// Activate everything near the seed once; never change afterwards.
#[derive(Clone, Debug)]
pub struct Static {
    pub distance: f64,
}

impl Static {
    pub fn new(distance: f64) -> Self {
        Self { distance }
    }
}

impl ActivationStrategy for Static {
    fn name(&self) -> &'static str {
        "static"
    }

    fn tick0(&mut self, seed: DetectorIndex, ctx: &mut StrategyContext<'_>) {
        let Some(center) = ctx.detector(seed).map(|d| d.position) else { return };
        let hits = ctx.within_euclidean(center, self.distance);
        ctx.activate_all(&hits);
    }

    fn run(&mut self, _ctx: &mut StrategyContext<'_>) {}
}

// ── RadiusSlidingWindow ───────────────────────────────────────────────────────

/// Keep detectors on for at most `max_active_ticks`; every detection
/// re-arms the disc of radius `distance` around the detecting detector.
#[derive(Clone, Debug)]
pub struct RadiusSlidingWindow {
    pub distance: f64,
    pub max_active_ticks: u32,
}

impl RadiusSlidingWindow {
    pub fn new(distance: f64, max_active_ticks: u32) -> Self {
        Self { distance, max_active_ticks }
    }
}

impl ActivationStrategy for RadiusSlidingWindow {
    fn name(&self) -> &'static str {
        "radius_sliding_window"
    }

    fn tick0(&mut self, seed: DetectorIndex, ctx: &mut StrategyContext<'_>) {
        let Some(center) = ctx.detector(seed).map(|d| d.position) else { return };
        let hits = ctx.within_euclidean(center, self.distance);
        ctx.activate_all(&hits);
    }

    fn run(&mut self, ctx: &mut StrategyContext<'_>) {
        ctx.expire(self.max_active_ticks);

        for source in ctx.detecting() {
            let hits = ctx.within_euclidean(source.position, self.distance);
            trace!(source = %source.index, activated = hits.len(), "window re-armed");
            ctx.activate_all(&hits);
        }
    }
}
