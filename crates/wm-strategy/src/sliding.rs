//! Policies that move the whole active set to wherever the adversary was
//! last heard.

use tracing::trace;

use wm_core::{Detector, DetectorIndex};

use crate::{ActivationStrategy, StrategyContext};

/// Replace the active set with the union of `hits(source)` over every
/// detecting detector, if anything detected at all.
fn slide<F>(ctx: &mut StrategyContext<'_>, mut hits: F)
where
    F: FnMut(&mut StrategyContext<'_>, &Detector) -> Vec<DetectorIndex>,
{
    let sources = ctx.detecting();
    if sources.is_empty() {
        return;
    }
    ctx.deactivate_all();
    for source in &sources {
        let around = hits(ctx, source);
        ctx.activate_all(&around);
    }
    trace!(sources = sources.len(), "active set moved");
}

// ── SlidingEuclidean ──────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SlidingEuclidean {
    pub distance: f64,
}

impl SlidingEuclidean {
    pub fn new(distance: f64) -> Self {
        Self { distance }
    }
}

impl ActivationStrategy for SlidingEuclidean {
    fn name(&self) -> &'static str {
        "sliding_euclidean"
    }

    fn tick0(&mut self, seed: DetectorIndex, ctx: &mut StrategyContext<'_>) {
        let Some(center) = ctx.detector(seed).map(|d| d.position) else { return };
        for d in ctx.detectors.iter_mut() {
            d.active = d.within(center, self.distance);
        }
    }

    fn run(&mut self, ctx: &mut StrategyContext<'_>) {
        let distance = self.distance;
        slide(ctx, |ctx, source| ctx.within_euclidean(source.position, distance));
    }
}

// ── SlidingGraph ──────────────────────────────────────────────────────────────

/// Like [`SlidingEuclidean`] but measured along the street network
/// (strictly below `distance`).
#[derive(Clone, Debug)]
pub struct SlidingGraph {
    pub distance: f64,
}

impl SlidingGraph {
    pub fn new(distance: f64) -> Self {
        Self { distance }
    }
}

impl ActivationStrategy for SlidingGraph {
    fn name(&self) -> &'static str {
        "sliding_graph"
    }

    fn tick0(&mut self, seed: DetectorIndex, ctx: &mut StrategyContext<'_>) {
        let Some(from) = ctx.detector(seed).map(|d| d.at) else { return };
        let hits = ctx.within_network(from, self.distance);
        ctx.deactivate_all();
        ctx.activate_all(&hits);
    }

    fn run(&mut self, ctx: &mut StrategyContext<'_>) {
        let distance = self.distance;
        slide(ctx, |ctx, source| ctx.within_network(source.at, distance));
    }
}
