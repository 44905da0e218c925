//! Policies that switch on only a random share of the detectors in range.
//!
//! # Sampling
//!
//! [`sample_fraction`] picks exactly `round(M · f)` of `M` candidates in a
//! single pass.  For each candidate it draws one uniform value and keeps the
//! candidate iff the draw is below `wanted / left`, where `wanted` is the
//! number still to pick and `left` the number of candidates not yet
//! visited.  Once `wanted == left` the ratio is 1 and every remaining
//! candidate is taken; once `wanted == 0` nothing more is.  One draw is
//! consumed per candidate regardless of the outcome, so the RNG stream
//! advances identically across runs with the same candidate count.

use tracing::trace;

use wm_core::{DetectorIndex, SimRng};

use crate::{ActivationStrategy, StrategyContext};

/// Select exactly `round(candidates.len() · fraction)` candidates, keeping
/// their input order.  `fraction` is clamped to `[0, 1]`.
pub fn sample_fraction(
    candidates: &[DetectorIndex],
    fraction:   f64,
    rng:        &mut SimRng,
) -> Vec<DetectorIndex> {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let mut wanted = (candidates.len() as f64 * fraction).round() as usize;
    let mut left = candidates.len();
    let mut picked = Vec::with_capacity(wanted);

    for &c in candidates {
        let draw = rng.unit();
        if draw < wanted as f64 / left as f64 {
            picked.push(c);
            wanted -= 1;
        }
        left -= 1;
    }
    picked
}

// ── RandomRadius ──────────────────────────────────────────────────────────────

/// Windowed policy over Euclidean discs, activating a random `fraction` of
/// each disc.
#[derive(Clone, Debug)]
pub struct RandomRadius {
    pub distance: f64,
    pub max_active_ticks: u32,
    pub fraction: f64,
}

impl RandomRadius {
    pub fn new(distance: f64, max_active_ticks: u32, fraction: f64) -> Self {
        Self { distance, max_active_ticks, fraction }
    }
}

impl ActivationStrategy for RandomRadius {
    fn name(&self) -> &'static str {
        "random_radius"
    }

    fn tick0(&mut self, seed: DetectorIndex, ctx: &mut StrategyContext<'_>) {
        let Some(center) = ctx.detector(seed).map(|d| d.position) else { return };
        let in_range = ctx.within_euclidean(center, self.distance);
        let picked = sample_fraction(&in_range, self.fraction, ctx.rng);
        ctx.activate_all(&picked);
    }

    fn run(&mut self, ctx: &mut StrategyContext<'_>) {
        ctx.expire(self.max_active_ticks);

        for source in ctx.detecting() {
            let in_range = ctx.within_euclidean(source.position, self.distance);
            let picked = sample_fraction(&in_range, self.fraction, ctx.rng);
            trace!(source = %source.index, in_range = in_range.len(), picked = picked.len(), "resampled");
            ctx.activate_all(&picked);
        }
    }
}

// ── RandomStreetDistance ──────────────────────────────────────────────────────

/// As [`RandomRadius`], but the range is network distance (strictly below
/// `distance`).
#[derive(Clone, Debug)]
pub struct RandomStreetDistance {
    pub distance: f64,
    pub max_active_ticks: u32,
    pub fraction: f64,
}

impl RandomStreetDistance {
    pub fn new(distance: f64, max_active_ticks: u32, fraction: f64) -> Self {
        Self { distance, max_active_ticks, fraction }
    }
}

impl ActivationStrategy for RandomStreetDistance {
    fn name(&self) -> &'static str {
        "random_street_distance"
    }

    fn tick0(&mut self, seed: DetectorIndex, ctx: &mut StrategyContext<'_>) {
        let Some(from) = ctx.detector(seed).map(|d| d.at) else { return };
        let in_range = ctx.within_network(from, self.distance);
        let picked = sample_fraction(&in_range, self.fraction, ctx.rng);
        ctx.activate_all(&picked);
    }

    fn run(&mut self, ctx: &mut StrategyContext<'_>) {
        ctx.expire(self.max_active_ticks);

        for source in ctx.detecting() {
            let in_range = ctx.within_network(source.at, self.distance);
            let picked = sample_fraction(&in_range, self.fraction, ctx.rng);
            trace!(source = %source.index, in_range = in_range.len(), picked = picked.len(), "resampled");
            ctx.activate_all(&picked);
        }
    }
}
