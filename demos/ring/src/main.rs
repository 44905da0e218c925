//! ring — drive the watchman engine over a synthetic spider-web map.
//!
//! Places one detector at the midpoint of every street, then sweeps every
//! activation strategy over the same set of random adversary runs and
//! prints the averaged metrics.  The graph and worker pool are built once;
//! each run only calls `reset`.
//!
//! ```text
//! RUST_LOG=info cargo run -p ring --release
//! ```

mod network;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wm_core::{DetectorId, DetectorIndex, EngineConfig, VertexId};
use wm_sim::{Engine, NoopObserver};
use wm_strategy::StrategyConfig;

use network::{build_web, vertex_count, RING_STEP};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const RUNS:            u32 = 50;
const DETECTOR_RADIUS: f64 = 60.0;
const SPEED:           f64 = 5.0;
const TX_PROB:         f64 = 0.2;
const MIN_PATH_LENGTH: f64 = 3.0 * RING_STEP;

// ── Runs ──────────────────────────────────────────────────────────────────────

/// One adversary setup, drawn once and replayed for every strategy.
#[derive(Clone, Copy)]
struct Run {
    from:     VertexId,
    to:       VertexId,
    target:   VertexId,
    fraction: f64,
    seed:     DetectorIndex,
}

fn draw_runs(engine: &mut Engine) -> Result<Vec<Run>> {
    let mut runs = Vec::with_capacity(RUNS as usize);
    while runs.len() < RUNS as usize {
        let edge = engine.random_weighted_edge().context("map has no edges")?;
        let target = VertexId(engine.random_int(vertex_count() - 1));
        let fraction = engine.random_float();
        let seed = engine.random_int(engine.detector_count() as u32 - 1);
        let run = Run { from: edge.lo, to: edge.hi, target, fraction, seed: DetectorIndex(seed) };

        if engine.graph().shortest_path(edge.lo, target).length >= MIN_PATH_LENGTH {
            runs.push(run);
        }
    }
    Ok(runs)
}

#[derive(Default)]
struct Totals {
    activity:      f64,
    detection:     f64,
    last_tracking: f64,
    path:          f64,
    ticks:         u64,
    valid:         u32,
}

fn sweep(engine: &mut Engine, config: &StrategyConfig, runs: &[Run]) -> Result<Totals> {
    engine.set_strategy_config(config)?;
    let mut totals = Totals::default();
    for run in runs {
        engine.reset();
        let valid = engine.set_attacker(
            run.from, run.to, run.target, run.fraction, SPEED, TX_PROB, run.seed, MIN_PATH_LENGTH,
        )?;
        if !valid {
            continue;
        }
        engine.run_to_completion(&mut NoopObserver);

        totals.activity      += engine.metric_activity();
        totals.detection     += engine.metric_detection();
        totals.last_tracking += engine.metric_last_tracking();
        totals.path          += engine.metric_path();
        totals.ticks         += engine.tick().0;
        totals.valid         += 1;
    }
    Ok(totals)
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let t0 = Instant::now();
    let mut engine = Engine::new(EngineConfig::seeded(SEED))?;
    let edges = build_web(&mut engine)?;
    for (i, &(a, b)) in edges.iter().enumerate() {
        engine.add_detector(DetectorId(i as u32), a, b, 0.5, DETECTOR_RADIUS)?;
    }
    info!(
        vertices = engine.graph().vertex_count(),
        edges = engine.graph().edge_count(),
        detectors = engine.detector_count(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "map ready",
    );

    let runs = draw_runs(&mut engine)?;

    let strategies = [
        StrategyConfig::Static { distance: 250.0 },
        StrategyConfig::RadiusSlidingWindow { distance: 150.0, max_active_ticks: 40 },
        StrategyConfig::SlidingEuclidean { distance: 150.0 },
        StrategyConfig::SlidingGraph { distance: 200.0 },
        StrategyConfig::RandomRadius { distance: 200.0, max_active_ticks: 40, fraction: 0.5 },
        StrategyConfig::RandomStreetDistance { distance: 250.0, max_active_ticks: 40, fraction: 0.5 },
        StrategyConfig::KSmartestNeighbors { k: 3, max_distance: 400.0, lazy: false },
        StrategyConfig::KSmartestNeighbors { k: 3, max_distance: 400.0, lazy: true },
    ];

    println!(
        "{:<40} {:>6} {:>9} {:>9} {:>9} {:>9} {:>8}",
        "strategy", "runs", "activity", "detect", "last", "path", "ticks"
    );
    for config in &strategies {
        let t = Instant::now();
        let totals = sweep(&mut engine, config, &runs)?;
        let n = totals.valid.max(1) as f64;
        println!(
            "{:<40} {:>6} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>8.0}",
            format!("{config:?}").chars().take(40).collect::<String>(),
            totals.valid,
            totals.activity / n,
            totals.detection / n,
            totals.last_tracking / n,
            totals.path / n,
            totals.ticks as f64 / n,
        );
        info!(strategy = ?config, elapsed_ms = t.elapsed().as_millis() as u64, "sweep done");
    }

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "all strategies done");
    Ok(())
}
