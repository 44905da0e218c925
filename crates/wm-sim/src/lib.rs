//! `wm-sim` — the watchman simulation engine.
//!
//! # Tick loop
//!
//! ```text
//! do_tick:
//!   ① Refill    — if the precomputed batch is used up, walk the adversary
//!                 up to `batch_size` ticks ahead along its path and compute
//!                 every position's reach set on the worker pool.
//!   ② Advance   — move the adversary to the next precomputed position.
//!   ③ Transmit  — one uniform draw against `tx_prob`; on a transmission
//!                 every detector in reach emits a Detect or Miss event.
//!   ④ Age       — bump `active_since` on every active detector.
//!   ⑤ Strategy  — `run()` sees this tick's events and picks the next
//!                 active set.
//! ```
//!
//! Once the path is fully walked and the last batch is used up, the engine
//! is done and further ticks are no-ops.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`engine`]   | `Engine`, `EngineState`, configuration and reset levels    |
//! | [`tick`]     | batched movement model and event emission                  |
//! | [`metrics`]  | activity, detection, last-tracking, path metrics           |
//! | [`sampler`]  | `EdgeSampler` — length-weighted random edges               |
//! | [`observer`] | `EngineObserver`, `NoopObserver`                           |
//! | [`error`]    | `SimError`, `SimResult<T>`                                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wm_core::{DetectorId, DetectorIndex, EngineConfig, Point, VertexId};
//! use wm_sim::{Engine, NoopObserver};
//! use wm_strategy::StrategyConfig;
//!
//! let mut engine = Engine::new(EngineConfig::seeded(42))?;
//! engine.add_vertex(VertexId(0), Point::new(0.0, 0.0));
//! engine.add_vertex(VertexId(1), Point::new(10.0, 0.0));
//! engine.add_edge(VertexId(0), VertexId(1))?;
//! engine.build_graph();
//! engine.add_detector(DetectorId(7), VertexId(0), VertexId(1), 0.5, 3.0)?;
//! engine.set_strategy_config(&StrategyConfig::Static { distance: 5.0 })?;
//! engine.set_attacker(VertexId(0), VertexId(1), VertexId(1), 0.0, 1.0, 1.0, DetectorIndex(0), 0.0)?;
//! engine.run_to_completion(&mut NoopObserver);
//! println!("detection = {}", engine.metric_detection());
//! ```

pub mod engine;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod sampler;
pub mod tick;


pub use engine::{Engine, EngineState};
pub use error::{SimError, SimResult};
pub use metrics::PathMetric;
pub use observer::{EngineObserver, NoopObserver};
pub use sampler::EdgeSampler;
