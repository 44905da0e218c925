//! `wm-strategy` — detector activation policies.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`context`]   | `StrategyContext<'a>` — live detectors, events, graph, RNG     |
//! | [`strategy`]  | `ActivationStrategy` trait                                     |
//! | [`radius`]    | `Static`, `RadiusSlidingWindow`                                |
//! | [`sliding`]   | `SlidingEuclidean`, `SlidingGraph`                             |
//! | [`random`]    | `RandomRadius`, `RandomStreetDistance`, `sample_fraction`      |
//! | [`neighbors`] | `KSmartestNeighbors` (detector-count neighbourhoods)           |
//! | [`config`]    | `StrategyConfig` — tagged parameters, `build()`                |
//! | [`error`]     | `StrategyError`, `StrategyResult<T>`                           |
//!
//! # Call sequence
//!
//! The engine drives every strategy through three hooks:
//!
//! 1. `init` once, right after the strategy is attached.
//! 2. `tick0(seed)` once per run, after the adversary is placed and every
//!    detector has been switched off.
//! 3. `run` once per tick, after that tick's events are known.  Its
//!    activation changes take effect on the next tick.
//!
//! Strategies never own simulation state; everything they touch is lent
//! through a fresh [`StrategyContext`] on each call.

pub mod config;
pub mod context;
pub mod error;
pub mod neighbors;
pub mod radius;
pub mod random;
pub mod sliding;
pub mod strategy;


pub use config::StrategyConfig;
pub use context::StrategyContext;
pub use error::{StrategyError, StrategyResult};
pub use neighbors::KSmartestNeighbors;
pub use radius::{RadiusSlidingWindow, Static};
pub use random::{sample_fraction, RandomRadius, RandomStreetDistance};
pub use sliding::{SlidingEuclidean, SlidingGraph};
pub use strategy::ActivationStrategy;
