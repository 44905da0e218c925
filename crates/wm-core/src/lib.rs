//! `wm-core` — foundational types for the watchman detector simulator.
//!
//! This crate is a dependency of every other `wm-*` crate.  It intentionally
//! has no `wm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `VertexId`, `DetectorId`, `DetectorIndex`                 |
//! | [`geo`]      | `Point`, `EdgeKey`, `EdgePoint`                           |
//! | [`detector`] | `Detector`, `Adversary`, `Event`, `EventKind`             |
//! | [`time`]     | `Tick`, `EngineConfig`                                    |
//! | [`rng`]      | `SimRng` (engine-owned, reseedable)                       |
//! | [`error`]    | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod detector;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use detector::{Adversary, Detector, Event, EventKind};
pub use error::{CoreError, CoreResult};
pub use geo::{EdgeKey, EdgePoint, Point};
pub use ids::{DetectorId, DetectorIndex, VertexId};
pub use rng::SimRng;
pub use time::{EngineConfig, Tick};
