//! `wm-graph` — street graph, shortest paths, and network distance.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`network`]    | `StreetGraph` (undirected CSR), `StreetGraphBuilder`        |
//! | [`path`]       | `Path`, Dijkstra shortest paths, detector-count distances   |
//! | [`distance`]   | memoized point-to-point network distance                    |
//! | [`components`] | largest connected component, spanning edge set              |
//! | [`error`]      | `GraphError`, `GraphResult<T>`                              |
//!
//! # Lifecycle
//!
//! Vertices and edges are appended to a [`StreetGraphBuilder`]; `build()`
//! freezes them into a read-only [`StreetGraph`].  The only state that
//! changes after that is the single-source distance cache behind
//! [`StreetGraph::network_distance`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on [`Path`].               |

pub mod components;
pub mod distance;
pub mod error;
pub mod network;
pub mod path;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use network::{StreetGraph, StreetGraphBuilder};
pub use path::Path;
