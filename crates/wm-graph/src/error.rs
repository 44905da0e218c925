//! Graph-subsystem error type.

use thiserror::Error;

use wm_core::VertexId;

/// Errors produced by `wm-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge ({from}, {to}) references unknown vertex {missing}")]
    UnknownVertex { from: VertexId, to: VertexId, missing: VertexId },

    #[error("no path from {from} to {to}")]
    NoPath { from: VertexId, to: VertexId },
}

pub type GraphResult<T> = Result<T, GraphError>;
