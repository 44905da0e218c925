use thiserror::Error;

use wm_core::CoreError;
use wm_graph::GraphError;
use wm_reach::ReachError;
use wm_strategy::StrategyError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("engine not configured: {0}")]
    NotConfigured(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("worker pool error: {0}")]
    Reach(#[from] ReachError),

    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),
}

pub type SimResult<T> = Result<T, SimError>;
