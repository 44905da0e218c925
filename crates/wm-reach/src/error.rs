use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReachError {
    #[error("failed to spawn reach worker: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type ReachResult<T> = Result<T, ReachError>;
