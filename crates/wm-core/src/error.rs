//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where a core-level failure can surface through them.

use thiserror::Error;

/// The base error type for `wm-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
