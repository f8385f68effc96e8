use thiserror::Error;

use crate::Kind;

/// Errors returned by data cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("datacache: {kind} '{name}' not found")]
    NotFound { kind: Kind, name: String },

    #[error("datacache: empty input")]
    EmptyInput,

    #[error("datacache: shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("datacache: {name} holds {found}, want {want}")]
    TypeMismatch {
        name: String,
        found: &'static str,
        want: &'static str,
    },

    #[error("datacache: storage error: {0}")]
    Storage(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
