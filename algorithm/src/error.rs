use codex_datacache::CacheError;
use thiserror::Error;

use crate::AlgorithmType;

/// Errors a routine reports from [`crate::Routine::run`].
#[derive(Debug, Error)]
pub enum RoutineError {
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("{0}")]
    Failed(String),
}

/// Anticipated failures inside dispatch. All of them are caught at the
/// dispatch boundary and recorded on the result.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("algorithm: malformed request: {0}")]
    MalformedRequest(String),

    #[error("algorithm: cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("algorithm: no routine registered for {0}")]
    RoutineNotRegistered(AlgorithmType),

    #[error("algorithm: routine already registered for {0}")]
    AlreadyRegistered(AlgorithmType),

    #[error("algorithm: {kind} routine failed: {source}")]
    Routine {
        kind: AlgorithmType,
        #[source]
        source: RoutineError,
    },
}

/// Errors loading a [`crate::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config: read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: parse failed: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config: invalid: {0}")]
    Invalid(String),
}
