//! Analysis dispatch for CODEX.
//!
//! A [`Request`] names an algorithm family ([`AlgorithmType`]), an algorithm
//! within it, the features to run on and optional subset/label selections.
//! The [`Dispatcher`] resolves those names through the session's data cache,
//! builds a [`RoutineInput`] and runs the [`Routine`] registered for the
//! family, filling in an [`AlgorithmResult`].
//!
//! The statistical routines themselves live outside this crate; register
//! them in a [`Routines`] table.
//!
//! # Usage
//!
//! ```ignore
//! let mut routines = Routines::new();
//! routines.handle(AlgorithmType::Clustering, Arc::new(KMeans))?;
//! routines.handle(AlgorithmType::DimensionalityReduction, Arc::new(Pca))?;
//!
//! let dispatcher = Dispatcher::new(routines, Config::default());
//! let sessions = Sessions::new();
//! let result = dispatcher.dispatch_session(&request, AlgorithmResult::new(), &sessions);
//! ```

mod config;
mod dispatch;
mod error;
mod kind;
mod request;
mod result;
mod routine;

pub use config::{Config, ProjectionConfig};
pub use dispatch::{Dispatcher, MERGED_NAME, UNKNOWN_TYPE_MESSAGE, label_key};
pub use error::{ConfigError, DispatchError, RoutineError};
pub use kind::AlgorithmType;
pub use request::{DEFAULT_SEARCH_TYPE, Request};
pub use result::{AlgorithmResult, Status};
pub use routine::{Routine, RoutineInput, Routines};
