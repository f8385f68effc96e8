//! CLI commands module.

mod config;
mod hash;
mod relabel;
mod util;

pub use config::ConfigCommand;
pub use hash::HashCommand;
pub use relabel::RelabelCommand;

pub(crate) use util::*;
