//! Dispatcher configuration.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```yaml
//! projection:
//!   algorithm: PCA
//!   components: 2
//! labels:
//!   max_label_delta: 5
//!   max_attempts: 15
//! relabel_clusters: true
//! store_labels: true
//! ```

use std::path::Path;

use codex_labels::LabelSwapConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Projection run alongside every clustering request to place points on a plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Dimensionality-reduction algorithm name. Default: `PCA`.
    pub algorithm: String,

    /// Output dimensions. Default: 2.
    pub components: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            algorithm: "PCA".to_string(),
            components: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub projection: ProjectionConfig,

    pub labels: LabelSwapConfig,

    /// Align cluster ids with the previous run on the same data.
    pub relabel_clusters: bool,

    /// Store each clustering's final labels as the reference for the next run.
    pub store_labels: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            labels: LabelSwapConfig::default(),
            relabel_clusters: true,
            store_labels: true,
        }
    }
}

impl Config {
    pub fn from_yaml(s: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a mapping.
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.projection.algorithm.is_empty() {
            return Err(ConfigError::Invalid("projection.algorithm is empty".into()));
        }
        if self.projection.components == 0 {
            return Err(ConfigError::Invalid("projection.components must be positive".into()));
        }
        Ok(())
    }
}
