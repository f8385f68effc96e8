use serde::{Deserialize, Serialize};

/// Largest tolerated difference between the number of distinct reference
/// labels and distinct new labels. Beyond it the runs are not aligned.
pub const MAX_LABEL_DELTA: usize = 5;

/// Anchor sampling attempts per new label before it falls through to the
/// unclaimed-id fill. Bounds the matching loop.
pub const MAX_ANCHOR_ATTEMPTS: usize = 15;

/// Controls label correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSwapConfig {
    /// Default: [`MAX_LABEL_DELTA`].
    pub max_label_delta: usize,

    /// Default: [`MAX_ANCHOR_ATTEMPTS`]. Zero disables anchoring, so every
    /// label takes the fill path.
    pub max_attempts: usize,

    /// Fixed seed for anchor sampling. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for LabelSwapConfig {
    fn default() -> Self {
        Self {
            max_label_delta: MAX_LABEL_DELTA,
            max_attempts: MAX_ANCHOR_ATTEMPTS,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: LabelSwapConfig = serde_yaml::from_str("seed: 7").unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.max_label_delta, MAX_LABEL_DELTA);
        assert_eq!(cfg.max_attempts, MAX_ANCHOR_ATTEMPTS);
    }
}
