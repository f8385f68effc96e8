use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of routine families a request can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmType {
    Clustering,
    DimensionalityReduction,
    Normalize,
    PeakDetect,
    Regression,
    TemplateScan,
    Correlation,
}

impl AlgorithmType {
    pub const ALL: [AlgorithmType; 7] = [
        AlgorithmType::Clustering,
        AlgorithmType::DimensionalityReduction,
        AlgorithmType::Normalize,
        AlgorithmType::PeakDetect,
        AlgorithmType::Regression,
        AlgorithmType::TemplateScan,
        AlgorithmType::Correlation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::Clustering => "clustering",
            AlgorithmType::DimensionalityReduction => "dimensionality_reduction",
            AlgorithmType::Normalize => "normalize",
            AlgorithmType::PeakDetect => "peak_detect",
            AlgorithmType::Regression => "regression",
            AlgorithmType::TemplateScan => "template_scan",
            AlgorithmType::Correlation => "correlation",
        }
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown algorithm type: {s}"))
    }
}
