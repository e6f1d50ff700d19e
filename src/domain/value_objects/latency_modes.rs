use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LatencyMode {
    Low,
    Reduced,
    #[default]
    Standard,
}

impl LatencyMode {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "low" => Some(LatencyMode::Low),
            "reduced" => Some(LatencyMode::Reduced),
            "standard" => Some(LatencyMode::Standard),
            _ => None,
        }
    }
}

impl Display for LatencyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self {
            LatencyMode::Low => "low",
            LatencyMode::Reduced => "reduced",
            LatencyMode::Standard => "standard",
        };
        write!(f, "{}", mode)
    }
}
