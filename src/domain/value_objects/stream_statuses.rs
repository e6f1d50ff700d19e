use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a stream as mirrored from the video platform.
/// Transitions: idle -> active happens on the platform side (webhook driven,
/// not modeled here); active -> idle via finish; any -> disabled via disable;
/// disabled -> idle via enable.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    #[default]
    Idle,
    Active,
    Disabled,
}

impl StreamStatus {
    pub fn is_active(&self) -> bool {
        *self == StreamStatus::Active
    }

    pub fn is_not_active(&self) -> bool {
        *self != StreamStatus::Active
    }

    pub fn is_enabled(&self) -> bool {
        *self != StreamStatus::Disabled
    }

    pub fn is_disabled(&self) -> bool {
        *self == StreamStatus::Disabled
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "idle" => Some(StreamStatus::Idle),
            "active" => Some(StreamStatus::Active),
            "disabled" => Some(StreamStatus::Disabled),
            _ => None,
        }
    }
}

impl Display for StreamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            StreamStatus::Idle => "idle",
            StreamStatus::Active => "active",
            StreamStatus::Disabled => "disabled",
        };
        write!(f, "{}", status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_for_idle() {
        let status = StreamStatus::Idle;
        assert!(!status.is_active());
        assert!(status.is_not_active());
        assert!(status.is_enabled());
        assert!(!status.is_disabled());
    }

    #[test]
    fn predicates_for_active() {
        let status = StreamStatus::Active;
        assert!(status.is_active());
        assert!(!status.is_not_active());
        assert!(status.is_enabled());
        assert!(!status.is_disabled());
    }

    #[test]
    fn predicates_for_disabled() {
        let status = StreamStatus::Disabled;
        assert!(!status.is_active());
        assert!(status.is_not_active());
        assert!(!status.is_enabled());
        assert!(status.is_disabled());
    }

    #[test]
    fn round_trips_through_display() {
        for status in [
            StreamStatus::Idle,
            StreamStatus::Active,
            StreamStatus::Disabled,
        ] {
            assert_eq!(StreamStatus::from_str(&status.to_string()), Some(status));
        }
        assert_eq!(StreamStatus::from_str("archived"), None);
    }
}
