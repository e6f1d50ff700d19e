use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Who can watch the stream. Private streams get a signed playback policy on
/// the video platform side.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPolicy {
    #[default]
    Public,
    Private,
}

impl PlaybackPolicy {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "public" => Some(PlaybackPolicy::Public),
            "private" => Some(PlaybackPolicy::Private),
            _ => None,
        }
    }
}

impl Display for PlaybackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match self {
            PlaybackPolicy::Public => "public",
            PlaybackPolicy::Private => "private",
        };
        write!(f, "{}", policy)
    }
}
