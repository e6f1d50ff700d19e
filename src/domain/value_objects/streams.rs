use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{streams::StreamEntity, thumbnails::ThumbnailEntity},
    value_objects::{
        latency_modes::LatencyMode, playback_policies::PlaybackPolicy,
        stream_statuses::StreamStatus,
    },
};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStreamModel {
    pub title: String,
    pub description: Option<String>,
    pub visibility: Option<PlaybackPolicy>,
    pub latency_mode: Option<LatencyMode>,
    pub test_mode: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStreamModel {
    pub title: Option<String>,
    pub description: Option<String>,
    pub latency_mode: Option<LatencyMode>,
}

/// Full representation, only returned to staff callers. Carries the stream
/// key, so it must never be serialized for a regular viewer.
#[derive(Debug, Clone, Serialize)]
pub struct StreamModel {
    pub id: Uuid,
    pub stream_id: String,
    pub stream_key: String,
    pub playback_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub visibility: String,
    pub latency_mode: String,
    pub test_mode: bool,
    pub creator_id: Option<Uuid>,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
}

/// Reduced projection for non-staff callers.
#[derive(Debug, Clone, Serialize)]
pub struct SimpleStreamModel {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub playback_id: String,
    pub thumbnail_url: String,
}

fn thumbnail_url(status: &str, playback_id: &str, image_path: &str) -> String {
    // Live streams get the animated platform preview instead of the stored image.
    if StreamStatus::from_str(status) == Some(StreamStatus::Active) {
        format!("https://image.mux.com/{}/animated.webp", playback_id)
    } else {
        image_path.to_string()
    }
}

impl StreamModel {
    pub fn from_record(stream: StreamEntity, thumbnail: &ThumbnailEntity) -> Self {
        let thumbnail_url = thumbnail_url(
            &stream.status,
            &stream.playback_id,
            &thumbnail.image_path,
        );
        Self {
            id: stream.id,
            stream_id: stream.stream_id,
            stream_key: stream.stream_key,
            playback_id: stream.playback_id,
            title: stream.title,
            description: stream.description,
            status: stream.status,
            visibility: stream.visibility,
            latency_mode: stream.latency_mode,
            test_mode: stream.test_mode,
            creator_id: stream.creator_id,
            thumbnail_url,
            created_at: stream.created_at,
        }
    }
}

impl SimpleStreamModel {
    pub fn from_record(stream: StreamEntity, thumbnail: &ThumbnailEntity) -> Self {
        let thumbnail_url = thumbnail_url(
            &stream.status,
            &stream.playback_id,
            &thumbnail.image_path,
        );
        Self {
            id: stream.id,
            title: stream.title,
            description: stream.description,
            playback_id: stream.playback_id,
            thumbnail_url,
        }
    }
}
