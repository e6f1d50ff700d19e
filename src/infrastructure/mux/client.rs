use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::{
    config::config_model::Mux as MuxConfig,
    domain::value_objects::{latency_modes::LatencyMode, playback_policies::PlaybackPolicy},
};

/// Minimal Mux Video client built on reqwest. Credentials and base URLs come
/// from configuration and the client is passed in wherever it is needed.
pub struct MuxClient {
    http: reqwest::Client,
    token_id: String,
    token_secret: String,
    base_url: String,
    stats_base_url: String,
}

/// Provider-assigned identifiers returned by live stream creation.
#[derive(Debug, Clone)]
pub struct ProvisionedStream {
    pub stream_id: String,
    pub stream_key: String,
    pub playback_id: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ViewCounts {
    pub views: i64,
    pub viewers: i64,
}

#[derive(Debug, Deserialize)]
struct MuxEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct LiveStreamData {
    id: String,
    stream_key: String,
    #[serde(default)]
    playback_ids: Vec<PlaybackIdData>,
}

#[derive(Debug, Deserialize)]
struct PlaybackIdData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StreamKeyData {
    stream_key: String,
}

#[derive(Debug, Deserialize)]
struct SimulcastTargetData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ViewCountData {
    #[serde(default)]
    views: i64,
    #[serde(default)]
    viewers: i64,
}

#[derive(Debug, Deserialize)]
struct MuxErrorEnvelope {
    error: MuxErrorDetails,
}

#[derive(Debug, Deserialize)]
struct MuxErrorDetails {
    #[serde(rename = "type")]
    type_: Option<String>,
    #[serde(default)]
    messages: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CreateLiveStreamRequest {
    playback_policy: Vec<&'static str>,
    new_asset_settings: serde_json::Value,
    latency_mode: String,
    test: bool,
}

fn playback_policy_value(policy: PlaybackPolicy) -> &'static str {
    match policy {
        PlaybackPolicy::Public => "public",
        // Private streams get signed playback on the platform side.
        PlaybackPolicy::Private => "signed",
    }
}

impl MuxClient {
    pub fn new(config: MuxConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_id: config.token_id,
            token_secret: config.token_secret,
            base_url: config.base_url,
            stats_base_url: config.stats_base_url,
        }
    }

    fn live_streams_url(&self, suffix: &str) -> String {
        format!(
            "{}/video/v1/live-streams{}",
            self.base_url.trim_end_matches('/'),
            suffix
        )
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let request_id = resp
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (mux_error_type, mux_error_messages) =
            match serde_json::from_str::<MuxErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.error.type_, envelope.error.messages),
                Err(_) => (None, Vec::new()),
            };

        error!(
            status = %status,
            mux_request_id = ?request_id,
            mux_error_type = ?mux_error_type,
            mux_error_messages = ?mux_error_messages,
            response_body = %body,
            context = %context,
            "mux api request failed"
        );

        anyhow::bail!(
            "Mux API request failed: {} (status {}, request_id={:?})",
            context,
            status,
            request_id
        );
    }

    /// Provisions a live stream. https://docs.mux.com/api-reference#video/operation/create-live-stream
    pub async fn create_live_stream(
        &self,
        policy: PlaybackPolicy,
        latency_mode: LatencyMode,
        test_mode: bool,
    ) -> Result<ProvisionedStream> {
        let policy_value = playback_policy_value(policy);
        let request = CreateLiveStreamRequest {
            playback_policy: vec![policy_value],
            new_asset_settings: json!({ "playback_policy": [policy_value] }),
            latency_mode: latency_mode.to_string(),
            test: test_mode,
        };

        let resp = self
            .http
            .post(self.live_streams_url(""))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create live stream").await?;

        let parsed: MuxEnvelope<LiveStreamData> = resp.json().await?;
        let playback_id = parsed
            .data
            .playback_ids
            .into_iter()
            .next()
            .map(|playback| playback.id)
            .ok_or_else(|| anyhow::anyhow!("Mux live stream is missing a playback id"))?;

        Ok(ProvisionedStream {
            stream_id: parsed.data.id,
            stream_key: parsed.data.stream_key,
            playback_id,
        })
    }

    pub async fn delete_live_stream(&self, stream_id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(self.live_streams_url(&format!("/{}", stream_id)))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await?;
        Self::ensure_success(resp, "delete live stream").await?;

        Ok(())
    }

    pub async fn update_latency_mode(
        &self,
        stream_id: &str,
        latency_mode: LatencyMode,
    ) -> Result<()> {
        let resp = self
            .http
            .patch(self.live_streams_url(&format!("/{}", stream_id)))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "latency_mode": latency_mode.to_string() }))
            .send()
            .await?;
        Self::ensure_success(resp, "update live stream").await?;

        Ok(())
    }

    /// Rotates the ingest key and returns the replacement.
    pub async fn reset_stream_key(&self, stream_id: &str) -> Result<String> {
        let resp = self
            .http
            .post(self.live_streams_url(&format!("/{}/reset-stream-key", stream_id)))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "reset stream key").await?;

        let parsed: MuxEnvelope<StreamKeyData> = resp.json().await?;
        Ok(parsed.data.stream_key)
    }

    pub async fn complete_live_stream(&self, stream_id: &str) -> Result<()> {
        let resp = self
            .http
            .put(self.live_streams_url(&format!("/{}/complete", stream_id)))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await?;
        Self::ensure_success(resp, "signal live stream complete").await?;

        Ok(())
    }

    pub async fn enable_live_stream(&self, stream_id: &str) -> Result<()> {
        let resp = self
            .http
            .put(self.live_streams_url(&format!("/{}/enable", stream_id)))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await?;
        Self::ensure_success(resp, "enable live stream").await?;

        Ok(())
    }

    pub async fn disable_live_stream(&self, stream_id: &str) -> Result<()> {
        let resp = self
            .http
            .put(self.live_streams_url(&format!("/{}/disable", stream_id)))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await?;
        Self::ensure_success(resp, "disable live stream").await?;

        Ok(())
    }

    pub async fn create_simulcast_target(
        &self,
        stream_id: &str,
        stream_key: &str,
        url: &str,
    ) -> Result<String> {
        let resp = self
            .http
            .post(self.live_streams_url(&format!("/{}/simulcast-targets", stream_id)))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "stream_key": stream_key, "url": url }))
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create simulcast target").await?;

        let parsed: MuxEnvelope<SimulcastTargetData> = resp.json().await?;
        Ok(parsed.data.id)
    }

    pub async fn delete_simulcast_target(
        &self,
        stream_id: &str,
        simulcast_id: &str,
    ) -> Result<()> {
        let resp = self
            .http
            .delete(self.live_streams_url(&format!(
                "/{}/simulcast-targets/{}",
                stream_id, simulcast_id
            )))
            .basic_auth(&self.token_id, Some(&self.token_secret))
            .send()
            .await?;
        Self::ensure_success(resp, "delete simulcast target").await?;

        Ok(())
    }

    /// Reads live view counts with a signed status credential. `None` means
    /// the statistics endpoint does not know the stream.
    pub async fn get_view_counts(&self, token: &str) -> Result<Option<ViewCounts>> {
        let resp = self
            .http
            .get(format!(
                "{}/counts",
                self.stats_base_url.trim_end_matches('/')
            ))
            .query(&[("token", token)])
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = Self::ensure_success(resp, "get view counts").await?;

        let parsed: MuxEnvelope<Vec<ViewCountData>> = resp.json().await?;
        let counts = parsed
            .data
            .first()
            .map(|entry| ViewCounts {
                views: entry.views,
                viewers: entry.viewers,
            })
            .unwrap_or(ViewCounts {
                views: 0,
                viewers: 0,
            });

        Ok(Some(counts))
    }
}
