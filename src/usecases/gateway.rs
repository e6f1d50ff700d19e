use anyhow::Result as AnyResult;
use async_trait::async_trait;

use crate::{
    domain::value_objects::{latency_modes::LatencyMode, playback_policies::PlaybackPolicy},
    infrastructure::mux::client::{MuxClient, ProvisionedStream, ViewCounts},
};

/// Seam over the video platform so usecases can be exercised with mocks.
/// The concrete client is constructed once at startup and injected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MuxGateway: Send + Sync {
    async fn create_live_stream(
        &self,
        policy: PlaybackPolicy,
        latency_mode: LatencyMode,
        test_mode: bool,
    ) -> AnyResult<ProvisionedStream>;

    async fn delete_live_stream(&self, stream_id: &str) -> AnyResult<()>;

    async fn update_latency_mode(
        &self,
        stream_id: &str,
        latency_mode: LatencyMode,
    ) -> AnyResult<()>;

    async fn reset_stream_key(&self, stream_id: &str) -> AnyResult<String>;

    async fn complete_live_stream(&self, stream_id: &str) -> AnyResult<()>;

    async fn enable_live_stream(&self, stream_id: &str) -> AnyResult<()>;

    async fn disable_live_stream(&self, stream_id: &str) -> AnyResult<()>;

    async fn create_simulcast_target(
        &self,
        stream_id: &str,
        stream_key: &str,
        url: &str,
    ) -> AnyResult<String>;

    async fn delete_simulcast_target(
        &self,
        stream_id: &str,
        simulcast_id: &str,
    ) -> AnyResult<()>;

    /// Returns `None` when the statistics endpoint reports the stream as unknown.
    async fn get_view_counts(&self, token: &str) -> AnyResult<Option<ViewCounts>>;
}

#[async_trait]
impl MuxGateway for MuxClient {
    async fn create_live_stream(
        &self,
        policy: PlaybackPolicy,
        latency_mode: LatencyMode,
        test_mode: bool,
    ) -> AnyResult<ProvisionedStream> {
        self.create_live_stream(policy, latency_mode, test_mode).await
    }

    async fn delete_live_stream(&self, stream_id: &str) -> AnyResult<()> {
        self.delete_live_stream(stream_id).await
    }

    async fn update_latency_mode(
        &self,
        stream_id: &str,
        latency_mode: LatencyMode,
    ) -> AnyResult<()> {
        self.update_latency_mode(stream_id, latency_mode).await
    }

    async fn reset_stream_key(&self, stream_id: &str) -> AnyResult<String> {
        self.reset_stream_key(stream_id).await
    }

    async fn complete_live_stream(&self, stream_id: &str) -> AnyResult<()> {
        self.complete_live_stream(stream_id).await
    }

    async fn enable_live_stream(&self, stream_id: &str) -> AnyResult<()> {
        self.enable_live_stream(stream_id).await
    }

    async fn disable_live_stream(&self, stream_id: &str) -> AnyResult<()> {
        self.disable_live_stream(stream_id).await
    }

    async fn create_simulcast_target(
        &self,
        stream_id: &str,
        stream_key: &str,
        url: &str,
    ) -> AnyResult<String> {
        self.create_simulcast_target(stream_id, stream_key, url).await
    }

    async fn delete_simulcast_target(
        &self,
        stream_id: &str,
        simulcast_id: &str,
    ) -> AnyResult<()> {
        self.delete_simulcast_target(stream_id, simulcast_id).await
    }

    async fn get_view_counts(&self, token: &str) -> AnyResult<Option<ViewCounts>> {
        self.get_view_counts(token).await
    }
}
