use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    domain::{
        entities::{
            streams::{InsertStreamEntity, StreamEntity, UpdateStreamEntity},
            thumbnails::ThumbnailEntity,
        },
        repositories::streams::StreamRepository,
        value_objects::{
            stream_statuses::StreamStatus,
            streams::{CreateStreamModel, UpdateStreamModel},
        },
    },
    usecases::{
        errors::{StreamError, UseCaseResult},
        gateway::MuxGateway,
    },
};

pub struct StreamUseCase<S, M>
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    stream_repository: Arc<S>,
    mux: Arc<M>,
}

impl<S, M> StreamUseCase<S, M>
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    pub fn new(stream_repository: Arc<S>, mux: Arc<M>) -> Self {
        Self {
            stream_repository,
            mux,
        }
    }

    pub async fn create(
        &self,
        create_stream_model: CreateStreamModel,
    ) -> UseCaseResult<(StreamEntity, ThumbnailEntity)> {
        let title = create_stream_model.title.trim().to_string();
        if title.is_empty() {
            return Err(StreamError::Validation("title must not be empty".to_string()));
        }

        let visibility = create_stream_model.visibility.unwrap_or_default();
        let latency_mode = create_stream_model.latency_mode.unwrap_or_default();
        let test_mode = create_stream_model.test_mode.unwrap_or(true);

        info!(
            %visibility,
            %latency_mode,
            test_mode,
            "streams: provisioning live stream"
        );

        let provisioned = self
            .mux
            .create_live_stream(visibility, latency_mode, test_mode)
            .await
            .map_err(|err| {
                error!(error = ?err, "streams: remote live stream creation failed");
                StreamError::operation_failed("create_live_stream", err)
            })?;

        let record = self
            .stream_repository
            .create(InsertStreamEntity {
                stream_id: provisioned.stream_id,
                stream_key: provisioned.stream_key,
                playback_id: provisioned.playback_id,
                title,
                description: create_stream_model.description,
                status: StreamStatus::Idle.to_string(),
                visibility: visibility.to_string(),
                latency_mode: latency_mode.to_string(),
                test_mode,
                creator_id: None,
                created_at: Utc::now(),
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "streams: failed to persist stream");
                StreamError::Internal(err)
            })?;

        info!(stream_id = %record.0.stream_id, "streams: stream created");
        Ok(record)
    }

    pub async fn list(&self) -> UseCaseResult<Vec<(StreamEntity, ThumbnailEntity)>> {
        self.stream_repository.list().await.map_err(|err| {
            error!(db_error = ?err, "streams: failed to list streams");
            StreamError::Internal(err)
        })
    }

    pub async fn get(&self, stream_id: &str) -> UseCaseResult<(StreamEntity, ThumbnailEntity)> {
        self.load(stream_id).await
    }

    pub async fn update(
        &self,
        stream_id: &str,
        update_stream_model: UpdateStreamModel,
    ) -> UseCaseResult<(StreamEntity, ThumbnailEntity)> {
        let (stream, thumbnail) = self.load(stream_id).await?;
        let status = Self::status_of(&stream);

        if !status.is_enabled() {
            warn!(%stream_id, %status, "streams: update rejected, stream is disabled");
            return Err(StreamError::PermissionDenied("stream is disabled"));
        }

        // Only reach out to the platform when the latency mode actually changes.
        if let Some(latency_mode) = update_stream_model.latency_mode {
            if latency_mode.to_string() != stream.latency_mode {
                self.mux
                    .update_latency_mode(stream_id, latency_mode)
                    .await
                    .map_err(|err| {
                        error!(%stream_id, error = ?err, "streams: remote latency update failed");
                        StreamError::operation_failed("update_live_stream", err)
                    })?;
            }
        }

        let updated = self
            .stream_repository
            .update_details(
                stream_id,
                UpdateStreamEntity {
                    title: update_stream_model.title,
                    description: update_stream_model.description,
                    latency_mode: update_stream_model
                        .latency_mode
                        .map(|mode| mode.to_string()),
                },
            )
            .await
            .map_err(|err| {
                error!(%stream_id, db_error = ?err, "streams: failed to update stream");
                StreamError::Internal(err)
            })?;

        Ok((updated, thumbnail))
    }

    pub async fn delete(&self, stream_id: &str) -> UseCaseResult<()> {
        let (stream, _) = self.load(stream_id).await?;
        let status = Self::status_of(&stream);

        if !status.is_not_active() {
            warn!(%stream_id, %status, "streams: delete rejected, stream is active");
            return Err(StreamError::PermissionDenied("stream is active"));
        }

        self.mux.delete_live_stream(stream_id).await.map_err(|err| {
            error!(%stream_id, error = ?err, "streams: remote live stream deletion failed");
            StreamError::operation_failed("delete_live_stream", err)
        })?;

        self.stream_repository
            .delete_by_stream_id(stream_id)
            .await
            .map_err(|err| {
                error!(%stream_id, db_error = ?err, "streams: failed to delete stream");
                StreamError::Internal(err)
            })?;

        info!(%stream_id, "streams: stream deleted");
        Ok(())
    }

    /// Signals broadcast completion. Permitted in every status.
    pub async fn finish(&self, stream_id: &str) -> UseCaseResult<()> {
        self.load(stream_id).await?;

        self.mux
            .complete_live_stream(stream_id)
            .await
            .map_err(|err| {
                error!(%stream_id, error = ?err, "streams: remote finish failed");
                StreamError::operation_failed("finish_live_stream", err)
            })?;

        self.set_status(stream_id, StreamStatus::Idle).await?;

        info!(%stream_id, "streams: stream finished");
        Ok(())
    }

    pub async fn reset_key(
        &self,
        stream_id: &str,
    ) -> UseCaseResult<(StreamEntity, ThumbnailEntity)> {
        let (mut stream, thumbnail) = self.load(stream_id).await?;
        let status = Self::status_of(&stream);

        if !status.is_not_active() {
            warn!(%stream_id, %status, "streams: key reset rejected, stream is active");
            return Err(StreamError::PermissionDenied("stream is active"));
        }
        if !status.is_enabled() {
            warn!(%stream_id, %status, "streams: key reset rejected, stream is disabled");
            return Err(StreamError::PermissionDenied("stream is disabled"));
        }

        let stream_key = self.mux.reset_stream_key(stream_id).await.map_err(|err| {
            error!(%stream_id, error = ?err, "streams: remote key reset failed");
            StreamError::operation_failed("reset_stream_key", err)
        })?;

        self.stream_repository
            .set_stream_key(stream_id, stream_key.clone())
            .await
            .map_err(|err| {
                error!(%stream_id, db_error = ?err, "streams: failed to store new stream key");
                StreamError::Internal(err)
            })?;

        info!(%stream_id, "streams: stream key rotated");
        stream.stream_key = stream_key;
        Ok((stream, thumbnail))
    }

    pub async fn enable(&self, stream_id: &str) -> UseCaseResult<()> {
        let (stream, _) = self.load(stream_id).await?;
        let status = Self::status_of(&stream);

        if !status.is_disabled() {
            warn!(%stream_id, %status, "streams: enable rejected, stream is not disabled");
            return Err(StreamError::PermissionDenied("stream is not disabled"));
        }

        self.mux.enable_live_stream(stream_id).await.map_err(|err| {
            error!(%stream_id, error = ?err, "streams: remote enable failed");
            StreamError::operation_failed("enable_live_stream", err)
        })?;

        self.set_status(stream_id, StreamStatus::Idle).await?;

        info!(%stream_id, "streams: stream enabled");
        Ok(())
    }

    pub async fn disable(&self, stream_id: &str) -> UseCaseResult<()> {
        let (stream, _) = self.load(stream_id).await?;
        let status = Self::status_of(&stream);

        if !status.is_enabled() {
            warn!(%stream_id, %status, "streams: disable rejected, already disabled");
            return Err(StreamError::PermissionDenied("stream is disabled"));
        }
        if !status.is_not_active() {
            warn!(%stream_id, %status, "streams: disable rejected, stream is active");
            return Err(StreamError::PermissionDenied("stream is active"));
        }

        self.mux
            .disable_live_stream(stream_id)
            .await
            .map_err(|err| {
                error!(%stream_id, error = ?err, "streams: remote disable failed");
                StreamError::operation_failed("disable_live_stream", err)
            })?;

        self.set_status(stream_id, StreamStatus::Disabled).await?;

        info!(%stream_id, "streams: stream disabled");
        Ok(())
    }

    async fn load(&self, stream_id: &str) -> UseCaseResult<(StreamEntity, ThumbnailEntity)> {
        self.stream_repository
            .find_by_stream_id(stream_id)
            .await
            .map_err(|err| {
                error!(%stream_id, db_error = ?err, "streams: failed to load stream");
                StreamError::Internal(err)
            })?
            .ok_or(StreamError::NotFound("stream"))
    }

    async fn set_status(&self, stream_id: &str, status: StreamStatus) -> UseCaseResult<()> {
        self.stream_repository
            .set_status(stream_id, status.to_string())
            .await
            .map_err(|err| {
                error!(%stream_id, db_error = ?err, "streams: failed to update status");
                StreamError::Internal(err)
            })
    }

    fn status_of(stream: &StreamEntity) -> StreamStatus {
        StreamStatus::from_str(&stream.status).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            entities::thumbnails::DEFAULT_THUMBNAIL_PATH,
            repositories::streams::MockStreamRepository,
            value_objects::{latency_modes::LatencyMode, playback_policies::PlaybackPolicy},
        },
        infrastructure::mux::client::ProvisionedStream,
        usecases::gateway::MockMuxGateway,
    };
    use anyhow::anyhow;
    use uuid::Uuid;

    fn sample_stream(status: StreamStatus) -> StreamEntity {
        StreamEntity {
            id: Uuid::new_v4(),
            stream_id: "live-1".to_string(),
            stream_key: "key-1".to_string(),
            playback_id: "pb-1".to_string(),
            title: "Morning show".to_string(),
            description: None,
            status: status.to_string(),
            visibility: "public".to_string(),
            latency_mode: "standard".to_string(),
            test_mode: true,
            creator_id: None,
            created_at: Utc::now(),
        }
    }

    fn sample_thumbnail(stream: &StreamEntity) -> ThumbnailEntity {
        ThumbnailEntity {
            id: 1,
            stream_id: stream.id,
            image_path: DEFAULT_THUMBNAIL_PATH.to_string(),
        }
    }

    fn sample_record(status: StreamStatus) -> (StreamEntity, ThumbnailEntity) {
        let stream = sample_stream(status);
        let thumbnail = sample_thumbnail(&stream);
        (stream, thumbnail)
    }

    fn usecase(
        repo: MockStreamRepository,
        mux: MockMuxGateway,
    ) -> StreamUseCase<MockStreamRepository, MockMuxGateway> {
        StreamUseCase::new(Arc::new(repo), Arc::new(mux))
    }

    #[tokio::test]
    async fn create_stores_provider_assigned_identifiers() {
        let mut mux = MockMuxGateway::new();
        mux.expect_create_live_stream()
            .withf(|policy, latency, test| {
                *policy == PlaybackPolicy::Private && *latency == LatencyMode::Low && *test
            })
            .returning(|_, _, _| {
                Ok(ProvisionedStream {
                    stream_id: "live-1".to_string(),
                    stream_key: "key-1".to_string(),
                    playback_id: "pb-1".to_string(),
                })
            });

        let mut repo = MockStreamRepository::new();
        repo.expect_create()
            .withf(|insert| {
                insert.stream_id == "live-1"
                    && insert.stream_key == "key-1"
                    && insert.playback_id == "pb-1"
                    && insert.status == "idle"
                    && insert.visibility == "private"
                    && insert.latency_mode == "low"
                    && insert.test_mode
            })
            .returning(|_| Ok(sample_record(StreamStatus::Idle)));

        let result = usecase(repo, mux)
            .create(CreateStreamModel {
                title: "Morning show".to_string(),
                description: None,
                visibility: Some(PlaybackPolicy::Private),
                latency_mode: Some(LatencyMode::Low),
                test_mode: Some(true),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn create_aborts_local_insert_when_remote_fails() {
        let mut mux = MockMuxGateway::new();
        mux.expect_create_live_stream()
            .returning(|_, _, _| Err(anyhow!("mux is down")));

        let mut repo = MockStreamRepository::new();
        repo.expect_create().times(0);

        let result = usecase(repo, mux)
            .create(CreateStreamModel {
                title: "Morning show".to_string(),
                description: None,
                visibility: None,
                latency_mode: None,
                test_mode: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(StreamError::OperationFailed { operation, .. }) if operation == "create_live_stream"
        ));
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let mut mux = MockMuxGateway::new();
        mux.expect_create_live_stream().times(0);

        let result = usecase(MockStreamRepository::new(), mux)
            .create(CreateStreamModel {
                title: "   ".to_string(),
                description: None,
                visibility: None,
                latency_mode: None,
                test_mode: None,
            })
            .await;

        assert!(matches!(result, Err(StreamError::Validation(_))));
    }

    #[tokio::test]
    async fn update_with_same_latency_mode_makes_no_remote_call() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Idle))));
        repo.expect_update_details()
            .returning(|_, _| Ok(sample_stream(StreamStatus::Idle)));

        let mut mux = MockMuxGateway::new();
        mux.expect_update_latency_mode().times(0);

        let result = usecase(repo, mux)
            .update(
                "live-1",
                UpdateStreamModel {
                    title: Some("New title".to_string()),
                    description: None,
                    latency_mode: Some(LatencyMode::Standard),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn update_with_new_latency_mode_calls_remote_once() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Idle))));
        repo.expect_update_details()
            .returning(|_, _| Ok(sample_stream(StreamStatus::Idle)));

        let mut mux = MockMuxGateway::new();
        mux.expect_update_latency_mode()
            .withf(|id, mode| id == "live-1" && *mode == LatencyMode::Low)
            .times(1)
            .returning(|_, _| Ok(()));

        let result = usecase(repo, mux)
            .update(
                "live-1",
                UpdateStreamModel {
                    title: None,
                    description: None,
                    latency_mode: Some(LatencyMode::Low),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn update_rejected_for_disabled_stream() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Disabled))));
        repo.expect_update_details().times(0);

        let mut mux = MockMuxGateway::new();
        mux.expect_update_latency_mode().times(0);

        let result = usecase(repo, mux)
            .update("live-1", UpdateStreamModel::default())
            .await;

        assert!(matches!(result, Err(StreamError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn reset_key_rejected_while_active() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Active))));
        repo.expect_set_stream_key().times(0);

        let mut mux = MockMuxGateway::new();
        mux.expect_reset_stream_key().times(0);

        let result = usecase(repo, mux).reset_key("live-1").await;
        assert!(matches!(result, Err(StreamError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn reset_key_overwrites_stored_key_with_remote_value() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Idle))));
        repo.expect_set_stream_key()
            .withf(|id, key| id == "live-1" && key == "key-2")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut mux = MockMuxGateway::new();
        mux.expect_reset_stream_key()
            .returning(|_| Ok("key-2".to_string()));

        let (stream, _) = usecase(repo, mux).reset_key("live-1").await.unwrap();
        assert_eq!(stream.stream_key, "key-2");
    }

    #[tokio::test]
    async fn finish_is_permitted_while_active_and_sets_idle() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Active))));
        repo.expect_set_status()
            .withf(|id, status| id == "live-1" && status == "idle")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut mux = MockMuxGateway::new();
        mux.expect_complete_live_stream().returning(|_| Ok(()));

        assert!(usecase(repo, mux).finish("live-1").await.is_ok());
    }

    #[tokio::test]
    async fn finish_leaves_status_untouched_when_remote_fails() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Active))));
        repo.expect_set_status().times(0);

        let mut mux = MockMuxGateway::new();
        mux.expect_complete_live_stream()
            .returning(|_| Err(anyhow!("mux is down")));

        let result = usecase(repo, mux).finish("live-1").await;
        assert!(matches!(result, Err(StreamError::OperationFailed { .. })));
    }

    #[tokio::test]
    async fn disable_idle_stream_sets_disabled() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Idle))));
        repo.expect_set_status()
            .withf(|id, status| id == "live-1" && status == "disabled")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut mux = MockMuxGateway::new();
        mux.expect_disable_live_stream().returning(|_| Ok(()));

        assert!(usecase(repo, mux).disable("live-1").await.is_ok());
    }

    #[tokio::test]
    async fn disable_rejected_when_already_disabled() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Disabled))));
        repo.expect_set_status().times(0);

        let mut mux = MockMuxGateway::new();
        mux.expect_disable_live_stream().times(0);

        let result = usecase(repo, mux).disable("live-1").await;
        assert!(matches!(result, Err(StreamError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn enable_requires_disabled_status() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Idle))));
        repo.expect_set_status().times(0);

        let mut mux = MockMuxGateway::new();
        mux.expect_enable_live_stream().times(0);

        let result = usecase(repo, mux).enable("live-1").await;
        assert!(matches!(result, Err(StreamError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn enable_disabled_stream_sets_idle() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Disabled))));
        repo.expect_set_status()
            .withf(|id, status| id == "live-1" && status == "idle")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut mux = MockMuxGateway::new();
        mux.expect_enable_live_stream().returning(|_| Ok(()));

        assert!(usecase(repo, mux).enable("live-1").await.is_ok());
    }

    #[tokio::test]
    async fn delete_rejected_while_active() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Active))));
        repo.expect_delete_by_stream_id().times(0);

        let mut mux = MockMuxGateway::new();
        mux.expect_delete_live_stream().times(0);

        let result = usecase(repo, mux).delete("live-1").await;
        assert!(matches!(result, Err(StreamError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn delete_missing_stream_is_not_found() {
        let mut repo = MockStreamRepository::new();
        repo.expect_find_by_stream_id().returning(|_| Ok(None));

        let result = usecase(repo, MockMuxGateway::new()).delete("live-x").await;
        assert!(matches!(result, Err(StreamError::NotFound(_))));
    }
}
