use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    domain::{
        entities::simulcasts::{InsertSimulcastEntity, SimulcastEntity},
        repositories::{simulcasts::SimulcastRepository, streams::StreamRepository},
        value_objects::{simulcasts::CreateSimulcastModel, stream_statuses::StreamStatus},
    },
    usecases::{
        errors::{StreamError, UseCaseResult},
        gateway::MuxGateway,
    },
};

pub struct SimulcastUseCase<S, T, M>
where
    S: StreamRepository + Send + Sync + 'static,
    T: SimulcastRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    stream_repository: Arc<S>,
    simulcast_repository: Arc<T>,
    mux: Arc<M>,
}

impl<S, T, M> SimulcastUseCase<S, T, M>
where
    S: StreamRepository + Send + Sync + 'static,
    T: SimulcastRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    pub fn new(stream_repository: Arc<S>, simulcast_repository: Arc<T>, mux: Arc<M>) -> Self {
        Self {
            stream_repository,
            simulcast_repository,
            mux,
        }
    }

    pub async fn create(
        &self,
        stream_id: &str,
        create_simulcast_model: CreateSimulcastModel,
    ) -> UseCaseResult<SimulcastEntity> {
        if create_simulcast_model.stream_key.trim().is_empty() {
            return Err(StreamError::Validation(
                "stream_key must not be empty".to_string(),
            ));
        }
        if create_simulcast_model.url.trim().is_empty() {
            return Err(StreamError::Validation("url must not be empty".to_string()));
        }

        let (stream_pk, _) = self.load_gated_stream(stream_id).await?;

        let simulcast_id = self
            .mux
            .create_simulcast_target(
                stream_id,
                &create_simulcast_model.stream_key,
                &create_simulcast_model.url,
            )
            .await
            .map_err(|err| {
                error!(%stream_id, error = ?err, "simulcasts: remote target creation failed");
                StreamError::operation_failed("create_simulcast_target", err)
            })?;

        let entity = self
            .simulcast_repository
            .create(InsertSimulcastEntity {
                stream_id: stream_pk,
                simulcast_id,
                stream_key: create_simulcast_model.stream_key,
                url: create_simulcast_model.url,
            })
            .await
            .map_err(|err| {
                error!(%stream_id, db_error = ?err, "simulcasts: failed to persist target");
                StreamError::Internal(err)
            })?;

        info!(%stream_id, simulcast_id = %entity.simulcast_id, "simulcasts: target created");
        Ok(entity)
    }

    pub async fn list(&self, stream_id: &str) -> UseCaseResult<Vec<SimulcastEntity>> {
        let (stream_pk, _) = self.load_stream(stream_id).await?;

        self.simulcast_repository
            .list_by_stream(stream_pk)
            .await
            .map_err(|err| {
                error!(%stream_id, db_error = ?err, "simulcasts: failed to list targets");
                StreamError::Internal(err)
            })
    }

    pub async fn get(
        &self,
        stream_id: &str,
        simulcast_id: &str,
    ) -> UseCaseResult<SimulcastEntity> {
        let (stream_pk, _) = self.load_stream(stream_id).await?;

        self.simulcast_repository
            .find(stream_pk, simulcast_id)
            .await
            .map_err(|err| {
                error!(%stream_id, %simulcast_id, db_error = ?err, "simulcasts: lookup failed");
                StreamError::Internal(err)
            })?
            .ok_or(StreamError::NotFound("simulcast"))
    }

    pub async fn delete(&self, stream_id: &str, simulcast_id: &str) -> UseCaseResult<()> {
        let (stream_pk, _) = self.load_gated_stream(stream_id).await?;

        let simulcast = self
            .simulcast_repository
            .find(stream_pk, simulcast_id)
            .await
            .map_err(|err| {
                error!(%stream_id, %simulcast_id, db_error = ?err, "simulcasts: lookup failed");
                StreamError::Internal(err)
            })?
            .ok_or(StreamError::NotFound("simulcast"))?;

        self.mux
            .delete_simulcast_target(stream_id, &simulcast.simulcast_id)
            .await
            .map_err(|err| {
                error!(%stream_id, %simulcast_id, error = ?err, "simulcasts: remote target deletion failed");
                StreamError::operation_failed("delete_simulcast_target", err)
            })?;

        self.simulcast_repository
            .delete(&simulcast.simulcast_id)
            .await
            .map_err(|err| {
                error!(%stream_id, %simulcast_id, db_error = ?err, "simulcasts: failed to delete target");
                StreamError::Internal(err)
            })?;

        info!(%stream_id, %simulcast_id, "simulcasts: target deleted");
        Ok(())
    }

    /// Simulcast mutations require the owning stream to be enabled and not live.
    async fn load_gated_stream(
        &self,
        stream_id: &str,
    ) -> UseCaseResult<(uuid::Uuid, StreamStatus)> {
        let (stream_pk, status) = self.load_stream(stream_id).await?;

        if !status.is_enabled() {
            warn!(%stream_id, %status, "simulcasts: rejected, stream is disabled");
            return Err(StreamError::PermissionDenied("stream is disabled"));
        }
        if !status.is_not_active() {
            warn!(%stream_id, %status, "simulcasts: rejected, stream is active");
            return Err(StreamError::PermissionDenied("stream is active"));
        }

        Ok((stream_pk, status))
    }

    async fn load_stream(&self, stream_id: &str) -> UseCaseResult<(uuid::Uuid, StreamStatus)> {
        let (stream, _) = self
            .stream_repository
            .find_by_stream_id(stream_id)
            .await
            .map_err(|err| {
                error!(%stream_id, db_error = ?err, "simulcasts: failed to load stream");
                StreamError::Internal(err)
            })?
            .ok_or(StreamError::NotFound("stream"))?;

        let status = StreamStatus::from_str(&stream.status).unwrap_or_default();
        Ok((stream.id, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            entities::{
                streams::StreamEntity,
                thumbnails::{DEFAULT_THUMBNAIL_PATH, ThumbnailEntity},
            },
            repositories::{
                simulcasts::MockSimulcastRepository, streams::MockStreamRepository,
            },
        },
        usecases::gateway::MockMuxGateway,
    };
    use anyhow::anyhow;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_record(status: StreamStatus) -> (StreamEntity, ThumbnailEntity) {
        let stream = StreamEntity {
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
        };
        let thumbnail = ThumbnailEntity {
            id: 1,
            stream_id: stream.id,
            image_path: DEFAULT_THUMBNAIL_PATH.to_string(),
        };
        (stream, thumbnail)
    }

    fn sample_simulcast(stream_pk: Uuid) -> SimulcastEntity {
        SimulcastEntity {
            id: Uuid::new_v4(),
            stream_id: stream_pk,
            simulcast_id: "sim-1".to_string(),
            stream_key: "target-key".to_string(),
            url: "rtmp://relay.example.com/live".to_string(),
        }
    }

    fn usecase(
        stream_repo: MockStreamRepository,
        simulcast_repo: MockSimulcastRepository,
        mux: MockMuxGateway,
    ) -> SimulcastUseCase<MockStreamRepository, MockSimulcastRepository, MockMuxGateway> {
        SimulcastUseCase::new(Arc::new(stream_repo), Arc::new(simulcast_repo), Arc::new(mux))
    }

    #[tokio::test]
    async fn create_stores_remote_assigned_simulcast_id() {
        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Idle))));

        let mut mux = MockMuxGateway::new();
        mux.expect_create_simulcast_target()
            .withf(|id, key, url| {
                id == "live-1" && key == "target-key" && url == "rtmp://relay.example.com/live"
            })
            .returning(|_, _, _| Ok("sim-1".to_string()));

        let mut simulcast_repo = MockSimulcastRepository::new();
        simulcast_repo
            .expect_create()
            .withf(|insert| insert.simulcast_id == "sim-1")
            .returning(|insert| {
                Ok(SimulcastEntity {
                    id: Uuid::new_v4(),
                    stream_id: insert.stream_id,
                    simulcast_id: insert.simulcast_id.clone(),
                    stream_key: insert.stream_key.clone(),
                    url: insert.url.clone(),
                })
            });

        let entity = usecase(stream_repo, simulcast_repo, mux)
            .create(
                "live-1",
                CreateSimulcastModel {
                    stream_key: "target-key".to_string(),
                    url: "rtmp://relay.example.com/live".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(entity.simulcast_id, "sim-1");
    }

    #[tokio::test]
    async fn create_rejected_while_stream_is_active() {
        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Active))));

        let mut mux = MockMuxGateway::new();
        mux.expect_create_simulcast_target().times(0);

        let mut simulcast_repo = MockSimulcastRepository::new();
        simulcast_repo.expect_create().times(0);

        let result = usecase(stream_repo, simulcast_repo, mux)
            .create(
                "live-1",
                CreateSimulcastModel {
                    stream_key: "target-key".to_string(),
                    url: "rtmp://relay.example.com/live".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(StreamError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn delete_keeps_local_row_when_remote_fails() {
        let record = sample_record(StreamStatus::Idle);
        let stream_pk = record.0.id;

        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_stream_id()
            .returning(move |_| Ok(Some(record.clone())));

        let mut simulcast_repo = MockSimulcastRepository::new();
        simulcast_repo
            .expect_find()
            .returning(move |_, _| Ok(Some(sample_simulcast(stream_pk))));
        simulcast_repo.expect_delete().times(0);

        let mut mux = MockMuxGateway::new();
        mux.expect_delete_simulcast_target()
            .returning(|_, _| Err(anyhow!("mux is down")));

        let result = usecase(stream_repo, simulcast_repo, mux)
            .delete("live-1", "sim-1")
            .await;

        assert!(matches!(
            result,
            Err(StreamError::OperationFailed { operation, .. })
                if operation == "delete_simulcast_target"
        ));
    }

    #[tokio::test]
    async fn get_unknown_simulcast_is_not_found() {
        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_stream_id()
            .returning(|_| Ok(Some(sample_record(StreamStatus::Idle))));

        let mut simulcast_repo = MockSimulcastRepository::new();
        simulcast_repo.expect_find().returning(|_, _| Ok(None));

        let result = usecase(stream_repo, simulcast_repo, MockMuxGateway::new())
            .get("live-1", "sim-x")
            .await;

        assert!(matches!(result, Err(StreamError::NotFound("simulcast"))));
    }
}
