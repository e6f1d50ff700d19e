use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::simulcasts::{InsertSimulcastEntity, SimulcastEntity};

#[automock]
#[async_trait]
pub trait SimulcastRepository {
    async fn create(
        &self,
        insert_simulcast_entity: InsertSimulcastEntity,
    ) -> Result<SimulcastEntity>;
    async fn list_by_stream(&self, stream_pk: Uuid) -> Result<Vec<SimulcastEntity>>;
    async fn find(&self, stream_pk: Uuid, simulcast_id: &str) -> Result<Option<SimulcastEntity>>;
    async fn delete(&self, simulcast_id: &str) -> Result<()>;
}
