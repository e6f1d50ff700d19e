use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::{
    streams::{InsertStreamEntity, StreamEntity, UpdateStreamEntity},
    thumbnails::ThumbnailEntity,
};

#[automock]
#[async_trait]
pub trait StreamRepository {
    /// Inserts the stream and its thumbnail row in one transaction.
    async fn create(
        &self,
        insert_stream_entity: InsertStreamEntity,
    ) -> Result<(StreamEntity, ThumbnailEntity)>;
    async fn list(&self) -> Result<Vec<(StreamEntity, ThumbnailEntity)>>;
    async fn find_by_stream_id(
        &self,
        stream_id: &str,
    ) -> Result<Option<(StreamEntity, ThumbnailEntity)>>;
    async fn update_details(
        &self,
        stream_id: &str,
        update_stream_entity: UpdateStreamEntity,
    ) -> Result<StreamEntity>;
    async fn set_status(&self, stream_id: &str, status: String) -> Result<()>;
    async fn set_stream_key(&self, stream_id: &str, stream_key: String) -> Result<()>;
    async fn delete_by_stream_id(&self, stream_id: &str) -> Result<()>;
}
