use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, RunQueryDsl, delete, insert_into, prelude::*, update};

use crate::{
    domain::{
        entities::{
            streams::{InsertStreamEntity, StreamEntity, UpdateStreamEntity},
            thumbnails::{DEFAULT_THUMBNAIL_PATH, InsertThumbnailEntity, ThumbnailEntity},
        },
        repositories::streams::StreamRepository,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{stream_thumbnails, streams},
    },
};

pub struct StreamPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl StreamPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl StreamRepository for StreamPostgres {
    async fn create(
        &self,
        insert_stream_entity: InsertStreamEntity,
    ) -> Result<(StreamEntity, ThumbnailEntity)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // The thumbnail row is part of stream creation, not an afterthought;
        // both land or neither does.
        let record = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let stream = insert_into(streams::table)
                .values(&insert_stream_entity)
                .returning(StreamEntity::as_returning())
                .get_result::<StreamEntity>(conn)?;

            let thumbnail = insert_into(stream_thumbnails::table)
                .values(InsertThumbnailEntity {
                    stream_id: stream.id,
                    image_path: DEFAULT_THUMBNAIL_PATH.to_string(),
                })
                .returning(ThumbnailEntity::as_returning())
                .get_result::<ThumbnailEntity>(conn)?;

            Ok((stream, thumbnail))
        })?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<(StreamEntity, ThumbnailEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = streams::table
            .inner_join(stream_thumbnails::table)
            .select((StreamEntity::as_select(), ThumbnailEntity::as_select()))
            .order(streams::created_at.desc())
            .load::<(StreamEntity, ThumbnailEntity)>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_stream_id(
        &self,
        stream_id: &str,
    ) -> Result<Option<(StreamEntity, ThumbnailEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = streams::table
            .inner_join(stream_thumbnails::table)
            .filter(streams::stream_id.eq(stream_id))
            .select((StreamEntity::as_select(), ThumbnailEntity::as_select()))
            .first::<(StreamEntity, ThumbnailEntity)>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update_details(
        &self,
        stream_id: &str,
        update_stream_entity: UpdateStreamEntity,
    ) -> Result<StreamEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let has_changes = update_stream_entity.title.is_some()
            || update_stream_entity.description.is_some()
            || update_stream_entity.latency_mode.is_some();

        // diesel rejects an empty changeset, so an all-None patch is a no-op read.
        if !has_changes {
            let stream = streams::table
                .filter(streams::stream_id.eq(stream_id))
                .select(StreamEntity::as_select())
                .first::<StreamEntity>(&mut conn)?;
            return Ok(stream);
        }

        let stream = update(streams::table.filter(streams::stream_id.eq(stream_id)))
            .set(&update_stream_entity)
            .returning(StreamEntity::as_returning())
            .get_result::<StreamEntity>(&mut conn)?;

        Ok(stream)
    }

    async fn set_status(&self, stream_id: &str, status: String) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(streams::table.filter(streams::stream_id.eq(stream_id)))
            .set(streams::status.eq(status))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn set_stream_key(&self, stream_id: &str, stream_key: String) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(streams::table.filter(streams::stream_id.eq(stream_id)))
            .set(streams::stream_key.eq(stream_key))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn delete_by_stream_id(&self, stream_id: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Simulcasts, the status credential and the thumbnail go with the
        // stream via ON DELETE CASCADE.
        delete(streams::table.filter(streams::stream_id.eq(stream_id))).execute(&mut conn)?;

        Ok(())
    }
}
