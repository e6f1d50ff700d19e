use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::status_credentials::{StatusCredentialEntity, UpsertStatusCredentialEntity},
        repositories::status_credentials::StatusCredentialRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::status_credentials},
};

pub struct StatusCredentialPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl StatusCredentialPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl StatusCredentialRepository for StatusCredentialPostgres {
    async fn find_by_stream(&self, stream_pk: Uuid) -> Result<Option<StatusCredentialEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = status_credentials::table
            .filter(status_credentials::stream_id.eq(stream_pk))
            .select(StatusCredentialEntity::as_select())
            .first::<StatusCredentialEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn upsert(
        &self,
        upsert_status_credential_entity: UpsertStatusCredentialEntity,
    ) -> Result<StatusCredentialEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Conflict target is the stream_id primary key; racing issuers
        // converge on a single row instead of duplicating credentials.
        let result = insert_into(status_credentials::table)
            .values(&upsert_status_credential_entity)
            .on_conflict(status_credentials::stream_id)
            .do_update()
            .set((
                status_credentials::token.eq(&upsert_status_credential_entity.token),
                status_credentials::expires_at.eq(upsert_status_credential_entity.expires_at),
            ))
            .returning(StatusCredentialEntity::as_returning())
            .get_result::<StatusCredentialEntity>(&mut conn)?;

        Ok(result)
    }
}
