use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::simulcasts::{InsertSimulcastEntity, SimulcastEntity},
        repositories::simulcasts::SimulcastRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::simulcasts},
};

pub struct SimulcastPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SimulcastPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SimulcastRepository for SimulcastPostgres {
    async fn create(
        &self,
        insert_simulcast_entity: InsertSimulcastEntity,
    ) -> Result<SimulcastEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(simulcasts::table)
            .values(&insert_simulcast_entity)
            .returning(SimulcastEntity::as_returning())
            .get_result::<SimulcastEntity>(&mut conn)?;

        Ok(result)
    }

    async fn list_by_stream(&self, stream_pk: Uuid) -> Result<Vec<SimulcastEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = simulcasts::table
            .filter(simulcasts::stream_id.eq(stream_pk))
            .select(SimulcastEntity::as_select())
            .load::<SimulcastEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find(&self, stream_pk: Uuid, simulcast_id: &str) -> Result<Option<SimulcastEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = simulcasts::table
            .filter(simulcasts::stream_id.eq(stream_pk))
            .filter(simulcasts::simulcast_id.eq(simulcast_id))
            .select(SimulcastEntity::as_select())
            .first::<SimulcastEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, simulcast_id: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(simulcasts::table.filter(simulcasts::simulcast_id.eq(simulcast_id)))
            .execute(&mut conn)?;

        Ok(())
    }
}
