use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::simulcasts;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = simulcasts)]
pub struct SimulcastEntity {
    pub id: Uuid,
    pub stream_id: Uuid,
    pub simulcast_id: String,
    pub stream_key: String,
    pub url: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = simulcasts)]
pub struct InsertSimulcastEntity {
    pub stream_id: Uuid,
    pub simulcast_id: String,
    pub stream_key: String,
    pub url: String,
}
