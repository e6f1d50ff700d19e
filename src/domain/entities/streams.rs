use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::streams;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = streams)]
pub struct StreamEntity {
    pub id: Uuid,
    pub stream_id: String,
    pub stream_key: String,
    pub playback_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub visibility: String,
    pub latency_mode: String,
    pub test_mode: bool,
    pub creator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = streams)]
pub struct InsertStreamEntity {
    pub stream_id: String,
    pub stream_key: String,
    pub playback_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub visibility: String,
    pub latency_mode: String,
    pub test_mode: bool,
    pub creator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied by the metadata patch endpoint. `None` fields are
/// left untouched by diesel.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = streams)]
pub struct UpdateStreamEntity {
    pub title: Option<String>,
    pub description: Option<String>,
    pub latency_mode: Option<String>,
}
