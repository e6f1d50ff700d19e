use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::status_credentials;

/// One row per stream; the primary key on `stream_id` is what makes the
/// issue-or-reuse upsert race free.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = status_credentials)]
#[diesel(primary_key(stream_id))]
pub struct StatusCredentialEntity {
    pub stream_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StatusCredentialEntity {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = status_credentials)]
pub struct UpsertStatusCredentialEntity {
    pub stream_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
