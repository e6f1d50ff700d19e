use chrono::{DateTime, Utc};
use serde::Serialize;

/// Viewer-count answer for the status endpoint, together with the expiry of
/// the credential the counts were fetched with.
#[derive(Debug, Clone, Serialize)]
pub struct StreamStatusModel {
    pub views: i64,
    pub viewers: i64,
    pub credential_expires_at: DateTime<Utc>,
}
