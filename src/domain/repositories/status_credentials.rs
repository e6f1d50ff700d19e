use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::status_credentials::{
    StatusCredentialEntity, UpsertStatusCredentialEntity,
};

#[automock]
#[async_trait]
pub trait StatusCredentialRepository {
    async fn find_by_stream(&self, stream_pk: Uuid) -> Result<Option<StatusCredentialEntity>>;
    /// Insert-or-replace keyed on the stream id. Concurrent issuers both land
    /// on the same row; the last write wins and the one-credential-per-stream
    /// invariant holds.
    async fn upsert(
        &self,
        upsert_status_credential_entity: UpsertStatusCredentialEntity,
    ) -> Result<StatusCredentialEntity>;
}
