use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::simulcasts::SimulcastEntity;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSimulcastModel {
    pub stream_key: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulcastModel {
    pub id: Uuid,
    pub simulcast_id: String,
    pub stream_key: String,
    pub url: String,
}

impl From<SimulcastEntity> for SimulcastModel {
    fn from(entity: SimulcastEntity) -> Self {
        Self {
            id: entity.id,
            simulcast_id: entity.simulcast_id,
            stream_key: entity.stream_key,
            url: entity.url,
        }
    }
}
