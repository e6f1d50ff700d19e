use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::stream_thumbnails;

/// Fallback image served while the stream is not live.
pub const DEFAULT_THUMBNAIL_PATH: &str = "lives/thumbnails/default.png";

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = stream_thumbnails)]
pub struct ThumbnailEntity {
    pub id: i64,
    pub stream_id: Uuid,
    pub image_path: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stream_thumbnails)]
pub struct InsertThumbnailEntity {
    pub stream_id: Uuid,
    pub image_path: String,
}
