//! Photo gallery items (`gallery` table).

use jambakan_core::types::{DbId, Timestamp};
use jambakan_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `gallery` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct GalleryItemInput {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}
