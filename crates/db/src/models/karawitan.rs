//! Traditional-music (karawitan) articles.

use jambakan_core::types::{DbId, Timestamp};
use jambakan_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `karawitan` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MusicContent {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct MusicContentInput {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    pub image_url: Option<String>,
}
