//! News / activity items (`activities` table).

use chrono::NaiveDate;
use jambakan_core::types::{DbId, Timestamp};
use jambakan_core::validation::{not_blank, publication_status};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub image_url: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for creating or replacing a news item.
///
/// `category` defaults to `Kegiatan` and `status` to `published`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ActivityInput {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub event_date: Option<NaiveDate>,
    #[validate(custom(function = "publication_status"))]
    pub status: Option<String>,
}
