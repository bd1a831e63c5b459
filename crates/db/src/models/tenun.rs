//! Woven products (`tenun_products` table).

use jambakan_core::types::{DbId, Timestamp};
use jambakan_core::validation::{not_blank, publication_status};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tenun_products` table. `price` is in whole rupiah.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeavingProduct {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub technique: Option<String>,
    pub material: Option<String>,
    pub price: i64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct WeavingProductInput {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    pub image_url: Option<String>,
    pub technique: Option<String>,
    pub material: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: i64,
    #[validate(custom(function = "publication_status"))]
    pub status: Option<String>,
}
