//! Village profile (`desa_profile` table).
//!
//! The table may hold several rows; the one with the highest id is the
//! active profile.

use jambakan_core::types::{DbId, Timestamp};
use jambakan_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `desa_profile` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VillageProfile {
    pub id: DbId,
    pub desa_name: String,
    pub desa_code: Option<String>,
    pub sub_district: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub description: Option<String>,
    pub vision: Option<String>,
    pub mission: Option<String>,
    pub history: Option<String>,
    pub total_population: Option<i32>,
    pub total_families: Option<i32>,
    pub area_km2: Option<f64>,
    pub main_livelihoods: Option<String>,
    pub village_chief_name: Option<String>,
    pub village_chief_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for creating or replacing the profile.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VillageProfileInput {
    #[validate(custom(function = "not_blank"))]
    pub desa_name: String,
    pub desa_code: Option<String>,
    pub sub_district: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub description: Option<String>,
    pub vision: Option<String>,
    pub mission: Option<String>,
    pub history: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub total_population: Option<i32>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub total_families: Option<i32>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub area_km2: Option<f64>,
    pub main_livelihoods: Option<String>,
    pub village_chief_name: Option<String>,
    pub village_chief_phone: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
}
