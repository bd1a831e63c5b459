//! Yearly demographic figures (`desa_demographics` table).

use jambakan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `desa_demographics` table. `year` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DemographicRecord {
    pub id: DbId,
    pub year: i32,
    pub births: i32,
    pub deaths: i32,
    pub household_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for creating or replacing a yearly record. Counts default to zero.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DemographicRecordInput {
    #[validate(range(min = 1, message = "is required"))]
    pub year: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub births: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub deaths: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub household_count: i32,
}
