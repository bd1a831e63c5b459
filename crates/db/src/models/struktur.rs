//! Organisational chart members (`struktur_members` table).

use jambakan_core::types::{DbId, Timestamp};
use jambakan_core::validation::{not_blank, org_section};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `struktur_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrgMember {
    pub id: DbId,
    pub name: String,
    pub position: String,
    pub contact: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub section: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for creating or replacing a member. `section` defaults to `pengurus`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct OrgMemberInput {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub position: String,
    pub contact: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    #[validate(custom(function = "org_section"))]
    pub section: Option<String>,
    pub order_index: i32,
}
