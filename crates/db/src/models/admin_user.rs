//! Admin account model.

use jambakan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `admin_users` table.
///
/// Contains the password hash -- never serialize this directly. Use
/// [`AdminUserInfo`] for API output.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public admin info returned by login.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

impl From<&AdminUser> for AdminUserInfo {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// DTO for inserting an admin. The password must already be hashed.
#[derive(Debug)]
pub struct CreateAdminUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
