//! Server-side admin session model.

use jambakan_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `admin_sessions` table.
///
/// `started_at` and `last_activity_at` are the two clocks the session
/// supervisor evaluates.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub user_id: DbId,
    pub started_at: Timestamp,
    pub last_activity_at: Timestamp,
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a session.
#[derive(Debug)]
pub struct CreateAdminSession {
    pub user_id: DbId,
    pub started_at: Timestamp,
    pub user_agent: Option<String>,
}
