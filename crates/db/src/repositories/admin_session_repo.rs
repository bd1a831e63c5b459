//! Repository for the `admin_sessions` table.
//!
//! Timestamps are always supplied by the caller so the session supervisor
//! and the stored clocks agree on "now".

use jambakan_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::admin_session::{AdminSession, CreateAdminSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, started_at, last_activity_at, is_revoked, \
                       user_agent, created_at, updated_at";

/// Provides lifecycle operations for admin sessions.
pub struct AdminSessionRepo;

impl AdminSessionRepo {
    /// Open a session. Both clocks start at `input.started_at`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdminSession,
    ) -> Result<AdminSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_sessions (user_id, started_at, last_activity_at, user_agent)
             VALUES ($1, $2, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(input.user_id)
            .bind(input.started_at)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Find a session by id, revoked or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdminSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_sessions WHERE id = $1");
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record activity. Returns `false` if the session is gone or revoked.
    pub async fn touch(pool: &PgPool, id: DbId, at: Timestamp) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET last_activity_at = $2
             WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reset both clocks to `at` (session extension).
    pub async fn restart(
        pool: &PgPool,
        id: DbId,
        at: Timestamp,
    ) -> Result<Option<AdminSession>, sqlx::Error> {
        let query = format!(
            "UPDATE admin_sessions SET started_at = $2, last_activity_at = $2
             WHERE id = $1 AND is_revoked = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(id)
            .bind(at)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET is_revoked = true WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every live session started at or before `cutoff`, i.e. past
    /// its lifetime cap. Returns the count of revoked sessions.
    pub async fn revoke_started_before(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET is_revoked = true
             WHERE is_revoked = false AND started_at <= $1",
        )
        .bind(cutoff)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete revoked sessions last touched before `before`.
    pub async fn delete_revoked(pool: &PgPool, before: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM admin_sessions WHERE is_revoked = true AND updated_at < $1",
        )
        .bind(before)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
