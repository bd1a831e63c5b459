//! Repository for the `admin_users` table.

use jambakan_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::admin_user::{AdminUser, CreateAdminUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, failed_login_count, \
                       locked_until, last_login_at, created_at, updated_at";

/// Provides account lookups and login bookkeeping for admins.
pub struct AdminUserRepo;

impl AdminUserRepo {
    /// Insert a new admin, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAdminUser) -> Result<AdminUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE id = $1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an admin by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE username = $1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Number of admin accounts. Used by the startup bootstrap.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(pool)
            .await
    }

    /// Increment the failed login counter by 1, returning the new value.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE admin_users SET failed_login_count = failed_login_count + 1
             WHERE id = $1
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Lock an account until the given timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admin_users SET locked_until = $2, failed_login_count = 0 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Reset `failed_login_count`, clear `locked_until` and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE admin_users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
