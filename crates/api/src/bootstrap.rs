//! First-run admin account seeding.

use jambakan_db::models::admin_user::CreateAdminUser;
use jambakan_db::repositories::AdminUserRepo;
use sqlx::PgPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::AdminBootstrapConfig;
use crate::error::{AppError, AppResult};

/// Outcome of [`ensure_admin`].
#[derive(Debug, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// At least one admin already existed.
    Existing,
    /// No admin existed and no password was configured.
    Skipped,
    /// An admin was created with this username.
    Created(String),
}

/// Create the configured admin when the `admin_users` table is empty.
pub async fn ensure_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> AppResult<BootstrapOutcome> {
    if AdminUserRepo::count(pool).await? > 0 {
        return Ok(BootstrapOutcome::Existing);
    }

    let Some(password) = config.password.as_deref() else {
        tracing::warn!("No admin account exists and ADMIN_PASSWORD is not set; login is disabled");
        return Ok(BootstrapOutcome::Skipped);
    };

    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(AppError::BadRequest)?;

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let admin = AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            username: config.username.clone(),
            email: config.email.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = admin.id, username = %admin.username, "Bootstrapped admin account");
    Ok(BootstrapOutcome::Created(admin.username))
}
