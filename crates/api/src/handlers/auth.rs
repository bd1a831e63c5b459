//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use jambakan_core::error::CoreError;
use jambakan_core::session::{SessionSnapshot, SessionSupervisor};
use jambakan_db::models::admin_session::CreateAdminSession;
use jambakan_db::models::admin_user::AdminUserInfo;
use jambakan_db::repositories::{AdminSessionRepo, AdminUserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::SessionToken;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
pub const LOCK_DURATION_MINS: i64 = 15;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Seconds until the session's lifetime cap.
    pub expires_in: i64,
    pub user: AdminUserInfo,
    pub session: SessionSnapshot,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password, open a server-side session and
/// return a token bound to it.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username and password are required".into(),
        )));
    }

    let user = AdminUserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    let now = Utc::now();
    if let Some(locked_until) = user.locked_until {
        if locked_until > now {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failed = AdminUserRepo::increment_failed_login(&state.pool, user.id).await?;
        if failed >= MAX_FAILED_ATTEMPTS {
            let lock_until = now + chrono::Duration::minutes(LOCK_DURATION_MINS);
            AdminUserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, failed, "Admin account locked");
        }
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    AdminUserRepo::record_successful_login(&state.pool, user.id).await?;

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let session = AdminSessionRepo::create(
        &state.pool,
        &CreateAdminSession {
            user_id: user.id,
            started_at: now,
            user_agent,
        },
    )
    .await?;

    let policy = state.config.session;
    let supervisor = SessionSupervisor::login(policy, session.started_at);
    let access_token = generate_access_token(
        user.id,
        session.id,
        session.started_at,
        policy.max_lifetime,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, session_id = session.id, "Admin logged in");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: (supervisor.lifetime_deadline() - now).num_seconds(),
        user: AdminUserInfo::from(&user),
        session: supervisor.snapshot(),
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the caller's session. Works for sessions that have already idled
/// out. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    token: SessionToken,
) -> AppResult<StatusCode> {
    AdminSessionRepo::revoke(&state.pool, token.session.id).await?;
    tracing::info!(
        user_id = token.claims.sub,
        session_id = token.session.id,
        "Admin logged out",
    );
    Ok(StatusCode::NO_CONTENT)
}
