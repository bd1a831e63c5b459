//! Handlers for the admin session supervisor (`/auth/session`).
//!
//! Clients poll the status endpoint to drive their countdown; the server
//! decides expiry independently on every authenticated request.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use jambakan_core::session::{SessionSnapshot, SessionSupervisor};
use jambakan_db::repositories::AdminSessionRepo;
use serde::Serialize;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthAdmin, PassiveAuthAdmin, SessionToken};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for an extension: a new token bound to the restarted session.
#[derive(Debug, Serialize)]
pub struct ExtendResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub session: SessionSnapshot,
}

/// GET /api/v1/auth/session
///
/// Current state without counting as activity.
pub async fn get_session(
    PassiveAuthAdmin(admin): PassiveAuthAdmin,
) -> Json<DataResponse<SessionSnapshot>> {
    Json(DataResponse {
        data: admin.supervisor.snapshot(),
    })
}

/// POST /api/v1/auth/session/activity
///
/// Explicit user activity (the extractor already recorded it).
pub async fn record_activity(admin: AuthAdmin) -> Json<DataResponse<SessionSnapshot>> {
    Json(DataResponse {
        data: admin.supervisor.snapshot(),
    })
}

/// POST /api/v1/auth/session/extend
///
/// Restart both clocks and issue a token with a fresh lifetime cap.
pub async fn extend_session(
    State(state): State<AppState>,
    PassiveAuthAdmin(mut admin): PassiveAuthAdmin,
) -> AppResult<Json<ExtendResponse>> {
    let now = Utc::now();
    if !admin.supervisor.extend(now) {
        return Err(AppError::unauthorized("Session expired"));
    }

    let session = AdminSessionRepo::restart(&state.pool, admin.session_id, now)
        .await?
        .ok_or_else(|| AppError::unauthorized("Session is no longer active"))?;

    let access_token = generate_access_token(
        admin.user_id,
        session.id,
        session.started_at,
        state.config.session.max_lifetime,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(
        user_id = admin.user_id,
        session_id = session.id,
        "Admin session extended",
    );

    Ok(Json(ExtendResponse {
        access_token,
        expires_in: (admin.supervisor.lifetime_deadline() - now).num_seconds(),
        session: admin.supervisor.snapshot(),
    }))
}

/// POST /api/v1/auth/session/resume
///
/// Page-reload restore: the session survives if its lifetime cap has not
/// passed, with the idle clock reset. Otherwise it is revoked.
pub async fn resume_session(
    State(state): State<AppState>,
    token: SessionToken,
) -> AppResult<Json<DataResponse<SessionSnapshot>>> {
    let now = Utc::now();
    let session = token.session;

    let Some(supervisor) =
        SessionSupervisor::restore(state.config.session, session.started_at, now)
    else {
        AdminSessionRepo::revoke(&state.pool, session.id).await?;
        tracing::info!(session_id = session.id, "Admin session past lifetime on resume");
        return Err(AppError::unauthorized("Session expired"));
    };

    if !AdminSessionRepo::touch(&state.pool, session.id, now).await? {
        return Err(AppError::unauthorized("Session is no longer active"));
    }

    Ok(Json(DataResponse {
        data: supervisor.snapshot(),
    }))
}
