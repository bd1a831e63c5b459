//! Session-checked authentication extractors for Axum handlers.
//!
//! A bearer token is only half of the check: its `sid` claim must name a
//! non-revoked `admin_sessions` row owned by the token's subject, and the
//! session supervisor rebuilt from that row's clocks must not be expired.
//! An expired session is revoked on the spot.

use axum::extract::{FromRequestParts, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use jambakan_core::session::{SessionState, SessionSupervisor};
use jambakan_core::types::{DbId, Timestamp};
use jambakan_db::models::admin_session::AdminSession;
use jambakan_db::repositories::AdminSessionRepo;

use crate::auth::jwt::{validate_token, Claims};
use crate::error::{AppError, AppResult};
use crate::query::IncludeDraftsParams;
use crate::state::AppState;

/// A valid access token together with its live session row.
///
/// No idle or lifetime evaluation happens here; use [`AuthAdmin`] for that.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub claims: Claims,
    pub session: AdminSession,
}

/// An admin whose session has been supervised and found alive.
///
/// Use this as an extractor parameter in any handler that requires an admin:
///
/// ```ignore
/// async fn my_handler(admin: AuthAdmin) -> AppResult<Json<()>> {
///     tracing::info!(user_id = admin.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub user_id: DbId,
    pub session_id: DbId,
    pub supervisor: SessionSupervisor,
}

/// Like [`AuthAdmin`] but the request does not reset the idle clock.
pub struct PassiveAuthAdmin(pub AuthAdmin);

/// Whether a public read may include drafts.
///
/// The token is only looked at when `?include_drafts=true` is requested, and
/// then passively, so browsing the public site with a stale token still
/// works and never counts as admin activity.
pub struct DraftAccess(pub bool);

fn bearer_token(parts: &Parts) -> AppResult<&str> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
    })
}

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let session = AdminSessionRepo::find_by_id(&state.pool, claims.sid)
            .await?
            .filter(|s| s.user_id == claims.sub && !s.is_revoked)
            .ok_or_else(|| AppError::unauthorized("Session is no longer active"))?;

        Ok(SessionToken { claims, session })
    }
}

/// Rebuild the supervisor for `token` and tick it at `now`.
///
/// Expired sessions are revoked and rejected.
pub async fn supervise(
    state: &AppState,
    token: SessionToken,
    now: Timestamp,
) -> AppResult<AuthAdmin> {
    let session = token.session;
    let mut supervisor = SessionSupervisor::from_clocks(
        state.config.session,
        session.started_at,
        session.last_activity_at,
    );

    if let SessionState::Expired(reason) = supervisor.tick(now) {
        AdminSessionRepo::revoke(&state.pool, session.id).await?;
        tracing::info!(
            session_id = session.id,
            user_id = session.user_id,
            ?reason,
            "Admin session expired",
        );
        return Err(AppError::unauthorized("Session expired"));
    }

    Ok(AuthAdmin {
        user_id: session.user_id,
        session_id: session.id,
        supervisor,
    })
}

impl AuthAdmin {
    /// Count the current request as activity and persist it.
    pub async fn record_activity(&mut self, state: &AppState, now: Timestamp) -> AppResult<()> {
        if !self.supervisor.record_activity(now) {
            return Err(AppError::unauthorized("Session expired"));
        }
        if !AdminSessionRepo::touch(&state.pool, self.session_id, now).await? {
            return Err(AppError::unauthorized("Session is no longer active"));
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = SessionToken::from_request_parts(parts, state).await?;
        let now = Utc::now();
        let mut admin = supervise(state, token, now).await?;
        admin.record_activity(state, now).await?;
        Ok(admin)
    }
}

impl FromRequestParts<AppState> for PassiveAuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = SessionToken::from_request_parts(parts, state).await?;
        let admin = supervise(state, token, Utc::now()).await?;
        Ok(PassiveAuthAdmin(admin))
    }
}

impl FromRequestParts<AppState> for DraftAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<IncludeDraftsParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if !params.include_drafts {
            return Ok(DraftAccess(false));
        }
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Err(AppError::unauthorized(
                "Authentication required to include drafts",
            ));
        }
        PassiveAuthAdmin::from_request_parts(parts, state).await?;
        Ok(DraftAccess(true))
    }
}
