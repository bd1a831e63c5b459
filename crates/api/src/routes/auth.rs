//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, session};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login              -> login
/// POST /logout             -> logout
/// GET  /session            -> get_session
/// POST /session/activity   -> record_activity
/// POST /session/extend     -> extend_session
/// POST /session/resume     -> resume_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(session::get_session))
        .route("/session/activity", post(session::record_activity))
        .route("/session/extend", post(session::extend_session))
        .route("/session/resume", post(session::resume_session))
}
