//! Route definitions for the village profile.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET  /  -> get_profile
/// POST /  -> create_profile
/// PUT  /  -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(profile::get_profile)
            .post(profile::create_profile)
            .put(profile::update_profile),
    )
}
