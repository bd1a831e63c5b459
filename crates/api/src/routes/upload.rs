//! Route definitions for image uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use jambakan_core::upload::MAX_UPLOAD_BYTES;

use crate::handlers::upload;
use crate::state::AppState;

/// Request body ceiling for the upload route. Larger than the file limit so
/// an oversize image still reaches the size check and its specific message.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES * 4;

/// Routes mounted at `/upload`.
///
/// ```text
/// POST /  -> upload_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload::upload_image))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
