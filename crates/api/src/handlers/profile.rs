//! Handlers for the village profile.
//!
//! The profile table is append-only from the API's point of view except
//! for PUT, which rewrites the active (latest) row in place.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use jambakan_core::validation::validate_input;
use jambakan_db::models::profile::VillageProfileInput;
use jambakan_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const PROFILE_NOT_FOUND: &str = "Village profile not found";

/// GET /api/v1/profile
///
/// The active profile, or 404 when none has been written.
pub async fn get_profile(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_latest(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.into()))?;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/profile
///
/// Insert a new profile row; it becomes the active profile.
pub async fn create_profile(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<VillageProfileInput>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let profile = ProfileRepo::create(&state.pool, &input).await?;

    tracing::info!(
        profile_id = profile.id,
        user_id = admin.user_id,
        "Village profile created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// PUT /api/v1/profile
///
/// Replace the fields of the active profile. 404 if none exists yet.
pub async fn update_profile(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<VillageProfileInput>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let profile = ProfileRepo::update_latest(&state.pool, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.into()))?;

    tracing::info!(
        profile_id = profile.id,
        user_id = admin.user_id,
        "Village profile updated",
    );

    Ok(Json(DataResponse { data: profile }))
}
