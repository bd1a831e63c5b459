//! Generic CRUD handlers shared by every flat content table.
//!
//! Each handler is instantiated per [`Resource`] in `routes::resource`.
//! Reads are public (drafts need an admin, see [`DraftAccess`]); writes
//! require a supervised admin session.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use jambakan_core::error::CoreError;
use jambakan_core::types::DbId;
use jambakan_core::validation::validate_input;
use jambakan_db::Resource;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthAdmin, DraftAccess};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found<R: Resource>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id,
    })
}

/// GET /api/v1/{resource}
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    DraftAccess(include_drafts): DraftAccess,
) -> AppResult<impl IntoResponse> {
    let rows = R::list(&state.pool, include_drafts).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/{resource}/{id}
pub async fn get<R: Resource>(
    State(state): State<AppState>,
    DraftAccess(include_drafts): DraftAccess,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = R::find_by_id(&state.pool, id, include_drafts)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/{resource}
///
/// Returns 201 with the inserted row.
pub async fn create<R: Resource>(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<R::Input>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let row = R::create(&state.pool, &input).await?;

    tracing::info!(
        entity = R::ENTITY,
        user_id = admin.user_id,
        "Content created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/{resource}/{id}
///
/// Replaces every mutable column.
pub async fn update<R: Resource>(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<R::Input>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let row = R::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;

    tracing::info!(
        entity = R::ENTITY,
        id,
        user_id = admin.user_id,
        "Content updated",
    );

    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/{resource}/{id}
pub async fn delete<R: Resource>(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !R::delete(&state.pool, id).await? {
        return Err(not_found::<R>(id));
    }

    tracing::info!(
        entity = R::ENTITY,
        id,
        user_id = admin.user_id,
        "Content deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}
