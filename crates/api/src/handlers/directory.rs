//! Entity-specific lookups that sit beside the generic CRUD routes.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use jambakan_core::content::OrgSection;
use jambakan_db::repositories::{DemographicRepo, StrukturRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/struktur/section/{section}
///
/// Members of one organisational section in display order.
pub async fn list_struktur_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> AppResult<impl IntoResponse> {
    let section = OrgSection::from_name(&section)?;
    let members = StrukturRepo::list_by_section(&state.pool, section).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/demographics/year/{year}
pub async fn get_demographics_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let record = DemographicRepo::find_by_year(&state.pool, year)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No demographic record for year {year}")))?;
    Ok(Json(DataResponse { data: record }))
}
