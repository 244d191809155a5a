//! Handlers for the `/companies/{company_id}/shows` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use slate_core::error::CoreError;
use slate_core::types::DbId;
use slate_db::models::show::{CreateShow, Show};
use slate_db::repositories::ShowRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a live show owned by `company_id`, or 404.
///
/// Every scene handler goes through this so scenes are never read or
/// written across companies.
pub async fn ensure_show(
    pool: &slate_db::DbPool,
    company_id: DbId,
    show_id: DbId,
) -> AppResult<Show> {
    ShowRepo::find_for_company(pool, company_id, show_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Show",
            id: show_id,
        }))
}

/// POST /api/v1/companies/{company_id}/shows
///
/// Overrides `input.company_id` with the value from the URL path.
pub async fn create(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
    Json(mut input): Json<CreateShow>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be blank".to_string(),
        )));
    }
    input.company_id = company_id;

    let show = ShowRepo::create(&state.pool, &input).await?;

    tracing::info!(show_id = show.id, company_id, "Show created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: show })))
}

/// GET /api/v1/companies/{company_id}/shows
pub async fn list_by_company(
    State(state): State<AppState>,
    Path(company_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let shows = ShowRepo::list_by_company(&state.pool, company_id).await?;
    Ok(Json(DataResponse { data: shows }))
}

/// GET /api/v1/companies/{company_id}/shows/{show_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((company_id, show_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let show = ensure_show(&state.pool, company_id, show_id).await?;
    Ok(Json(DataResponse { data: show }))
}
