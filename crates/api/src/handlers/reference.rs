//! Handlers for reference data lookups (UI dropdown feeds).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use assetdesk_db::repositories::ReferenceRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/conditions
pub async fn list_conditions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let conditions = ReferenceRepo::list_conditions(&state.pool).await?;

    Ok(Json(DataResponse { data: conditions }))
}

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = ReferenceRepo::list_categories(&state.pool).await?;

    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/locations
pub async fn list_locations(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let locations = ReferenceRepo::list_locations(&state.pool).await?;

    Ok(Json(DataResponse { data: locations }))
}
