//! Handlers for lot intake and lot-scoped bulk operations.
//!
//! `create_lot` is the batch expander: one validated spec fans out into a
//! lot row, N named asset rows, and (when required) N shared fault records,
//! committed together. `report_lot_fault` is deliberately best-effort.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use assetdesk_core::error::CoreError;
use assetdesk_core::lot::{expand_unit_names, lot_fault_description, validate_lot_spec};
use assetdesk_core::types::DbId;
use assetdesk_db::models::history::{LotFaultReport, ReportLotFault};
use assetdesk_db::models::lot::CreateLot;
use assetdesk_db::repositories::{AssetRepo, FaultRepo, LotRepo, ReferenceRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::require_text;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/lots
///
/// List all lots with their declared and actual asset counts. The two
/// numbers match at intake and drift as assets are individually deleted;
/// they are surfaced side by side, never reconciled.
pub async fn list_lots(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let lots = LotRepo::list_with_counts(&state.pool).await?;

    Ok(Json(DataResponse { data: lots }))
}

/// POST /api/v1/lots
///
/// Batch intake: create a lot and expand it into `quantity` assets named
/// `"{base_name} {i}/{quantity}"`, all sharing one category, location,
/// condition, and lot id. A fault-generating condition requires a shared
/// description, recorded once per unit.
pub async fn create_lot(
    State(state): State<AppState>,
    Json(input): Json<CreateLot>,
) -> AppResult<impl IntoResponse> {
    let condition = ReferenceRepo::find_condition(&state.pool, input.condition_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown condition id {}", input.condition_id)))?;

    validate_lot_spec(
        &input.base_name,
        input.quantity,
        condition.generates_fault,
        input.fault_description.as_deref(),
    )?;
    let category_name = require_text("category_name", &input.category_name)?;
    let location_name = require_text("location_name", &input.location_name)?;

    // One resolution shared across all N assets, not N resolutions.
    let category_id = ReferenceRepo::resolve_category(&state.pool, &category_name).await?;
    let location_id = ReferenceRepo::resolve_location(&state.pool, &location_name).await?;

    let unit_names = expand_unit_names(&input.base_name, input.quantity as u32);

    let shared_fault_description = condition
        .generates_fault
        .then(|| input.fault_description.as_deref().map(str::trim))
        .flatten();

    let (lot, assets) = LotRepo::create_with_assets(
        &state.pool,
        input.supplier_name.as_deref(),
        input.purchase_date,
        input.quantity,
        &unit_names,
        category_id,
        location_id,
        condition.id,
        shared_fault_description,
    )
    .await?;

    tracing::info!(
        lot_id = lot.id,
        quantity = assets.len(),
        faults_reported = shared_fault_description.is_some(),
        "Lot created",
    );

    let payload = serde_json::json!({
        "lot": lot,
        "assets": assets,
    });

    Ok((StatusCode::CREATED, Json(DataResponse { data: payload })))
}

/// GET /api/v1/lots/{id}
///
/// Lot detail plus the assets still linked to it.
pub async fn get_lot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lot = LotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Lot", id)))?;

    let assets = AssetRepo::list_by_lot(&state.pool, id).await?;

    let detail = serde_json::json!({
        "lot": lot,
        "assets": assets,
        "asset_count": assets.len(),
    });

    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/lots/{id}
///
/// Delete a lot; its assets, and their history, cascade with it.
pub async fn delete_lot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = LotRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Lot", id)));
    }

    tracing::info!(lot_id = id, "Lot deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/lots/{id}/faults
///
/// Report one fault per asset currently linked to the lot, all carrying the
/// same batch-tagged description. Best-effort by design: per-asset insert
/// failures are counted and reported, not rolled back.
pub async fn report_lot_fault(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReportLotFault>,
) -> AppResult<impl IntoResponse> {
    let description = require_text("description", &input.description)?;

    if LotRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::not_found("Lot", id)));
    }

    let assets = AssetRepo::list_by_lot(&state.pool, id).await?;
    let asset_ids: Vec<_> = assets.iter().map(|a| a.id).collect();
    let tagged = lot_fault_description(&description);

    let (succeeded, failed) =
        FaultRepo::create_for_each(&state.pool, &asset_ids, &tagged).await;

    tracing::info!(lot_id = id, succeeded, failed, "Lot-wide fault reported");

    Ok(Json(DataResponse {
        data: LotFaultReport {
            lot_id: id,
            succeeded,
            failed,
        },
    }))
}
