//! Handlers for fault resolution.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use assetdesk_core::error::CoreError;
use assetdesk_core::types::DbId;
use assetdesk_db::models::history::ResolveFault;
use assetdesk_db::repositories::FaultRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::require_text;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/faults/{id}/resolve
///
/// Transition a fault from unresolved to resolved. Re-resolving is rejected
/// (not silently ignored) and the first resolution is preserved unchanged.
/// The parent asset's condition is untouched; restoring it is a separate
/// asset edit.
pub async fn resolve_fault(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResolveFault>,
) -> AppResult<impl IntoResponse> {
    let resolution = require_text("resolution_description", &input.resolution_description)?;

    let resolved = FaultRepo::resolve(&state.pool, id, &resolution, input.resolved_at).await?;

    let Some(fault) = resolved else {
        // Distinguish a missing fault from one already resolved.
        return Err(match FaultRepo::find_by_id(&state.pool, id).await? {
            Some(_) => AppError::Core(CoreError::Validation(format!(
                "Fault {id} is already resolved"
            ))),
            None => AppError::Core(CoreError::not_found("Fault", id)),
        });
    };

    tracing::info!(fault_id = id, asset_id = %fault.asset_id, "Fault resolved");

    Ok(Json(DataResponse { data: fault }))
}
