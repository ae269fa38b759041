//! Handlers for the asset lifecycle.
//!
//! `update_asset` is the transition engine's orchestration point: it takes a
//! fresh snapshot, resolves free-text references, plans the transition in
//! `assetdesk_core`, and commits the plan as one unit of work.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveTime;

use assetdesk_core::error::CoreError;
use assetdesk_core::lifecycle::{plan_transition, ProposedTransition, StoredState};
use assetdesk_core::types::AssetId;
use assetdesk_db::models::asset::{CreateAsset, UpdateAsset};
use assetdesk_db::repositories::{AssetRepo, FaultRepo, MovementRepo, ReferenceRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::require_text;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/assets
///
/// List all assets with their reference names.
pub async fn list_assets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let assets = AssetRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: assets }))
}

/// POST /api/v1/assets
///
/// Register a single asset. When the chosen condition generates faults, a
/// description is required and the initial fault record is created together
/// with the asset.
pub async fn create_asset(
    State(state): State<AppState>,
    Json(input): Json<CreateAsset>,
) -> AppResult<impl IntoResponse> {
    let name = require_text("name", &input.name)?;
    let category_name = require_text("category_name", &input.category_name)?;
    let location_name = require_text("location_name", &input.location_name)?;

    let condition = ReferenceRepo::find_condition(&state.pool, input.condition_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown condition id {}", input.condition_id)))?;

    let fault_description = input
        .fault_description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    if condition.generates_fault && fault_description.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "A fault description is required when registering an asset in a fault-generating condition"
                .into(),
        )));
    }

    let category_id = ReferenceRepo::resolve_category(&state.pool, &category_name).await?;
    let location_id = ReferenceRepo::resolve_location(&state.pool, &location_name).await?;

    let created_at = input
        .acquired_at
        .map(|date| date.and_time(NaiveTime::MIN).and_utc());

    let asset = AssetRepo::create(
        &state.pool,
        &name,
        category_id,
        location_id,
        condition.id,
        created_at,
        condition.generates_fault.then_some(fault_description).flatten(),
    )
    .await?;

    tracing::info!(
        asset_id = %asset.id,
        name = %asset.name,
        fault_reported = condition.generates_fault,
        "Asset registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// GET /api/v1/assets/{id}
///
/// Get full asset detail: joined reference names plus movement and fault
/// history, both newest first.
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::find_with_names(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Asset", id)))?;

    let movements = MovementRepo::list_for_asset(&state.pool, id).await?;
    let faults = FaultRepo::list_for_asset(&state.pool, id).await?;

    let detail = serde_json::json!({
        "asset": asset,
        "movements": movements,
        "faults": faults,
    });

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/assets/{id}
///
/// Apply a lifecycle edit to one asset. Location changes produce a movement
/// record; entering a fault-generating condition requires a description and
/// produces a fault record; a no-op edit still bumps `last_verified_at`.
pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
    Json(input): Json<UpdateAsset>,
) -> AppResult<impl IntoResponse> {
    // Fresh snapshot immediately before planning.
    let current = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Asset", id)))?;

    let condition = ReferenceRepo::find_condition(&state.pool, input.condition_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown condition id {}", input.condition_id)))?;

    let category_name = require_text("category_name", &input.category_name)?;
    let location_name = require_text("location_name", &input.location_name)?;

    let category_id = ReferenceRepo::resolve_category(&state.pool, &category_name).await?;
    let location_id = ReferenceRepo::resolve_location(&state.pool, &location_name).await?;

    let plan = plan_transition(
        StoredState {
            location_id: current.location_id,
            condition_id: current.condition_id,
        },
        ProposedTransition {
            name: input.name,
            category_id,
            location_id,
            condition_id: condition.id,
            condition_generates_fault: condition.generates_fault,
            fault_description: input.fault_description,
        },
    )?;

    let updated = AssetRepo::apply_transition(&state.pool, id, &plan, input.expected_version)
        .await?;

    let Some(asset) = updated else {
        // The snapshot existed moments ago, so a vanished row means either a
        // concurrent delete or a version-token mismatch.
        return Err(if input.expected_version.is_some() {
            AppError::Core(CoreError::Conflict(
                "Asset was modified by another session; reload and retry".into(),
            ))
        } else {
            AppError::Core(CoreError::not_found("Asset", id))
        });
    };

    tracing::info!(
        asset_id = %id,
        moved = plan.movement.is_some(),
        fault_reported = plan.fault_description.is_some(),
        "Asset updated",
    );

    Ok(Json(DataResponse { data: asset }))
}

/// DELETE /api/v1/assets/{id}
///
/// Hard-delete an asset; its movement and fault history cascades with it.
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<AssetId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AssetRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Asset", id)));
    }

    tracing::info!(asset_id = %id, "Asset deleted");

    Ok(StatusCode::NO_CONTENT)
}
