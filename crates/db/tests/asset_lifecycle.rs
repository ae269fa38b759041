//! Integration tests for the single-asset transition engine.
//!
//! Exercises the repository layer against a real database:
//! - movement records derived from location changes (and only those)
//! - fault records derived from entering fault-generating conditions
//! - verification-without-change edits
//! - optimistic-concurrency token handling
//! - cascade deletion of history

use assert_matches::assert_matches;
use sqlx::PgPool;

use assetdesk_core::lifecycle::{plan_transition, ProposedTransition, StoredState};
use assetdesk_core::types::DbId;
use assetdesk_db::models::asset::Asset;
use assetdesk_db::repositories::{AssetRepo, FaultRepo, MovementRepo, ReferenceRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn condition_id(pool: &PgPool, name: &str) -> DbId {
    ReferenceRepo::list_conditions(pool)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == name)
        .unwrap()
        .id
}

/// Register a "Good" asset at the given location and return it.
async fn seed_asset(pool: &PgPool, name: &str, location: &str) -> Asset {
    let category = ReferenceRepo::resolve_category(pool, "IT Equipment")
        .await
        .unwrap();
    let location = ReferenceRepo::resolve_location(pool, location).await.unwrap();
    let good = condition_id(pool, "Good").await;

    AssetRepo::create(pool, name, category, location, good, None, None)
        .await
        .unwrap()
}

/// A proposal that re-states the asset's current values verbatim.
fn identity_proposal(asset: &Asset) -> ProposedTransition {
    ProposedTransition {
        name: asset.name.clone(),
        category_id: asset.category_id,
        location_id: asset.location_id,
        condition_id: asset.condition_id,
        condition_generates_fault: false,
        fault_description: None,
    }
}

fn stored_state(asset: &Asset) -> StoredState {
    StoredState {
        location_id: asset.location_id,
        condition_id: asset.condition_id,
    }
}

// ---------------------------------------------------------------------------
// Movement derivation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn unchanged_location_creates_no_movement(pool: PgPool) {
    let asset = seed_asset(&pool, "Notebook Dell", "Room 402").await;

    let plan = plan_transition(stored_state(&asset), identity_proposal(&asset)).unwrap();
    AssetRepo::apply_transition(&pool, asset.id, &plan, None)
        .await
        .unwrap()
        .unwrap();

    let movements = MovementRepo::list_for_asset(&pool, asset.id).await.unwrap();
    assert!(movements.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn changed_location_creates_exactly_one_movement(pool: PgPool) {
    let asset = seed_asset(&pool, "Notebook Dell", "Room 402").await;
    let new_location = ReferenceRepo::resolve_location(&pool, "Storage B")
        .await
        .unwrap();

    let plan = plan_transition(
        stored_state(&asset),
        ProposedTransition {
            location_id: new_location,
            ..identity_proposal(&asset)
        },
    )
    .unwrap();
    let updated = AssetRepo::apply_transition(&pool, asset.id, &plan, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.location_id, new_location);

    let movements = MovementRepo::list_for_asset(&pool, asset.id).await.unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].previous_location_id, asset.location_id);
    assert_eq!(movements[0].new_location_id, new_location);
}

// ---------------------------------------------------------------------------
// Fault derivation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn rejected_transition_leaves_the_row_unchanged(pool: PgPool) {
    let asset = seed_asset(&pool, "Notebook Dell", "Room 402").await;
    let poor = condition_id(&pool, "Poor").await;

    // Entering a fault-generating condition without a description fails at
    // the planning stage, before any write.
    let err = plan_transition(
        stored_state(&asset),
        ProposedTransition {
            condition_id: poor,
            condition_generates_fault: true,
            ..identity_proposal(&asset)
        },
    )
    .unwrap_err();
    assert_matches!(err, assetdesk_core::error::CoreError::Validation(_));

    let stored = AssetRepo::find_by_id(&pool, asset.id).await.unwrap().unwrap();
    assert_eq!(stored.name, asset.name);
    assert_eq!(stored.location_id, asset.location_id);
    assert_eq!(stored.condition_id, asset.condition_id);
    assert_eq!(stored.last_verified_at, asset.last_verified_at);
    assert_eq!(stored.row_version, asset.row_version);
}

#[sqlx::test(migrations = "../../migrations")]
async fn fault_transition_creates_one_unresolved_fault(pool: PgPool) {
    let asset = seed_asset(&pool, "Notebook Dell", "Room 402").await;
    let poor = condition_id(&pool, "Poor").await;

    let plan = plan_transition(
        stored_state(&asset),
        ProposedTransition {
            condition_id: poor,
            condition_generates_fault: true,
            fault_description: Some("keyboard missing keys".into()),
            ..identity_proposal(&asset)
        },
    )
    .unwrap();
    let updated = AssetRepo::apply_transition(&pool, asset.id, &plan, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.condition_id, poor);
    assert!(updated.last_verified_at >= asset.last_verified_at);
    assert_eq!(updated.row_version, asset.row_version + 1);

    let faults = FaultRepo::list_for_asset(&pool, asset.id).await.unwrap();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].description, "keyboard missing keys");
    assert!(!faults[0].resolved);
    assert!(faults[0].resolved_at.is_none());
}

// ---------------------------------------------------------------------------
// Verification without change
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn noop_edit_still_bumps_last_verified_at(pool: PgPool) {
    let asset = seed_asset(&pool, "Notebook Dell", "Room 402").await;

    let plan = plan_transition(stored_state(&asset), identity_proposal(&asset)).unwrap();
    let updated = AssetRepo::apply_transition(&pool, asset.id, &plan, None)
        .await
        .unwrap()
        .unwrap();

    // "I checked, nothing changed" is an accepted edit.
    assert_eq!(updated.row_version, asset.row_version + 1);
    assert!(updated.last_verified_at >= asset.last_verified_at);
    assert!(MovementRepo::list_for_asset(&pool, asset.id)
        .await
        .unwrap()
        .is_empty());
    assert!(FaultRepo::list_for_asset(&pool, asset.id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Optimistic concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn stale_version_token_rolls_the_whole_transition_back(pool: PgPool) {
    let asset = seed_asset(&pool, "Notebook Dell", "Room 402").await;
    let new_location = ReferenceRepo::resolve_location(&pool, "Storage B")
        .await
        .unwrap();

    let plan = plan_transition(
        stored_state(&asset),
        ProposedTransition {
            location_id: new_location,
            ..identity_proposal(&asset)
        },
    )
    .unwrap();

    let stale = asset.row_version + 7;
    let result = AssetRepo::apply_transition(&pool, asset.id, &plan, Some(stale))
        .await
        .unwrap();
    assert!(result.is_none());

    // The staged movement must not survive the rollback.
    let movements = MovementRepo::list_for_asset(&pool, asset.id).await.unwrap();
    assert!(movements.is_empty());
    let stored = AssetRepo::find_by_id(&pool, asset.id).await.unwrap().unwrap();
    assert_eq!(stored.location_id, asset.location_id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn matching_version_token_is_accepted(pool: PgPool) {
    let asset = seed_asset(&pool, "Notebook Dell", "Room 402").await;

    let plan = plan_transition(stored_state(&asset), identity_proposal(&asset)).unwrap();
    let updated = AssetRepo::apply_transition(&pool, asset.id, &plan, Some(asset.row_version))
        .await
        .unwrap();
    assert!(updated.is_some());
}

// ---------------------------------------------------------------------------
// The end-to-end scenario: move + degrade in one edit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn move_and_degrade_in_one_edit(pool: PgPool) {
    // Asset at Location A, condition Good.
    let asset = seed_asset(&pool, "Tablet Samsung", "Location A").await;
    let location_b = ReferenceRepo::resolve_location(&pool, "Location B")
        .await
        .unwrap();
    let poor = condition_id(&pool, "Poor").await;

    let plan = plan_transition(
        stored_state(&asset),
        ProposedTransition {
            location_id: location_b,
            condition_id: poor,
            condition_generates_fault: true,
            fault_description: Some("cracked screen".into()),
            ..identity_proposal(&asset)
        },
    )
    .unwrap();
    let updated = AssetRepo::apply_transition(&pool, asset.id, &plan, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.location_id, location_b);
    assert_eq!(updated.condition_id, poor);

    let movements = MovementRepo::list_for_asset(&pool, asset.id).await.unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].previous_location_id, asset.location_id);
    assert_eq!(movements[0].new_location_id, location_b);

    let faults = FaultRepo::list_for_asset(&pool, asset.id).await.unwrap();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].description, "cracked screen");
    assert!(!faults[0].resolved);
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn deleting_an_asset_cascades_its_history(pool: PgPool) {
    let asset = seed_asset(&pool, "Notebook Dell", "Room 402").await;
    let fault = FaultRepo::create(&pool, asset.id, "loose hinge").await.unwrap();

    assert!(AssetRepo::delete(&pool, asset.id).await.unwrap());
    assert!(AssetRepo::find_by_id(&pool, asset.id).await.unwrap().is_none());
    assert!(FaultRepo::find_by_id(&pool, fault.id).await.unwrap().is_none());

    // Second delete is a no-op.
    assert!(!AssetRepo::delete(&pool, asset.id).await.unwrap());
}
