//! Asset rows and edit DTOs.

use assetdesk_core::types::{AssetId, DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub category_id: DbId,
    pub location_id: DbId,
    pub condition_id: DbId,
    pub lot_id: Option<DbId>,
    /// Optimistic-concurrency token, bumped on every accepted edit.
    pub row_version: i64,
    pub created_at: Timestamp,
    pub last_verified_at: Timestamp,
}

/// An asset with its reference names joined in, for list and detail views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetWithNames {
    pub id: AssetId,
    pub name: String,
    pub category_id: DbId,
    pub location_id: DbId,
    pub condition_id: DbId,
    pub lot_id: Option<DbId>,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub last_verified_at: Timestamp,
    pub category_name: String,
    pub location_name: String,
    pub condition_name: String,
    pub condition_generates_fault: bool,
}

/// Payload for registering a single asset.
#[derive(Debug, Deserialize)]
pub struct CreateAsset {
    pub name: String,
    /// Free-text category name, resolved (or created) by name.
    pub category_name: String,
    /// Free-text location name, resolved (or created) by name.
    pub location_name: String,
    pub condition_id: DbId,
    /// Acquisition date; defaults to now when omitted.
    pub acquired_at: Option<NaiveDate>,
    /// Required when the chosen condition generates faults.
    pub fault_description: Option<String>,
}

/// Payload for editing an asset's mutable fields.
#[derive(Debug, Deserialize)]
pub struct UpdateAsset {
    pub name: String,
    pub category_name: String,
    pub location_name: String,
    pub condition_id: DbId,
    /// Required when the edit moves the asset into a fault-generating
    /// condition; ignored otherwise.
    pub fault_description: Option<String>,
    /// When supplied, the edit is rejected with a conflict if the stored
    /// `row_version` no longer matches (somebody else saved first).
    pub expected_version: Option<i64>,
}
