//! Lot rows and batch-intake DTOs.

use assetdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `lots` table. Immutable after creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lot {
    pub id: DbId,
    pub supplier_name: Option<String>,
    pub purchase_date: NaiveDate,
    /// Quantity recorded at intake. Deliberately independent of the live
    /// count of linked assets, which may drift as assets are deleted.
    pub declared_quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A lot with the live count of assets still linked to it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LotWithCount {
    pub id: DbId,
    pub supplier_name: Option<String>,
    pub purchase_date: NaiveDate,
    pub declared_quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Actual number of linked assets ("declared vs actual").
    pub asset_count: i64,
}

/// Payload for batch intake: one lot expanded into `quantity` assets.
#[derive(Debug, Deserialize)]
pub struct CreateLot {
    pub base_name: String,
    pub quantity: i32,
    pub supplier_name: Option<String>,
    pub purchase_date: NaiveDate,
    pub category_name: String,
    pub location_name: String,
    pub condition_id: DbId,
    /// Shared across all units; required when the condition generates faults.
    pub fault_description: Option<String>,
}
