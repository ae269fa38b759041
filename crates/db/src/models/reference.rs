//! Reference data rows: categories, locations, and the condition enumeration.

use assetdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `asset_categories` table. Created lazily on first use.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `locations` table. Created lazily on first use.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `conditions` table.
///
/// `generates_fault` marks degraded conditions: entering one requires a
/// fault description.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Condition {
    pub id: DbId,
    pub name: String,
    pub generates_fault: bool,
    pub created_at: Timestamp,
}
