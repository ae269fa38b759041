//! History ledger rows: movements and faults. Both are append-only; a
//! fault additionally flips to resolved exactly once.

use assetdesk_core::types::{AssetId, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movements` table, written when an edit changes an
/// asset's location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovementRecord {
    pub id: DbId,
    pub asset_id: AssetId,
    pub previous_location_id: DbId,
    pub new_location_id: DbId,
    pub moved_at: Timestamp,
}

/// A row from the `faults` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FaultRecord {
    pub id: DbId,
    pub asset_id: AssetId,
    pub description: String,
    pub reported_at: Timestamp,
    pub resolved: bool,
    pub resolved_at: Option<Timestamp>,
    pub resolution_description: Option<String>,
}

/// Payload for resolving a fault.
#[derive(Debug, Deserialize)]
pub struct ResolveFault {
    pub resolution_description: String,
    /// Defaults to now when omitted.
    pub resolved_at: Option<Timestamp>,
}

/// Payload for reporting a fault against every asset in a lot.
#[derive(Debug, Deserialize)]
pub struct ReportLotFault {
    pub description: String,
}

/// Outcome of a lot-wide fault report. The operation is best-effort,
/// not atomic: some inserts may succeed while others fail.
#[derive(Debug, Serialize)]
pub struct LotFaultReport {
    pub lot_id: DbId,
    pub succeeded: i64,
    pub failed: i64,
}
