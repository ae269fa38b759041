//! Repository for the fault log.
//!
//! Fault rows are append-only except for the single unresolved→resolved
//! transition, which is guarded at the SQL level.

use sqlx::PgPool;

use assetdesk_core::types::{AssetId, DbId, Timestamp};

use crate::models::history::FaultRecord;

/// Column list for `faults` queries.
const FAULT_COLUMNS: &str = "\
    id, asset_id, description, reported_at, \
    resolved, resolved_at, resolution_description";

/// Provides create, read, and resolve operations for fault records.
pub struct FaultRepo;

impl FaultRepo {
    /// Report a new, unresolved fault against an asset.
    pub async fn create(
        pool: &PgPool,
        asset_id: AssetId,
        description: &str,
    ) -> Result<FaultRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO faults (asset_id, description) VALUES ($1, $2) \
             RETURNING {FAULT_COLUMNS}"
        );
        sqlx::query_as::<_, FaultRecord>(&query)
            .bind(asset_id)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    /// Report the same fault against each listed asset, best-effort.
    ///
    /// Individual insert failures are counted and logged, never propagated,
    /// so some rows may land while others fail. Returns the
    /// `(succeeded, failed)` split.
    pub async fn create_for_each(
        pool: &PgPool,
        asset_ids: &[AssetId],
        description: &str,
    ) -> (i64, i64) {
        let mut succeeded = 0_i64;
        let mut failed = 0_i64;
        for &asset_id in asset_ids {
            match Self::create(pool, asset_id, description).await {
                Ok(_) => succeeded += 1,
                Err(err) => {
                    failed += 1;
                    tracing::warn!(%asset_id, error = %err, "Fault insert failed for asset");
                }
            }
        }
        (succeeded, failed)
    }

    /// Find a fault by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FaultRecord>, sqlx::Error> {
        let query = format!("SELECT {FAULT_COLUMNS} FROM faults WHERE id = $1");
        sqlx::query_as::<_, FaultRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an asset's faults, newest first.
    pub async fn list_for_asset(
        pool: &PgPool,
        asset_id: AssetId,
    ) -> Result<Vec<FaultRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {FAULT_COLUMNS} FROM faults \
             WHERE asset_id = $1 ORDER BY reported_at DESC, id DESC"
        );
        sqlx::query_as::<_, FaultRecord>(&query)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a fault resolved. Only matches while the fault is still
    /// unresolved, so a second resolution returns `Ok(None)` and the first
    /// outcome is preserved untouched.
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        resolution_description: &str,
        resolved_at: Option<Timestamp>,
    ) -> Result<Option<FaultRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE faults SET \
                resolved = TRUE, \
                resolved_at = COALESCE($2, now()), \
                resolution_description = $3 \
             WHERE id = $1 AND resolved = FALSE \
             RETURNING {FAULT_COLUMNS}"
        );
        sqlx::query_as::<_, FaultRecord>(&query)
            .bind(id)
            .bind(resolved_at)
            .bind(resolution_description)
            .fetch_optional(pool)
            .await
    }
}
