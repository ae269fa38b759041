//! Repository for the canonical asset rows.
//!
//! Single-asset edits commit through [`AssetRepo::apply_transition`], which
//! writes the staged history records and the asset row in one transaction.

use sqlx::PgPool;

use assetdesk_core::lifecycle::TransitionPlan;
use assetdesk_core::types::{AssetId, DbId, Timestamp};

use crate::models::asset::{Asset, AssetWithNames};

/// Column list for `assets` queries.
const ASSET_COLUMNS: &str = "\
    id, name, category_id, location_id, condition_id, lot_id, \
    row_version, created_at, last_verified_at";

/// Column list for joined asset queries (reference names included).
const ASSET_JOINED_COLUMNS: &str = "\
    a.id, a.name, a.category_id, a.location_id, a.condition_id, a.lot_id, \
    a.row_version, a.created_at, a.last_verified_at, \
    c.name AS category_name, \
    l.name AS location_name, \
    co.name AS condition_name, \
    co.generates_fault AS condition_generates_fault";

/// Shared JOIN clause resolving reference names.
const ASSET_JOINS: &str = "\
    JOIN asset_categories c ON c.id = a.category_id \
    JOIN locations l ON l.id = a.location_id \
    JOIN conditions co ON co.id = a.condition_id";

/// Provides CRUD and lifecycle-commit operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Register a single asset, together with its initial fault record when
    /// a description is given, as one transaction.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        category_id: DbId,
        location_id: DbId,
        condition_id: DbId,
        created_at: Option<Timestamp>,
        fault_description: Option<&str>,
    ) -> Result<Asset, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO assets (name, category_id, location_id, condition_id, created_at) \
             VALUES ($1, $2, $3, $4, COALESCE($5, now())) \
             RETURNING {ASSET_COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(name)
            .bind(category_id)
            .bind(location_id)
            .bind(condition_id)
            .bind(created_at)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(description) = fault_description {
            sqlx::query("INSERT INTO faults (asset_id, description) VALUES ($1, $2)")
                .bind(asset.id)
                .bind(description)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(asset)
    }

    /// Find an asset by id.
    pub async fn find_by_id(pool: &PgPool, id: AssetId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an asset by id with reference names joined in.
    pub async fn find_with_names(
        pool: &PgPool,
        id: AssetId,
    ) -> Result<Option<AssetWithNames>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSET_JOINED_COLUMNS} FROM assets a {ASSET_JOINS} WHERE a.id = $1"
        );
        sqlx::query_as::<_, AssetWithNames>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all assets with reference names, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AssetWithNames>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSET_JOINED_COLUMNS} FROM assets a {ASSET_JOINS} \
             ORDER BY a.created_at DESC, a.name"
        );
        sqlx::query_as::<_, AssetWithNames>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the assets linked to a lot, in unit order.
    pub async fn list_by_lot(
        pool: &PgPool,
        lot_id: DbId,
    ) -> Result<Vec<AssetWithNames>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSET_JOINED_COLUMNS} FROM assets a {ASSET_JOINS} \
             WHERE a.lot_id = $1 ORDER BY a.name"
        );
        sqlx::query_as::<_, AssetWithNames>(&query)
            .bind(lot_id)
            .fetch_all(pool)
            .await
    }

    /// Commit a planned transition: staged movement, staged fault, then the
    /// asset row itself, all in one transaction. The history rows are written
    /// first so the canonical row update is the last statement.
    ///
    /// When `expected_version` is given the update only matches if the stored
    /// `row_version` still equals it; otherwise zero rows match, the
    /// transaction rolls back, and `Ok(None)` is returned. Since the caller
    /// fetched the snapshot moments ago, `None` means a concurrent edit won.
    pub async fn apply_transition(
        pool: &PgPool,
        id: AssetId,
        plan: &TransitionPlan,
        expected_version: Option<i64>,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(movement) = plan.movement {
            sqlx::query(
                "INSERT INTO movements (asset_id, previous_location_id, new_location_id) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(movement.previous_location_id)
            .bind(movement.new_location_id)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(ref description) = plan.fault_description {
            sqlx::query("INSERT INTO faults (asset_id, description) VALUES ($1, $2)")
                .bind(id)
                .bind(description)
                .execute(&mut *tx)
                .await?;
        }

        let query = format!(
            "UPDATE assets SET \
                name = $2, \
                category_id = $3, \
                location_id = $4, \
                condition_id = $5, \
                last_verified_at = now(), \
                row_version = row_version + 1 \
             WHERE id = $1 AND ($6::bigint IS NULL OR row_version = $6) \
             RETURNING {ASSET_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(&plan.name)
            .bind(plan.category_id)
            .bind(plan.location_id)
            .bind(plan.condition_id)
            .bind(expected_version)
            .fetch_optional(&mut *tx)
            .await?;

        match updated {
            Some(asset) => {
                tx.commit().await?;
                Ok(Some(asset))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Delete an asset by id. Movement and fault history cascade with it.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: AssetId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
