//! Repository for lots and their batch intake.

use chrono::NaiveDate;
use sqlx::PgPool;

use assetdesk_core::types::DbId;

use crate::models::asset::Asset;
use crate::models::lot::{Lot, LotWithCount};

/// Column list for `lots` queries.
const LOT_COLUMNS: &str = "\
    id, supplier_name, purchase_date, declared_quantity, created_at, updated_at";

/// Column list for plain asset rows inserted by the expander.
const ASSET_COLUMNS: &str = "\
    id, name, category_id, location_id, condition_id, lot_id, \
    row_version, created_at, last_verified_at";

/// Provides intake and listing operations for lots.
pub struct LotRepo;

impl LotRepo {
    /// Create a lot and its expanded asset rows in one transaction.
    ///
    /// `unit_names` carries one pre-computed name per unit. Every asset
    /// shares the same category, location, condition, and lot id, with
    /// `created_at` pinned to the purchase date. When a shared fault
    /// description is given, one unresolved fault row is written per asset.
    /// Any failure rolls the whole intake back; no partial lot survives.
    pub async fn create_with_assets(
        pool: &PgPool,
        supplier_name: Option<&str>,
        purchase_date: NaiveDate,
        declared_quantity: i32,
        unit_names: &[String],
        category_id: DbId,
        location_id: DbId,
        condition_id: DbId,
        shared_fault_description: Option<&str>,
    ) -> Result<(Lot, Vec<Asset>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lot_query = format!(
            "INSERT INTO lots (supplier_name, purchase_date, declared_quantity) \
             VALUES ($1, $2, $3) \
             RETURNING {LOT_COLUMNS}"
        );
        let lot = sqlx::query_as::<_, Lot>(&lot_query)
            .bind(supplier_name)
            .bind(purchase_date)
            .bind(declared_quantity)
            .fetch_one(&mut *tx)
            .await?;

        let created_at = purchase_date.and_time(chrono::NaiveTime::MIN).and_utc();

        let asset_query = format!(
            "INSERT INTO assets \
                (name, category_id, location_id, condition_id, lot_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ASSET_COLUMNS}"
        );
        let mut assets = Vec::with_capacity(unit_names.len());
        for name in unit_names {
            let asset = sqlx::query_as::<_, Asset>(&asset_query)
                .bind(name)
                .bind(category_id)
                .bind(location_id)
                .bind(condition_id)
                .bind(lot.id)
                .bind(created_at)
                .fetch_one(&mut *tx)
                .await?;
            assets.push(asset);
        }

        if let Some(description) = shared_fault_description {
            for asset in &assets {
                sqlx::query("INSERT INTO faults (asset_id, description) VALUES ($1, $2)")
                    .bind(asset.id)
                    .bind(description)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        tracing::debug!(
            lot_id = lot.id,
            assets = assets.len(),
            "Lot intake committed"
        );
        Ok((lot, assets))
    }

    /// Find a lot by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lot>, sqlx::Error> {
        let query = format!("SELECT {LOT_COLUMNS} FROM lots WHERE id = $1");
        sqlx::query_as::<_, Lot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all lots with their live asset counts, newest purchase first.
    ///
    /// `declared_quantity` and `asset_count` are two independently observable
    /// numbers: they match at intake and drift as assets are deleted.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<LotWithCount>, sqlx::Error> {
        sqlx::query_as::<_, LotWithCount>(
            "SELECT \
                l.id, l.supplier_name, l.purchase_date, l.declared_quantity, \
                l.created_at, l.updated_at, \
                COUNT(a.id) AS asset_count \
             FROM lots l \
             LEFT JOIN assets a ON a.lot_id = l.id \
             GROUP BY l.id \
             ORDER BY l.purchase_date DESC, l.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete a lot by id. Its assets, and their history, cascade with it.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
