//! Repository for the movement log. Movements are written by
//! `AssetRepo::apply_transition`; this repo only reads them back.

use sqlx::PgPool;

use assetdesk_core::types::AssetId;

use crate::models::history::MovementRecord;

/// Column list for `movements` queries.
const MOVEMENT_COLUMNS: &str = "\
    id, asset_id, previous_location_id, new_location_id, moved_at";

/// Read access to the append-only movement log.
pub struct MovementRepo;

impl MovementRepo {
    /// List an asset's movements, newest first.
    pub async fn list_for_asset(
        pool: &PgPool,
        asset_id: AssetId,
    ) -> Result<Vec<MovementRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {MOVEMENT_COLUMNS} FROM movements \
             WHERE asset_id = $1 ORDER BY moved_at DESC, id DESC"
        );
        sqlx::query_as::<_, MovementRecord>(&query)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }
}
