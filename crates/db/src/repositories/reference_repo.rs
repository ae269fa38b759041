//! Repository for reference data: categories, locations, conditions.
//!
//! Categories and locations use get-or-create-by-name semantics: free text
//! from the UI is resolved to a stable id, creating the row on first use.

use sqlx::PgPool;

use assetdesk_core::types::DbId;

use crate::models::reference::{Category, Condition, Location};

/// Column list for `asset_categories` / `locations` queries.
const NAMED_COLUMNS: &str = "id, name, created_at, updated_at";

/// Column list for `conditions` queries.
const CONDITION_COLUMNS: &str = "id, name, generates_fault, created_at";

/// Resolves free-text reference names to stable ids.
pub struct ReferenceRepo;

impl ReferenceRepo {
    /// Resolve a category name to its id, creating the row on first use.
    ///
    /// The name match is exact (case-sensitive, as stored). A concurrent
    /// first use can win the insert race; the unique constraint turns our
    /// insert into a no-op and the existing row is re-read.
    pub async fn resolve_category(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        Self::resolve(pool, "asset_categories", name).await
    }

    /// Resolve a location name to its id, creating the row on first use.
    pub async fn resolve_location(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        Self::resolve(pool, "locations", name).await
    }

    async fn resolve(pool: &PgPool, table: &str, name: &str) -> Result<DbId, sqlx::Error> {
        let name = name.trim();

        let select = format!("SELECT id FROM {table} WHERE name = $1");
        if let Some((id,)) = sqlx::query_as::<_, (DbId,)>(&select)
            .bind(name)
            .fetch_optional(pool)
            .await?
        {
            return Ok(id);
        }

        let insert = format!(
            "INSERT INTO {table} (name) VALUES ($1) \
             ON CONFLICT (name) DO NOTHING \
             RETURNING id"
        );
        if let Some((id,)) = sqlx::query_as::<_, (DbId,)>(&insert)
            .bind(name)
            .fetch_optional(pool)
            .await?
        {
            tracing::debug!(table, name, id, "Created reference row");
            return Ok(id);
        }

        // Lost the race: another caller inserted the same name between our
        // select and insert. Re-read the winner's row.
        let (id,) = sqlx::query_as::<_, (DbId,)>(&select)
            .bind(name)
            .fetch_one(pool)
            .await?;
        Ok(id)
    }

    /// List all categories, alphabetically.
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {NAMED_COLUMNS} FROM asset_categories ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// List all locations, alphabetically.
    pub async fn list_locations(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {NAMED_COLUMNS} FROM locations ORDER BY name");
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }

    /// List the condition enumeration in seed order.
    pub async fn list_conditions(pool: &PgPool) -> Result<Vec<Condition>, sqlx::Error> {
        let query = format!("SELECT {CONDITION_COLUMNS} FROM conditions ORDER BY id");
        sqlx::query_as::<_, Condition>(&query).fetch_all(pool).await
    }

    /// Find a condition by id.
    pub async fn find_condition(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Condition>, sqlx::Error> {
        let query = format!("SELECT {CONDITION_COLUMNS} FROM conditions WHERE id = $1");
        sqlx::query_as::<_, Condition>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
