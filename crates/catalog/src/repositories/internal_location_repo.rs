//! Repository for the `internal_locations` table.

use ils_core::types::LegacyId;
use sqlx::PgPool;

use crate::models::internal_location::{CreateInternalLocation, InternalLocation};

/// Column list for internal_locations queries.
const COLUMNS: &str = "pid, name, legacy_id, created_at, updated_at";

/// Provides lookups and inserts for internal locations.
pub struct InternalLocationRepo;

impl InternalLocationRepo {
    /// Insert an internal location, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInternalLocation,
    ) -> Result<InternalLocation, sqlx::Error> {
        let query = format!(
            "INSERT INTO internal_locations (pid, name, legacy_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InternalLocation>(&query)
            .bind(&input.pid)
            .bind(&input.name)
            .bind(input.legacy_id)
            .fetch_one(pool)
            .await
    }

    /// Find the internal location migrated under a legacy id.
    pub async fn find_by_legacy_id(
        pool: &PgPool,
        legacy_id: LegacyId,
    ) -> Result<Option<InternalLocation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM internal_locations WHERE legacy_id = $1");
        sqlx::query_as::<_, InternalLocation>(&query)
            .bind(legacy_id)
            .fetch_optional(pool)
            .await
    }
}
