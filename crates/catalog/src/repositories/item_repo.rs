//! Repository for the `items` table.

use ils_core::types::Pid;
use sqlx::{PgExecutor, PgPool};

use crate::models::item::{CreateItem, Item};

/// Column list for items queries.
const COLUMNS: &str = "pid, barcode, document_pid, internal_location_pid, status, \
    shelf, description, legacy_document_id, legacy_location_id, created_at, updated_at";

/// Provides lookups and inserts for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert an item under a freshly minted PID, returning the row.
    ///
    /// Generic over the executor so callers can run it inside a
    /// transaction.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        pid: &Pid,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items
                (pid, barcode, document_pid, internal_location_pid, status,
                 shelf, description, legacy_document_id, legacy_location_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(pid)
            .bind(&input.barcode)
            .bind(&input.document_pid)
            .bind(&input.internal_location_pid)
            .bind(&input.status)
            .bind(&input.shelf)
            .bind(&input.description)
            .bind(input.legacy_document_id)
            .bind(input.legacy_location_id)
            .fetch_one(executor)
            .await
    }

    /// All items carrying a barcode, in insertion order.
    pub async fn find_by_barcode(pool: &PgPool, barcode: &str) -> Result<Vec<Item>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM items WHERE barcode = $1 ORDER BY created_at, pid");
        sqlx::query_as::<_, Item>(&query)
            .bind(barcode)
            .fetch_all(pool)
            .await
    }
}
