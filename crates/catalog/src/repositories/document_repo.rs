//! Repository for the `documents` table.

use ils_core::types::LegacyId;
use sqlx::PgPool;

use crate::models::document::{CreateDocument, Document};

/// Column list for documents queries.
const COLUMNS: &str =
    "pid, title, legacy_id, parent_legacy_id, volume_barcodes, created_at, updated_at";

/// Provides lookups and inserts for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a document, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDocument) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (pid, title, legacy_id, parent_legacy_id, volume_barcodes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(&input.pid)
            .bind(&input.title)
            .bind(input.legacy_id)
            .bind(input.parent_legacy_id)
            .bind(serde_json::json!(input.volume_barcodes))
            .fetch_one(pool)
            .await
    }

    /// Find the document migrated under a legacy id.
    pub async fn find_by_legacy_id(
        pool: &PgPool,
        legacy_id: LegacyId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE legacy_id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(legacy_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the volume split out of a legacy multipart that carries the
    /// given barcode. Scoped to the parent legacy id so a barcode reused
    /// under another document never matches.
    pub async fn find_volume_by_parent_and_barcode(
        pool: &PgPool,
        parent_legacy_id: LegacyId,
        barcode: &str,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents
             WHERE parent_legacy_id = $1 AND volume_barcodes @> $2"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(parent_legacy_id)
            .bind(serde_json::json!([barcode]))
            .fetch_optional(pool)
            .await
    }
}
