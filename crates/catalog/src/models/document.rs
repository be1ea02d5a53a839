//! Document model.

use ils_core::types::{LegacyId, Pid, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `documents` table.
///
/// Regular documents carry `legacy_id`; volumes split out of a legacy
/// multipart carry `parent_legacy_id` plus the barcodes they cover.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Document {
    pub pid: Pid,
    pub title: String,
    pub legacy_id: Option<LegacyId>,
    pub parent_legacy_id: Option<LegacyId>,
    pub volume_barcodes: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a document.
#[derive(Debug, Deserialize)]
pub struct CreateDocument {
    pub pid: Pid,
    pub title: String,
    pub legacy_id: Option<LegacyId>,
    pub parent_legacy_id: Option<LegacyId>,
    pub volume_barcodes: Vec<String>,
}
