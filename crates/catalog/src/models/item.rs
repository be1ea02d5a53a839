//! Item model.

use ils_core::types::{LegacyId, Pid, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `items` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub pid: Pid,
    pub barcode: String,
    pub document_pid: Option<Pid>,
    pub internal_location_pid: Pid,
    /// Stored as the canonical status string, e.g. `CAN_CIRCULATE`.
    pub status: String,
    pub shelf: Option<String>,
    pub description: Option<String>,
    pub legacy_document_id: LegacyId,
    pub legacy_location_id: LegacyId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an item.
#[derive(Debug, Deserialize)]
pub struct CreateItem {
    pub barcode: String,
    pub document_pid: Option<Pid>,
    pub internal_location_pid: Pid,
    pub status: String,
    pub shelf: Option<String>,
    pub description: Option<String>,
    pub legacy_document_id: LegacyId,
    pub legacy_location_id: LegacyId,
}
