//! Internal location model.

use ils_core::types::{LegacyId, Pid, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `internal_locations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InternalLocation {
    pub pid: Pid,
    pub name: String,
    pub legacy_id: LegacyId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an internal location.
#[derive(Debug, Deserialize)]
pub struct CreateInternalLocation {
    pub pid: Pid,
    pub name: String,
    pub legacy_id: LegacyId,
}
