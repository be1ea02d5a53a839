//! Reference resolution: map a record's legacy document and location
//! identifiers onto the PIDs of their already-migrated counterparts.

use ils_core::error::RecordError;
use ils_core::record::LegacyItemRecord;
use ils_core::types::Pid;

use crate::audit::AuditTrail;
use crate::stores::{DocumentStore, LocationStore, PipelineError};

/// The references a record needs before it can be committed. Ephemeral:
/// computed per record, discarded after commit or failure.
#[derive(Debug, Clone)]
pub struct ResolvedReferences {
    /// `None` until resolved; in practice always set at commit time
    /// because an unresolved document skips the record.
    pub document_pid: Option<Pid>,
    /// Required; resolution failure is fatal for the record.
    pub internal_location_pid: Pid,
}

/// Two-tier resolver over the migrated reference entities.
pub struct ReferenceResolver<'a> {
    documents: &'a dyn DocumentStore,
    locations: &'a dyn LocationStore,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(documents: &'a dyn DocumentStore, locations: &'a dyn LocationStore) -> Self {
        Self {
            documents,
            locations,
        }
    }

    /// Look up the internal location migrated under the record's legacy
    /// location id.
    ///
    /// The legacy dump is internally consistent for locations, so a miss
    /// means a prerequisite migration step was skipped; it is fatal for
    /// this record (never for the batch).
    pub async fn resolve_internal_location(
        &self,
        record: &LegacyItemRecord,
    ) -> Result<Pid, PipelineError> {
        match self
            .locations
            .find_by_legacy_id(record.legacy_location_id)
            .await?
        {
            Some(location) => Ok(location.pid),
            None => Err(RecordError::ReferenceNotFound {
                entity: "Internal location",
                legacy_id: record.legacy_location_id,
            }
            .into()),
        }
    }

    /// Look up the document migrated under the record's legacy document
    /// id, falling back to volume-barcode membership.
    ///
    /// Legacy multi-part documents do not always carry a 1:1 id mapping
    /// to their migrated counterpart; barcode membership is the next
    /// most reliable correlation key in the dump. The primary miss is
    /// recorded on the error channel before the fallback is tried, and
    /// again if the fallback also misses.
    pub async fn resolve_document(
        &self,
        record: &LegacyItemRecord,
        audit: &mut AuditTrail,
    ) -> Result<Pid, PipelineError> {
        if let Some(document) = self
            .documents
            .find_by_legacy_id(record.legacy_document_id)
            .await?
        {
            return Ok(document.pid);
        }

        let miss = RecordError::ReferenceNotFound {
            entity: "Document",
            legacy_id: record.legacy_document_id,
        };
        audit.error(&record.barcode, &miss.to_string());

        if let Some(document) = self
            .documents
            .find_by_legacy_id_and_barcode(record.legacy_document_id, &record.barcode)
            .await?
        {
            tracing::debug!(
                barcode = %record.barcode,
                legacy_document_id = record.legacy_document_id,
                pid = %document.pid,
                "document resolved via volume barcode fallback"
            );
            return Ok(document.pid);
        }

        audit.error(&record.barcode, &miss.to_string());
        Err(miss.into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
