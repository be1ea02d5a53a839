//! The batch orchestrator: resolution, normalization, dedup check, and
//! transactional create, one record at a time in input order.
//!
//! Failures are isolated per record. A resolution miss, a malformed
//! record, an ambiguous barcode, or a failed commit never aborts the
//! batch; only store backend failures during lookups (and anything else
//! outside the record-error taxonomy) propagate and terminate the run.

use ils_core::error::RecordError;
use ils_core::normalize::normalize;
use ils_core::outcome::{BatchReport, MigrationOutcome};
use ils_core::record::LegacyItemRecord;

use crate::audit::AuditTrail;
use crate::dedup::Deduplicator;
use crate::resolver::{ReferenceResolver, ResolvedReferences};
use crate::stores::{DocumentStore, ItemCatalog, LocationStore, NewItem, PipelineError, StoreError};

/// Migrates a batch of legacy item records into the target catalog.
///
/// Single-writer by design: concurrent runs against the same catalog can
/// both observe "not found" for a barcode under index lag and
/// double-import it. Callers must serialize invocations.
pub struct ItemImporter<'a> {
    documents: &'a dyn DocumentStore,
    locations: &'a dyn LocationStore,
    catalog: &'a dyn ItemCatalog,
    audit: AuditTrail,
}

impl<'a> ItemImporter<'a> {
    pub fn new(
        documents: &'a dyn DocumentStore,
        locations: &'a dyn LocationStore,
        catalog: &'a dyn ItemCatalog,
        audit: AuditTrail,
    ) -> Self {
        Self {
            documents,
            locations,
            catalog,
            audit,
        }
    }

    /// Process every record in file order. Each record lands in exactly
    /// one [`MigrationOutcome`]; none are silently dropped.
    pub async fn run(&mut self, records: &[LegacyItemRecord]) -> Result<BatchReport, StoreError> {
        let mut report = BatchReport::default();
        for record in records {
            let outcome = self.process(record).await?;
            report.push(record.barcode.clone(), outcome);
        }
        tracing::info!(
            total = report.total(),
            imported = report.imported,
            duplicates = report.duplicates,
            unresolved = report.unresolved_documents,
            errors = report.errors,
            "item batch finished"
        );
        Ok(report)
    }

    /// Run one record through the pipeline stages.
    async fn process(
        &mut self,
        record: &LegacyItemRecord,
    ) -> Result<MigrationOutcome, StoreError> {
        tracing::info!(barcode = %record.barcode, "importing item");
        let resolver = ReferenceResolver::new(self.documents, self.locations);

        // 1. Internal location: a miss is fatal for the record.
        let internal_location_pid = match resolver.resolve_internal_location(record).await {
            Ok(pid) => pid,
            Err(PipelineError::Record(err)) => return Ok(self.errored(record, &err)),
            Err(PipelineError::Store(err)) => return Err(err),
        };

        // 2. Document, with barcode fallback. The resolver has already
        //    written the error channel entries on a miss.
        let document_pid = match resolver.resolve_document(record, &mut self.audit).await {
            Ok(pid) => Some(pid),
            Err(PipelineError::Record(RecordError::ReferenceNotFound { .. })) => {
                return Ok(MigrationOutcome::SkippedUnresolvedDocument);
            }
            Err(PipelineError::Record(err)) => return Ok(self.errored(record, &err)),
            Err(PipelineError::Store(err)) => return Err(err),
        };

        // 3. Clean the record into the target schema.
        let clean = match normalize(record) {
            Ok(clean) => clean,
            Err(err) => return Ok(self.errored(record, &RecordError::from(err))),
        };

        // 4. Dedup check: reruns are idempotent, ambiguity is an error.
        match Deduplicator::new(self.catalog)
            .find_existing(&clean.barcode)
            .await
        {
            Ok(None) => {}
            Ok(Some(existing)) => {
                tracing::info!(
                    barcode = %clean.barcode,
                    existing_pid = %existing.pid,
                    "item already migrated, skipping"
                );
                return Ok(MigrationOutcome::SkippedDuplicate {
                    existing_pid: existing.pid,
                });
            }
            Err(PipelineError::Record(err)) => return Ok(self.errored(record, &err)),
            Err(PipelineError::Store(err)) => return Err(err),
        }

        // 5. Transactional create; the store rolls back on failure.
        let new_item = NewItem::new(
            clean,
            ResolvedReferences {
                document_pid,
                internal_location_pid,
            },
        );
        match self.catalog.create(&new_item).await {
            Ok(created) => {
                // The audit entry carries the stored natural key, which
                // may differ from the raw dump value by trimming.
                self.audit.ok(&new_item.barcode);
                tracing::info!(barcode = %new_item.barcode, pid = %created.pid, "item imported");
                Ok(MigrationOutcome::Imported { pid: created.pid })
            }
            Err(err) => Ok(self.errored(record, &RecordError::Commit(err.to_string()))),
        }
    }

    /// Route a record-scoped failure to the error channel.
    fn errored(&mut self, record: &LegacyItemRecord, err: &RecordError) -> MigrationOutcome {
        tracing::error!(barcode = %record.barcode, %err, "item record failed");
        self.audit.error(&record.barcode, &err.to_string());
        MigrationOutcome::Errored {
            reason: err.to_string(),
        }
    }
}
