//! Narrow store contracts the pipeline runs against.
//!
//! The deduplication and resolution lookups are abstracted behind these
//! traits so tests can substitute an in-memory implementation while
//! production uses the sqlx-backed catalog. The contracts preserve exact
//! lookup semantics: zero, one, and many results are all distinguishable.

use async_trait::async_trait;

use ils_core::error::RecordError;
use ils_core::record::CleanItemRecord;
use ils_core::types::{LegacyId, Pid};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A backend failure inside a store (connection loss, bad SQL, ...).
/// During lookups this is batch-fatal; during the transactional create
/// it is folded into the record-scoped [`RecordError::Commit`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Either a record-scoped failure (caught at the orchestration boundary,
/// logged, batch continues) or a store backend failure (propagates and
/// aborts the run).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Reference views
// ---------------------------------------------------------------------------

/// An already-migrated document, reduced to its PID.
#[derive(Debug, Clone)]
pub struct DocumentRef {
    pub pid: Pid,
}

/// An already-migrated internal location, reduced to its PID.
#[derive(Debug, Clone)]
pub struct LocationRef {
    pub pid: Pid,
}

/// An existing catalog item, as seen by the dedup check.
#[derive(Debug, Clone)]
pub struct ItemRef {
    pub pid: Pid,
    pub barcode: String,
}

/// Fields for a catalog item about to be created. The catalog mints the
/// PID at commit time.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub barcode: String,
    pub document_pid: Option<Pid>,
    pub internal_location_pid: Pid,
    pub status: ils_core::record::ItemStatus,
    pub shelf: Option<String>,
    pub description: Option<String>,
    pub legacy_document_id: LegacyId,
    pub legacy_location_id: LegacyId,
}

impl NewItem {
    /// Combine a cleaned record with its resolved references.
    pub fn new(clean: CleanItemRecord, refs: crate::resolver::ResolvedReferences) -> Self {
        Self {
            barcode: clean.barcode,
            document_pid: refs.document_pid,
            internal_location_pid: refs.internal_location_pid,
            status: clean.status,
            shelf: clean.shelf,
            description: clean.description,
            legacy_document_id: clean.legacy_document_id,
            legacy_location_id: clean.legacy_location_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Store traits
// ---------------------------------------------------------------------------

/// Lookup of already-migrated documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Primary strategy: direct legacy-id mapping.
    async fn find_by_legacy_id(
        &self,
        legacy_id: LegacyId,
    ) -> Result<Option<DocumentRef>, StoreError>;

    /// Fallback strategy: a document whose volume/part barcodes include
    /// `barcode`, scoped to the same legacy id. Covers multi-volume
    /// legacy documents where the direct id mapping was not preserved.
    async fn find_by_legacy_id_and_barcode(
        &self,
        legacy_id: LegacyId,
        barcode: &str,
    ) -> Result<Option<DocumentRef>, StoreError>;
}

/// Lookup of already-migrated internal locations.
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn find_by_legacy_id(
        &self,
        legacy_id: LegacyId,
    ) -> Result<Option<LocationRef>, StoreError>;
}

/// The target catalog: barcode search plus transactional item creation.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// Exact barcode match; may legitimately return more than one hit
    /// when the uniqueness invariant was violated upstream.
    async fn find_by_barcode(&self, barcode: &str) -> Result<Vec<ItemRef>, StoreError>;

    /// Create the item and mint its PID in one transaction. On any
    /// failure the transaction rolls back fully; no partial entity
    /// persists.
    async fn create(&self, item: &NewItem) -> Result<ItemRef, StoreError>;
}
