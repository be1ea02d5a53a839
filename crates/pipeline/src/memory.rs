//! In-memory implementations of the store contracts, used by the
//! pipeline's own tests and for dry runs against a seeded fixture.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use ils_core::record::ItemStatus;
use ils_core::types::{LegacyId, Pid};

use crate::stores::{
    DocumentRef, DocumentStore, ItemCatalog, ItemRef, LocationRef, LocationStore, NewItem,
    StoreError,
};

#[derive(Debug, Clone)]
struct MemoryDocument {
    pid: Pid,
    /// Direct legacy-id mapping; `None` for volume documents split out
    /// of a legacy multipart.
    legacy_id: Option<LegacyId>,
    /// The legacy multipart this volume came from.
    parent_legacy_id: Option<LegacyId>,
    volume_barcodes: Vec<String>,
}

#[derive(Debug, Clone)]
struct MemoryLocation {
    pid: Pid,
    legacy_id: LegacyId,
}

/// A committed item, as held by the in-memory catalog.
#[derive(Debug, Clone)]
pub struct StoredItem {
    pub pid: Pid,
    pub barcode: String,
    pub document_pid: Option<Pid>,
    pub internal_location_pid: Pid,
    pub status: ItemStatus,
}

/// Seedable in-memory catalog implementing all three store traits.
#[derive(Default)]
pub struct MemoryCatalog {
    documents: Vec<MemoryDocument>,
    locations: Vec<MemoryLocation>,
    items: Mutex<Vec<StoredItem>>,
    next_item_pid: AtomicUsize,
    fail_next_create: Mutex<Option<String>>,
    fail_next_lookup: Mutex<Option<String>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document with a preserved 1:1 legacy-id mapping.
    pub fn with_document(mut self, pid: &str, legacy_id: LegacyId) -> Self {
        self.documents.push(MemoryDocument {
            pid: pid.to_string(),
            legacy_id: Some(legacy_id),
            parent_legacy_id: None,
            volume_barcodes: Vec::new(),
        });
        self
    }

    /// Seed a volume document: reachable only through the barcode
    /// fallback, scoped to its parent legacy id.
    pub fn with_volume_document(
        mut self,
        pid: &str,
        parent_legacy_id: LegacyId,
        barcodes: &[&str],
    ) -> Self {
        self.documents.push(MemoryDocument {
            pid: pid.to_string(),
            legacy_id: None,
            parent_legacy_id: Some(parent_legacy_id),
            volume_barcodes: barcodes.iter().map(|b| b.to_string()).collect(),
        });
        self
    }

    /// Seed an already-migrated internal location.
    pub fn with_location(mut self, pid: &str, legacy_id: LegacyId) -> Self {
        self.locations.push(MemoryLocation {
            pid: pid.to_string(),
            legacy_id,
        });
        self
    }

    /// Insert a pre-existing item directly, bypassing the pipeline.
    /// Used to set up duplicate and ambiguity scenarios.
    pub fn seed_item(&self, pid: &str, barcode: &str, internal_location_pid: &str) {
        self.items.lock().unwrap().push(StoredItem {
            pid: pid.to_string(),
            barcode: barcode.to_string(),
            document_pid: None,
            internal_location_pid: internal_location_pid.to_string(),
            status: ItemStatus::CanCirculate,
        });
    }

    /// Make the next `create` call fail after the lookups succeeded,
    /// without persisting anything. Exercises commit rollback.
    pub fn fail_next_create(&self, reason: &str) {
        *self.fail_next_create.lock().unwrap() = Some(reason.to_string());
    }

    /// Make the next lookup (any store trait) fail with a backend
    /// error. Exercises the batch-fatal path.
    pub fn fail_next_lookup(&self, reason: &str) {
        *self.fail_next_lookup.lock().unwrap() = Some(reason.to_string());
    }

    fn take_lookup_failure(&self) -> Result<(), StoreError> {
        match self.fail_next_lookup.lock().unwrap().take() {
            Some(reason) => Err(StoreError::Backend(reason)),
            None => Ok(()),
        }
    }

    /// Snapshot of every committed item.
    pub fn items(&self) -> Vec<StoredItem> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryCatalog {
    async fn find_by_legacy_id(
        &self,
        legacy_id: LegacyId,
    ) -> Result<Option<DocumentRef>, StoreError> {
        self.take_lookup_failure()?;
        Ok(self
            .documents
            .iter()
            .find(|d| d.legacy_id == Some(legacy_id))
            .map(|d| DocumentRef { pid: d.pid.clone() }))
    }

    async fn find_by_legacy_id_and_barcode(
        &self,
        legacy_id: LegacyId,
        barcode: &str,
    ) -> Result<Option<DocumentRef>, StoreError> {
        self.take_lookup_failure()?;
        Ok(self
            .documents
            .iter()
            .find(|d| {
                d.parent_legacy_id == Some(legacy_id)
                    && d.volume_barcodes.iter().any(|b| b == barcode)
            })
            .map(|d| DocumentRef { pid: d.pid.clone() }))
    }
}

#[async_trait]
impl LocationStore for MemoryCatalog {
    async fn find_by_legacy_id(
        &self,
        legacy_id: LegacyId,
    ) -> Result<Option<LocationRef>, StoreError> {
        self.take_lookup_failure()?;
        Ok(self
            .locations
            .iter()
            .find(|l| l.legacy_id == legacy_id)
            .map(|l| LocationRef { pid: l.pid.clone() }))
    }
}

#[async_trait]
impl ItemCatalog for MemoryCatalog {
    async fn find_by_barcode(&self, barcode: &str) -> Result<Vec<ItemRef>, StoreError> {
        self.take_lookup_failure()?;
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.barcode == barcode)
            .map(|i| ItemRef {
                pid: i.pid.clone(),
                barcode: i.barcode.clone(),
            })
            .collect())
    }

    async fn create(&self, item: &NewItem) -> Result<ItemRef, StoreError> {
        if let Some(reason) = self.fail_next_create.lock().unwrap().take() {
            // Rollback: nothing is persisted.
            return Err(StoreError::Backend(reason));
        }

        let n = self.next_item_pid.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = StoredItem {
            pid: format!("I{n}"),
            barcode: item.barcode.clone(),
            document_pid: item.document_pid.clone(),
            internal_location_pid: item.internal_location_pid.clone(),
            status: item.status,
        };
        let item_ref = ItemRef {
            pid: stored.pid.clone(),
            barcode: stored.barcode.clone(),
        };
        self.items.lock().unwrap().push(stored);
        Ok(item_ref)
    }
}
