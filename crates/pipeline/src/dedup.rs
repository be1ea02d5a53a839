//! Barcode deduplication against the target catalog.

use ils_core::error::RecordError;

use crate::stores::{ItemCatalog, ItemRef, PipelineError};

/// Checks whether an item with the same natural key already exists.
pub struct Deduplicator<'a> {
    catalog: &'a dyn ItemCatalog,
}

impl<'a> Deduplicator<'a> {
    pub fn new(catalog: &'a dyn ItemCatalog) -> Self {
        Self { catalog }
    }

    /// Exact barcode match against the catalog.
    ///
    /// Zero matches: proceed to import. One match: the item was already
    /// migrated; benign skip. More than one: the uniqueness invariant
    /// was violated upstream — fail the record, never pick a winner.
    pub async fn find_existing(&self, barcode: &str) -> Result<Option<ItemRef>, PipelineError> {
        let mut hits = self.catalog.find_by_barcode(barcode).await?;
        match hits.len() {
            0 => Ok(None),
            1 => Ok(Some(hits.remove(0))),
            count => Err(RecordError::AmbiguousBarcode {
                barcode: barcode.to_string(),
                count,
            }
            .into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
