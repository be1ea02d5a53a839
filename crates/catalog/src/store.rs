//! [`PgCatalog`]: the Postgres-backed implementation of the pipeline
//! store contracts.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ils_core::types::{LegacyId, Pid};
use ils_pipeline::stores::{
    DocumentRef, DocumentStore, ItemCatalog, ItemRef, LocationRef, LocationStore, NewItem,
    StoreError,
};

use crate::models::item::CreateItem;
use crate::repositories::document_repo::DocumentRepo;
use crate::repositories::internal_location_repo::InternalLocationRepo;
use crate::repositories::item_repo::ItemRepo;

/// Adapts the repositories onto the store traits the importer runs
/// against. Item creation is transactional; a failed insert leaves no
/// partial row behind.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Mint a PID for a newly created record.
    fn mint_pid() -> Pid {
        Uuid::now_v7().to_string()
    }
}

#[async_trait]
impl DocumentStore for PgCatalog {
    async fn find_by_legacy_id(
        &self,
        legacy_id: LegacyId,
    ) -> Result<Option<DocumentRef>, StoreError> {
        let row = DocumentRepo::find_by_legacy_id(&self.pool, legacy_id)
            .await
            .map_err(StoreError::backend)?;
        Ok(row.map(|d| DocumentRef { pid: d.pid }))
    }

    async fn find_by_legacy_id_and_barcode(
        &self,
        legacy_id: LegacyId,
        barcode: &str,
    ) -> Result<Option<DocumentRef>, StoreError> {
        let row = DocumentRepo::find_volume_by_parent_and_barcode(&self.pool, legacy_id, barcode)
            .await
            .map_err(StoreError::backend)?;
        Ok(row.map(|d| DocumentRef { pid: d.pid }))
    }
}

#[async_trait]
impl LocationStore for PgCatalog {
    async fn find_by_legacy_id(
        &self,
        legacy_id: LegacyId,
    ) -> Result<Option<LocationRef>, StoreError> {
        let row = InternalLocationRepo::find_by_legacy_id(&self.pool, legacy_id)
            .await
            .map_err(StoreError::backend)?;
        Ok(row.map(|l| LocationRef { pid: l.pid }))
    }
}

#[async_trait]
impl ItemCatalog for PgCatalog {
    async fn find_by_barcode(&self, barcode: &str) -> Result<Vec<ItemRef>, StoreError> {
        let rows = ItemRepo::find_by_barcode(&self.pool, barcode)
            .await
            .map_err(StoreError::backend)?;
        Ok(rows
            .into_iter()
            .map(|i| ItemRef {
                pid: i.pid,
                barcode: i.barcode,
            })
            .collect())
    }

    async fn create(&self, item: &NewItem) -> Result<ItemRef, StoreError> {
        let input = CreateItem {
            barcode: item.barcode.clone(),
            document_pid: item.document_pid.clone(),
            internal_location_pid: item.internal_location_pid.clone(),
            status: item.status.as_str().to_string(),
            shelf: item.shelf.clone(),
            description: item.description.clone(),
            legacy_document_id: item.legacy_document_id,
            legacy_location_id: item.legacy_location_id,
        };

        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;
        let pid = Self::mint_pid();
        let row = ItemRepo::create(&mut *tx, &pid, &input)
            .await
            .map_err(StoreError::backend)?;
        tx.commit().await.map_err(StoreError::backend)?;

        tracing::debug!(pid = %row.pid, barcode = %row.barcode, "item row committed");
        Ok(ItemRef {
            pid: row.pid,
            barcode: row.barcode,
        })
    }
}
