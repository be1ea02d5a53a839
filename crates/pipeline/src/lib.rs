//! The item migration pipeline: store contracts, reference resolution
//! with barcode fallback, barcode deduplication, audit channels, and the
//! batch orchestrator.
//!
//! The pipeline is storage-agnostic. Production wires the sqlx-backed
//! catalog from `ils-catalog` into the [`stores`] traits; tests use the
//! in-memory catalog from [`memory`].

pub mod audit;
pub mod dedup;
pub mod importer;
pub mod memory;
pub mod resolver;
pub mod stores;
