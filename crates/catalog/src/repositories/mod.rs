//! Query layer over the catalog tables.

pub mod document_repo;
pub mod internal_location_repo;
pub mod item_repo;
