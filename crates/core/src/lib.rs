//! Pure domain logic for the legacy item migration pipeline.
//!
//! This crate has zero I/O: legacy record types, the record normalizer,
//! the migration error taxonomy, and per-record outcome bookkeeping.
//! Everything that touches a database or the filesystem lives in
//! `ils-catalog` and `ils-pipeline`.

pub mod error;
pub mod normalize;
pub mod outcome;
pub mod record;
pub mod types;
