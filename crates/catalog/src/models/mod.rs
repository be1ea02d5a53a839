//! Row structs and DTOs for the catalog tables.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, and a `Deserialize` create DTO for
//! inserts.

pub mod document;
pub mod internal_location;
pub mod item;
