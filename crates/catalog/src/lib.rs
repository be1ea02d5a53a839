//! Postgres persistence for the target catalog.
//!
//! `models` holds row structs and create DTOs, `repositories` the
//! query layer, and [`store::PgCatalog`] adapts both onto the pipeline
//! store contracts.

pub mod models;
pub mod repositories;
pub mod store;

/// Embedded migrations for the catalog schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Cheap connectivity probe, used at startup before the batch begins.
pub async fn health_check(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
