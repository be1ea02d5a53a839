//! `ils-migrate` -- one-shot migration of legacy item records into the
//! PID-keyed catalog.
//!
//! Reads a JSON dump of legacy items, resolves each record's document
//! and internal location against the already-migrated catalog, and
//! creates the items. Per-record outcomes land in two append-only audit
//! logs; the process itself logs through `tracing`.
//!
//! Usage: `ils-migrate <items-dump.json>`
//!
//! # Environment variables
//!
//! | Variable       | Required | Default              | Description                          |
//! |----------------|----------|----------------------|--------------------------------------|
//! | `DATABASE_URL` | yes      | --                   | Postgres connection string           |
//! | `MIGRATED_LOG` | no       | `migrated_items.log` | Audit file for successful imports    |
//! | `ERRORED_LOG`  | no       | `errored_items.log`  | Audit file for failed records        |

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ils_catalog::store::PgCatalog;
use ils_core::record::LegacyItemRecord;
use ils_pipeline::audit::{AuditTrail, FileSink};
use ils_pipeline::importer::ItemImporter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ils_migrate=info,ils_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dump_path = std::env::args().nth(1).unwrap_or_else(|| {
        tracing::error!("usage: ils-migrate <items-dump.json>");
        std::process::exit(2);
    });

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::error!("DATABASE_URL environment variable is required");
        std::process::exit(2);
    });

    let migrated_log =
        std::env::var("MIGRATED_LOG").unwrap_or_else(|_| "migrated_items.log".to_string());
    let errored_log =
        std::env::var("ERRORED_LOG").unwrap_or_else(|_| "errored_items.log".to_string());

    let dump = std::fs::read_to_string(&dump_path)
        .with_context(|| format!("reading items dump {dump_path}"))?;
    let records: Vec<LegacyItemRecord> =
        serde_json::from_str(&dump).with_context(|| format!("parsing items dump {dump_path}"))?;

    tracing::info!(
        records = records.len(),
        dump = %dump_path,
        migrated_log = %migrated_log,
        errored_log = %errored_log,
        "starting item migration"
    );

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("connecting to the catalog database")?;
    ils_catalog::MIGRATOR
        .run(&pool)
        .await
        .context("running catalog migrations")?;
    ils_catalog::health_check(&pool)
        .await
        .context("catalog health check")?;

    let audit = AuditTrail::new(
        Box::new(FileSink::open(&migrated_log).with_context(|| format!("opening {migrated_log}"))?),
        Box::new(FileSink::open(&errored_log).with_context(|| format!("opening {errored_log}"))?),
    );

    let catalog = PgCatalog::new(pool);
    let report = ItemImporter::new(&catalog, &catalog, &catalog, audit)
        .run(&records)
        .await
        .context("item batch aborted")?;

    tracing::info!(
        total = report.total(),
        imported = report.imported,
        duplicates = report.duplicates,
        unresolved = report.unresolved_documents,
        errors = report.errors,
        "item migration finished"
    );

    Ok(())
}
