//! Schema units for the state tables, compiled in from `migrations/`.
//!
//! The same files are what `dp migrate` discovers from disk, so a deployment
//! can use either source against the same ledger.

use dp_db::Database;
use dp_migrate::{EmbeddedUnit, MigrateResult, MigrationReport, MigrationRunner, StaticSource};

/// All known units, in order.
pub static MIGRATIONS: &[EmbeddedUnit] = &[
    EmbeddedUnit {
        name: "001_create_daily_updates",
        sql: include_str!("../../../migrations/001_create_daily_updates.sql"),
    },
    EmbeddedUnit {
        name: "002_index_daily_updates_posted_at",
        sql: include_str!("../../../migrations/002_index_daily_updates_posted_at.sql"),
    },
];

/// Runner over the compiled-in units.
pub fn runner() -> MigrationRunner {
    MigrationRunner::new(StaticSource::new("builtin", MIGRATIONS))
}

/// Bring the state tables up to date.
pub async fn migrate(db: &dyn Database) -> MigrateResult<MigrationReport> {
    runner().run(db).await
}
