//! Applies pending units from a source, one transaction per unit.

use crate::error::{MigrateError, MigrateResult};
use crate::ledger::Ledger;
use crate::source::{DirectorySource, MigrationSource};
use crate::status::{status, MigrationStatus};
use crate::unit::MigrationUnit;
use dp_core::UnitName;
use dp_db::{with_transaction, Database, TxError};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Units applied by this run, in order.
    pub applied: Vec<UnitName>,
    /// Units already in the ledger, including ones recorded concurrently by
    /// another runner while this run was in progress.
    pub skipped: Vec<UnitName>,
}

impl MigrationReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// True when the run wrote nothing.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Reconciles a [`MigrationSource`] against the ledger.
///
/// Meant to run once per process start, before the host serves traffic. Units
/// are applied strictly sequentially; a failure stops the run and nothing
/// after the failing unit is attempted. There is no retry and no timeout.
pub struct MigrationRunner {
    source: Box<dyn MigrationSource>,
}

impl MigrationRunner {
    pub fn new(source: impl MigrationSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Runner over `*.sql` files in `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(DirectorySource::new(dir))
    }

    pub fn source(&self) -> &dyn MigrationSource {
        self.source.as_ref()
    }

    /// Apply every pending unit, in order.
    pub async fn run(&self, db: &dyn Database) -> MigrateResult<MigrationReport> {
        let ledger = Ledger::new(db);
        ledger
            .ensure_schema()
            .await
            .map_err(MigrateError::SchemaBootstrap)?;
        log::debug!("Migration ledger verified");

        let units = self.source.units().await?;
        log::info!(
            "Found {} migration unit(s) in {}",
            units.len(),
            self.source.describe()
        );

        let mut report = MigrationReport::default();
        for unit in &units {
            if lookup(&ledger, &unit.name).await? {
                log::info!("Skipping migration {} (already applied)", unit.name);
                report.skipped.push(unit.name.clone());
                continue;
            }

            log::info!("Running migration: {}", unit.name);
            match apply_unit(db, unit).await {
                Ok(()) => {
                    log::info!("Completed migration: {}", unit.name);
                    report.applied.push(unit.name.clone());
                }
                // Another runner committed this unit between our lookup and
                // our insert. Its transaction won; ours rolled back.
                Err(MigrateError::Record { unit: name, source }) if source.is_unique_violation() => {
                    if !lookup(&ledger, &name).await? {
                        return Err(MigrateError::Record { unit: name, source });
                    }
                    log::warn!("Migration {name} was applied concurrently by another runner");
                    report.skipped.push(name);
                }
                Err(e) => {
                    log::error!("Migration {} failed: {e}", unit.name);
                    return Err(e);
                }
            }
        }

        log::info!(
            "Migrations complete: {} applied, {} skipped",
            report.applied.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Compare the source against the ledger without applying anything.
    pub async fn status(&self, db: &dyn Database) -> MigrateResult<MigrationStatus> {
        status(db, self.source.as_ref()).await
    }
}

async fn lookup(ledger: &Ledger<'_>, name: &UnitName) -> MigrateResult<bool> {
    ledger
        .has_applied(name)
        .await
        .map_err(|source| MigrateError::Ledger {
            unit: name.clone(),
            source,
        })
}

/// Execute the unit body and record it, both inside one transaction.
async fn apply_unit(db: &dyn Database, unit: &MigrationUnit) -> MigrateResult<()> {
    let result: Result<(), TxError<MigrateError>> = with_transaction(db, |tx| {
        Box::pin(async move {
            tx.execute_batch(&unit.body)
                .await
                .map_err(|source| MigrateError::Apply {
                    unit: unit.name.clone(),
                    source,
                })?;
            Ledger::new(tx)
                .record_applied(&unit.name)
                .await
                .map_err(|source| MigrateError::Record {
                    unit: unit.name.clone(),
                    source,
                })
        })
    })
    .await;

    result.map_err(|e| match e {
        TxError::Begin(source) | TxError::Commit(source) => MigrateError::Transaction {
            unit: unit.name.clone(),
            source,
        },
        TxError::Body(err) => err,
    })
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
