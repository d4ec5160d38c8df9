//! Read-only comparison of a source against the ledger.

use crate::error::{MigrateError, MigrateResult};
use crate::ledger::{Ledger, LedgerEntry};
use crate::source::MigrationSource;
use dp_core::UnitName;
use dp_db::Database;
use serde::Serialize;
use std::collections::BTreeSet;

/// Where each unit stands relative to the ledger.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationStatus {
    /// Ledger entries whose unit is still in the source, by ledger id.
    pub applied: Vec<LedgerEntry>,
    /// Units not yet applied, in apply order.
    pub pending: Vec<UnitName>,
    /// Ledger entries with no matching unit in the source.
    pub orphaned: Vec<LedgerEntry>,
    /// Pending units that come before an applied unit in apply order.
    /// Applying them records a unit behind ones already in the ledger.
    pub out_of_order: Vec<UnitName>,
}

impl MigrationStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Compute the status of `source` against the ledger in `db`.
///
/// Creates the ledger table if needed, and otherwise only reads.
pub async fn status(db: &dyn Database, source: &dyn MigrationSource) -> MigrateResult<MigrationStatus> {
    let ledger = Ledger::new(db);
    ledger
        .ensure_schema()
        .await
        .map_err(MigrateError::SchemaBootstrap)?;

    let units = source.units().await?;
    let entries = ledger
        .entries()
        .await
        .map_err(MigrateError::SchemaBootstrap)?;

    let known: BTreeSet<&UnitName> = units.iter().map(|u| &u.name).collect();
    let recorded: BTreeSet<&UnitName> = entries.iter().map(|e| &e.name).collect();

    let (applied, orphaned): (Vec<LedgerEntry>, Vec<LedgerEntry>) = entries
        .iter()
        .cloned()
        .partition(|e| known.contains(&e.name));

    for entry in &orphaned {
        log::warn!(
            "Ledger records migration {} which is not in {}",
            entry.name,
            source.describe()
        );
    }

    let pending: Vec<UnitName> = units
        .iter()
        .filter(|u| !recorded.contains(&u.name))
        .map(|u| u.name.clone())
        .collect();

    // Position of the last recorded unit in apply order.
    let frontier = units.iter().rposition(|u| recorded.contains(&u.name));
    let out_of_order = match frontier {
        Some(frontier) => units[..frontier]
            .iter()
            .filter(|u| !recorded.contains(&u.name))
            .map(|u| u.name.clone())
            .collect(),
        None => Vec::new(),
    };

    Ok(MigrationStatus {
        applied,
        pending,
        orphaned,
        out_of_order,
    })
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
