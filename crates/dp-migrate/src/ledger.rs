//! The migration ledger: which units have been applied, and when.

use chrono::{DateTime, NaiveDateTime, Utc};
use dp_core::UnitName;
use dp_db::{Database, DbError, DbResult};
use serde::Serialize;

/// Name of the ledger table.
pub const LEDGER_TABLE: &str = "migrations";

const LEDGER_DDL: &str = "CREATE SEQUENCE IF NOT EXISTS migrations_id_seq START 1;
CREATE TABLE IF NOT EXISTS migrations (
    id          BIGINT PRIMARY KEY DEFAULT nextval('migrations_id_seq'),
    name        VARCHAR NOT NULL UNIQUE,
    executed_at TIMESTAMPTZ NOT NULL DEFAULT current_timestamp
);";

/// One applied unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    /// Store-assigned, increasing with application order.
    pub id: i64,
    pub name: UnitName,
    pub executed_at: DateTime<Utc>,
}

/// Ledger operations over a borrowed store handle.
///
/// Rows are append-only: nothing here updates or deletes them.
/// [`record_applied`](Self::record_applied) must run inside the same
/// transaction as the unit body it records.
pub struct Ledger<'a> {
    db: &'a dyn Database,
}

impl<'a> Ledger<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Create the ledger table if it does not exist. Safe on every startup.
    pub async fn ensure_schema(&self) -> DbResult<()> {
        self.db.execute_batch(LEDGER_DDL).await
    }

    /// Whether `name` has been applied and committed.
    pub async fn has_applied(&self, name: &UnitName) -> DbResult<bool> {
        let found = self
            .db
            .query_one(
                "SELECT name FROM migrations WHERE name = ?",
                &[name.as_str()],
            )
            .await?;
        Ok(found.is_some())
    }

    /// Insert the ledger row for `name`.
    ///
    /// Fails with [`DbError::UniqueViolation`] if the name is already present.
    pub async fn record_applied(&self, name: &UnitName) -> DbResult<()> {
        self.db
            .execute(
                "INSERT INTO migrations (name) VALUES (?)",
                &[name.as_str()],
            )
            .await?;
        Ok(())
    }

    /// All entries, in application order.
    pub async fn entries(&self) -> DbResult<Vec<LedgerEntry>> {
        let rows = self
            .db
            .query_rows(
                "SELECT id, name, CAST(executed_at AS VARCHAR) FROM migrations ORDER BY id",
                &[],
            )
            .await?;

        rows.into_iter()
            .map(|row| match row.as_slice() {
                [id, name, executed_at] => Ok(LedgerEntry {
                    id: id
                        .parse()
                        .map_err(|_| DbError::Internal(format!("ledger id '{id}' is not an integer")))?,
                    name: UnitName::try_new(name.clone())
                        .ok_or_else(|| DbError::Internal("ledger row with empty name".to_string()))?,
                    executed_at: parse_timestamp(executed_at)?,
                }),
                _ => Err(DbError::Internal(format!(
                    "expected 3 ledger columns, got {}",
                    row.len()
                ))),
            })
            .collect()
    }
}

/// Parse a TIMESTAMPTZ rendered as text (`2024-03-08 09:00:00.123+00`).
fn parse_timestamp(value: &str) -> DbResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| DbError::Internal(format!("unparseable executed_at '{value}': {e}")))
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
