//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::{params_from_iter, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn execute_sync(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        let conn = self.lock()?;
        Ok(conn.execute(sql, params_from_iter(params.iter()))?)
    }

    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        Ok(conn.execute_batch(sql)?)
    }

    fn query_rows_sync(&self, sql: &str, params: &[&str]) -> DbResult<Vec<Vec<String>>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let col_count = row.as_ref().column_count();
                Ok((0..col_count)
                    .map(|i| get_column_as_string(row, i))
                    .collect::<Vec<_>>())
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Control statements go through their own error variant so a failed
    /// BEGIN is never mistaken for a failed unit body.
    fn control_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::TransactionError(format!("{sql} failed: {e}")))
    }

    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = match name.rsplit_once('.') {
            Some((schema, table)) => (schema, table),
            None => ("main", name),
        };

        let count = self
            .query_rows_sync(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
                &[schema, table],
            )?
            .first()
            .and_then(|row| row.first())
            .and_then(|c| c.parse::<i64>().ok())
            .unwrap_or(0);

        Ok(count > 0)
    }
}

/// Read a column value as a String, trying multiple DuckDB types.
///
/// Integer and boolean columns do not convert to `String` directly, so try
/// String -> i64 -> f64 -> bool -> "null".
fn get_column_as_string(row: &duckdb::Row<'_>, idx: usize) -> String {
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return s;
    }
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return n.to_string();
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        return f.to_string();
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return b.to_string();
    }
    "null".to_string()
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        self.execute_sync(sql, params)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query_one(&self, sql: &str, params: &[&str]) -> DbResult<Option<String>> {
        let rows = self.query_rows_sync(sql, params)?;
        Ok(rows.into_iter().next().and_then(|row| row.into_iter().next()))
    }

    async fn query_rows(&self, sql: &str, params: &[&str]) -> DbResult<Vec<Vec<String>>> {
        self.query_rows_sync(sql, params)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn begin(&self) -> DbResult<()> {
        self.control_sync("BEGIN TRANSACTION")
    }

    async fn commit(&self) -> DbResult<()> {
        self.control_sync("COMMIT")
    }

    async fn rollback(&self) -> DbResult<()> {
        self.control_sync("ROLLBACK")
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
