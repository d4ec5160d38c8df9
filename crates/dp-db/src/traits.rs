//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Store handle used by the migration runner and the state queries.
///
/// Implementations must be Send + Sync for async operation. Positional
/// parameters (`?`) are bound as text.
///
/// Transaction control is explicit: `begin` opens a scope on the shared
/// handle and every statement until `commit` or `rollback` belongs to it.
/// Callers that need one exclusive scope should go through
/// [`crate::with_transaction`].
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single statement with bound parameters, returns affected rows
    async fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize>;

    /// Execute multiple SQL statements (opaque script text)
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Return the first column of the first row, or `None` when no row matches
    async fn query_one(&self, sql: &str, params: &[&str]) -> DbResult<Option<String>>;

    /// Return all rows with every column rendered as a string
    async fn query_rows(&self, sql: &str, params: &[&str]) -> DbResult<Vec<Vec<String>>>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Open a transaction scope
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction scope
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction scope
    async fn rollback(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
