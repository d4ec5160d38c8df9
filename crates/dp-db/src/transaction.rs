//! Transaction scope helper.

use crate::error::DbError;
use crate::traits::Database;
use futures::future::BoxFuture;

/// Failure of a transaction scope, split by the step that failed.
#[derive(Debug)]
pub enum TxError<E> {
    /// `BEGIN` failed; nothing ran.
    Begin(DbError),
    /// The body failed; the scope was rolled back.
    Body(E),
    /// `COMMIT` failed after the body succeeded; a rollback was attempted.
    Commit(DbError),
}

/// Execute `body` within a `BEGIN` / `COMMIT` scope, rolling back on error.
///
/// The body receives the same handle and must issue all of its statements
/// through it. Rollback failures are logged and the original error wins.
pub async fn with_transaction<'a, T, E, F>(db: &'a dyn Database, body: F) -> Result<T, TxError<E>>
where
    F: FnOnce(&'a dyn Database) -> BoxFuture<'a, Result<T, E>>,
{
    db.begin().await.map_err(TxError::Begin)?;

    match body(db).await {
        Ok(value) => {
            if let Err(commit_err) = db.commit().await {
                if let Err(rollback_err) = db.rollback().await {
                    log::warn!("ROLLBACK after failed COMMIT also failed: {rollback_err}");
                }
                return Err(TxError::Commit(commit_err));
            }
            Ok(value)
        }
        Err(body_err) => {
            if let Err(rollback_err) = db.rollback().await {
                log::warn!("ROLLBACK failed: {rollback_err}");
            }
            Err(TxError::Body(body_err))
        }
    }
}
