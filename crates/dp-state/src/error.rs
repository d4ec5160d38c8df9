//! Error types for dp-state

use thiserror::Error;

/// State query errors.
#[derive(Error, Debug)]
pub enum StateError {
    /// S001: Store query failed
    #[error("[S001] Daily update query failed: {0}")]
    Db(#[from] dp_db::DbError),

    /// S002: A stored row could not be decoded
    #[error("[S002] Corrupt daily update row: {0}")]
    CorruptRow(String),

    /// S003: The message is already recorded as a daily update
    #[error("[S003] Message {0} is already recorded as a daily update")]
    AlreadyRecorded(String),
}

/// Result type alias for StateError
pub type StateResult<T> = Result<T, StateError>;
