//! dp-db - Database abstraction layer for Dawnpost
//!
//! This crate provides the `Database` trait consumed by the migration runner
//! and the state queries, a transaction-scope helper, and the DuckDB
//! implementation.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod transaction;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
pub use transaction::{with_transaction, TxError};
