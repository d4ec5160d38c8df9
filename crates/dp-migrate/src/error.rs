//! Error types for the migration runner.

use dp_core::UnitName;
use dp_db::DbError;
use thiserror::Error;

/// Migration errors.
///
/// Every variant is fatal to the run that raised it. Unit-scoped variants
/// carry the unit's name; the store error is kept as the source.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The unit directory or one of its files could not be read (MG001).
    #[error("[MG001] Cannot read migration units from {path}: {source}")]
    Discovery {
        path: String,
        source: std::io::Error,
    },

    /// The ledger table could not be created or verified (MG002).
    #[error("[MG002] Could not create or verify the migration ledger: {0}")]
    SchemaBootstrap(#[source] DbError),

    /// Looking up a unit in the ledger failed (MG003).
    #[error("[MG003] Could not read ledger state for migration '{unit}': {source}")]
    Ledger { unit: UnitName, source: DbError },

    /// The unit body failed; its transaction was rolled back (MG004).
    #[error("[MG004] Migration '{unit}' failed to apply: {source}")]
    Apply { unit: UnitName, source: DbError },

    /// The ledger insert failed; its transaction was rolled back (MG005).
    #[error("[MG005] Migration '{unit}' could not be recorded in the ledger: {source}")]
    Record { unit: UnitName, source: DbError },

    /// BEGIN or COMMIT failed for the unit's transaction (MG006).
    #[error("[MG006] Transaction for migration '{unit}' failed: {source}")]
    Transaction { unit: UnitName, source: DbError },

    /// A source produced an empty or duplicated unit name (MG007).
    #[error("[MG007] Invalid migration unit '{name}': {reason}")]
    InvalidUnit { name: String, reason: String },

    /// A new unit file could not be created (MG008).
    #[error("[MG008] Cannot create migration file {path}: {source}")]
    Scaffold {
        path: String,
        source: std::io::Error,
    },
}

impl MigrateError {
    /// Name of the unit this error belongs to, if it is unit-scoped.
    pub fn unit(&self) -> Option<&UnitName> {
        match self {
            MigrateError::Ledger { unit, .. }
            | MigrateError::Apply { unit, .. }
            | MigrateError::Record { unit, .. }
            | MigrateError::Transaction { unit, .. } => Some(unit),
            _ => None,
        }
    }
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
