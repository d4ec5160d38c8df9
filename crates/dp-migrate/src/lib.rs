//! Schema migration runner for Dawnpost.
//!
//! A [`MigrationSource`] yields named SQL units in a total order. The
//! [`MigrationRunner`] reconciles them against the [`Ledger`] table
//! (`migrations`), applying each missing unit and recording it inside one
//! transaction, strictly in order, and stopping at the first failure.

pub mod error;
pub mod ledger;
pub mod runner;
pub mod scaffold;
pub mod source;
pub mod status;
pub mod unit;

pub use error::{MigrateError, MigrateResult};
pub use ledger::{Ledger, LedgerEntry, LEDGER_TABLE};
pub use runner::{MigrationReport, MigrationRunner};
pub use source::{discover, DirectorySource, MigrationSource, StaticSource, DEFAULT_UNIT_SUFFIX};
pub use status::{status, MigrationStatus};
pub use unit::{EmbeddedUnit, MigrationUnit};
