//! Migration unit types.

use dp_core::UnitName;

/// One named, immutable schema change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationUnit {
    /// Unique name; defines apply order and is the ledger key.
    pub name: UnitName,
    /// Statement text, passed to the store verbatim.
    pub body: String,
}

impl MigrationUnit {
    pub fn new(name: UnitName, body: impl Into<String>) -> Self {
        Self {
            name,
            body: body.into(),
        }
    }
}

/// A unit compiled into the binary with `include_str!`.
pub struct EmbeddedUnit {
    /// Unit name, without a file suffix.
    pub name: &'static str,
    /// Raw SQL to execute.
    pub sql: &'static str,
}
