//! Migration sources: where units come from and in which order.

use crate::error::{MigrateError, MigrateResult};
use crate::unit::{EmbeddedUnit, MigrationUnit};
use async_trait::async_trait;
use dp_core::UnitName;
use std::path::{Path, PathBuf};

/// Suffix that marks a unit file unless configured otherwise.
pub const DEFAULT_UNIT_SUFFIX: &str = ".sql";

/// An ordered collection of migration units.
///
/// Implementations must return units sorted ascending by name, and the same
/// sequence on every call while the underlying definitions are unchanged.
#[async_trait]
pub trait MigrationSource: Send + Sync {
    /// Load every unit, in apply order.
    async fn units(&self) -> MigrateResult<Vec<MigrationUnit>>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// Units discovered from files in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    suffix: String,
}

impl DirectorySource {
    /// Source reading `*.sql` files from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            suffix: DEFAULT_UNIT_SUFFIX.to_string(),
        }
    }

    /// Recognize a different unit-file suffix (including the dot).
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

#[async_trait]
impl MigrationSource for DirectorySource {
    async fn units(&self) -> MigrateResult<Vec<MigrationUnit>> {
        discover(&self.dir, &self.suffix).await
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// List `dir`, keep regular files ending in `suffix`, and load them in file
/// name order.
///
/// Order is decided on the full file name, suffix included, so `001_a-b.sql`
/// runs before `001_a.sql`. The unit name is the file name with `suffix`
/// stripped. Bodies are read
/// verbatim as UTF-8. Entries whose names are not valid UTF-8 are skipped.
pub async fn discover(dir: &Path, suffix: &str) -> MigrateResult<Vec<MigrationUnit>> {
    let discovery_err = |path: &Path, source: std::io::Error| MigrateError::Discovery {
        path: path.display().to_string(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| discovery_err(dir, e))?;

    let mut found: Vec<(String, UnitName, PathBuf)> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| discovery_err(dir, e))?
    {
        let path = entry.path();
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            log::warn!("Ignoring non UTF-8 file name in {}", dir.display());
            continue;
        };
        let Some(stem) = file_name.strip_suffix(suffix) else {
            log::debug!("Ignoring {file_name}: not a '{suffix}' unit file");
            continue;
        };
        // Follows symlinks, so a linked unit file still counts.
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| discovery_err(&path, e))?;
        if !metadata.is_file() {
            continue;
        }
        let Some(name) = UnitName::try_new(stem) else {
            log::warn!("Ignoring {file_name}: unit name would be empty");
            continue;
        };
        found.push((file_name.to_string(), name, path));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));

    let mut units = Vec::with_capacity(found.len());
    for (_, name, path) in found {
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| discovery_err(&path, e))?;
        units.push(MigrationUnit::new(name, body));
    }
    Ok(units)
}

/// Units held in memory, usually compiled in with `include_str!`.
#[derive(Debug, Clone)]
pub struct StaticSource {
    label: String,
    units: Vec<(String, String)>,
}

impl StaticSource {
    /// Source over a compiled-in unit table.
    pub fn new(label: impl Into<String>, units: &'static [EmbeddedUnit]) -> Self {
        Self {
            label: label.into(),
            units: units
                .iter()
                .map(|u| (u.name.to_string(), u.sql.to_string()))
                .collect(),
        }
    }

    /// Source over arbitrary `(name, body)` pairs, in any order.
    pub fn from_pairs<I, N, B>(label: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: Into<String>,
    {
        Self {
            label: label.into(),
            units: pairs
                .into_iter()
                .map(|(n, b)| (n.into(), b.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl MigrationSource for StaticSource {
    async fn units(&self) -> MigrateResult<Vec<MigrationUnit>> {
        let mut units = Vec::with_capacity(self.units.len());
        for (name, body) in &self.units {
            let unit_name = UnitName::try_new(name.clone()).ok_or_else(|| {
                MigrateError::InvalidUnit {
                    name: name.clone(),
                    reason: "name is empty".to_string(),
                }
            })?;
            units.push(MigrationUnit::new(unit_name, body.clone()));
        }
        units.sort_by(|a, b| a.name.cmp(&b.name));

        if let Some(pair) = units.windows(2).find(|w| w[0].name == w[1].name) {
            return Err(MigrateError::InvalidUnit {
                name: pair[0].name.to_string(),
                reason: "name is defined more than once".to_string(),
            });
        }
        Ok(units)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
