//! Configuration types and parsing for dawnpost.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_PROJECT_NAME: &str = "dawnpost";
const DEFAULT_DB_PATH: &str = "target/dawnpost.duckdb";

/// Database path that selects an in-memory store.
pub const MEMORY_DB_PATH: &str = ":memory:";
const DEFAULT_MIGRATIONS_DIR: &str = "migrations";
const DEFAULT_UNIT_SUFFIX: &str = ".sql";

/// Config file names searched for in a project directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["dawnpost.yml", "dawnpost.yaml"];

/// Main project configuration from dawnpost.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Where schema migration units are discovered
    #[serde(default)]
    pub migrations: MigrationsConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path relative to the project directory, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Migration discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationsConfig {
    /// Directory holding unit files, relative to the project directory
    #[serde(default = "default_migrations_dir")]
    pub path: String,

    /// File suffix that marks a unit file
    #[serde(default = "default_unit_suffix")]
    pub suffix: String,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            path: default_migrations_dir(),
            suffix: default_unit_suffix(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROJECT_NAME.to_string(),
            database: DatabaseConfig::default(),
            migrations: MigrationsConfig::default(),
        }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_migrations_dir() -> String {
    DEFAULT_MIGRATIONS_DIR.to_string()
}

fn default_unit_suffix() -> String {
    DEFAULT_UNIT_SUFFIX.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for dawnpost.yml or dawnpost.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for file_name in CONFIG_FILE_NAMES {
            let path = dir.join(file_name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Load configuration from a project directory, falling back to defaults
    /// when the directory has no config file.
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        match Self::load_from_dir(dir) {
            Err(CoreError::ConfigNotFound { path }) => {
                log::debug!("No config at {path}, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.database.path.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }

        if self.migrations.path.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations.path cannot be empty".to_string(),
            });
        }

        let suffix = &self.migrations.suffix;
        if suffix.len() < 2 || !suffix.starts_with('.') {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "migrations.suffix must start with '.' and name an extension, got '{suffix}'"
                ),
            });
        }

        Ok(())
    }

    /// Get the migrations directory resolved against the project root
    pub fn migrations_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations.path)
    }

    /// Get the database path resolved against the project root.
    ///
    /// `:memory:` is passed through unchanged.
    pub fn database_path_resolved(&self, root: &Path) -> String {
        if self.database.path == MEMORY_DB_PATH {
            return self.database.path.clone();
        }
        root.join(&self.database.path).display().to_string()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
