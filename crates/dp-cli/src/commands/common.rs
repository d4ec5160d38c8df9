//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use dp_core::config::MEMORY_DB_PATH;
use dp_core::Config;
use dp_db::DuckDbBackend;
use dp_migrate::{DirectorySource, MigrationRunner};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalArgs, SourceArgs};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and the store is closed cleanly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs exits without printing.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Loaded project: its root directory and configuration.
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

/// Load the project config from `--config`, or from the project directory
/// with defaults when it has no config file.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load configuration file {path}"))?,
        None => Config::load_or_default(&root).context("Failed to load project configuration")?,
    };
    log::debug!("Loaded project '{}' from {}", config.name, root.display());
    Ok(Project { root, config })
}

impl Project {
    /// Database path, with `--database` / `DAWNPOST_DATABASE` taking precedence.
    pub(crate) fn database_path(&self, global: &GlobalArgs) -> String {
        global
            .database
            .clone()
            .unwrap_or_else(|| self.config.database_path_resolved(&self.root))
    }

    /// Open the store, creating the parent directory of a file database.
    pub(crate) fn open_store(&self, global: &GlobalArgs) -> Result<DuckDbBackend> {
        let path = self.database_path(global);
        if path != MEMORY_DB_PATH {
            if let Some(parent) = Path::new(&path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
            }
        }
        log::debug!("Opening store at {path}");
        DuckDbBackend::new(&path).with_context(|| format!("Failed to open database {path}"))
    }

    /// Migrations directory, with `--dir` taking precedence over config.
    pub(crate) fn migrations_dir(&self, dir: Option<&str>) -> PathBuf {
        match dir {
            Some(dir) => PathBuf::from(dir),
            None => self.config.migrations_path_absolute(&self.root),
        }
    }

    /// Runner for the source selected on the command line.
    pub(crate) fn runner(&self, source: &SourceArgs) -> MigrationRunner {
        if source.builtin {
            return dp_state::runner();
        }
        let dir = self.migrations_dir(source.dir.as_deref());
        MigrationRunner::new(DirectorySource::new(dir).with_suffix(&self.config.migrations.suffix))
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
