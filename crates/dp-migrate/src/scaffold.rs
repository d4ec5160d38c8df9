//! Creating new, correctly numbered unit files.

use crate::error::{MigrateError, MigrateResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const MIN_SEQUENCE_WIDTH: usize = 3;

/// Lowercase ASCII alphanumerics; every other run of characters becomes one `_`.
pub fn slugify(description: &str) -> String {
    let mut slug = String::with_capacity(description.len());
    let mut pending_sep = false;
    for c in description.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

/// File name for the next unit in `dir`: `NNN_<slug><suffix>`.
///
/// `NNN` is one more than the largest leading number among existing unit
/// files, zero-padded to at least three digits (or to the widest existing
/// prefix). A missing directory counts as empty.
pub fn next_file_name(dir: &Path, description: &str, suffix: &str) -> MigrateResult<String> {
    let slug = slugify(description);
    if slug.is_empty() {
        return Err(MigrateError::InvalidUnit {
            name: description.to_string(),
            reason: "description must contain at least one ASCII letter or digit".to_string(),
        });
    }

    let mut highest: u64 = 0;
    let mut width = MIN_SEQUENCE_WIDTH;
    if dir.exists() {
        let entries = fs::read_dir(dir).map_err(|e| MigrateError::Discovery {
            path: dir.display().to_string(),
            source: e,
        })?;
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(stem) = file_name.to_str().and_then(|n| n.strip_suffix(suffix)) else {
                continue;
            };
            let digits_len = stem.bytes().take_while(u8::is_ascii_digit).count();
            let digits = &stem[..digits_len];
            if let Ok(n) = digits.parse::<u64>() {
                highest = highest.max(n);
                width = width.max(digits.len());
            }
        }
    }

    let next = highest
        .checked_add(1)
        .ok_or_else(|| MigrateError::InvalidUnit {
            name: description.to_string(),
            reason: format!("sequence number after {highest} does not fit in 64 bits"),
        })?;
    Ok(format!("{next:0width$}_{slug}{suffix}"))
}

/// Create an empty unit file in `dir` and return its path.
///
/// Never overwrites an existing file.
pub fn create_unit_file(dir: &Path, description: &str, suffix: &str) -> MigrateResult<PathBuf> {
    let file_name = next_file_name(dir, description, suffix)?;
    let path = dir.join(&file_name);
    let scaffold_err = |source: std::io::Error| MigrateError::Scaffold {
        path: path.display().to_string(),
        source,
    };

    fs::create_dir_all(dir).map_err(scaffold_err)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(scaffold_err)?;
    writeln!(file, "-- {file_name}: {description}").map_err(scaffold_err)?;

    log::info!("Created migration file {}", path.display());
    Ok(path)
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
