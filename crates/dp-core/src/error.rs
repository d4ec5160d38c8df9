//! Error types for dp-core

use thiserror::Error;

/// Core error type for Dawnpost
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: IO error with file path context
    #[error("[E003] IO error at {path}: {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E004: YAML parse error
    #[error("[E004] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E005: Chat message timestamp is malformed
    #[error("[E005] Invalid message timestamp '{value}': expected <seconds>.<fraction>")]
    InvalidMessageTs { value: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
