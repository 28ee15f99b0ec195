//! Core error types for ttm-core.
//!
//! Three families matter to callers:
//! - [`ConfigError`]: invalid or unreadable configuration, fatal at startup.
//! - [`PersistenceError`]: the statistics file could not be rewritten. The
//!   in-memory counters keep their values.
//! - [`LoadError`]: the statistics file could not be read. Never surfaced;
//!   the store logs it and falls back to an empty record.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ttm-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Failure to rewrite the statistics file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The record could not be serialized
    #[error("Failed to encode statistics: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing or flushing the temporary file failed
    #[error("Failed to write statistics next to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not replace the target
    #[error("Failed to replace statistics file {path}: {source}")]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to read the statistics file. Recovered inside the store.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
