//! Error types for configuration and data-table loading.
//!
//! Gameplay operations do not fail; a missing optional collaborator is a
//! logged no-op. Only reading external data can produce an error.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration / data-table errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON did not match the expected shape
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parsed but violate a constraint
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
