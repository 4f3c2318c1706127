//! Error types for reposettings-config

use std::path::PathBuf;

/// Result type for reposettings-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading repository settings.
///
/// Every variant is terminal: a failed decode never yields partial settings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not a well-formed YAML document
    #[error("Failed to parse settings document: {message}")]
    Parse { message: String },

    /// A value could not be turned into its JSON-safe form
    #[error("Cannot normalize value at {path}: {message}")]
    Normalization { path: String, message: String },

    /// The document does not have the expected shape
    #[error("Invalid settings at {path}: {message}")]
    Schema { path: String, message: String },

    /// A key that must be unique appears more than once
    #[error("Duplicate key '{key}' at {path}")]
    DuplicateKey { path: String, key: String },

    /// Settings could not be rendered back to YAML
    #[error("Failed to render settings: {message}")]
    Render { message: String },

    /// Unknown merge policy name
    #[error("Invalid merge policy: {policy} (expected 'extend' or 'replace')")]
    InvalidPolicy { policy: String },

    /// The settings file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn parse(message: impl ToString) -> Self {
        Self::Parse {
            message: message.to_string(),
        }
    }

    pub fn schema(path: impl ToString, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn duplicate_key(path: impl ToString, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            path: path.to_string(),
            key: key.into(),
        }
    }

    /// Path of the offending value, when the error carries one
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::Normalization { path, .. }
            | Error::Schema { path, .. }
            | Error::DuplicateKey { path, .. } => Some(path),
            Error::Parse { .. }
            | Error::Render { .. }
            | Error::InvalidPolicy { .. }
            | Error::Io { .. } => None,
        }
    }
}
