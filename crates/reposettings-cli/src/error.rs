//! Error types for reposettings-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a CLI run, each with its own exit code
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("settings file not set; pass --config <FILE>")]
    MissingConfig,

    #[error("could not open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read from the config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read $GITHUB_TOKEN")]
    MissingToken,

    #[error("error decoding settings ({}): {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: reposettings_config::Error,
    },

    /// Plan could not be rendered as JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Writing the plan failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingConfig | CliError::Open { .. } => 1,
            CliError::Read { .. } => 2,
            CliError::MissingToken => 3,
            CliError::Decode { .. } => 5,
            CliError::Json(_) | CliError::Io(_) => 10,
        }
    }
}
