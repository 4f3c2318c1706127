//! Error types for reposettings-api

pub type Result<T> = std::result::Result<T, Error>;

/// Validation failures for a ruleset payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Ruleset name must not be empty")]
    EmptyName,

    #[error("Rule #{index} of ruleset '{ruleset}' has an empty type")]
    EmptyRuleType { ruleset: String, index: usize },

    #[error("Bypass actor #{index} of ruleset '{ruleset}' is invalid: {reason}")]
    InvalidBypassActor {
        ruleset: String,
        index: usize,
        reason: String,
    },
}
