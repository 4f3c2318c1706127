//! Shared test utilities for the reposettings workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`] - ruleset constructors and a settings document builder
//! - [`workspace`] - [`TestWorkspace`] temporary directory holding settings files

pub mod fixtures;
pub mod workspace;

pub use fixtures::{DocumentBuilder, SAMPLE_DOCUMENT, ruleset, ruleset_with_rules};
pub use workspace::TestWorkspace;
