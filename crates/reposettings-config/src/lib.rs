//! Repository ruleset settings: decoding, normalization and merge resolution.
//!
//! A settings document is a YAML file with two top-level sections:
//!
//! ```yaml
//! Common:
//!   - name: protect-main
//!     enforcement: active
//! Overrides:
//!   txqueuelen/reposettings:
//!     - name: release-tags
//!       target: tag
//!       enforcement: active
//! ```
//!
//! Decoding runs as a single pass:
//!
//! 1. the YAML source is parsed into a generic [`Node`] tree,
//! 2. [`normalize`] rewrites it into a canonical JSON tree,
//! 3. the canonical tree is encoded as strict JSON,
//! 4. the JSON is decoded into [`RepoSettings`].
//!
//! [`RepoSettings::resolve`] then yields the effective rulesets for a
//! repository.

pub mod decode;
pub mod error;
pub mod normalize;
pub mod path;
pub mod repo_name;
pub mod resolve;
pub mod settings;
pub mod tree;

pub use decode::{decode, decode_str};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use path::FieldPath;
pub use repo_name::canonical_repo_name;
pub use resolve::MergePolicy;
pub use settings::{RepoSettings, RulesetList};
pub use tree::Node;

pub use reposettings_api::Ruleset;
