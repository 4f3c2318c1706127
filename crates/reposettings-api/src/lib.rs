//! Ruleset data contract of the hosted repository governance API.
//!
//! These types mirror the request/response shape of the remote rulesets
//! endpoint. The configuration layer treats a [`Ruleset`] as an opaque
//! payload identified by its name.

pub mod error;
pub mod ruleset;

pub use error::{Error, Result};
pub use ruleset::{
    ActorType, BypassActor, BypassMode, Conditions, Enforcement, RefNameCondition,
    RepositoryNameCondition, Rule, Ruleset, SourceType, Target,
};
