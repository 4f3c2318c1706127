//! Ruleset schema as accepted by the remote rulesets endpoint
//!
//! # Example YAML
//!
//! ```yaml
//! name: protect-main
//! target: branch
//! enforcement: active
//! bypass_actors:
//!   - actor_id: 5
//!     actor_type: RepositoryRole
//!     bypass_mode: always
//! conditions:
//!   ref_name:
//!     include: ["~DEFAULT_BRANCH"]
//!     exclude: []
//! rules:
//!   - type: deletion
//!   - type: pull_request
//!     parameters:
//!       required_approving_review_count: 2
//! ```
//!
//! Unknown fields are ignored, matching how API clients decode responses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A repository ruleset
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Ruleset {
    /// Read-only identifier assigned by the remote service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Ruleset name, unique per repository
    pub name: String,
    /// Which refs the ruleset targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Kind of the entity owning the ruleset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    /// Name of the entity owning the ruleset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub enforcement: Enforcement,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bypass_actors: Vec<BypassActor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

impl Ruleset {
    /// Create an empty ruleset with the given name and enforcement level
    pub fn new(name: impl Into<String>, enforcement: Enforcement) -> Self {
        Self {
            id: None,
            name: name.into(),
            target: None,
            source_type: None,
            source: None,
            enforcement,
            bypass_actors: Vec::new(),
            conditions: None,
            rules: Vec::new(),
        }
    }

    /// Set the ruleset target
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Append a rule
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a bypass actor
    pub fn with_bypass_actor(mut self, actor: BypassActor) -> Self {
        self.bypass_actors.push(actor);
        self
    }

    /// Set the ruleset conditions
    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Check the constraints the remote service enforces on submission.
    ///
    /// Serde already guarantees the shape; this covers the value-level rules
    /// that a type alone cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.kind.trim().is_empty() {
                return Err(Error::EmptyRuleType {
                    ruleset: self.name.clone(),
                    index,
                });
            }
        }

        for (index, actor) in self.bypass_actors.iter().enumerate() {
            let reason = match (actor.actor_type, actor.actor_id) {
                (ActorType::DeployKey, Some(_)) => Some("DeployKey actors must not set actor_id"),
                (ActorType::DeployKey, None) => None,
                (_, None) => Some("actor_id is required"),
                (_, Some(id)) if id <= 0 => Some("actor_id must be positive"),
                (_, Some(_)) => None,
            };
            if let Some(reason) = reason {
                return Err(Error::InvalidBypassActor {
                    ruleset: self.name.clone(),
                    index,
                    reason: reason.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Ref kind a ruleset applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Branch,
    Tag,
    Push,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Branch => write!(f, "branch"),
            Target::Tag => write!(f, "tag"),
            Target::Push => write!(f, "push"),
        }
    }
}

/// Owner kind of a ruleset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SourceType {
    Repository,
    Organization,
}

/// Enforcement level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforcement {
    /// Ruleset is stored but not evaluated
    Disabled,
    /// Ruleset is enforced
    Active,
    /// Ruleset is evaluated and reported without blocking
    Evaluate,
}

impl fmt::Display for Enforcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enforcement::Disabled => write!(f, "disabled"),
            Enforcement::Active => write!(f, "active"),
            Enforcement::Evaluate => write!(f, "evaluate"),
        }
    }
}

/// An actor allowed to bypass the ruleset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BypassActor {
    /// Role, team or app ID. Absent for deploy keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<i64>,
    pub actor_type: ActorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_mode: Option<BypassMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ActorType {
    RepositoryRole,
    Team,
    Integration,
    OrganizationAdmin,
    DeployKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BypassMode {
    Always,
    PullRequest,
}

/// Conditions selecting the refs and repositories a ruleset applies to
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Conditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<RefNameCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<RepositoryNameCondition>,
}

/// Ref name patterns (`~DEFAULT_BRANCH`, `~ALL`, fnmatch globs)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RefNameCondition {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Repository name patterns, only meaningful for organization rulesets
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RepositoryNameCondition {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
}

/// A single rule inside a ruleset.
///
/// Parameters differ per rule type and are carried as raw JSON.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Rule {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl Rule {
    /// A rule without parameters (e.g. `deletion`, `non_fast_forward`)
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parameters: None,
        }
    }

    /// A rule with parameters
    pub fn with_parameters(kind: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            parameters: Some(parameters),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_minimal_ruleset() {
        let ruleset = Ruleset::new("protect-main", Enforcement::Active);
        assert!(ruleset.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let ruleset = Ruleset::new("   ", Enforcement::Active);
        assert_eq!(ruleset.validate(), Err(Error::EmptyName));
    }

    #[test]
    fn test_validate_rejects_empty_rule_type() {
        let ruleset = Ruleset::new("r", Enforcement::Active)
            .with_rule(Rule::new("deletion"))
            .with_rule(Rule::new(""));
        assert_eq!(
            ruleset.validate(),
            Err(Error::EmptyRuleType {
                ruleset: "r".to_string(),
                index: 1
            })
        );
    }

    #[test]
    fn test_validate_deploy_key_without_id() {
        let ruleset = Ruleset::new("r", Enforcement::Active).with_bypass_actor(BypassActor {
            actor_id: None,
            actor_type: ActorType::DeployKey,
            bypass_mode: Some(BypassMode::Always),
        });
        assert!(ruleset.validate().is_ok());
    }

    #[test]
    fn test_validate_team_requires_id() {
        let ruleset = Ruleset::new("r", Enforcement::Active).with_bypass_actor(BypassActor {
            actor_id: None,
            actor_type: ActorType::Team,
            bypass_mode: None,
        });
        assert!(matches!(
            ruleset.validate(),
            Err(Error::InvalidBypassActor { index: 0, .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Enforcement::Evaluate.to_string(), "evaluate");
        assert_eq!(Target::Branch.to_string(), "branch");
    }
}
