//! Effective ruleset resolution per repository

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::settings::{RepoSettings, RulesetList};

/// How a repository's override list combines with the common list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Keep the common rulesets; an override with the same name replaces the
    /// common entry in place, new names are appended in declaration order.
    #[default]
    Extend,
    /// The override list is used instead of the common list.
    Replace,
}

impl MergePolicy {
    /// Combine `common` with a repository's `overrides`
    pub fn merge(self, common: &RulesetList, overrides: &RulesetList) -> RulesetList {
        match self {
            MergePolicy::Replace => overrides.clone(),
            MergePolicy::Extend => {
                let replaced = common
                    .iter()
                    .map(|ruleset| overrides.get(&ruleset.name).unwrap_or(ruleset).clone());
                let added = overrides
                    .iter()
                    .filter(|ruleset| !common.contains(&ruleset.name))
                    .cloned();
                replaced.chain(added).collect()
            }
        }
    }
}

impl FromStr for MergePolicy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extend" => Ok(MergePolicy::Extend),
            "replace" => Ok(MergePolicy::Replace),
            _ => Err(Error::InvalidPolicy {
                policy: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::Extend => write!(f, "extend"),
            MergePolicy::Replace => write!(f, "replace"),
        }
    }
}

impl RepoSettings {
    /// Effective rulesets for `repo` under the default [`MergePolicy`]
    pub fn resolve(&self, repo: &str) -> RulesetList {
        self.resolve_with(repo, MergePolicy::default())
    }

    /// Effective rulesets for `repo`.
    ///
    /// A repository without an override gets exactly the common list,
    /// whatever the policy.
    pub fn resolve_with(&self, repo: &str, policy: MergePolicy) -> RulesetList {
        match self.override_for(repo) {
            Some(overrides) => {
                tracing::trace!(repo, %policy, "Applying repository override");
                policy.merge(self.common(), overrides)
            }
            None => self.common().clone(),
        }
    }

    /// Effective rulesets for every repository that declares an override,
    /// sorted by repository name
    pub fn plan(&self, policy: MergePolicy) -> Vec<(&str, RulesetList)> {
        self.repositories()
            .map(|repo| (repo, self.resolve_with(repo, policy)))
            .collect()
    }
}
