//! Settings model: common rulesets plus per-repository overrides

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::str::FromStr;

use reposettings_api::Ruleset;
use serde::Serialize;

use crate::decode;
use crate::error::{Error, Result};
use crate::path::FieldPath;
use crate::repo_name::canonical_repo_name;

/// Ordered list of rulesets, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RulesetList(Vec<Ruleset>);

impl RulesetList {
    pub fn new(rulesets: Vec<Ruleset>) -> Self {
        Self(rulesets)
    }

    /// Find a ruleset by name
    pub fn get(&self, name: &str) -> Option<&Ruleset> {
        self.0.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Ruleset names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|r| r.name.as_str())
    }

    pub fn into_vec(self) -> Vec<Ruleset> {
        self.0
    }

    /// Validate every ruleset and require unique names.
    ///
    /// `path` is the location of the list itself.
    pub(crate) fn check(&self, path: &FieldPath) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.0.len());
        for (index, ruleset) in self.0.iter().enumerate() {
            ruleset
                .validate()
                .map_err(|e| Error::schema(path.index(index), e.to_string()))?;
            if !seen.insert(ruleset.name.as_str()) {
                return Err(Error::duplicate_key(path, ruleset.name.clone()));
            }
        }
        Ok(())
    }
}

impl Deref for RulesetList {
    type Target = [Ruleset];

    fn deref(&self) -> &[Ruleset] {
        &self.0
    }
}

impl From<Vec<Ruleset>> for RulesetList {
    fn from(rulesets: Vec<Ruleset>) -> Self {
        Self(rulesets)
    }
}

impl FromIterator<Ruleset> for RulesetList {
    fn from_iter<I: IntoIterator<Item = Ruleset>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for RulesetList {
    type Item = Ruleset;
    type IntoIter = std::vec::IntoIter<Ruleset>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RulesetList {
    type Item = &'a Ruleset;
    type IntoIter = std::slice::Iter<'a, Ruleset>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Repository settings as declared in one document.
///
/// Built once per load and never mutated afterwards; share it freely across
/// threads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepoSettings {
    #[serde(rename = "Common")]
    common: RulesetList,
    #[serde(rename = "Overrides")]
    overrides: BTreeMap<String, RulesetList>,
}

impl RepoSettings {
    /// Assemble settings from already-typed parts.
    ///
    /// Applies the same checks as decoding: valid rulesets, unique ruleset
    /// names per list, non-empty and unique canonical repository names.
    pub fn new(
        common: RulesetList,
        overrides: impl IntoIterator<Item = (String, RulesetList)>,
    ) -> Result<Self> {
        let mut builder = SettingsBuilder::default();
        builder.common(common, &FieldPath::root().key(decode::COMMON_KEY))?;
        let overrides_path = FieldPath::root().key(decode::OVERRIDES_KEY);
        for (repo, list) in overrides {
            builder.add_override(&repo, list, &overrides_path)?;
        }
        Ok(builder.build())
    }

    /// Read and decode a settings file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(?path, "Decoding repository settings file");
        decode::decode(&bytes)
    }

    /// Render the settings as a YAML document that decodes back to `self`
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Render {
            message: e.to_string(),
        })
    }

    /// Rulesets applied to every repository
    pub fn common(&self) -> &RulesetList {
        &self.common
    }

    /// Override lists keyed by canonical repository name
    pub fn overrides(&self) -> &BTreeMap<String, RulesetList> {
        &self.overrides
    }

    /// Override list for a repository, if one is declared
    pub fn override_for(&self, repo: &str) -> Option<&RulesetList> {
        self.overrides.get(canonical_repo_name(repo).as_str())
    }

    /// Repositories with an override, sorted by name
    pub fn repositories(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.overrides.is_empty()
    }
}

impl FromStr for RepoSettings {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode::decode_str(s)
    }
}

/// Accumulates checked parts of a [`RepoSettings`]
#[derive(Debug, Default)]
pub(crate) struct SettingsBuilder {
    common: RulesetList,
    overrides: BTreeMap<String, RulesetList>,
}

impl SettingsBuilder {
    pub(crate) fn common(&mut self, list: RulesetList, path: &FieldPath) -> Result<()> {
        list.check(path)?;
        self.common = list;
        Ok(())
    }

    /// Add the override list for `raw_repo`; `path` points at the overrides mapping.
    pub(crate) fn add_override(
        &mut self,
        raw_repo: &str,
        list: RulesetList,
        path: &FieldPath,
    ) -> Result<()> {
        let repo = canonical_repo_name(raw_repo);
        if repo.is_empty() {
            return Err(Error::schema(
                path.key(raw_repo),
                "repository name must not be empty",
            ));
        }
        if self.overrides.contains_key(&repo) {
            return Err(Error::duplicate_key(path, repo));
        }
        list.check(&path.key(raw_repo))?;
        self.overrides.insert(repo, list);
        Ok(())
    }

    pub(crate) fn build(self) -> RepoSettings {
        RepoSettings {
            common: self.common,
            overrides: self.overrides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposettings_api::Enforcement;

    fn ruleset(name: &str) -> Ruleset {
        Ruleset::new(name, Enforcement::Active)
    }

    #[test]
    fn test_new_canonicalizes_override_keys() {
        let settings = RepoSettings::new(
            RulesetList::default(),
            [(
                "https://github.com/org/repo".to_string(),
                RulesetList::new(vec![ruleset("a")]),
            )],
        )
        .unwrap();
        assert_eq!(settings.repositories().collect::<Vec<_>>(), vec!["org/repo"]);
        assert!(settings.override_for("github.com/org/repo").is_some());
    }

    #[test]
    fn test_new_rejects_colliding_repositories() {
        let err = RepoSettings::new(
            RulesetList::default(),
            [
                ("org/repo".to_string(), RulesetList::default()),
                ("https://github.com/org/repo".to_string(), RulesetList::default()),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { ref key, .. } if key == "org/repo"));
    }

    #[test]
    fn test_new_rejects_duplicate_ruleset_names() {
        let err = RepoSettings::new(
            RulesetList::new(vec![ruleset("a"), ruleset("a")]),
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err.path(), Some("Common"));
    }

    #[test]
    fn test_new_rejects_invalid_ruleset() {
        let err = RepoSettings::new(
            RulesetList::new(vec![ruleset("ok"), ruleset("")]),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Schema { ref path, .. } if path == "Common[1]"));
    }

    #[test]
    fn test_ruleset_list_lookup() {
        let list: RulesetList = vec![ruleset("a"), ruleset("b")].into_iter().collect();
        assert!(list.contains("b"));
        assert!(!list.contains("c"));
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(RepoSettings::default().is_empty());
    }
}
