//! Ruleset and settings document fixtures.

use reposettings_api::{Enforcement, Rule, Ruleset, Target};
use serde_yaml::{Mapping, Value};

/// A realistic settings document with one common ruleset and two overrides.
pub const SAMPLE_DOCUMENT: &str = r#"# Rulesets applied to every repository
Common:
  - name: protect-default-branch
    target: branch
    enforcement: active
    conditions:
      ref_name:
        include: ["~DEFAULT_BRANCH"]
        exclude: []
    rules:
      - type: deletion
      - type: non_fast_forward
      - type: pull_request
        parameters:
          required_approving_review_count: 1
          dismiss_stale_reviews_on_push: true

Overrides:
  txqueuelen/reposettings:
    - name: protect-default-branch
      target: branch
      enforcement: active
      rules:
        - type: pull_request
          parameters:
            required_approving_review_count: 2
    - name: release-tags
      target: tag
      enforcement: evaluate
      rules:
        - type: creation
  https://github.com/txqueuelen/website:
    - name: release-tags
      target: tag
      enforcement: active
"#;

/// An active branch ruleset with a single `deletion` rule
pub fn ruleset(name: &str) -> Ruleset {
    ruleset_with_rules(name, &["deletion"])
}

/// An active branch ruleset with parameterless rules of the given types
pub fn ruleset_with_rules(name: &str, rule_types: &[&str]) -> Ruleset {
    rule_types.iter().fold(
        Ruleset::new(name, Enforcement::Active).with_target(Target::Branch),
        |ruleset, kind| ruleset.with_rule(Rule::new(*kind)),
    )
}

/// Builds a settings document as YAML text.
///
/// # Example
///
/// ```rust
/// use reposettings_test_utils::{DocumentBuilder, ruleset};
///
/// let yaml = DocumentBuilder::new()
///     .common(ruleset("a"))
///     .override_ruleset("repo1", ruleset("b"))
///     .build();
/// assert!(yaml.contains("Overrides:"));
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    common: Vec<Ruleset>,
    overrides: Vec<(String, Vec<Ruleset>)>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ruleset to the common list
    pub fn common(mut self, ruleset: Ruleset) -> Self {
        self.common.push(ruleset);
        self
    }

    /// Append a ruleset to the override list of `repo`
    pub fn override_ruleset(mut self, repo: &str, ruleset: Ruleset) -> Self {
        match self.overrides.iter_mut().find(|(name, _)| name == repo) {
            Some((_, list)) => list.push(ruleset),
            None => self.overrides.push((repo.to_string(), vec![ruleset])),
        }
        self
    }

    /// Render the document; sections that were never touched are omitted.
    pub fn build(&self) -> String {
        let mut root = Mapping::new();
        if !self.common.is_empty() {
            root.insert(
                Value::from("Common"),
                serde_yaml::to_value(&self.common).unwrap(),
            );
        }
        if !self.overrides.is_empty() {
            let mut overrides = Mapping::new();
            for (repo, list) in &self.overrides {
                overrides.insert(Value::from(repo.as_str()), serde_yaml::to_value(list).unwrap());
            }
            root.insert(Value::from("Overrides"), Value::Mapping(overrides));
        }
        if root.is_empty() {
            return String::new();
        }
        serde_yaml::to_string(&root).unwrap()
    }
}
