//! Rendering of the effective rulesets per repository

use std::collections::BTreeMap;
use std::fmt::Write;

use reposettings_api::Ruleset;
use reposettings_config::{MergePolicy, RepoSettings, RulesetList};
use serde::Serialize;

/// Effective rulesets for the common baseline and every overridden repository
#[derive(Debug, Serialize)]
pub struct Plan<'a> {
    pub policy: MergePolicy,
    /// Applies to every repository without an override
    pub common: &'a RulesetList,
    pub repositories: BTreeMap<&'a str, RulesetList>,
}

impl<'a> Plan<'a> {
    pub fn new(settings: &'a RepoSettings, policy: MergePolicy) -> Self {
        Self {
            policy,
            common: settings.common(),
            repositories: settings.plan(policy).into_iter().collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Common rulesets ({}):", self.common.len());
        render_list(&mut out, self.common);

        for (repo, rulesets) in &self.repositories {
            let _ = writeln!(
                out,
                "Repository {repo} ({}, {} rulesets):",
                self.policy,
                rulesets.len()
            );
            render_list(&mut out, rulesets);
        }
        out
    }
}

fn render_list(out: &mut String, rulesets: &RulesetList) {
    if rulesets.is_empty() {
        out.push_str("  (none)\n");
    }
    for ruleset in rulesets {
        let _ = writeln!(out, "  - {}", describe(ruleset));
    }
}

fn describe(ruleset: &Ruleset) -> String {
    let mut text = format!("{} [{}", ruleset.name, ruleset.enforcement);
    if let Some(target) = ruleset.target {
        let _ = write!(text, ", {target}");
    }
    text.push(']');
    let kinds: Vec<_> = ruleset.rules.iter().map(|r| r.kind.as_str()).collect();
    if !kinds.is_empty() {
        let _ = write!(text, " rules: {}", kinds.join(", "));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposettings_config::decode_str;

    const DOCUMENT: &str = r#"
Common:
  - name: protect-main
    target: branch
    enforcement: active
    rules:
      - type: deletion
      - type: non_fast_forward
Overrides:
  org/repo:
    - name: tags
      target: tag
      enforcement: evaluate
"#;

    #[test]
    fn test_render_text() {
        let settings = decode_str(DOCUMENT).unwrap();
        let text = Plan::new(&settings, MergePolicy::Extend).render_text();
        assert_eq!(
            text,
            "Common rulesets (1):\n\
             \x20 - protect-main [active, branch] rules: deletion, non_fast_forward\n\
             Repository org/repo (extend, 2 rulesets):\n\
             \x20 - protect-main [active, branch] rules: deletion, non_fast_forward\n\
             \x20 - tags [evaluate, tag]\n"
        );
    }

    #[test]
    fn test_render_empty() {
        let settings = RepoSettings::default();
        let text = Plan::new(&settings, MergePolicy::Replace).render_text();
        assert_eq!(text, "Common rulesets (0):\n  (none)\n");
    }

    #[test]
    fn test_json() {
        let settings = decode_str(DOCUMENT).unwrap();
        let json = Plan::new(&settings, MergePolicy::Replace).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["policy"], "replace");
        assert_eq!(value["common"][0]["name"], "protect-main");
        assert_eq!(value["repositories"]["org/repo"][0]["name"], "tags");
        assert_eq!(value["repositories"]["org/repo"].as_array().unwrap().len(), 1);
    }
}
