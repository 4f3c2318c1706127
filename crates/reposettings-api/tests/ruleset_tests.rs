//! Tests for decoding ruleset payloads

use pretty_assertions::assert_eq;
use reposettings_api::{
    ActorType, BypassMode, Enforcement, RefNameCondition, Rule, Ruleset, Target,
};
use rstest::rstest;

#[test]
fn test_parse_ruleset_minimal() {
    let yaml = r#"
name: protect-main
enforcement: active
"#;

    let ruleset: Ruleset = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(ruleset, Ruleset::new("protect-main", Enforcement::Active));
    assert!(ruleset.target.is_none());
    assert!(ruleset.rules.is_empty());
}

#[test]
fn test_parse_ruleset_full() {
    let yaml = r#"
id: 42
name: protect-main
target: branch
source_type: Repository
source: txqueuelen/reposettings
enforcement: evaluate
bypass_actors:
  - actor_id: 5
    actor_type: RepositoryRole
    bypass_mode: pull_request
  - actor_type: DeployKey
conditions:
  ref_name:
    include: ["~DEFAULT_BRANCH", "release/*"]
    exclude: []
rules:
  - type: deletion
  - type: pull_request
    parameters:
      required_approving_review_count: 2
      dismiss_stale_reviews_on_push: true
"#;

    let ruleset: Ruleset = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(ruleset.id, Some(42));
    assert_eq!(ruleset.target, Some(Target::Branch));
    assert_eq!(ruleset.enforcement, Enforcement::Evaluate);
    assert_eq!(ruleset.bypass_actors.len(), 2);
    assert_eq!(ruleset.bypass_actors[0].actor_type, ActorType::RepositoryRole);
    assert_eq!(
        ruleset.bypass_actors[0].bypass_mode,
        Some(BypassMode::PullRequest)
    );
    assert_eq!(ruleset.bypass_actors[1].actor_id, None);

    let conditions = ruleset.conditions.as_ref().unwrap();
    assert_eq!(
        conditions.ref_name,
        Some(RefNameCondition {
            include: vec!["~DEFAULT_BRANCH".to_string(), "release/*".to_string()],
            exclude: vec![],
        })
    );

    assert_eq!(ruleset.rules[0], Rule::new("deletion"));
    assert_eq!(ruleset.rules[1].kind, "pull_request");
    assert_eq!(
        ruleset.rules[1].parameters.as_ref().unwrap()["required_approving_review_count"],
        2
    );
    assert!(ruleset.validate().is_ok());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
name: protect-main
enforcement: active
node_id: RRS_lACqUmVwb3NpdG9yec4AAAAB
_links:
  self:
    href: https://example.invalid
"#;

    let ruleset: Ruleset = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(ruleset.name, "protect-main");
}

#[rstest]
#[case("enforcement: active\n", "name")]
#[case("name: x\n", "enforcement")]
#[case("name: x\nenforcement: sometimes\n", "sometimes")]
#[case("name: x\nenforcement: active\ntarget: everything\n", "everything")]
fn test_invalid_ruleset_reports_field(#[case] yaml: &str, #[case] needle: &str) {
    let err = serde_yaml::from_str::<Ruleset>(yaml).unwrap_err();
    assert!(
        err.to_string().contains(needle),
        "error should mention '{}': {}",
        needle,
        err
    );
}

#[test]
fn test_serialize_skips_empty_fields() {
    let ruleset = Ruleset::new("protect-main", Enforcement::Active).with_target(Target::Tag);
    let json = serde_json::to_value(&ruleset).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "protect-main",
            "target": "tag",
            "enforcement": "active",
        })
    );
}
