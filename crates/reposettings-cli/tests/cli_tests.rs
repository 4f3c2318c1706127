//! End-to-end tests that invoke the compiled `reposettings` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use reposettings_test_utils::{DocumentBuilder, SAMPLE_DOCUMENT, TestWorkspace, ruleset};

fn reposettings() -> Command {
    let mut cmd = Command::cargo_bin("reposettings").unwrap();
    cmd.env_remove("GITHUB_TOKEN").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_exits_zero() {
    reposettings()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_prints_plan_for_sample_document() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_settings(SAMPLE_DOCUMENT);

    reposettings()
        .arg("--config")
        .arg(&path)
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("Common rulesets (1):"))
        .stdout(predicate::str::contains(
            "Repository txqueuelen/reposettings (extend, 2 rulesets):",
        ))
        .stdout(predicate::str::contains("Repository txqueuelen/website"))
        .stderr(predicate::str::contains("test-token").not());
}

#[test]
fn test_legacy_positional_path() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_settings(SAMPLE_DOCUMENT);

    reposettings()
        .arg(&path)
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("Common rulesets"))
        .stderr(predicate::str::contains("legacy usage"));
}

#[test]
fn test_json_output_with_replace_policy() {
    let workspace = TestWorkspace::new();
    let yaml = DocumentBuilder::new()
        .common(ruleset("A"))
        .override_ruleset("repo1", ruleset("B"))
        .build();
    let path = workspace.write_settings(&yaml);

    let output = reposettings()
        .args(["--json", "--policy", "replace", "--config"])
        .arg(&path)
        .env("GITHUB_TOKEN", "test-token")
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["policy"], "replace");
    assert_eq!(plan["common"][0]["name"], "A");
    assert_eq!(plan["repositories"]["repo1"].as_array().unwrap().len(), 1);
    assert_eq!(plan["repositories"]["repo1"][0]["name"], "B");
}

#[test]
fn test_missing_config_flag_exits_1() {
    reposettings()
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn test_unreadable_file_exits_1() {
    let workspace = TestWorkspace::new();
    reposettings()
        .arg("--config")
        .arg(workspace.root().join("absent.yml"))
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not open file"));
}

#[test]
fn test_missing_token_exits_3() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_settings(SAMPLE_DOCUMENT);

    reposettings()
        .arg("--config")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_invalid_document_exits_5() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_settings("Overrides:\n  - name: a\n    enforcement: active\n");

    reposettings()
        .arg("--config")
        .arg(&path)
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Invalid settings at Overrides"));
}

#[test]
fn test_duplicate_repository_exits_5() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_settings("Overrides:\n  repo1: []\n  repo1: []\n");

    reposettings()
        .arg("--config")
        .arg(&path)
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Duplicate key 'repo1'"));
}

#[test]
fn test_verbose_logs_debug() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_settings(SAMPLE_DOCUMENT);

    reposettings()
        .args(["--verbose", "--config"])
        .arg(&path)
        .env("GITHUB_TOKEN", "test-token")
        .assert()
        .success()
        .stderr(predicate::str::contains("Decoded repository settings"));
}
