//! CLI tests for pload

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pload(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pload").expect("Binary not found");
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_load_prints_text_summary() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("joke.yaml"),
        "input_variables: [adjective]\ntemplate: Tell me a {adjective} joke.\n",
    )
    .unwrap();

    pload(&temp_dir)
        .args(["load", "joke.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Type: prompt"))
        .stdout(predicate::str::contains("Input variables: adjective"))
        .stdout(predicate::str::contains("Tell me a {adjective} joke."));
}

#[test]
fn test_load_prints_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("joke.json"),
        r#"{"input_variables": ["adjective"], "template": "Tell me a {adjective} joke."}"#,
    )
    .unwrap();

    let output = pload(&temp_dir)
        .args(["load", "joke.json", "--format", "json"])
        .output()
        .expect("Failed to run pload");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["_type"], "prompt");
    assert_eq!(value["template_format"], "f-string");
}

#[test]
fn test_load_reports_error_kind() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("chat.yaml"),
        "_type: chat\ninput_variables: []\ntemplate: hi\n",
    )
    .unwrap();

    pload(&temp_dir)
        .args(["load", "chat.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown prompt type chat"));
}

#[test]
fn test_load_rejects_unsupported_extension() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    pload(&temp_dir)
        .args(["load", "prompt.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(".toml"));
}

#[test]
fn test_config_prints_effective_settings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("loader.yml");
    fs::write(&config_path, "max-depth: 3\n").unwrap();

    pload(&temp_dir)
        .args(["--config", config_path.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max-depth: 3"))
        .stdout(predicate::str::contains("hub-url:"));
}
