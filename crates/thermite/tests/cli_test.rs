//! Integration tests for the `thermite` CLI binary.
//!
//! Argument parsing, help output, completions, and full offline runs
//! against the built-in mock platform -- no live device required.
#![allow(clippy::unwrap_used)]

use std::io::Write as _;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `thermite` binary with env isolation.
fn thermite_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("thermite");
    cmd.env("HOME", "/tmp/thermite-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/thermite-cli-test-nonexistent")
        .env_remove("THERMITE_INVENTORY")
        .env_remove("THERMITE_OUTPUT")
        .env_remove("THERMITE_USERNAME")
        .env_remove("THERMITE_PASSWORD")
        .env_remove("THERMITE_ENABLE_PASSWORD");
    cmd
}

/// Write a mock-platform inventory to a temp file.
fn mock_inventory() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(
        br#"
[credentials]
username = "admin"
password = "pw"

[[devices]]
name = "lab1"
platform = "mock"
ip_address = "192.0.2.1"

[[devices]]
name = "legacy1"
platform = "ios"
ip_address = "192.0.2.2"
"#,
    )
    .unwrap();
    file
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = thermite_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    thermite_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("routers and switches")
            .and(predicate::str::contains("update"))
            .and(predicate::str::contains("config"))
            .and(predicate::str::contains("ping")),
    );
}

#[test]
fn test_version_flag() {
    thermite_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("thermite"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    thermite_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    thermite_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Catalog listing ─────────────────────────────────────────────────

#[test]
fn test_actions_lists_the_catalog() {
    thermite_cmd().arg("actions").assert().success().stdout(
        predicate::str::contains("ARP table")
            .and(predicate::str::contains("LLDP neighbors detail"))
            .and(predicate::str::contains("BGP configuration"))
            .and(predicate::str::contains("often unimplemented")),
    );
}

#[test]
fn test_actions_plain_output() {
    thermite_cmd()
        .args(["--output", "plain", "actions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ARP table\n"));
}

// ── Inventory ───────────────────────────────────────────────────────

#[test]
fn test_inventory_lists_devices() {
    let inv = mock_inventory();
    thermite_cmd()
        .args(["-i", inv.path().to_str().unwrap(), "inventory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lab1").and(predicate::str::contains("legacy1")));
}

#[test]
fn test_init_writes_starter_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.toml");

    thermite_cmd()
        .args(["-i", path.to_str().unwrap(), "init"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[[devices]]"));

    // A second init must refuse to overwrite.
    thermite_cmd()
        .args(["-i", path.to_str().unwrap(), "init"])
        .assert()
        .failure();
}

// ── End-to-end against the mock platform ────────────────────────────

#[test]
fn test_update_mock_device_succeeds() {
    let inv = mock_inventory();
    thermite_cmd()
        .args([
            "-i",
            inv.path().to_str().unwrap(),
            "update",
            "lab1",
            "--actions",
            "Facts,ARP table",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("=== lab1 (mock) ===")
                .and(predicate::str::contains("Facts:"))
                .and(predicate::str::contains("ARP table:")),
        );
}

#[test]
fn test_update_unregistered_platform_fails_per_device() {
    let inv = mock_inventory();
    let output = thermite_cmd()
        .args([
            "-i",
            inv.path().to_str().unwrap(),
            "update",
            "--actions",
            "Facts",
        ])
        .output()
        .unwrap();

    // lab1 (mock) succeeds, legacy1 (ios, no driver) fails: the batch
    // reports per device and exits non-zero.
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("lab1"), "expected lab1 in output:\n{text}");
    assert!(
        text.contains("no driver registered for platform 'ios'"),
        "expected the per-device driver error:\n{text}"
    );
}

#[test]
fn test_update_unknown_action_is_a_usage_error() {
    let inv = mock_inventory();
    let output = thermite_cmd()
        .args([
            "-i",
            inv.path().to_str().unwrap(),
            "update",
            "lab1",
            "--actions",
            "Routing table",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Routing table"), "{text}");
}

#[test]
fn test_config_commit_mock_device() {
    let inv = mock_inventory();
    thermite_cmd()
        .args([
            "-i",
            inv.path().to_str().unwrap(),
            "config",
            "commit",
            "lab1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== lab1 ==="));
}

#[test]
fn test_config_load_merge_with_candidate_file() {
    let inv = mock_inventory();
    let dir = tempfile::tempdir().unwrap();
    let candidate = dir.path().join("candidate.j2");
    std::fs::write(&candidate, "snmp-server source-interface {{ ip_address }}\n").unwrap();

    thermite_cmd()
        .args([
            "-i",
            inv.path().to_str().unwrap(),
            "config",
            "load-merge",
            "lab1",
            "--candidate",
            candidate.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("+snmp-server source-interface 192.0.2.1"));
}

#[test]
fn test_load_without_candidate_fails() {
    let inv = mock_inventory();
    thermite_cmd()
        .args([
            "-i",
            inv.path().to_str().unwrap(),
            "config",
            "load-replace",
            "lab1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no candidate"));
}

#[test]
fn test_ping_mock_device() {
    let inv = mock_inventory();
    thermite_cmd()
        .args([
            "-i",
            inv.path().to_str().unwrap(),
            "ping",
            "lab1",
            "--destination",
            "192.0.2.99",
        ])
        .assert()
        .success();
}

#[test]
fn test_unknown_device_is_reported() {
    let inv = mock_inventory();
    let output = thermite_cmd()
        .args(["-i", inv.path().to_str().unwrap(), "update", "edge9"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("edge9"), "{text}");
}

#[test]
fn test_update_json_output_is_parseable() {
    let inv = mock_inventory();
    let output = thermite_cmd()
        .args([
            "-i",
            inv.path().to_str().unwrap(),
            "--output",
            "json",
            "update",
            "lab1",
            "--actions",
            "Facts",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed[0]["name"], "lab1");
    assert!(parsed[0]["operational_data"]["Facts"].is_object());
}
