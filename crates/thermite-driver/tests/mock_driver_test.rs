// Integration tests for the driver registry and the mock driver.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;

use thermite_driver::mock::{LoadMode, MockDriver};
use thermite_driver::{ConnectionKind, Credentials, DriverError, DriverRegistry, ProbeOptions};

// ── Helpers ─────────────────────────────────────────────────────────

fn creds() -> Credentials {
    Credentials::new("192.0.2.1", "admin", SecretString::from("pw".to_owned()))
}

fn registry_with(driver: MockDriver) -> DriverRegistry {
    let mut registry = DriverRegistry::new();
    registry.register("mock", Arc::new(driver));
    registry
}

// ── Resolution ──────────────────────────────────────────────────────

#[tokio::test]
async fn unregistered_platform_fails_without_opening() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let registry = registry_with(driver);

    let err = registry
        .resolve(&creds(), "ios")
        .await
        .err()
        .expect("resolution should fail");

    assert!(matches!(
        err,
        DriverError::UnsupportedPlatform { ref platform } if platform == "ios"
    ));
    assert_eq!(ledger.lock().expect("ledger").opened, 0);
}

#[tokio::test]
async fn platform_resolution_is_case_insensitive() {
    let registry = registry_with(MockDriver::new());

    let mut session = registry
        .resolve(&creds(), "MOCK")
        .await
        .expect("uppercase key should resolve");
    session.close().await.expect("close");
}

#[tokio::test]
async fn refused_connection_surfaces_kind() {
    let driver = MockDriver::new()
        .refusing_connections(ConnectionKind::AuthenticationFailed, "bad password");
    let registry = registry_with(driver);

    let err = registry
        .resolve(&creds(), "mock")
        .await
        .err()
        .expect("open should fail");

    assert!(err.is_auth_failure());
    assert!(!err.is_transient());
}

// ── Capability behavior ─────────────────────────────────────────────

#[tokio::test]
async fn canned_getter_returns_payload() {
    let arp = json!([{"ip": "10.0.0.2", "mac": "aa:bb:cc:dd:ee:ff", "interface": "ge-0/0/0"}]);
    let driver = MockDriver::new().with_response("get_arp_table", arp.clone());
    let registry = registry_with(driver);

    let mut session = registry.resolve(&creds(), "mock").await.expect("open");
    assert_eq!(session.get_arp_table().await.expect("arp"), arp);
    session.close().await.expect("close");
}

#[tokio::test]
async fn unsupported_getter_signals_not_supported() {
    let driver = MockDriver::new().with_unsupported("get_users");
    let registry = registry_with(driver);

    let mut session = registry.resolve(&creds(), "mock").await.expect("open");
    let err = session.get_users().await.err().expect("should be unsupported");
    assert!(err.is_not_supported());
    session.close().await.expect("close");
}

#[tokio::test]
async fn load_then_commit_updates_ledger() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let registry = registry_with(driver);

    let mut session = registry.resolve(&creds(), "mock").await.expect("open");
    session
        .load_merge_candidate("hostname edge1\n")
        .await
        .expect("load");

    let diff = session.compare_config().await.expect("compare");
    assert_eq!(diff, "+hostname edge1");

    session.commit_config().await.expect("commit");
    session.close().await.expect("close");

    let ledger = ledger.lock().expect("ledger");
    assert_eq!(ledger.loaded, vec![(LoadMode::Merge, "hostname edge1\n".to_owned())]);
    assert_eq!(ledger.commits, 1);
    assert_eq!(ledger.closed, 1);
}

#[tokio::test]
async fn cli_defaults_to_empty_output_per_command() {
    let registry = registry_with(MockDriver::new());

    let mut session = registry.resolve(&creds(), "mock").await.expect("open");
    let out = session
        .cli(&["show logging".to_owned()])
        .await
        .expect("cli");
    assert_eq!(out, json!({"show logging": ""}));
    session.close().await.expect("close");
}

#[tokio::test]
async fn probes_return_canned_payloads() {
    let driver = MockDriver::new().with_response("ping", json!({"success": {"probes_sent": 5}}));
    let registry = registry_with(driver);

    let mut session = registry.resolve(&creds(), "mock").await.expect("open");
    let options = ProbeOptions::to_destination("192.0.2.99");
    let result = session.ping(&options).await.expect("ping");
    assert_eq!(result["success"]["probes_sent"], 5);
    session.close().await.expect("close");
}
