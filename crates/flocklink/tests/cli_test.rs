//! Integration tests for the `flocklink` CLI binary.
//!
//! Validates argument parsing, help output, error handling, and a full
//! list round trip against a mock backend.
#![allow(clippy::unwrap_used)]

use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `flocklink` binary with env isolation.
///
/// Clears all `FLOCKLINK_*` env vars and points config directories at
/// a nonexistent path so tests never touch the user's configuration.
fn flocklink_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("flocklink").unwrap();
    cmd.env("HOME", "/tmp/flocklink-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/flocklink-cli-test-nonexistent")
        .env_remove("FLOCKLINK_PROFILE")
        .env_remove("FLOCKLINK_SERVER")
        .env_remove("FLOCKLINK_TOKEN")
        .env_remove("FLOCKLINK_OUTPUT")
        .env_remove("FLOCKLINK_INSECURE")
        .env_remove("FLOCKLINK_TIMEOUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Mount the endpoints every session touches on connect.
async fn mount_session(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/users/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1, "username": "ops",
        })))
        .mount(server)
        .await;
    for list_path in [
        "/api/farms/",
        "/api/workers/",
        "/api/programs/",
        "/api/reports/templates/",
        "/api/reports/scheduled/",
        "/api/reports/executions/",
        "/api/rotem/farms/",
        "/api/rotem/data/recent/",
        "/api/rotem/logs/",
        "/api/rotem/predictions/",
    ] {
        Mock::given(method("GET"))
            .and(path(list_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/rotem/summary/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_farms": 0, "active_controllers": 0, "failing_controllers": 0,
        })))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = flocklink_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn help_flag_lists_commands() {
    flocklink_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("farms")
            .and(predicate::str::contains("workers"))
            .and(predicate::str::contains("programs"))
            .and(predicate::str::contains("rotem")),
    );
}

#[test]
fn version_flag() {
    flocklink_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flocklink"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn invalid_subcommand() {
    let output = flocklink_cmd().arg("shear-sheep").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("shear-sheep"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn farms_list_without_config_fails_with_help_text() {
    let output = flocklink_cmd().args(["farms", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("config") || text.contains("server"),
        "Expected configuration hint:\n{text}"
    );
}

#[test]
fn bad_token_exits_with_auth_code() {
    let rt = runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/me/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "detail": "Invalid token.",
            })))
            .mount(&server)
            .await;
        server
    });

    flocklink_cmd()
        .args(["--server", &server.uri(), "--token", "bogus", "farms", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("token"));
}

// ── End-to-end against a mock backend ───────────────────────────────

#[test]
fn farms_list_renders_json() {
    let rt = runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/farms/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": 1, "name": "Hilltop", "location": "North valley"}],
                "count": 1,
                "next": null,
            })))
            .mount(&server)
            .await;
        mount_session(&server).await;
        server
    });

    flocklink_cmd()
        .args([
            "--server",
            &server.uri(),
            "--token",
            "test-token",
            "--output",
            "json",
            "farms",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hilltop"));
}

#[test]
fn farms_plain_output_emits_ids_only() {
    let rt = runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/farms/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 4, "name": "Riverbend"},
            ])))
            .mount(&server)
            .await;
        mount_session(&server).await;
        server
    });

    flocklink_cmd()
        .args([
            "--server",
            &server.uri(),
            "--token",
            "test-token",
            "--output",
            "plain",
            "farms",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("4\n"));
}

/// The mock server needs a live runtime for the whole test; the CLI
/// under test runs as a separate process with its own.
fn runtime() -> tokio::runtime::Runtime {
    // Multi-thread so the mock server keeps serving while the test
    // thread drives the child process.
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}
