//! Integration tests for the `pharmadesk` binary.
//!
//! Argument parsing, help, completions, config handling, and the login
//! guard run without a backend; the remaining tests point the binary at a
//! wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command with env isolation: config in `dir`, keyring off, and
/// every `PHARMADESK_*` override cleared.
fn pharmadesk_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("pharmadesk");
    cmd.env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("PHARMADESK_CONFIG", dir.join("config.toml"))
        .env("PHARMADESK_DEFAULTS__USE_KEYRING", "false")
        .env_remove("PHARMADESK_PROFILE")
        .env_remove("PHARMADESK_API_URL")
        .env_remove("PHARMADESK_TOKEN")
        .env_remove("PHARMADESK_OUTPUT")
        .env_remove("PHARMADESK_INSECURE")
        .env_remove("PHARMADESK_TIMEOUT")
        .env_remove("PHARMADESK_PASSWORD")
        .env_remove("PHARMADESK_NEW_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn owner_json() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Ana",
        "fistLastName": "Rojas",
        "secondSurname": null,
        "ci": "4455667",
        "cellphone": "70000000",
        "gmail": "ana@example.com"
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = pharmadesk_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("owners")
            .and(predicate::str::contains("pharmacies"))
            .and(predicate::str::contains("users"))
            .and(predicate::str::contains("shifts"))
            .and(predicate::str::contains("login")),
    );
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pharmadesk"));
}

#[test]
fn test_completions_zsh() {
    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args(["--output", "xml", "owners", "list"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_override() {
    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_url_then_show() {
    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args(["config", "set-url", "https://pharmacies.example.org"])
        .assert()
        .success();

    assert!(dir.path().join("config.toml").exists());

    pharmadesk_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://pharmacies.example.org"));
}

#[test]
fn test_config_rejects_non_http_url() {
    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args(["config", "set-url", "ftp://example.org"])
        .assert()
        .code(2);
}

#[test]
fn test_profile_name_with_path_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args(["--profile", "../escape", "logout"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path separators"));

    pharmadesk_cmd(dir.path())
        .args(["--profile", "../escape", "config", "set-url", "http://localhost:5000"])
        .assert()
        .code(2);

    assert!(!dir.path().join("escape").exists());
    assert!(!dir.path().join("config.toml").exists());
}

// ── Login guard ─────────────────────────────────────────────────────

#[test]
fn test_protected_command_requires_login() {
    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args(["--api-url", "http://127.0.0.1:9", "owners", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("pharmadesk login"));
}

// ── Against a mocked backend ────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_owners_list_json_sends_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/duenios"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([owner_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = pharmadesk_cmd(dir.path())
        .args(["--api-url", &server.uri(), "--token", "tok-1", "-o", "json", "owners", "list"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["name"], "Ana");
    assert_eq!(rows[0]["ci"], "4455667");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_token_for_later_commands() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/usuarios/login"))
        .and(body_json(json!({ "gmail": "admin@example.com", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-9" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/usuarios"))
        .and(header("authorization", "Bearer tok-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "username": "admin", "gmail": "admin@example.com", "rol": "admin" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .env("PHARMADESK_PASSWORD", "s3cret")
        .args(["--api-url", &server.uri(), "login", "--email", "admin@example.com"])
        .assert()
        .success();

    let token_file = dir.path().join("tokens").join("default");
    assert_eq!(std::fs::read_to_string(token_file).unwrap(), "tok-9");

    pharmadesk_cmd(dir.path())
        .args(["--api-url", &server.uri(), "-o", "plain", "users", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wrong_password_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/usuarios/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "nope" })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .env("PHARMADESK_PASSWORD", "wrong")
        .args(["--api-url", &server.uri(), "login", "--email", "admin@example.com"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid username or password"));

    assert!(!dir.path().join("tokens").join("default").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_with_missing_fields_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/duenios"))
        .respond_with(ResponseTemplate::new(201).set_body_json(owner_json()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args([
            "--api-url",
            &server.uri(),
            "--token",
            "tok-1",
            "owners",
            "create",
            "--name",
            "Ana",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--first-last-name"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_yes_needs_a_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/duenios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([owner_json()])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/duenios/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args(["--api-url", &server.uri(), "--token", "tok-1", "owners", "delete", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_sends_one_delete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/duenios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([owner_json()])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/duenios/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args(["--api-url", &server.uri(), "--token", "tok-1", "-y", "owners", "delete", "1"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_emails_with_no_shifts_fails_without_posting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/turnos/filtrados"))
        .and(query_param("mes", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/turnos/enviar-correos"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    pharmadesk_cmd(dir.path())
        .args([
            "--api-url",
            &server.uri(),
            "--token",
            "tok-1",
            "shifts",
            "send-emails",
            "--month",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No shifts to send"));
}
