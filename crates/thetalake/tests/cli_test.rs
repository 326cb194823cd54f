//! Integration tests for the `thetalake` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling without a live Theta Lake tenant.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `thetalake` binary with env isolation.
///
/// Clears all `THETALAKE_*` env vars and points the config file at a path
/// under `home` so tests never touch the user's real configuration.
fn thetalake_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("thetalake");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("THETALAKE_CONFIG", home.join("config.toml"))
        .env_remove("THETALAKE_PROFILE")
        .env_remove("THETALAKE_ENDPOINT")
        .env_remove("THETALAKE_TOKEN")
        .env_remove("THETALAKE_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = thetalake_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Theta Lake")
                .and(predicate::str::contains("resource"))
                .and(predicate::str::contains("data"))
                .and(predicate::str::contains("config")),
        );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("thetalake"));
}

#[test]
fn test_resource_help_lists_kinds() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args(["resource", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("case-record")
                .and(predicate::str::contains("integration-state"))
                .and(predicate::str::contains("retention-policy")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("thetalake"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_unknown_resource_kind_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args(["resource", "widget", "import", "1"])
        .assert()
        .code(2);
}

#[test]
fn test_invalid_output_format_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args(["--output", "xml", "data", "system-status"])
        .assert()
        .code(2);
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_config_reports_no_endpoint() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args(["data", "system-status"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No API endpoint configured"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args(["--profile", "staging", "data", "system-status"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Profile 'staging' not found"));
}

#[test]
fn test_endpoint_without_token_is_auth_error() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args(["--endpoint", "https://api.example.com", "data", "system-status"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No API token"));
}

#[test]
fn test_invalid_endpoint_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args([
            "--endpoint",
            "ftp://api.example.com",
            "--token",
            "t",
            "data",
            "events",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ftp://api.example.com"));
}

#[test]
fn test_profile_from_config_file_is_used() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "default_profile = \"prod\"\n\n[profiles.prod]\nendpoint = \"ftp://bad.example.com\"\ntoken = \"t\"\n",
    )
    .unwrap();

    // The profile's endpoint is picked up (and rejected) without any flags.
    thetalake_cmd(home.path())
        .args(["data", "events"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ftp://bad.example.com"));
}

#[test]
fn test_config_show_redacts_tokens() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "[profiles.prod]\nendpoint = \"https://api.example.com\"\ntoken = \"super-secret\"\n",
    )
    .unwrap();

    thetalake_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("<redacted>")
                .and(predicate::str::contains("super-secret").not()),
        );
}

// ── Local validation before any request ─────────────────────────────

#[test]
fn test_by_id_data_source_requires_id() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args([
            "--endpoint",
            "http://127.0.0.1:9",
            "--token",
            "t",
            "data",
            "case",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("needs an id"));
}

#[test]
fn test_case_record_import_is_unsupported() {
    let home = tempfile::tempdir().unwrap();
    thetalake_cmd(home.path())
        .args([
            "--endpoint",
            "http://127.0.0.1:9",
            "--token",
            "t",
            "resource",
            "case-record",
            "import",
            "1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Importing case records is not currently supported.",
        ));
}

#[test]
fn test_malformed_record_file_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let record = home.path().join("case.json");
    std::fs::write(&record, "{ not json").unwrap();

    thetalake_cmd(home.path())
        .args(["--endpoint", "http://127.0.0.1:9", "--token", "t"])
        .args(["resource", "case", "create", "--file"])
        .arg(&record)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid JSON"));
}
