//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn schoolctl() -> Command {
    let mut cmd = Command::cargo_bin("schoolctl").unwrap();
    cmd.env_remove("SCHOOLCTL_TOKEN").env_remove("SCHOOLCTL_SERVER");
    cmd
}

#[test]
fn test_top_level_help_lists_commands() {
    schoolctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_serve_help() {
    schoolctl()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SQLite database file"))
        .stdout(predicate::str::contains("--cors-origin"));
}

#[test]
fn test_list_help_shows_resources() {
    schoolctl()
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("attendance"))
        .stdout(predicate::str::contains("SCHOOLCTL_SERVER"));
}

#[test]
fn test_list_rejects_unknown_resource() {
    schoolctl()
        .args(["list", "parents"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_list_without_token_fails_before_connecting() {
    schoolctl()
        .args(["list", "students", "--server", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing token"));
}

#[test]
fn test_config_path() {
    schoolctl()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_completions_bash() {
    schoolctl()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("schoolctl"));
}
