//! CLI integration tests
//!
//! Tests that don't require network access

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the appshelf binary
fn appshelf() -> Command {
    Command::cargo_bin("appshelf").unwrap()
}

/// Get a command with HOME pointed at a temp directory
fn appshelf_with_home(home: &TempDir) -> Command {
    let mut cmd = appshelf();
    cmd.env("HOME", home.path());
    cmd
}

#[test]
fn test_help() {
    appshelf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Fetch, cache, and browse a developer's published App Store catalog",
        ));
}

#[test]
fn test_version() {
    appshelf()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("appshelf"));
}

#[test]
fn test_apps_help() {
    appshelf()
        .args(["apps", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("List the developer's published apps"))
        .stdout(predicate::str::contains("--no-cache"))
        .stdout(predicate::str::contains("--all"))
        .stdout(predicate::str::contains("--filter"));
}

#[test]
fn test_load_help() {
    appshelf()
        .args(["load", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stale fallback"))
        .stdout(predicate::str::contains("--refresh"));
}

#[test]
fn test_config_help() {
    appshelf()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage configuration"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn test_cache_help() {
    appshelf()
        .args(["cache", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage the local catalog cache"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("clear"));
}

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    appshelf_with_home(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".appshelf/config.toml"));
}

#[test]
fn test_config_set_and_show() {
    let home = TempDir::new().unwrap();

    appshelf_with_home(&home)
        .args(["config", "set", "catalog.developer_id", "12345"])
        .assert()
        .success();

    appshelf_with_home(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("developer_id = \"12345\""));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    appshelf_with_home(&home)
        .args(["config", "set", "api.token", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn test_config_show_json() {
    let home = TempDir::new().unwrap();
    appshelf_with_home(&home)
        .args(["config", "show", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"catalog\""));
}

#[test]
fn test_cache_status_empty() {
    let home = TempDir::new().unwrap();
    appshelf_with_home(&home)
        .args(["cache", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not cached"));
}

#[test]
fn test_cache_clear() {
    let home = TempDir::new().unwrap();
    appshelf_with_home(&home)
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache cleared"));
}

#[test]
fn test_apps_without_configuration_fails() {
    let home = TempDir::new().unwrap();
    appshelf_with_home(&home)
        .env_remove("APPSHELF_DEVELOPER_ID")
        .arg("apps")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Not configured"));
}

#[test]
fn test_completions_bash() {
    appshelf()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("appshelf"));
}
