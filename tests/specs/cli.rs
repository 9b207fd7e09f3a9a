//! Command-line surface: help, version, flags, config and exit codes.

use crate::prelude::*;

#[test]
fn bare_invocation_shows_help() {
    prehook_cmd()
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage:"));
}

#[test]
fn version_flag_prints_package_version() {
    prehook_cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_command_fails() {
    prehook_cmd()
        .arg("unknown")
        .assert()
        .code(2)
        .stderr(predicates::str::is_match(r"(?i)(unrecognized|unknown)").unwrap());
}

#[test]
fn run_unknown_flag_fails() {
    prehook_cmd()
        .args(["run", "--unknown-option"])
        .assert()
        .code(2)
        .stderr(predicates::str::is_match(r"(?i)(unexpected|unknown|unrecognized)").unwrap());
}

#[test]
fn run_rejects_bad_timeout() {
    prehook_cmd()
        .args(["run", "--timeout", "soon"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("soon"));
}

#[test]
fn run_outside_git_repository_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    prehook_cmd()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .code(3)
        .stderr(predicates::str::contains("not a git repository"));
}

#[test]
fn run_with_nothing_staged_passes() {
    let repo = Repo::new();
    repo.run()
        .assert()
        .success()
        .stdout(predicates::str::contains("passed"));
}

#[test]
fn missing_explicit_config_is_a_config_error() {
    let repo = Repo::new();
    repo.run()
        .args(["-C", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("config file not found"));
}

#[test]
fn config_env_var_sets_path() {
    let repo = Repo::new();
    repo.file("custom.toml", "version = 1\n[checks]\nlint = false\n");
    repo.cmd()
        .arg("list")
        .env("PREHOOK_CONFIG", repo.join("custom.toml"))
        .assert()
        .success()
        .stdout(predicates::str::is_match(r"lint\s+disabled").unwrap());
}

#[test]
fn unknown_config_key_warns() {
    let repo = Repo::new();
    repo.config("version = 1\nunknown_key = true\n");
    repo.run()
        .assert()
        .success()
        .stderr(predicates::str::contains("unrecognized field `unknown_key`"));
}

#[test]
fn invalid_config_is_a_config_error() {
    let repo = Repo::new();
    repo.config("version = 1\ntimeout = \"forever\"\n");
    repo.run().assert().code(2);
}

#[test]
fn log_env_enables_debug_logging() {
    let repo = Repo::new();
    repo.run()
        .env("PREHOOK_LOG", "debug")
        .assert()
        .success()
        .stderr(predicates::str::contains("DEBUG"));
}

#[test]
fn list_shows_builtins_with_state() {
    let repo = Repo::new();
    repo.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicates::str::is_match(r"fmt\s+enabled").unwrap())
        .stdout(predicates::str::is_match(r"gitleaks\s+disabled").unwrap())
        .stdout(predicates::str::contains("Fix trailing whitespace"));
}
