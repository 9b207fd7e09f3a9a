//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Returns a Command configured to run the prehook binary
pub fn prehook_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("prehook"));
    // Keep the host environment from leaking into specs
    for var in ["SKIP", "PREHOOK_SKIP", "PREHOOK_CONFIG", "PREHOOK_LOG", "COLOR"] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Scratch git repository.
pub struct Repo {
    dir: tempfile::TempDir,
}

impl Repo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
        self
    }

    pub fn config(&self, content: &str) -> &Self {
        self.file(".prehook.toml", content)
    }

    /// Add paths to the index.
    pub fn stage(&self, paths: &[&str]) -> &Self {
        let repo = git2::Repository::open(self.path()).unwrap();
        let mut index = repo.index().unwrap();
        for path in paths {
            index.add_path(Path::new(path)).unwrap();
        }
        index.write().unwrap();
        self
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.join(rel)).unwrap()
    }

    /// Write a plugin with an executable `run.sh` under `rel`.
    pub fn plugin(&self, rel: &str, manifest: &str, script: &str) -> &Self {
        use std::os::unix::fs::PermissionsExt;

        self.file(&format!("{rel}/plugin.yaml"), manifest);
        let script_rel = format!("{rel}/run.sh");
        self.file(&script_rel, &format!("#!/bin/sh\n{script}\n"));
        std::fs::set_permissions(
            self.join(&script_rel),
            std::fs::Permissions::from_mode(0o755),
        )
        .unwrap();
        self
    }

    /// `prehook run` inside this repository.
    pub fn run(&self) -> Command {
        let mut cmd = prehook_cmd();
        cmd.arg("run").current_dir(self.path());
        cmd
    }

    /// Any prehook subcommand inside this repository.
    pub fn cmd(&self) -> Command {
        let mut cmd = prehook_cmd();
        cmd.current_dir(self.path());
        cmd
    }
}

/// Parse stdout as JSON.
pub fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout should be JSON ({e}):\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

/// The per-check entry named `name` from a JSON report.
pub fn check_entry<'a>(report: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    report["checks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .unwrap_or_else(|| panic!("no check named {name} in report: {report}"))
}
