// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! [`FakeCheck`] is a scriptable [`Check`] for registry and runner tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tempfile::TempDir;

use crate::check::Check;
use crate::context::RunContext;
use crate::error::{CheckError, CheckFailure};

/// What a [`FakeCheck`] does when run.
#[derive(Clone)]
pub enum Outcome {
    Pass,
    Fail(CheckFailure),
    /// Sleep, then pass, returning early if the context ends.
    Sleep(Duration),
    Panic,
}

/// Counts how many fakes are inside `run` at once.
#[derive(Default)]
pub struct ConcurrencyGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGauge {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct FakeCheck {
    name: String,
    /// Only files with this suffix are kept; `None` keeps all.
    suffix: Option<String>,
    outcome: Outcome,
    runs: AtomicUsize,
    gauge: Option<Arc<ConcurrencyGauge>>,
}

impl FakeCheck {
    pub fn new(name: &str, outcome: Outcome) -> Self {
        Self {
            name: name.to_string(),
            suffix: None,
            outcome,
            runs: AtomicUsize::new(0),
            gauge: None,
        }
    }

    pub fn passing(name: &str) -> Self {
        Self::new(name, Outcome::Pass)
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self::new(name, Outcome::Fail(CheckFailure::Message(message.to_string())))
    }

    pub fn with_error(name: &str, err: CheckError) -> Self {
        Self::new(name, Outcome::Fail(err.into()))
    }

    pub fn filtering(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }

    pub fn gauged(mut self, gauge: Arc<ConcurrencyGauge>) -> Self {
        self.gauge = Some(gauge);
        self
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Check for FakeCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "fake check"
    }

    fn filter_files(&self, files: &[String]) -> Vec<String> {
        match &self.suffix {
            Some(suffix) => files
                .iter()
                .filter(|f| f.ends_with(suffix.as_str()))
                .cloned()
                .collect(),
            None => files.to_vec(),
        }
    }

    fn run(&self, ctx: &RunContext, _files: &[String]) -> Result<(), CheckFailure> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if let Some(gauge) = &self.gauge {
            gauge.enter();
        }
        let result = match &self.outcome {
            Outcome::Pass => Ok(()),
            Outcome::Fail(err) => Err(err.clone()),
            Outcome::Sleep(d) => {
                let until = std::time::Instant::now() + *d;
                loop {
                    if let Err(e) = ctx.check() {
                        break Err(e.into());
                    }
                    if std::time::Instant::now() >= until {
                        break Ok(());
                    }
                    std::thread::sleep(Duration::from_millis(5));
                }
            }
            Outcome::Panic => panic!("fake check {} panicked", self.name),
        };
        if let Some(gauge) = &self.gauge {
            gauge.exit();
        }
        result
    }
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Writes a plugin directory with a manifest and an executable `run.sh`.
pub fn write_plugin(root: &Path, dir: &str, manifest: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let plugin_dir = root.join(dir);
    create_tree(
        &plugin_dir,
        &[
            ("plugin.yaml", manifest),
            ("run.sh", &format!("#!/bin/sh\n{script}\n")),
        ],
    );
    let script_path = plugin_dir.join("run.sh");
    fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Creates a temp directory initialized as a git repository.
pub fn temp_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    git2::Repository::init(dir.path()).unwrap();
    dir
}
