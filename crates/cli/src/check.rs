// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check trait and result types.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::context::RunContext;
use crate::error::CheckFailure;

/// The Check trait defines a single unit of pre-commit work.
///
/// Object-safe to allow dynamic dispatch via `Arc<dyn Check>`. Built-in
/// tools and plugins implement it alike.
pub trait Check: Send + Sync {
    /// Stable identifier (e.g., "lint", "whitespace", or a plugin name).
    fn name(&self) -> &str;

    /// Human-readable description for `prehook list`.
    fn description(&self) -> &str;

    /// Keep only the files this check cares about.
    fn filter_files(&self, files: &[String]) -> Vec<String>;

    /// Run the check against already-filtered files.
    ///
    /// Implementations should:
    /// - Observe `ctx` between units of work and while waiting on children
    /// - Return a [`CheckError`](crate::error::CheckError) with a suggestion
    ///   when the user can act on the failure
    fn run(&self, ctx: &RunContext, files: &[String]) -> Result<(), CheckFailure>;
}

/// Lifecycle status reported through the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Running,
    Passed,
    Skipped,
    Failed,
}

impl Status {
    /// Terminal status of a finished result.
    pub fn of(result: &CheckResult) -> Self {
        if result.skipped {
            Status::Skipped
        } else if result.success {
            Status::Passed
        } else {
            Status::Failed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Running => "running",
            Status::Passed => "passed",
            Status::Skipped => "skipped",
            Status::Failed => "failed",
        }
    }
}

/// Outcome of running a single check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Check identifier.
    pub name: String,

    /// Whether this check passed (forced true for degraded failures).
    pub success: bool,

    /// True when a skippable failure was downgraded by graceful mode.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,

    /// Error message, empty on success.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,

    /// Actionable guidance on how to fix.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub suggestion: String,

    /// Whether the failure may be downgraded.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub can_skip: bool,

    /// Files the check actually processed.
    pub files: Vec<String>,

    /// Command that failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Captured output from the failed command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn passed(name: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            skipped: false,
            error: String::new(),
            suggestion: String::new(),
            can_skip: false,
            files,
            command: None,
            output: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a failing check result with an error message.
    pub fn failed(name: impl Into<String>, files: Vec<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            ..Self::passed(name, files)
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Aggregated results from one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Results {
    /// Per-check results. Fail-fast order is registry order; parallel
    /// order is completion order.
    pub check_results: Vec<CheckResult>,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    #[serde(rename = "total_duration_ms", serialize_with = "serialize_millis")]
    pub total_duration: Duration,
    /// Number of input files before any filtering.
    pub total_files: usize,
}

impl Results {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            ..Self::default()
        }
    }

    /// Count a finished result and append it.
    pub fn record(&mut self, result: CheckResult) -> Status {
        let status = Status::of(&result);
        match status {
            Status::Skipped => self.skipped += 1,
            Status::Passed => self.passed += 1,
            Status::Failed | Status::Running => self.failed += 1,
        }
        self.check_results.push(result);
        status
    }

    /// True when no check failed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

fn serialize_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
