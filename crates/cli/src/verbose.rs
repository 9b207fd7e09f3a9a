// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose output logger for diagnostic information.
//!
//! Writes `[verbose]` prefixed lines to stderr when `--verbose` is given.

use std::time::Duration;

use crate::check::Status;
use crate::config::duration::format_duration;

/// Verbose output logger. Writes to stderr with a `[verbose]` prefix.
/// All output is conditional on verbose mode being enabled.
#[derive(Debug, Clone, Copy)]
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a verbose line to stderr.
    pub fn log(&self, msg: &str) {
        if self.enabled {
            eprintln!("[verbose] {msg}");
        }
    }

    /// Print a verbose section header.
    pub fn section(&self, title: &str) {
        if self.enabled {
            eprintln!("[verbose] === {title} ===");
        }
    }

    /// Print one progress event from the runner.
    pub fn progress(&self, name: &str, status: Status, elapsed: Duration) {
        if self.enabled {
            eprintln!("[verbose] {}", progress_line(name, status, elapsed));
        }
    }
}

/// `lint: running` or `lint: passed (1.2s)`.
pub fn progress_line(name: &str, status: Status, elapsed: Duration) -> String {
    match status {
        Status::Running => format!("{name}: running"),
        _ => format!("{name}: {} ({})", status.as_str(), format_duration(elapsed)),
    }
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;
