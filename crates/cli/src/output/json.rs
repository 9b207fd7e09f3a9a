// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::check::{CheckResult, Results};

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub timestamp: String,
    /// True when no check failed.
    pub passed: bool,
    pub summary: Summary,
    pub checks: &'a [CheckResult],
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total_files: usize,
    pub duration_ms: u64,
}

impl<'a> JsonReport<'a> {
    pub fn new(results: &'a Results) -> Self {
        let timestamp = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        Self::with_timestamp(results, timestamp)
    }

    pub fn with_timestamp(results: &'a Results, timestamp: String) -> Self {
        Self {
            timestamp,
            passed: results.all_passed(),
            summary: Summary {
                total: results.check_results.len(),
                passed: results.passed,
                failed: results.failed,
                skipped: results.skipped,
                total_files: results.total_files,
                duration_ms: results.total_duration.as_millis() as u64,
            },
            checks: &results.check_results,
        }
    }
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON output.
    pub fn write(&mut self, results: &Results) -> std::io::Result<()> {
        self.write_report(&JsonReport::new(results))
    }

    pub fn write_report(&mut self, report: &JsonReport<'_>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{json}")
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
