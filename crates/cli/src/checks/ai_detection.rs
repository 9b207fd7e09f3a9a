// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! AI attribution detection.
//!
//! Flags lines carrying tool attribution such as "Generated with" trailers.
//! Matching is literal and ASCII case-insensitive.

use std::path::Path;
use std::time::Duration;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

use super::Budget;
use super::text::is_text_file;
use crate::check::Check;
use crate::context::RunContext;
use crate::discovery::CONFIG_FILE_NAME;
use crate::error::{CheckError, CheckFailure, Error};

/// Phrases flagged out of the box.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "generated with claude",
    "generated by claude",
    "co-authored-by: claude",
    "generated with chatgpt",
    "generated by chatgpt",
    "written by chatgpt",
    "generated by copilot",
    "generated with copilot",
    "co-authored-by: copilot",
    "generated by ai",
    "ai-generated code",
];

pub struct AiDetectionCheck {
    automaton: AhoCorasick,
    timeout: Duration,
}

/// One flagged line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub file: String,
    pub line: usize,
    pub text: String,
}

impl AiDetectionCheck {
    /// Build the matcher from the default phrases plus `extra`.
    pub fn new(extra: &[String]) -> Result<Self, Error> {
        let patterns: Vec<&str> = DEFAULT_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str).filter(|p| !p.trim().is_empty()))
            .collect();

        let automaton = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| Error::Config {
                message: format!("ai_detection.patterns: {e}"),
                path: None,
            })?;

        Ok(Self {
            automaton,
            timeout: Duration::from_secs(30),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Flagged lines in `content`, numbered from 1.
    pub fn scan(&self, file: &str, content: &str) -> Vec<Finding> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| self.automaton.is_match(line))
            .map(|(i, line)| Finding {
                file: file.to_string(),
                line: i + 1,
                text: line.trim().to_string(),
            })
            .collect()
    }
}

impl Check for AiDetectionCheck {
    fn name(&self) -> &str {
        "ai_detection"
    }

    fn description(&self) -> &str {
        "Detect AI attribution in code and docs"
    }

    fn filter_files(&self, files: &[String]) -> Vec<String> {
        files
            .iter()
            .filter(|f| is_text_file(f))
            .filter(|f| {
                Path::new(f.as_str()).file_name().and_then(|n| n.to_str()) != Some(CONFIG_FILE_NAME)
            })
            .cloned()
            .collect()
    }

    fn run(&self, ctx: &RunContext, files: &[String]) -> Result<(), CheckFailure> {
        let budget = Budget::new(self.name(), ctx, self.timeout);
        let mut findings = Vec::new();

        for file in files {
            budget.check()?;
            let bytes = match std::fs::read(file) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::debug!("ai_detection: skipping {file}: {e}");
                    continue;
                }
            };
            findings.extend(self.scan(file, &String::from_utf8_lossy(&bytes)));
        }

        if findings.is_empty() {
            return Ok(());
        }

        let mut flagged: Vec<String> = findings.iter().map(|f| f.file.clone()).collect();
        flagged.dedup();
        let report = findings
            .iter()
            .map(|f| format!("{}:{}: {}", f.file, f.line, f.text))
            .collect::<Vec<_>>()
            .join("\n");

        Err(CheckError::issues(
            format!("AI attribution found in {} file(s)", flagged.len()),
            flagged,
        )
        .with_output(report)
        .with_suggestion("Remove AI attribution lines before committing")
        .into())
    }
}

#[cfg(test)]
#[path = "ai_detection_tests.rs"]
mod tests;
