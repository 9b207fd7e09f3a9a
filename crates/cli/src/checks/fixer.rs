// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-place file fixers shared by the whitespace and eof checks.
//!
//! A fixer rewrites each text file it is given. Rewritten files make the
//! check fail so the commit is retried with the fixed content, optionally
//! after re-staging them.

use std::path::Path;
use std::time::Duration;

use super::Budget;
use super::text::filter_text_files;
use crate::check::Check;
use crate::context::RunContext;
use crate::error::{CheckError, CheckFailure};
use crate::git;

/// Rewrites content, returning `None` when nothing changes.
pub type FixFn = fn(&[u8]) -> Option<Vec<u8>>;

pub struct FixerCheck {
    name: &'static str,
    description: &'static str,
    /// Message used when files were rewritten.
    issue: &'static str,
    fix: FixFn,
    timeout: Duration,
    auto_stage: bool,
}

impl FixerCheck {
    pub fn new(
        name: &'static str,
        description: &'static str,
        issue: &'static str,
        fix: FixFn,
    ) -> Self {
        Self {
            name,
            description,
            issue,
            fix,
            timeout: Duration::from_secs(30),
            auto_stage: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_auto_stage(mut self, auto_stage: bool) -> Self {
        self.auto_stage = auto_stage;
        self
    }

    fn fix_file(&self, file: &str) -> Result<bool, String> {
        let path = Path::new(file);
        let content = std::fs::read(path).map_err(|e| format!("failed to read file: {e}"))?;
        match (self.fix)(&content) {
            Some(fixed) => {
                std::fs::write(path, fixed).map_err(|e| format!("failed to write file: {e}"))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Check for FixerCheck {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn filter_files(&self, files: &[String]) -> Vec<String> {
        filter_text_files(files)
    }

    fn run(&self, ctx: &RunContext, files: &[String]) -> Result<(), CheckFailure> {
        let budget = Budget::new(self.name, ctx, self.timeout);
        let mut problems = Vec::new();
        let mut fixed = Vec::new();

        for file in files {
            budget.check()?;
            match self.fix_file(file) {
                Ok(true) => fixed.push(file.clone()),
                Ok(false) => {}
                Err(e) => problems.push(format!("{file}: {e}")),
            }
        }

        let mut staged = false;
        if self.auto_stage && !fixed.is_empty() {
            match git::stage_files(Path::new("."), &fixed) {
                Ok(()) => staged = true,
                Err(e) => tracing::warn!("{}: auto-staging failed: {e:#}", self.name),
            }
        }

        if !problems.is_empty() {
            return Err(CheckError::issues(
                format!("{}:\n{}", self.issue, problems.join("\n")),
                fixed,
            )
            .into());
        }

        if !fixed.is_empty() {
            tracing::debug!("{}: fixed {} file(s)", self.name, fixed.len());
            let suggestion = if staged {
                "Fixed files were re-staged; run the commit again"
            } else {
                "Review the fixed files, stage them with 'git add' and commit again"
            };
            return Err(CheckError::issues(
                format!("{} in {} file(s)", self.issue, fixed.len()),
                fixed,
            )
            .with_suggestion(suggestion)
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "fixer_tests.rs"]
mod tests;
