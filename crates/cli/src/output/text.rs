// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! <check-name>: FAIL
//!   <error>
//!     <captured output>
//!   <suggestion>
//! <check-name>: SKIP
//!   <error>
//! 3 passed, 1 failed, 1 skipped in 1.2s
//! ```

use std::io::Write;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::FormatOptions;
use crate::check::{CheckResult, Results, Status};
use crate::color::scheme;
use crate::config::duration::format_duration;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    options: FormatOptions,
}

impl TextFormatter<StandardStream> {
    pub fn stdout(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::new(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W, options: FormatOptions) -> Self {
        Self { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write every result followed by the summary line.
    pub fn write(&mut self, results: &Results) -> std::io::Result<()> {
        for result in &results.check_results {
            self.write_check(result)?;
        }
        self.write_summary(results)
    }

    /// Write a single check result. Passes are silent unless asked for.
    pub fn write_check(&mut self, result: &CheckResult) -> std::io::Result<()> {
        let status = Status::of(result);
        let (label, spec) = match status {
            Status::Failed => ("FAIL", scheme::fail()),
            Status::Skipped => ("SKIP", scheme::skip()),
            Status::Passed | Status::Running => {
                if !self.options.show_passed {
                    return Ok(());
                }
                ("PASS", scheme::pass())
            }
        };

        self.out.set_color(&scheme::check_name())?;
        write!(self.out, "{}", result.name)?;
        self.out.reset()?;
        write!(self.out, ": ")?;
        self.out.set_color(&spec)?;
        write!(self.out, "{label}")?;
        self.out.reset()?;
        writeln!(self.out)?;

        if status == Status::Passed {
            return Ok(());
        }

        if !result.error.is_empty() {
            for line in result.error.lines() {
                writeln!(self.out, "  {line}")?;
            }
        }

        if let Some(output) = &result.output {
            self.out.set_color(&scheme::output())?;
            for line in output.lines() {
                writeln!(self.out, "    {line}")?;
            }
            self.out.reset()?;
        }

        // Timeout messages are copied into the suggestion; print them once.
        if !result.suggestion.is_empty() && result.suggestion != result.error {
            self.out.set_color(&scheme::advice())?;
            writeln!(self.out, "  {}", result.suggestion)?;
            self.out.reset()?;
        }

        Ok(())
    }

    /// Write the summary line.
    pub fn write_summary(&mut self, results: &Results) -> std::io::Result<()> {
        let mut parts = vec![format!("{} passed", results.passed)];
        if results.failed > 0 {
            parts.push(format!("{} failed", results.failed));
        }
        if results.skipped > 0 {
            parts.push(format!("{} skipped", results.skipped));
        }
        writeln!(
            self.out,
            "{} in {}",
            parts.join(", "),
            format_duration(results.total_duration)
        )
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
