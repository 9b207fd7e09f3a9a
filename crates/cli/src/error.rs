// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types.
//!
//! [`Error`] covers failures of prehook itself (config, selection, I/O).
//! [`CheckFailure`] is what a single check reports back to the runner; the
//! runner turns it into a [`CheckResult`](crate::check::CheckResult) instead
//! of aborting the run.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::duration::format_duration;
use crate::context::ContextError;

/// Prehook error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),

    /// Enable/only/skip filtering left nothing to run.
    #[error("no checks to run")]
    NoChecksToRun,

    /// Plugin manifest or construction problem.
    #[error("plugin error: {name}: {message}")]
    Plugin { name: String, message: String },

    /// Repository access failed.
    #[error("git error: {0}")]
    Git(String),
}

/// Result type using prehook Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// All checks passed
    Success = 0,
    /// One or more checks failed
    CheckFailed = 1,
    /// Configuration, argument or selection error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::NoChecksToRun => {
                ExitCode::ConfigError
            }
            Error::Plugin { .. } => ExitCode::ConfigError,
            Error::Io { .. } | Error::Internal(_) | Error::Git(_) => ExitCode::InternalError,
        }
    }
}

// =============================================================================
// Check failures
// =============================================================================

/// Category of a structured check error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckErrorKind {
    /// Required executable is missing.
    ToolNotFound,
    /// Executable ran and failed without a more specific diagnosis.
    ToolExecution,
    /// Check asked to be skipped.
    GracefulSkip,
    /// Check ran and found problems in the files.
    Issues,
    /// Plugin printed something that is not a protocol response.
    ProtocolViolation,
}

/// Check failure with diagnostics attached.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct CheckError {
    pub kind: CheckErrorKind,
    /// What went wrong.
    pub message: String,
    /// How to fix it.
    pub suggestion: String,
    /// Command line that failed, if any.
    pub command: Option<String>,
    /// Raw output from the failed command.
    pub output: Option<String>,
    /// Files the failure is about.
    pub files: Vec<String>,
    /// Whether graceful degradation may turn this into a warning.
    pub can_skip: bool,
}

impl CheckError {
    pub fn new(kind: CheckErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: String::new(),
            command: None,
            output: None,
            files: Vec::new(),
            can_skip: false,
        }
    }

    /// Missing executable; skippable so hooks keep working on machines
    /// without the tool.
    pub fn tool_not_found(tool: &str, alternative: impl Into<String>) -> Self {
        Self::new(CheckErrorKind::ToolNotFound, format!("{tool} not found"))
            .with_suggestion(alternative)
            .skippable(true)
    }

    /// Command exited unsuccessfully.
    pub fn tool_execution(
        command: impl Into<String>,
        output: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        let command = command.into();
        Self::new(
            CheckErrorKind::ToolExecution,
            format!("command '{command}' failed"),
        )
        .with_command(command)
        .with_output(output)
        .with_suggestion(suggestion)
    }

    pub fn graceful_skip(reason: impl Into<String>) -> Self {
        Self::new(CheckErrorKind::GracefulSkip, reason)
            .with_suggestion("This check was skipped to allow other checks to continue")
            .skippable(true)
    }

    /// Problems found (and possibly fixed) in specific files.
    pub fn issues(message: impl Into<String>, files: Vec<String>) -> Self {
        Self::new(CheckErrorKind::Issues, message).with_files(files)
    }

    pub fn protocol_violation(name: &str, output: impl Into<String>) -> Self {
        Self::new(
            CheckErrorKind::ProtocolViolation,
            format!("command '{name}' failed"),
        )
        .with_command(name)
        .with_output(output)
        .with_suggestion("Plugin output was not in expected JSON format")
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        let output = output.into();
        self.output = (!output.is_empty()).then_some(output);
        self
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    pub fn skippable(mut self, can_skip: bool) -> Self {
        self.can_skip = can_skip;
        self
    }
}

/// An operation ran past its time limit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.describe())]
pub struct TimeoutError {
    /// What timed out (e.g. "Check execution").
    pub operation: String,
    /// Which instance (check or plugin name).
    pub context: String,
    /// Limit that was applied.
    pub timeout: Duration,
    /// Time spent before giving up.
    pub elapsed: Duration,
    /// Config key that adjusts the limit.
    pub config_key: Option<String>,
    /// Larger of 1.5x the limit and 2x the elapsed time.
    pub suggested_timeout: Duration,
}

impl TimeoutError {
    pub fn new(
        operation: impl Into<String>,
        context: impl Into<String>,
        timeout: Duration,
        elapsed: Duration,
    ) -> Self {
        let mut suggested_timeout = timeout * 3 / 2;
        if elapsed > Duration::ZERO && elapsed * 2 > suggested_timeout {
            suggested_timeout = elapsed * 2;
        }
        Self {
            operation: operation.into(),
            context: context.into(),
            timeout,
            elapsed,
            config_key: None,
            suggested_timeout,
        }
    }

    /// A check exceeded its own `[check_timeouts]` limit.
    pub fn check(name: &str, timeout: Duration, elapsed: Duration) -> Self {
        Self::new("Check execution", name, timeout, elapsed)
            .with_config_key(format!("check_timeouts.{name}"))
    }

    /// A check was still running when the global run deadline passed.
    pub fn run(name: &str, timeout: Duration, elapsed: Duration) -> Self {
        Self::new("Check execution", name, timeout, elapsed).with_config_key("timeout")
    }

    /// A plugin exceeded the timeout from its manifest.
    pub fn plugin(name: &str, timeout: Duration, elapsed: Duration) -> Self {
        Self::new("Plugin execution", name, timeout, elapsed)
            .with_config_key(format!("the `timeout` field of the {name} plugin manifest"))
    }

    pub fn with_config_key(mut self, key: impl Into<String>) -> Self {
        self.config_key = Some(key.into());
        self
    }

    fn describe(&self) -> String {
        let mut msg = if self.context.is_empty() {
            format!(
                "{} timed out after {}",
                self.operation,
                format_duration(self.timeout)
            )
        } else {
            format!(
                "{} ({}) timed out after {}",
                self.operation,
                self.context,
                format_duration(self.timeout)
            )
        };
        if let Some(key) = &self.config_key {
            msg.push_str(&format!(". Consider increasing {key}"));
            if self.suggested_timeout > Duration::ZERO {
                msg.push_str(&format!(
                    " (suggested: {})",
                    format_duration(self.suggested_timeout)
                ));
            }
        }
        msg
    }
}

/// Why a check's `run` did not succeed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckFailure {
    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    #[error(transparent)]
    Check(#[from] CheckError),

    /// The run context ended while the check was working.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Plain failure without diagnostics.
    #[error("{0}")]
    Message(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
