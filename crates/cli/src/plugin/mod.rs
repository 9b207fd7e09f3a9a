// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plugins: checks backed by an external executable.
//!
//! The executable receives a [`PluginRequest`] as JSON on stdin and may
//! answer with a [`PluginResponse`] on stdout. Exiting 0 with no output is
//! a pass.

pub mod discovery;
pub mod manifest;
pub mod protocol;

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use globset::{GlobBuilder, GlobMatcher};
use regex::{Captures, Regex};

use crate::check::Check;
use crate::config::duration::parse_duration;
use crate::context::RunContext;
use crate::error::{CheckError, CheckFailure, Error, Result, TimeoutError};
use crate::process::{self, ProcessError};

pub use discovery::{Discovery, LoadError, discover};
pub use manifest::{PluginManifest, load_manifest, validate_manifest};
pub use protocol::{PluginRequest, PluginResponse};

/// Timeout used when a manifest does not set one.
pub const DEFAULT_PLUGIN_TIMEOUT: Duration = Duration::from_secs(30);

/// `$VAR` and `${VAR}` references in manifest environment values.
#[allow(clippy::expect_used)]
static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex")
});

/// How a manifest file pattern is matched.
#[derive(Debug, Clone)]
enum FilePattern {
    /// `*.ext` matches by suffix anywhere in the tree.
    Suffix(String),
    /// Anything else is a path glob where `*` stays within one segment.
    Glob(GlobMatcher),
}

impl FilePattern {
    fn compile(pattern: &str) -> Option<Self> {
        if let Some(ext) = pattern.strip_prefix('*')
            && ext.starts_with('.')
        {
            return Some(Self::Suffix(ext.to_string()));
        }
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => Some(Self::Glob(glob.compile_matcher())),
            Err(e) => {
                tracing::warn!("ignoring invalid file pattern {pattern:?}: {e}");
                None
            }
        }
    }

    fn matches(&self, file: &str) -> bool {
        match self {
            Self::Suffix(ext) => file.ends_with(ext.as_str()),
            Self::Glob(glob) => glob.is_match(file),
        }
    }
}

/// A check implemented by an external executable.
#[derive(Debug, Clone)]
pub struct Plugin {
    manifest: PluginManifest,
    directory: PathBuf,
    timeout: Duration,
    patterns: Vec<FilePattern>,
}

impl Plugin {
    /// Build a plugin from its manifest and the directory it lives in.
    pub fn new(manifest: PluginManifest, directory: impl Into<PathBuf>) -> Result<Self> {
        let plugin_err = |message: &str| Error::Plugin {
            name: manifest.name.clone(),
            message: message.to_string(),
        };

        if manifest.name.is_empty() {
            return Err(plugin_err("plugin name is required"));
        }
        if manifest.executable.is_empty() {
            return Err(plugin_err("plugin executable is required"));
        }

        let timeout = if manifest.timeout.is_empty() {
            DEFAULT_PLUGIN_TIMEOUT
        } else {
            parse_duration(&manifest.timeout)
                .map_err(|e| plugin_err(&format!("invalid timeout format: {e}")))?
        };

        let patterns = manifest
            .file_patterns
            .iter()
            .filter_map(|p| FilePattern::compile(p))
            .collect();

        Ok(Self {
            manifest,
            directory: directory.into(),
            timeout,
            patterns,
        })
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Executable path, resolved against the plugin directory if relative.
    pub fn executable_path(&self) -> PathBuf {
        let exec = Path::new(&self.manifest.executable);
        if exec.is_absolute() {
            exec.to_path_buf()
        } else {
            self.directory.join(exec)
        }
    }

    fn command(&self, executable: &Path) -> Command {
        let mut cmd = Command::new(executable);
        cmd.args(&self.manifest.args).current_dir(&self.directory);
        for (key, value) in &self.manifest.environment {
            cmd.env(key, expand_env(value));
        }
        cmd
    }

    fn timed_out(&self, start: Instant) -> CheckFailure {
        TimeoutError::plugin(&self.manifest.name, self.timeout, start.elapsed()).into()
    }

    /// Map an answer from a plugin that exited 0.
    fn interpret_success(&self, stdout: &str) -> std::result::Result<(), CheckFailure> {
        let name = &self.manifest.name;
        if stdout.trim().is_empty() {
            return Ok(());
        }

        let response: PluginResponse = match serde_json::from_str(stdout) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("plugin {name} printed non-protocol output: {e}");
                return Err(CheckError::protocol_violation(name, stdout).into());
            }
        };

        if response.success {
            if !response.modified.is_empty() {
                tracing::debug!("plugin {name} modified {:?}", response.modified);
            }
            return Ok(());
        }

        let detail = if response.error.is_empty() {
            response.output
        } else {
            response.error
        };
        let err = CheckError::tool_execution(name.as_str(), detail, response.suggestion)
            .with_files(response.modified);
        Err(err.into())
    }
}

impl Check for Plugin {
    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn description(&self) -> &str {
        &self.manifest.description
    }

    fn filter_files(&self, files: &[String]) -> Vec<String> {
        if self.manifest.file_patterns.is_empty() {
            return files.to_vec();
        }
        files
            .iter()
            .filter(|f| self.patterns.iter().any(|p| p.matches(f)))
            .cloned()
            .collect()
    }

    fn run(&self, ctx: &RunContext, files: &[String]) -> std::result::Result<(), CheckFailure> {
        let start = Instant::now();
        let name = &self.manifest.name;
        let plugin_ctx = ctx.with_timeout(self.timeout);

        let executable = self.executable_path();
        if !executable.exists() {
            return Err(CheckError::tool_not_found(
                name,
                format!("Plugin executable not found: {}", executable.display()),
            )
            .into());
        }

        let request = PluginRequest::check(files, &self.manifest.environment);
        let payload = serde_json::to_vec(&request)
            .map_err(|e| CheckFailure::Message(format!("failed to encode plugin request: {e}")))?;

        let mut cmd = self.command(&executable);
        let output = match process::run(&mut cmd, Some(&payload), &plugin_ctx) {
            Ok(output) => output,
            Err(ProcessError::Interrupted { reason, .. }) => {
                return Err(match ctx.err() {
                    Some(outer) => CheckFailure::Context(outer),
                    None if plugin_ctx.deadline_exceeded() => self.timed_out(start),
                    None => CheckFailure::Context(reason),
                });
            }
            Err(e) => {
                return Err(CheckError::tool_execution(
                    name.as_str(),
                    e.to_string(),
                    "Check that the plugin executable exists and is executable",
                )
                .into());
            }
        };

        if output.success() {
            return self.interpret_success(&output.stdout);
        }

        if plugin_ctx.deadline_exceeded() && !ctx.is_done() {
            return Err(self.timed_out(start));
        }

        if let Ok(response) = serde_json::from_str::<PluginResponse>(&output.stdout)
            && !response.error.is_empty()
        {
            return Err(CheckError::tool_execution(
                name.as_str(),
                response.error.as_str(),
                response.suggestion.as_str(),
            )
            .into());
        }

        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        Err(CheckError::tool_execution(
            name.as_str(),
            output.stderr.trim_end(),
            format!("Plugin failed with exit code: {code}"),
        )
        .into())
    }
}

/// Expand `$VAR` and `${VAR}` against the current environment.
/// Unset variables expand to nothing.
pub fn expand_env(value: &str) -> String {
    ENV_REF
        .replace_all(value, |caps: &Captures| {
            let var = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            std::env::var(var).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
