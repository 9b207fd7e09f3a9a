// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External tool wrappers (gofmt, golangci-lint, gitleaks, ...).
//!
//! Every wrapper follows the same contract: look the tool up on `PATH`,
//! run it under the check's own time limit, and turn its exit status and
//! output into a [`CheckError`] the user can act on.

use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use super::Budget;
use crate::check::Check;
use crate::context::RunContext;
use crate::error::{CheckError, CheckFailure};
use crate::process::{self, ProcessError, display_command};

/// What the tool receives on its command line after the fixed arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Targets {
    /// Each filtered file.
    Files,
    /// Each distinct directory containing a filtered file, as `./dir`.
    PackageDirs,
    /// Nothing; the tool scans the repository itself.
    None,
}

/// Static description of a wrapped tool.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub targets: Targets,
    /// Which files the tool cares about.
    pub filter: fn(&str) -> bool,
    /// Tool prints offending files and exits 0 (`gofmt -l` style).
    pub lists_files: bool,
    /// Marker file that must exist in the working directory; its absence
    /// skips the check gracefully.
    pub requires: Option<&'static str>,
    pub install_hint: &'static str,
    pub fix_hint: &'static str,
}

pub struct ToolCheck {
    spec: ToolSpec,
    timeout: Duration,
}

impl ToolCheck {
    pub fn new(spec: ToolSpec) -> Self {
        Self {
            spec,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_command(&self, files: &[String]) -> Command {
        let mut cmd = Command::new(self.spec.program);
        cmd.args(self.spec.args);
        match self.spec.targets {
            Targets::Files => {
                cmd.args(files);
            }
            Targets::PackageDirs => {
                cmd.args(package_dirs(files));
            }
            Targets::None => {}
        }
        cmd
    }
}

impl Check for ToolCheck {
    fn name(&self) -> &str {
        self.spec.name
    }

    fn description(&self) -> &str {
        self.spec.description
    }

    fn filter_files(&self, files: &[String]) -> Vec<String> {
        files
            .iter()
            .filter(|f| (self.spec.filter)(f))
            .cloned()
            .collect()
    }

    fn run(&self, ctx: &RunContext, files: &[String]) -> Result<(), CheckFailure> {
        let spec = &self.spec;

        if let Some(marker) = spec.requires
            && !Path::new(marker).exists()
        {
            return Err(CheckError::graceful_skip(format!("no {marker} found")).into());
        }

        if which::which(spec.program).is_err() {
            return Err(CheckError::tool_not_found(spec.program, spec.install_hint).into());
        }

        let budget = Budget::new(spec.name, ctx, self.timeout);
        let mut cmd = self.build_command(files);
        let command_line = display_command(&cmd);

        let output = match process::run(&mut cmd, None, budget.ctx()) {
            Ok(output) => output,
            Err(ProcessError::Interrupted { reason, .. }) => return Err(budget.failure(reason)),
            Err(e) => {
                return Err(
                    CheckError::tool_execution(command_line, e.to_string(), spec.install_hint)
                        .into(),
                );
            }
        };

        if !output.success() {
            let combined = format!("{}{}", output.stdout, output.stderr);
            return Err(
                CheckError::tool_execution(command_line, combined.trim_end(), spec.fix_hint)
                    .into(),
            );
        }

        if spec.lists_files {
            let listed: Vec<String> = output
                .stdout
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect();
            if !listed.is_empty() {
                return Err(CheckError::issues(
                    format!("{} file(s) need formatting", listed.len()),
                    listed,
                )
                .with_command(command_line)
                .with_output(output.stdout)
                .with_suggestion(spec.fix_hint)
                .into());
            }
        }

        Ok(())
    }
}

/// Distinct parent directories, sorted, as `./dir` (root is `.`).
pub fn package_dirs(files: &[String]) -> Vec<String> {
    files
        .iter()
        .map(|f| match Path::new(f).parent() {
            Some(p) if !p.as_os_str().is_empty() => format!("./{}", p.to_string_lossy()),
            _ => ".".to_string(),
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn is_go_file(file: &str) -> bool {
    file.ends_with(".go")
}

fn is_go_module_file(file: &str) -> bool {
    let name = Path::new(file)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    name == "go.mod" || name == "go.sum" || is_go_file(file)
}

fn any_file(_: &str) -> bool {
    true
}

pub fn fmt() -> ToolSpec {
    ToolSpec {
        name: "fmt",
        description: "Format with gofmt",
        program: "gofmt",
        args: &["-l"],
        targets: Targets::Files,
        filter: is_go_file,
        lists_files: true,
        requires: None,
        install_hint: "Install Go from https://go.dev/dl/",
        fix_hint: "Run 'gofmt -w' on the listed files",
    }
}

pub fn fumpt() -> ToolSpec {
    ToolSpec {
        name: "fumpt",
        description: "Format with gofumpt (stricter gofmt)",
        program: "gofumpt",
        args: &["-l"],
        targets: Targets::Files,
        filter: is_go_file,
        lists_files: true,
        requires: None,
        install_hint: "Install with 'go install mvdan.cc/gofumpt@latest'",
        fix_hint: "Run 'gofumpt -w' on the listed files",
    }
}

pub fn goimports() -> ToolSpec {
    ToolSpec {
        name: "goimports",
        description: "Organize imports with goimports",
        program: "goimports",
        args: &["-l"],
        targets: Targets::Files,
        filter: is_go_file,
        lists_files: true,
        requires: None,
        install_hint: "Install with 'go install golang.org/x/tools/cmd/goimports@latest'",
        fix_hint: "Run 'goimports -w' on the listed files",
    }
}

pub fn lint() -> ToolSpec {
    ToolSpec {
        name: "lint",
        description: "Run golangci-lint",
        program: "golangci-lint",
        args: &["run"],
        targets: Targets::PackageDirs,
        filter: is_go_file,
        lists_files: false,
        requires: None,
        install_hint: "Install golangci-lint: https://golangci-lint.run/welcome/install/",
        fix_hint: "Fix the linting issues shown above. Run 'golangci-lint run' to see full details.",
    }
}

pub fn mod_tidy() -> ToolSpec {
    ToolSpec {
        name: "mod-tidy",
        description: "Ensure go.mod and go.sum are tidy",
        program: "go",
        args: &["mod", "tidy", "-diff"],
        targets: Targets::None,
        filter: is_go_module_file,
        lists_files: false,
        requires: Some("go.mod"),
        install_hint: "Install Go from https://go.dev/dl/",
        fix_hint: "Run 'go mod tidy' and stage go.mod and go.sum",
    }
}

pub fn gitleaks() -> ToolSpec {
    ToolSpec {
        name: "gitleaks",
        description: "Scan for secrets with gitleaks",
        program: "gitleaks",
        args: &["detect", "--no-git", "--source", ".", "--redact"],
        targets: Targets::None,
        filter: any_file,
        lists_files: false,
        requires: None,
        install_hint: "Install gitleaks: https://github.com/gitleaks/gitleaks#installing",
        fix_hint: "Remove secrets from code or add exceptions to .gitleaks.toml allowlist",
    }
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
