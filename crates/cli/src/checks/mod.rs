// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check registry and built-in checks.
//!
//! Built-ins, in canonical order:
//! - fmt, fumpt, goimports: Go formatters in list mode
//! - lint: golangci-lint
//! - mod-tidy: go.mod/go.sum hygiene
//! - whitespace, eof: in-place fixers
//! - ai_detection: AI attribution phrases
//! - gitleaks: secret scanning (disabled by default)
//!
//! Plugins discovered under the configured directory are registered after
//! the built-ins, sorted by name.

pub mod ai_detection;
pub mod eof;
pub mod fixer;
pub mod text;
pub mod tool;
pub mod whitespace;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::check::Check;
use crate::config::{ChecksConfig, Config};
use crate::context::{ContextError, RunContext};
use crate::error::{CheckFailure, Result, TimeoutError};
use crate::plugin::{self, LoadError};

/// Built-in check names in canonical order.
pub const KNOWN_CHECKS: &[&str] = &[
    "fmt",
    "fumpt",
    "goimports",
    "lint",
    "mod-tidy",
    "whitespace",
    "eof",
    "ai_detection",
    "gitleaks",
];

/// Construct every built-in check with its configured limits.
pub fn builtin_checks(config: &Config) -> Result<Vec<Arc<dyn Check>>> {
    let timeout = |name: &str| config.check_timeouts.get(name);
    let tool = |spec: tool::ToolSpec| -> Arc<dyn Check> {
        let limit = timeout(spec.name);
        Arc::new(tool::ToolCheck::new(spec).with_timeout(limit))
    };

    Ok(vec![
        tool(tool::fmt()),
        tool(tool::fumpt()),
        tool(tool::goimports()),
        tool(tool::lint()),
        tool(tool::mod_tidy()),
        Arc::new(
            whitespace::check()
                .with_timeout(timeout("whitespace"))
                .with_auto_stage(config.behaviors.whitespace_auto_stage),
        ),
        Arc::new(
            eof::check()
                .with_timeout(timeout("eof"))
                .with_auto_stage(config.behaviors.eof_auto_stage),
        ),
        Arc::new(
            ai_detection::AiDetectionCheck::new(&config.ai_detection.patterns)?
                .with_timeout(timeout("ai_detection")),
        ),
        tool(tool::gitleaks()),
    ])
}

/// The constructed checks for one configuration.
pub struct Registry {
    checks: Vec<Arc<dyn Check>>,
    enabled: ChecksConfig,
    load_errors: Vec<LoadError>,
}

impl Registry {
    /// An empty registry using the given enable switches.
    pub fn new(enabled: ChecksConfig) -> Self {
        Self {
            checks: Vec::new(),
            enabled,
            load_errors: Vec::new(),
        }
    }

    /// Built-ins only.
    pub fn builtin(config: &Config) -> Result<Self> {
        let mut registry = Self::new(config.checks.clone());
        for check in builtin_checks(config)? {
            registry.register(check);
        }
        Ok(registry)
    }

    /// Built-ins plus, when enabled, plugins found under
    /// `root/<plugins.directory>`.
    ///
    /// Plugins that fail to load are recorded in [`Registry::load_errors`]
    /// and logged; the rest still register.
    pub fn from_config(config: &Config, root: &Path) -> Result<Self> {
        let mut registry = Self::builtin(config)?;
        if !config.plugins.enabled {
            return Ok(registry);
        }

        let dir = root.join(&config.plugins.directory);
        let found = plugin::discover(&dir);
        registry.load_errors.extend(found.errors);

        for plugin in found.plugins {
            if KNOWN_CHECKS.contains(&plugin.name()) {
                registry.load_errors.push(LoadError {
                    message: format!(
                        "plugin name '{}' conflicts with a built-in check",
                        plugin.name()
                    ),
                    directory: plugin.directory().to_path_buf(),
                });
                continue;
            }
            registry.register(Arc::new(plugin));
        }

        for err in &registry.load_errors {
            tracing::warn!("plugin not loaded: {err}");
        }
        tracing::debug!(
            "registry: {} check(s) from {}",
            registry.checks.len(),
            dir.display()
        );
        Ok(registry)
    }

    /// Add a check. A check with the same name is replaced in place.
    pub fn register(&mut self, check: Arc<dyn Check>) {
        match self.checks.iter_mut().find(|c| c.name() == check.name()) {
            Some(slot) => *slot = check,
            None => self.checks.push(check),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Check>> {
        self.checks.iter().find(|c| c.name() == name).cloned()
    }

    /// Registered checks in registration order.
    pub fn checks(&self) -> &[Arc<dyn Check>] {
        &self.checks
    }

    pub fn names(&self) -> Vec<String> {
        self.checks.iter().map(|c| c.name().to_string()).collect()
    }

    /// Names accepted by `--only`, `--skip` and the skip variables:
    /// the built-ins plus everything registered.
    pub fn recognized(&self) -> Vec<String> {
        let mut names: Vec<String> = KNOWN_CHECKS.iter().map(|n| n.to_string()).collect();
        for name in self.names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Built-ins follow `[checks]`; plugins are always enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        !KNOWN_CHECKS.contains(&name) || self.enabled.is_enabled(name)
    }

    /// Plugin directories that could not be loaded.
    pub fn load_errors(&self) -> &[LoadError] {
        &self.load_errors
    }
}

/// A check's own time limit, nested inside the run context.
///
/// Distinguishes the check running out of its own time (a
/// [`TimeoutError`] naming `check_timeouts.<name>`) from the run itself
/// being cancelled or expiring.
pub struct Budget<'a> {
    name: &'a str,
    run: &'a RunContext,
    ctx: RunContext,
    timeout: Duration,
    start: Instant,
}

impl<'a> Budget<'a> {
    pub fn new(name: &'a str, run: &'a RunContext, timeout: Duration) -> Self {
        Self {
            name,
            run,
            ctx: run.with_timeout(timeout),
            timeout,
            start: Instant::now(),
        }
    }

    /// Context to hand to subprocesses.
    pub fn ctx(&self) -> &RunContext {
        &self.ctx
    }

    /// Cooperative checkpoint: `budget.check()?` between units of work.
    pub fn check(&self) -> std::result::Result<(), CheckFailure> {
        match self.ctx.err() {
            Some(reason) => Err(self.failure(reason)),
            None => Ok(()),
        }
    }

    /// Turn an interruption into the failure to report.
    pub fn failure(&self, reason: ContextError) -> CheckFailure {
        if let Some(outer) = self.run.err() {
            return CheckFailure::Context(outer);
        }
        if self.ctx.deadline_exceeded() {
            return TimeoutError::check(self.name, self.timeout, self.start.elapsed()).into();
        }
        CheckFailure::Context(reason)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
