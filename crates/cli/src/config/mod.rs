// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles `.prehook.toml` parsing with version validation and unknown key
//! warnings. A missing file means [`Config::default`].

pub mod duration;
mod suggest;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::checks::KNOWN_CHECKS;
use crate::error::{Error, Result};
use duration::parse_duration;
use suggest::warn_unknown_check;

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &[
    "version",
    "timeout",
    "checks",
    "check_timeouts",
    "performance",
    "behaviors",
    "git",
    "plugins",
    "ai_detection",
];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    timeout: Option<String>,

    #[serde(default)]
    checks: Option<BTreeMap<String, bool>>,

    #[serde(default)]
    check_timeouts: Option<BTreeMap<String, String>>,

    #[serde(default)]
    performance: Option<PerformanceConfig>,

    #[serde(default)]
    behaviors: Option<BehaviorsConfig>,

    #[serde(default)]
    git: Option<GitConfig>,

    #[serde(default)]
    plugins: Option<PluginsConfig>,

    #[serde(default)]
    ai_detection: Option<AiDetectionConfig>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Deadline for the whole run.
    pub timeout: Duration,

    /// Built-in checks switched on or off.
    pub checks: ChecksConfig,

    /// Per-check time limits.
    pub check_timeouts: CheckTimeouts,

    pub performance: PerformanceConfig,

    pub behaviors: BehaviorsConfig,

    pub git: GitConfig,

    pub plugins: PluginsConfig,

    pub ai_detection: AiDetectionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            timeout: DEFAULT_TIMEOUT,
            checks: ChecksConfig::default(),
            check_timeouts: CheckTimeouts::default(),
            performance: PerformanceConfig::default(),
            behaviors: BehaviorsConfig::default(),
            git: GitConfig::default(),
            plugins: PluginsConfig::default(),
            ai_detection: AiDetectionConfig::default(),
        }
    }
}

/// `[checks]`: one switch per built-in check.
#[derive(Debug, Clone, Default)]
pub struct ChecksConfig {
    overrides: BTreeMap<String, bool>,
}

impl ChecksConfig {
    /// Whether a built-in check runs when the config says nothing about it.
    pub fn default_enabled(name: &str) -> bool {
        name != "gitleaks"
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.overrides
            .get(name)
            .copied()
            .unwrap_or_else(|| Self::default_enabled(name))
    }

    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.overrides.insert(name.into(), enabled);
    }
}

/// `[check_timeouts]`: time limit per built-in check.
#[derive(Debug, Clone, Default)]
pub struct CheckTimeouts {
    overrides: BTreeMap<String, Duration>,
}

impl CheckTimeouts {
    pub fn default_for(name: &str) -> Duration {
        match name {
            "lint" | "gitleaks" => Duration::from_secs(60),
            _ => Duration::from_secs(30),
        }
    }

    pub fn get(&self, name: &str) -> Duration {
        self.overrides
            .get(name)
            .copied()
            .unwrap_or_else(|| Self::default_for(name))
    }

    pub fn set(&mut self, name: impl Into<String>, timeout: Duration) {
        self.overrides.insert(name.into(), timeout);
    }
}

/// `[performance]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Worker count for parallel mode (0 = one per CPU).
    pub parallel_workers: usize,
    /// Run checks one at a time and stop at the first failure.
    pub fail_fast: bool,
}

/// `[behaviors]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BehaviorsConfig {
    /// Stage files the whitespace check rewrote.
    pub whitespace_auto_stage: bool,
    /// Stage files the eof check rewrote.
    pub eof_auto_stage: bool,
}

/// `[git]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Paths never handed to any check. Entries ending in `/` are directories.
    pub exclude_patterns: Vec<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: vec![
                "vendor/".to_string(),
                "node_modules/".to_string(),
                ".git/".to_string(),
            ],
        }
    }
}

/// `[plugins]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    pub enabled: bool,
    /// Directory scanned for plugin subdirectories, relative to the repo root.
    pub directory: PathBuf,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from(".pre-commit-plugins"),
        }
    }
}

/// `[ai_detection]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AiDetectionConfig {
    /// Extra phrases to flag, matched case-insensitively.
    pub patterns: Vec<String>,
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Load the config at `path`, or defaults when there is none.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load(path),
        None => Ok(Config::default()),
    }
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_err = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_err(e.to_string()))?;

    let version = flexible
        .version
        .ok_or_else(|| config_err("missing required field: version".to_string()))?;

    if version != SUPPORTED_VERSION {
        return Err(config_err(format!(
            "unsupported config version {} (supported: {})\n  Upgrade prehook to use this config.",
            version, SUPPORTED_VERSION
        )));
    }

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let timeout = match flexible.timeout.as_deref() {
        Some(raw) => parse_positive(raw, "timeout").map_err(config_err)?,
        None => DEFAULT_TIMEOUT,
    };

    let mut checks = ChecksConfig::default();
    for (name, enabled) in flexible.checks.unwrap_or_default() {
        if !KNOWN_CHECKS.contains(&name.as_str()) {
            warn_unknown_check(path, "checks", &name);
        }
        checks.set(name, enabled);
    }

    let mut check_timeouts = CheckTimeouts::default();
    for (name, raw) in flexible.check_timeouts.unwrap_or_default() {
        if !KNOWN_CHECKS.contains(&name.as_str()) {
            warn_unknown_check(path, "check_timeouts", &name);
        }
        let key = format!("check_timeouts.{name}");
        let timeout = parse_positive(&raw, &key).map_err(config_err)?;
        check_timeouts.set(name, timeout);
    }

    Ok(Config {
        version,
        timeout,
        checks,
        check_timeouts,
        performance: flexible.performance.unwrap_or_default(),
        behaviors: flexible.behaviors.unwrap_or_default(),
        git: flexible.git.unwrap_or_default(),
        plugins: flexible.plugins.unwrap_or_default(),
        ai_detection: flexible.ai_detection.unwrap_or_default(),
    })
}

/// Parse a duration that must be greater than zero.
fn parse_positive(raw: &str, key: &str) -> std::result::Result<Duration, String> {
    let d = parse_duration(raw).map_err(|e| format!("{key}: {e}"))?;
    if d.is_zero() {
        return Err(format!("{key}: must be greater than zero"));
    }
    Ok(d)
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "prehook: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
