// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin manifest files.
//!
//! A plugin directory holds `plugin.yaml`, `plugin.yml` or `plugin.json`
//! (first found wins) describing the executable and how to call it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::duration::parse_duration;
use crate::error::{Error, Result};

/// Manifest file names, in lookup order.
pub const MANIFEST_FILES: &[&str] = &["plugin.yaml", "plugin.yml", "plugin.json"];

/// Categories a manifest may declare.
pub const VALID_CATEGORIES: &[&str] = &[
    "formatting",
    "linting",
    "security",
    "testing",
    "documentation",
    "custom",
];

/// Declarative description of an external check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,

    /// Path to the executable, absolute or relative to the plugin directory.
    pub executable: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// `*.ext` suffixes or path globs; empty means every file.
    pub file_patterns: Vec<String>,
    /// Duration string such as `"30s"`; empty means the default.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timeout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    pub requires_files: bool,
    /// Variables added to the plugin's environment; values may use `${VAR}`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    // Declared limits. Parsed and shown, not enforced.
    pub read_only: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_memory_mb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cpu_percent: Option<u32>,
}

/// Find and parse the manifest in `dir`.
///
/// Returns the manifest together with the file it came from.
pub fn load_manifest(dir: &Path) -> Result<(PluginManifest, PathBuf)> {
    for file in MANIFEST_FILES {
        let path = dir.join(file);
        if !path.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let manifest = parse_manifest(&content, file).map_err(|message| Error::Plugin {
            name: dir_name(dir),
            message: format!("failed to parse {file}: {message}"),
        })?;
        return Ok((manifest, path));
    }

    Err(Error::Plugin {
        name: dir_name(dir),
        message: format!(
            "no manifest file found (looked for {})",
            MANIFEST_FILES.join(", ")
        ),
    })
}

fn parse_manifest(content: &str, file: &str) -> std::result::Result<PluginManifest, String> {
    if file.ends_with(".json") {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Problems with a manifest, empty when it is valid.
pub fn validate_manifest(manifest: &PluginManifest) -> Vec<String> {
    let mut problems = Vec::new();

    if manifest.name.is_empty() {
        problems.push("plugin name is required".to_string());
    }
    if manifest.version.is_empty() {
        problems.push("plugin version is required".to_string());
    }
    if manifest.description.is_empty() {
        problems.push("plugin description is required".to_string());
    }
    if manifest.executable.is_empty() {
        problems.push("plugin executable is required".to_string());
    }
    if manifest.file_patterns.is_empty() {
        problems.push("at least one file pattern is required".to_string());
    }
    if !manifest.timeout.is_empty()
        && let Err(e) = parse_duration(&manifest.timeout)
    {
        problems.push(format!("invalid timeout format: {e}"));
    }
    if !manifest.category.is_empty() && !VALID_CATEGORIES.contains(&manifest.category.as_str()) {
        problems.push(format!(
            "invalid category '{}', must be one of: {}",
            manifest.category,
            VALID_CATEGORIES.join(", ")
        ));
    }

    problems
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
