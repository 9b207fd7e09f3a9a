// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin directory scanning.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::Plugin;
use super::manifest::load_manifest;
use crate::check::Check;

/// A plugin directory that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub directory: PathBuf,
    pub message: String,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.directory.display(), self.message)
    }
}

/// Result of scanning a plugins directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Loaded plugins, sorted by name.
    pub plugins: Vec<Plugin>,
    pub errors: Vec<LoadError>,
}

/// Load every plugin under `dir`, one per immediate subdirectory.
///
/// A missing directory yields nothing. A directory whose manifest is
/// missing or invalid is reported in [`Discovery::errors`] and does not
/// stop the scan. When two directories declare the same name the first
/// one (in directory order) is kept.
pub fn discover(dir: &Path) -> Discovery {
    let mut discovery = Discovery::default();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return discovery,
        Err(e) => {
            discovery.errors.push(LoadError {
                directory: dir.to_path_buf(),
                message: format!("failed to read plugin directory: {e}"),
            });
            return discovery;
        }
    };

    let mut subdirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    let mut by_name: BTreeMap<String, Plugin> = BTreeMap::new();
    for subdir in subdirs {
        let plugin = load_manifest(&subdir)
            .and_then(|(manifest, _)| Plugin::new(manifest, subdir.clone()));
        match plugin {
            Ok(plugin) if by_name.contains_key(plugin.name()) => {
                discovery.errors.push(LoadError {
                    message: format!("duplicate plugin name '{}'", plugin.name()),
                    directory: subdir,
                });
            }
            Ok(plugin) => {
                tracing::debug!("loaded plugin {} from {}", plugin.name(), subdir.display());
                by_name.insert(plugin.name().to_string(), plugin);
            }
            Err(e) => discovery.errors.push(LoadError {
                directory: subdir,
                message: e.to_string(),
            }),
        }
    }

    discovery.plugins = by_name.into_values().collect();
    discovery
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
