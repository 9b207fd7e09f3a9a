// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! `.prehook.toml` is looked up in the starting directory and each of its
//! ancestors, nearest first, never leaving the enclosing work tree.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::{Error, Result};

/// Config file name looked up in each directory.
pub const CONFIG_FILE_NAME: &str = ".prehook.toml";

/// Nearest `.prehook.toml` at or above `start_dir`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());
    let top = work_tree_root(&start);

    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if top.as_deref() == Some(dir) {
            break;
        }
    }
    None
}

/// Last directory the search may visit.
///
/// The repository work tree when git can open one, otherwise the nearest
/// directory carrying a `.git` entry. `None` lets the walk reach `/`.
fn work_tree_root(start: &Path) -> Option<PathBuf> {
    let from_repo = Repository::discover(start)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
        .and_then(|dir| dir.canonicalize().ok())
        .filter(|dir| start.starts_with(dir));

    from_repo.or_else(|| {
        start
            .ancestors()
            .find(|dir| dir.join(".git").exists())
            .map(Path::to_path_buf)
    })
}

/// Config path from `-C`/`PREHOOK_CONFIG`, else discovery from `cwd`.
///
/// An explicit path that does not exist is an error; finding nothing by
/// discovery means defaults.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    let Some(path) = explicit else {
        return Ok(find_config(cwd));
    };
    if !path.exists() {
        return Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        });
    }
    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
