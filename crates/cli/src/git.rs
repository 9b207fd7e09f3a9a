// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git utilities for collecting the changeset.
//!
//! Uses git2 (libgit2) for all git operations to avoid subprocess overhead.
//! Paths are returned relative to the repository root, with `/` separators.
//!
//! ## File Detection
//!
//! Staged files come from diffing the index against HEAD. Deleted files
//! are left out since there is nothing on disk left to check.

use std::path::{Path, PathBuf};

use anyhow::Context;
use git2::{Delta, Repository};

use crate::error::{Error, Result};

/// Working directory root of the repository containing `start`.
pub fn repo_root(start: &Path) -> Result<PathBuf> {
    let repo = Repository::discover(start)
        .map_err(|e| Error::Git(format!("not a git repository: {}", e.message())))?;
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::Git("bare repositories have no working tree".to_string()))
}

/// Get list of staged files (added, modified, renamed, copied).
///
/// Uses git2 to compare the index against HEAD to find staged changes.
pub fn get_staged_files(root: &Path) -> anyhow::Result<Vec<String>> {
    let repo = Repository::discover(root).context("Failed to open repository")?;

    // Get HEAD tree (handle case of empty repo with no commits)
    let head_tree = match repo.head() {
        Ok(head) => Some(head.peel_to_tree().context("Failed to get HEAD tree")?),
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
        Err(e) => return Err(e).context("Failed to get HEAD"),
    };

    let index = repo.index().context("Failed to get repository index")?;

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)
        .context("Failed to compute diff")?;

    let mut files = Vec::new();
    for delta in diff.deltas() {
        if delta.status() == Delta::Deleted {
            continue;
        }
        if let Some(path) = delta.new_file().path() {
            files.push(path_to_string(path));
        }
    }

    Ok(files)
}

/// Every file in the index (for `--all-files`).
pub fn get_tracked_files(root: &Path) -> anyhow::Result<Vec<String>> {
    let repo = Repository::discover(root).context("Failed to open repository")?;
    let index = repo.index().context("Failed to get repository index")?;

    Ok(index
        .iter()
        .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
        .collect())
}

/// Add files (relative to the repository root) to the index.
pub fn stage_files(root: &Path, files: &[String]) -> anyhow::Result<()> {
    let repo = Repository::discover(root).context("Failed to open repository")?;
    let mut index = repo.index().context("Failed to get repository index")?;

    for file in files {
        index
            .add_path(Path::new(file))
            .with_context(|| format!("Failed to stage {file}"))?;
    }
    index.write().context("Failed to write index")?;
    Ok(())
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
