// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin command implementation.

use std::io::Write;
use std::path::PathBuf;

use prehook::cli::{Cli, PluginCommand};
use prehook::config::{self, Config};
use prehook::discovery;
use prehook::error::ExitCode;
use prehook::git;
use prehook::plugin::{self, load_manifest, validate_manifest};

/// Run a plugin subcommand.
pub fn run(cli: &Cli, cmd: &PluginCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        PluginCommand::List => list(cli),
        PluginCommand::Validate { dir } => validate(dir),
    }
}

/// Config plus the directory plugin paths are relative to.
///
/// Outside a git repository the working directory stands in for the root.
pub fn load_config(cli: &Cli) -> anyhow::Result<(Config, PathBuf)> {
    let cwd = std::env::current_dir()?;
    let root = git::repo_root(&cwd).unwrap_or_else(|_| cwd.clone());
    let path = discovery::resolve_config(cli.config.as_deref(), &cwd)?;
    Ok((config::load_or_default(path.as_deref())?, root))
}

fn list(cli: &Cli) -> anyhow::Result<ExitCode> {
    let (config, root) = load_config(cli)?;
    let dir = root.join(&config.plugins.directory);
    if !config.plugins.enabled {
        eprintln!("note: plugins are disabled; set [plugins] enabled = true to run them");
    }

    let found = plugin::discover(&dir);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if found.plugins.is_empty() && found.errors.is_empty() {
        writeln!(out, "no plugins found in {}", dir.display())?;
        return Ok(ExitCode::Success);
    }

    for p in &found.plugins {
        let manifest = p.manifest();
        writeln!(
            out,
            "{} {} ({})",
            manifest.name,
            manifest.version,
            p.directory().display()
        )?;
        if !manifest.description.is_empty() {
            writeln!(out, "  {}", manifest.description)?;
        }
    }
    for err in &found.errors {
        eprintln!("prehook: warning: {err}");
    }

    Ok(if found.errors.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::ConfigError
    })
}

fn validate(dir: &std::path::Path) -> anyhow::Result<ExitCode> {
    let (manifest, path) = load_manifest(dir)?;
    let problems = validate_manifest(&manifest);

    if problems.is_empty() {
        println!("{}: ok", path.display());
        return Ok(ExitCode::Success);
    }

    eprintln!("{}:", path.display());
    for problem in &problems {
        eprintln!("  {problem}");
    }
    Ok(ExitCode::ConfigError)
}
