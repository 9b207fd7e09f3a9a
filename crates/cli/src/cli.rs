// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::duration::parse_duration;

/// A fast, parallel pre-commit check runner
#[derive(Parser)]
#[command(name = "prehook")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "PREHOOK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run checks against staged (or given) files
    Run(RunArgs),
    /// List registered checks
    List,
    /// Inspect plugins
    #[command(subcommand)]
    Plugin(PluginCommand),
}

#[derive(clap::Args, Default)]
pub struct RunArgs {
    /// Files to check (default: staged files)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Check every tracked file instead of staged files
    #[arg(long, conflicts_with = "files")]
    pub all_files: bool,

    /// Run only these checks
    #[arg(long, value_delimiter = ',', value_name = "CHECKS")]
    pub only: Vec<String>,

    /// Skip these checks (`all` skips everything)
    #[arg(long, value_delimiter = ',', value_name = "CHECKS")]
    pub skip: Vec<String>,

    /// Number of parallel workers (0 = auto)
    #[arg(short = 'j', long = "parallel", default_value_t = 0, value_name = "N")]
    pub parallel: usize,

    /// Run checks one at a time and stop at the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Treat skippable failures (missing tools) as warnings
    #[arg(long)]
    pub graceful: bool,

    /// Overall time limit, e.g. 90s or 5m (overrides config)
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<std::time::Duration>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Print progress and passing checks
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum PluginCommand {
    /// List discovered plugins and load problems
    List,
    /// Validate the plugin manifest in a directory
    Validate {
        /// Plugin directory containing plugin.yaml, plugin.yml or plugin.json
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
