// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use prehook::RunContext;
use prehook::check::Status;
use prehook::checks::Registry;
use prehook::cli::{Cli, OutputFormat, RunArgs};
use prehook::color::resolve_color;
use prehook::config;
use prehook::discovery;
use prehook::error::ExitCode;
use prehook::git::{self, get_staged_files, get_tracked_files};
use prehook::output::FormatOptions;
use prehook::output::json::JsonFormatter;
use prehook::output::text::TextFormatter;
use prehook::runner::{Options, ProgressFn, Runner};
use prehook::verbose::VerboseLogger;

/// Run the checks.
pub fn run(cli: &Cli, args: &RunArgs, ctx: &RunContext) -> anyhow::Result<ExitCode> {
    let verbose = VerboseLogger::new(args.verbose);
    let cwd = std::env::current_dir()?;
    let root = git::repo_root(&cwd)?;

    let config_path = discovery::resolve_config(cli.config.as_deref(), &cwd)?;
    let mut config = config::load_or_default(config_path.as_deref())?;
    if let Some(timeout) = args.timeout {
        config.timeout = timeout;
    }

    verbose.section("Configuration");
    match &config_path {
        Some(path) => verbose.log(&format!("Config: {}", path.display())),
        None => verbose.log("Config: (defaults)"),
    }
    verbose.log(&format!("Root: {}", root.display()));

    // Checks and fixers work on root-relative paths
    let files = if !args.files.is_empty() {
        relative_to_root(&args.files, &cwd, &root)
    } else if args.all_files {
        get_tracked_files(&root)?
    } else {
        get_staged_files(&root)?
    };
    std::env::set_current_dir(&root)?;

    verbose.log(&format!("Files: {}", files.len()));
    if files.is_empty() {
        tracing::debug!("no files to check");
    }

    let registry = Registry::from_config(&config, &root)?;
    let fail_fast = args.fail_fast || config.performance.fail_fast;
    let runner = Runner::new(registry, config);

    let progress = verbose.is_enabled().then(|| -> ProgressFn {
        Arc::new(move |name: &str, status: Status, elapsed: Duration| {
            verbose.progress(name, status, elapsed)
        })
    });
    let opts = Options {
        files,
        only: args.only.clone(),
        skip: args.skip.clone(),
        parallel: args.parallel,
        fail_fast,
        graceful_degradation: args.graceful,
        progress,
    };

    verbose.section("Checks");
    let results = runner.run(ctx, &opts)?;

    match args.output {
        OutputFormat::Text => {
            let options = if args.verbose {
                FormatOptions::verbose()
            } else {
                FormatOptions::default()
            };
            let mut formatter = TextFormatter::stdout(resolve_color(), options);
            formatter.write(&results)?;
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut formatter = JsonFormatter::new(stdout.lock());
            formatter.write(&results)?;
        }
    }

    if ctx.is_cancelled() {
        eprintln!("prehook: interrupted");
    }

    Ok(if results.all_passed() {
        ExitCode::Success
    } else {
        ExitCode::CheckFailed
    })
}

/// Rewrite command-line paths relative to the repository root.
///
/// Paths outside the root are passed through unchanged.
fn relative_to_root(files: &[String], cwd: &Path, root: &Path) -> Vec<String> {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let cwd = cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf());
    files
        .iter()
        .map(|file| {
            let absolute = cwd.join(file);
            match absolute.strip_prefix(&root) {
                Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
                Err(_) => file.clone(),
            }
        })
        .collect()
}
