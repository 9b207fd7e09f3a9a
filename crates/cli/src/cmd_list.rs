// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! List command implementation.

use std::io::Write;

use prehook::checks::Registry;
use prehook::cli::Cli;
use prehook::error::ExitCode;

use crate::cmd_plugin::load_config;

/// Print every registered check with its enabled state.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let (config, root) = load_config(cli)?;
    let registry = Registry::from_config(&config, &root)?;

    let width = registry
        .checks()
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(0);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for check in registry.checks() {
        let state = if registry.is_enabled(check.name()) {
            "enabled"
        } else {
            "disabled"
        };
        writeln!(
            out,
            "{:<width$}  {:<8}  {}",
            check.name(),
            state,
            check.description()
        )?;
    }
    Ok(ExitCode::Success)
}
