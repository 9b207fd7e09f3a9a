// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-commit check runner.
//!
//! Runs built-in Go checks, in-place fixers and external plugins against
//! the staged changeset, sequentially or on a bounded worker pool, under
//! a run-wide deadline.

pub mod check;
pub mod checks;
pub mod cli;
pub mod color;
pub mod config;
pub mod context;
pub mod discovery;
pub mod env;
pub mod error;
pub mod git;
pub mod output;
pub mod plugin;
pub mod process;
pub mod runner;
pub mod skip;
pub mod verbose;

pub use check::{Check, CheckResult, Results, Status};
pub use checks::Registry;
pub use cli::{Cli, Command};
pub use config::Config;
pub use context::RunContext;
pub use error::{Error, ExitCode, Result};
pub use runner::{Options, Runner};

#[cfg(test)]
pub mod test_utils;
