// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! prehook CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use prehook::RunContext;
use prehook::cli::{Cli, Command};
use prehook::env::names;
use prehook::error::ExitCode;

mod cmd_list;
mod cmd_plugin;
mod cmd_run;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(names::PREHOOK_LOG).unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("prehook: {e}");
            match e.downcast_ref::<prehook::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Run(args)) => {
            let ctx = RunContext::background();
            let handle = ctx.clone();
            if let Err(e) = ctrlc::set_handler(move || handle.cancel()) {
                tracing::warn!("could not install interrupt handler: {e}");
            }
            cmd_run::run(&cli, args, &ctx)
        }
        Some(Command::List) => cmd_list::run(&cli),
        Some(Command::Plugin(cmd)) => cmd_plugin::run(&cli, cmd),
    }
}
