// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check runner.
//!
//! Selects checks from the registry, runs them either one at a time
//! (fail-fast) or on a bounded pool of threads, and folds every outcome
//! into [`Results`]. A failing check never stops its siblings in parallel
//! mode; only the run context can interrupt a check that already started.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::check::{Check, CheckResult, Results, Status};
use crate::checks::Registry;
use crate::config::Config;
use crate::context::{ContextError, RunContext};
use crate::error::{CheckFailure, Error, Result, TimeoutError};
use crate::skip::{SkipEnv, combine_skip_sources};

/// Progress callback: `(check name, status, elapsed)`.
///
/// Called with [`Status::Running`] before a check starts and once more
/// with its terminal status. May be called from worker threads.
pub type ProgressFn = Arc<dyn Fn(&str, Status, Duration) + Send + Sync>;

/// How often a worker waiting for a slot looks at the run context.
const SLOT_POLL: Duration = Duration::from_millis(20);

/// Per-run parameters.
#[derive(Clone, Default)]
pub struct Options {
    /// Files to check, relative to the repository root.
    pub files: Vec<String>,
    /// Run only these checks (empty = every enabled check).
    pub only: Vec<String>,
    /// Never run these checks.
    pub skip: Vec<String>,
    /// Worker count; 0 falls back to config, then to the CPU count.
    pub parallel: usize,
    /// Run sequentially and stop at the first failure.
    pub fail_fast: bool,
    /// Count skippable failures as skipped instead of failed.
    pub graceful_degradation: bool,
    pub progress: Option<ProgressFn>,
}

impl Options {
    fn emit(&self, name: &str, status: Status, elapsed: Duration) {
        if let Some(progress) = &self.progress {
            progress(name, status, elapsed);
        }
    }
}

pub struct Runner {
    registry: Registry,
    config: Config,
    skip_env: Option<SkipEnv>,
}

impl Runner {
    pub fn new(registry: Registry, config: Config) -> Self {
        Self {
            registry,
            config,
            skip_env: None,
        }
    }

    /// Use a fixed skip environment instead of reading the process
    /// environment at the start of each run.
    pub fn with_skip_env(mut self, env: SkipEnv) -> Self {
        self.skip_env = Some(env);
        self
    }

    /// Run the selected checks under a deadline of `config.timeout`.
    ///
    /// Fails only when selection leaves nothing to run; check failures are
    /// reported inside the returned [`Results`].
    pub fn run(&self, ctx: &RunContext, opts: &Options) -> Result<Results> {
        let start = Instant::now();
        let checks = self.determine_checks(opts)?;
        let workers = self.parallelism(opts.parallel);
        let run_ctx = ctx.with_timeout(self.config.timeout);

        tracing::debug!(
            "running {} check(s) on {} file(s), fail_fast={}, workers={}",
            checks.len(),
            opts.files.len(),
            opts.fail_fast,
            workers
        );

        let mut results = Results::new(opts.files.len());
        if opts.fail_fast {
            self.run_sequential(&run_ctx, &checks, opts, &mut results);
        } else {
            self.run_parallel(&run_ctx, &checks, opts, workers, &mut results);
        }

        results.total_duration = start.elapsed();
        Ok(results)
    }

    /// Enabled checks, narrowed by `only` and the merged skip set.
    pub fn determine_checks(&self, opts: &Options) -> Result<Vec<Arc<dyn Check>>> {
        let recognized = self.registry.recognized();
        let env = self.skip_env.clone().unwrap_or_else(SkipEnv::from_env);
        let skips = combine_skip_sources(&opts.skip, &env, &recognized);

        for name in &opts.only {
            if !recognized.contains(name) {
                tracing::warn!("ignoring unknown check in only list: {name}");
            } else if self.registry.get(name).is_none() {
                tracing::warn!("check {name} is not registered in this repository");
            }
        }

        let checks: Vec<Arc<dyn Check>> = self
            .registry
            .checks()
            .iter()
            .filter(|c| self.registry.is_enabled(c.name()))
            .filter(|c| opts.only.is_empty() || opts.only.iter().any(|o| o == c.name()))
            .filter(|c| !skips.iter().any(|s| s == c.name()))
            .cloned()
            .collect();

        if checks.is_empty() {
            return Err(Error::NoChecksToRun);
        }
        tracing::debug!(
            "selected checks: {:?} (skipped: {:?})",
            checks.iter().map(|c| c.name()).collect::<Vec<_>>(),
            skips
        );
        Ok(checks)
    }

    /// Effective worker count, at least one.
    pub fn parallelism(&self, requested: usize) -> usize {
        if requested > 0 {
            requested
        } else if self.config.performance.parallel_workers > 0 {
            self.config.performance.parallel_workers
        } else {
            num_cpus::get().max(1)
        }
    }

    fn run_sequential(
        &self,
        ctx: &RunContext,
        checks: &[Arc<dyn Check>],
        opts: &Options,
        results: &mut Results,
    ) {
        for check in checks {
            opts.emit(check.name(), Status::Running, Duration::ZERO);
            let result =
                self.run_check(ctx, check.as_ref(), &opts.files, opts.graceful_degradation);
            let duration = result.duration;
            let name = result.name.clone();
            let status = results.record(result);
            opts.emit(&name, status, duration);

            if status == Status::Failed {
                tracing::debug!("fail-fast: stopping after {name}");
                break;
            }
        }
    }

    fn run_parallel(
        &self,
        ctx: &RunContext,
        checks: &[Arc<dyn Check>],
        opts: &Options,
        workers: usize,
        results: &mut Results,
    ) {
        let (slot_tx, slot_rx) = crossbeam_channel::bounded(workers);
        for _ in 0..workers {
            let _ = slot_tx.send(());
        }
        let (result_tx, result_rx) = crossbeam_channel::bounded(checks.len());

        thread::scope(|scope| {
            for check in checks {
                let slot_tx = slot_tx.clone();
                let slot_rx = slot_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    let result = match Slot::acquire(&slot_tx, &slot_rx, ctx) {
                        Ok(_slot) => {
                            opts.emit(check.name(), Status::Running, Duration::ZERO);
                            self.run_check(
                                ctx,
                                check.as_ref(),
                                &opts.files,
                                opts.graceful_degradation,
                            )
                        }
                        Err(reason) => self.classify(
                            ctx,
                            check.name(),
                            Vec::new(),
                            CheckFailure::Context(reason),
                            Duration::ZERO,
                            opts.graceful_degradation,
                        ),
                    };
                    opts.emit(check.name(), Status::of(&result), result.duration);
                    let _ = result_tx.send(result);
                });
            }
        });
        drop(result_tx);

        for result in result_rx.try_iter() {
            results.record(result);
        }
    }

    /// Run one check: exclude, filter, run, classify.
    ///
    /// A check left with no files after filtering passes without running.
    pub fn run_check(
        &self,
        ctx: &RunContext,
        check: &dyn Check,
        files: &[String],
        graceful: bool,
    ) -> CheckResult {
        let start = Instant::now();
        let name = check.name();

        let candidates: Vec<String> = files
            .iter()
            .filter(|f| !is_excluded(f, &self.config.git.exclude_patterns))
            .cloned()
            .collect();
        let filtered = check.filter_files(&candidates);
        if filtered.is_empty() {
            tracing::debug!("{name}: no matching files");
            return CheckResult::passed(name, Vec::new()).with_duration(start.elapsed());
        }

        let outcome = catch_unwind(AssertUnwindSafe(|| check.run(ctx, &filtered)));
        let result = match outcome {
            Ok(Ok(())) => CheckResult::passed(name, filtered),
            Ok(Err(failure)) => {
                self.classify(ctx, name, filtered, failure, start.elapsed(), graceful)
            }
            Err(_) => CheckResult::failed(name, filtered, "Internal error: check panicked"),
        };
        result.with_duration(start.elapsed())
    }

    /// Turn a failure into a result.
    ///
    /// Timeouts reported by the check win; otherwise an expired run
    /// deadline is reported as a run timeout whatever the check returned.
    fn classify(
        &self,
        ctx: &RunContext,
        name: &str,
        files: Vec<String>,
        failure: CheckFailure,
        elapsed: Duration,
        graceful: bool,
    ) -> CheckResult {
        if let CheckFailure::Timeout(timeout) = &failure {
            let message = timeout.to_string();
            return CheckResult {
                suggestion: message.clone(),
                ..CheckResult::failed(name, files, message)
            };
        }

        if ctx.deadline_exceeded() && !ctx.is_cancelled() {
            let message = TimeoutError::run(name, self.config.timeout, elapsed).to_string();
            return CheckResult {
                suggestion: message.clone(),
                ..CheckResult::failed(name, files, message)
            };
        }

        match failure {
            CheckFailure::Check(err) => {
                let degraded = graceful && err.can_skip;
                let output = err
                    .output
                    .or_else(|| (!err.files.is_empty()).then(|| err.files.join("\n")));
                CheckResult {
                    success: degraded,
                    skipped: degraded,
                    suggestion: err.suggestion,
                    can_skip: err.can_skip,
                    command: err.command,
                    output,
                    ..CheckResult::failed(name, files, err.message)
                }
            }
            other => CheckResult::failed(name, files, other.to_string()),
        }
    }
}

/// True when `file` contains any non-empty exclude pattern.
///
/// Directory patterns such as `vendor/` therefore match both at the root
/// and nested (`a/vendor/x.go`).
pub fn is_excluded(file: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .map(|p| p.trim())
        .any(|p| !p.is_empty() && file.contains(p))
}

/// A worker slot, returned to the pool on drop.
struct Slot<'a> {
    tx: &'a Sender<()>,
}

impl<'a> Slot<'a> {
    /// Wait for a free slot, giving up when the run context ends.
    fn acquire(
        tx: &'a Sender<()>,
        rx: &Receiver<()>,
        ctx: &RunContext,
    ) -> std::result::Result<Self, ContextError> {
        loop {
            ctx.check()?;
            let wait = ctx.remaining().map_or(SLOT_POLL, |left| left.min(SLOT_POLL));
            match rx.recv_timeout(wait) {
                Ok(()) => return Ok(Self { tx }),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Err(ContextError::Canceled),
            }
        }
    }
}

impl Drop for Slot<'_> {
    fn drop(&mut self) {
        let _ = self.tx.send(());
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
