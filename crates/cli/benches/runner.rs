// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Benchmarks for runner overhead.
//!
//! Checks do no work, so the numbers are selection, scheduling and
//! aggregation cost only:
//! - Sequential (fail-fast) vs parallel dispatch
//! - Scaling with check count
//! - Exclude-pattern filtering over large changesets

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use prehook::Registry;
use prehook::check::Check;
use prehook::config::{ChecksConfig, Config};
use prehook::context::RunContext;
use prehook::error::CheckFailure;
use prehook::runner::{Options, Runner, is_excluded};
use prehook::skip::SkipEnv;

struct NoopCheck {
    name: String,
}

impl Check for NoopCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "does nothing"
    }

    fn filter_files(&self, files: &[String]) -> Vec<String> {
        files.to_vec()
    }

    fn run(&self, _ctx: &RunContext, _files: &[String]) -> Result<(), CheckFailure> {
        Ok(())
    }
}

fn runner_with(checks: usize) -> Runner {
    let mut registry = Registry::new(ChecksConfig::default());
    for i in 0..checks {
        registry.register(Arc::new(NoopCheck {
            name: format!("noop-{i}"),
        }));
    }
    Runner::new(registry, Config::default()).with_skip_env(SkipEnv::default())
}

fn changeset(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i % 4 {
            0 => format!("pkg/mod{i}/file.go"),
            1 => format!("vendor/dep{i}/lib.go"),
            2 => format!("docs/page{i}.md"),
            _ => format!("cmd/tool{i}/main.go"),
        })
        .collect()
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let ctx = RunContext::background();
    let files = changeset(100);

    for checks in [1, 8, 32] {
        let runner = runner_with(checks);
        group.throughput(Throughput::Elements(checks as u64));

        let sequential = Options {
            files: files.clone(),
            fail_fast: true,
            ..Options::default()
        };
        group.bench_with_input(BenchmarkId::new("sequential", checks), &checks, |b, _| {
            b.iter(|| black_box(runner.run(&ctx, &sequential).unwrap()))
        });

        let parallel = Options {
            files: files.clone(),
            parallel: 4,
            ..Options::default()
        };
        group.bench_with_input(BenchmarkId::new("parallel", checks), &checks, |b, _| {
            b.iter(|| black_box(runner.run(&ctx, &parallel).unwrap()))
        });
    }

    group.finish();
}

fn bench_excludes(c: &mut Criterion) {
    let mut group = c.benchmark_group("excludes");
    let patterns = Config::default().git.exclude_patterns;

    for n in [100, 1_000, 10_000] {
        let files = changeset(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &files, |b, files| {
            b.iter(|| {
                files
                    .iter()
                    .filter(|f| !is_excluded(black_box(f), &patterns))
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_excludes);
criterion_main!(benches);
