// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Skip resolution.
//!
//! Check names can be excluded from `--skip`, from `SKIP` (the convention
//! shared with other pre-commit frameworks) and from `PREHOOK_SKIP`. The
//! first environment variable that names anything wins; the other is not
//! merged in.

use std::collections::HashSet;

use crate::env;

/// Snapshot of the skip environment variables, taken once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipEnv {
    /// Value of `SKIP`.
    pub primary: Option<String>,
    /// Value of `PREHOOK_SKIP`.
    pub fallback: Option<String>,
}

impl SkipEnv {
    pub fn from_env() -> Self {
        Self {
            primary: env::var(env::names::SKIP),
            fallback: env::var(env::names::PREHOOK_SKIP),
        }
    }

    /// Parsed value of the first variable that names at least one check.
    fn resolve(&self, known: &[String]) -> Vec<String> {
        [&self.primary, &self.fallback]
            .into_iter()
            .flatten()
            .find_map(|value| parse_skip_value(value, known))
            .unwrap_or_default()
    }
}

/// Parse one skip value.
///
/// `all` (any case) expands to every known check. Otherwise the value is a
/// comma-separated list. Returns `None` when the value names nothing, so a
/// value like `" , ,"` never hides the next source.
pub fn parse_skip_value(value: &str, known: &[String]) -> Option<Vec<String>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if value.eq_ignore_ascii_case("all") {
        return Some(known.to_vec());
    }

    let names: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    (!names.is_empty()).then_some(names)
}

/// Merge CLI skips with the environment, then deduplicate and validate.
pub fn combine_skip_sources(cli: &[String], env: &SkipEnv, known: &[String]) -> Vec<String> {
    let mut skips: Vec<String> = Vec::with_capacity(cli.len());
    for name in cli {
        if name.trim().eq_ignore_ascii_case("all") {
            skips.extend(known.iter().cloned());
        } else {
            skips.push(name.trim().to_string());
        }
    }
    skips.extend(env.resolve(known));
    deduplicate_and_validate_skips(skips, known)
}

/// Drop duplicates and unknown names, keeping first-seen order.
pub fn deduplicate_and_validate_skips(skips: Vec<String>, known: &[String]) -> Vec<String> {
    let known: HashSet<&str> = known.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(skips.len());

    for name in skips {
        if name.is_empty() || !seen.insert(name.clone()) {
            continue;
        }
        if !known.contains(name.as_str()) {
            tracing::warn!("ignoring unknown check in skip list: {name}");
            continue;
        }
        out.push(name);
    }
    out
}

#[cfg(test)]
#[path = "skip_tests.rs"]
mod tests;
