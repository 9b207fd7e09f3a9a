// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variable names read by prehook.
//!
//! Constants are generated by `build.rs` so the names live in one place.

/// Generated env var name constants.
pub mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

/// Read an env var, treating unset and non-UTF-8 values alike.
pub fn var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
