// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build script that generates env var name constants for `env.rs`.

// Build scripts should panic on failure; there is no meaningful recovery.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest = Path::new(&out_dir).join("env_names.rs");

    let contents = r#"
/// Environment variable: disables color output (any value).
pub const NO_COLOR: &str = "NO_COLOR";
/// Environment variable: forces color output (any value).
pub const COLOR: &str = "COLOR";
/// Environment variable: indicates CI environment.
pub const CI: &str = "CI";
/// Environment variable: standard pre-commit skip list (checked first).
pub const SKIP: &str = "SKIP";
/// Environment variable: prehook-specific skip list (checked second).
pub const PREHOOK_SKIP: &str = "PREHOOK_SKIP";
/// Environment variable: explicit config file path.
pub const PREHOOK_CONFIG: &str = "PREHOOK_CONFIG";
/// Environment variable: configures tracing log filter.
pub const PREHOOK_LOG: &str = "PREHOOK_LOG";
"#;

    fs::write(dest, contents).expect("failed to write env_names.rs");
}
