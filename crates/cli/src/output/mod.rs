// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for run results.

pub mod json;
pub mod text;

/// Output formatting options.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Also list checks that passed.
    pub show_passed: bool,
}

impl FormatOptions {
    pub fn verbose() -> Self {
        Self { show_passed: true }
    }
}
