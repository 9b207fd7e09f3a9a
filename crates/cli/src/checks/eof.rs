// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Final newline fixer.

use super::fixer::FixerCheck;

pub fn check() -> FixerCheck {
    FixerCheck::new(
        "eof",
        "Ensure files end with newline",
        "missing final newline fixed",
        ensure_final_newline,
    )
}

/// Append `\n` to non-empty content that lacks one. Empty files stay empty.
pub fn ensure_final_newline(content: &[u8]) -> Option<Vec<u8>> {
    match content.last() {
        None | Some(b'\n') => None,
        Some(_) => {
            let mut out = Vec::with_capacity(content.len() + 1);
            out.extend_from_slice(content);
            out.push(b'\n');
            Some(out)
        }
    }
}

#[cfg(test)]
#[path = "eof_tests.rs"]
mod tests;
