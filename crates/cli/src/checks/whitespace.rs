// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Trailing whitespace fixer.

use super::fixer::FixerCheck;

pub fn check() -> FixerCheck {
    FixerCheck::new(
        "whitespace",
        "Fix trailing whitespace",
        "trailing whitespace fixed",
        strip_trailing_whitespace,
    )
}

/// Remove spaces and tabs before each line ending.
///
/// `\n` and `\r\n` endings are kept as they are, as is a missing final
/// newline.
pub fn strip_trailing_whitespace(content: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(content.len());
    let mut modified = false;

    for line in content.split_inclusive(|&b| b == b'\n') {
        let (body, ending) = split_ending(line);
        let trimmed_len = body
            .iter()
            .rposition(|&b| b != b' ' && b != b'\t')
            .map_or(0, |i| i + 1);
        if trimmed_len != body.len() {
            modified = true;
        }
        out.extend_from_slice(&body[..trimmed_len]);
        out.extend_from_slice(ending);
    }

    modified.then_some(out)
}

fn split_ending(line: &[u8]) -> (&[u8], &[u8]) {
    let ending_len = if line.ends_with(b"\r\n") {
        2
    } else if line.ends_with(b"\n") {
        1
    } else {
        0
    };
    line.split_at(line.len() - ending_len)
}

#[cfg(test)]
#[path = "whitespace_tests.rs"]
mod tests;
