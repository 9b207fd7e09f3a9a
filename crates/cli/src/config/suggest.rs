// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check name suggestions for config validation.

use std::path::Path;

use crate::checks::KNOWN_CHECKS;

/// Suggest a check name for a typo.
pub fn suggest_check_name(unknown: &str) -> Option<&'static str> {
    // Empty strings can't be typos
    if unknown.is_empty() {
        return None;
    }

    // Tool names and common variations
    let suggestion = match unknown {
        "gofmt" | "format" | "formatting" => Some("fmt"),
        "gofumpt" | "gofumports" => Some("fumpt"),
        "imports" | "goimport" => Some("goimports"),
        "golangci-lint" | "golangci" | "linter" | "linting" => Some("lint"),
        "tidy" | "modtidy" | "mod_tidy" | "gomod" => Some("mod-tidy"),
        "trailing-whitespace" | "trailing_whitespace" | "ws" => Some("whitespace"),
        "end-of-file" | "end_of_file" | "eol" | "newline" => Some("eof"),
        "ai" | "ai-detection" | "attribution" => Some("ai_detection"),
        "secrets" | "leaks" | "secret-scan" => Some("gitleaks"),
        _ => None,
    };

    if suggestion.is_some() {
        return suggestion;
    }

    // Try prefix matching (require at least 2 chars to avoid false positives)
    if unknown.len() >= 2 {
        for &name in KNOWN_CHECKS {
            if name.starts_with(unknown) || unknown.starts_with(name) {
                return Some(name);
            }
        }
    }

    None
}

/// Warn about an unknown check key in `section` with a suggestion.
pub fn warn_unknown_check(path: &Path, section: &str, key: &str) {
    match suggest_check_name(key) {
        Some(suggested) => eprintln!(
            "prehook: warning: {}: unknown check `{}.{}`. Did you mean `{}`?",
            path.display(),
            section,
            key,
            suggested
        ),
        None => eprintln!(
            "prehook: warning: {}: unknown check `{}.{}`\n  Valid checks: {}",
            path.display(),
            section,
            key,
            KNOWN_CHECKS.join(", ")
        ),
    }
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod tests;
