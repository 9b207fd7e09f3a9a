// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text file detection by extension or well-known basename.

use std::path::Path;

const TEXT_EXTENSIONS: &[&str] = &[
    "go", "mod", "sum", "md", "txt", "yml", "yaml", "json", "xml", "toml", "ini", "cfg", "conf",
    "sh", "bash", "zsh", "fish", "ps1", "py", "rb", "js", "ts", "jsx", "tsx", "css", "scss",
    "sass", "less", "html", "htm", "vue", "java", "c", "cpp", "cc", "cxx", "h", "hpp", "rs",
    "swift", "kt", "scala", "r", "sql", "proto", "thrift", "env",
];

const TEXT_BASENAMES: &[&str] = &[
    "Makefile",
    "Dockerfile",
    "Jenkinsfile",
    "Vagrantfile",
    ".gitignore",
    ".dockerignore",
    ".editorconfig",
    ".env",
    "LICENSE",
    "README",
    "CHANGELOG",
    "AUTHORS",
    "CONTRIBUTORS",
    "MAINTAINERS",
    "TODO",
    "NOTES",
];

/// Whether `file` is likely a text file worth rewriting.
pub fn is_text_file(file: &str) -> bool {
    let path = Path::new(file);

    if let Some(ext) = path.extension().and_then(|e| e.to_str())
        && TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
    {
        return true;
    }

    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| TEXT_BASENAMES.contains(&name))
}

/// Keep only text files.
pub fn filter_text_files(files: &[String]) -> Vec<String> {
    files.iter().filter(|f| is_text_file(f)).cloned().collect()
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
