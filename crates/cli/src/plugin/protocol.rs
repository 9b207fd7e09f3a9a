// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON messages exchanged with a plugin over stdin/stdout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Written to the plugin's stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRequest {
    /// Always `"check"`.
    pub command: String,
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
}

impl PluginRequest {
    pub fn check(files: &[String], config: &BTreeMap<String, String>) -> Self {
        Self {
            command: "check".to_string(),
            files: files.to_vec(),
            config: config.clone(),
        }
    }
}

/// Read from the plugin's stdout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modified: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output: String,
}
