// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duration strings for run, check and plugin time limits.
//!
//! Supports formats:
//! - `"30s"` → 30 seconds
//! - `"500ms"` → 500 milliseconds
//! - `"1m"` → 1 minute
//! - `"1h"` → 1 hour
//! - `"1.5s"` → 1.5 seconds
//! - `"1m30s"` → 90 seconds (units may be combined, largest first)

use std::time::Duration;

use serde::{Deserialize, Deserializer};

const FORMAT_HINT: &str = "use 30s, 500ms, 1m, 1h or 1m30s";

/// Parse a duration string into a Duration.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    if s.starts_with('-') {
        return Err(format!("negative duration: {s}"));
    }

    let mut total = Duration::ZERO;
    let mut rest = s;

    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(num_end);
        let tail = tail.trim_start();
        let unit_end = tail
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);

        if unit.is_empty() {
            return Err(format!("invalid duration format: {s} ({FORMAT_HINT})"));
        }
        if number.is_empty() {
            return Err(format!("invalid duration: {s}"));
        }

        total = total
            .checked_add(parse_component(number, unit, s)?)
            .ok_or_else(|| format!("invalid duration: {s} (too large)"))?;
        rest = next.trim_start();
    }

    Ok(total)
}

/// Parse one `<number><unit>` component.
///
/// Whole numbers use integer arithmetic so `1ms` is exactly one millisecond.
fn parse_component(number: &str, unit: &str, whole: &str) -> Result<Duration, String> {
    let scale_secs: u64 = match unit {
        "ms" => 0,
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        _ => return Err(format!("invalid duration format: {whole} ({FORMAT_HINT})")),
    };

    if let Ok(n) = number.parse::<u64>() {
        if scale_secs == 0 {
            return Ok(Duration::from_millis(n));
        }
        return n
            .checked_mul(scale_secs)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("invalid duration: {whole} (too large)"));
    }

    let n: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration: {whole}"))?;
    let secs = if scale_secs == 0 {
        n / 1000.0
    } else {
        n * scale_secs as f64
    };
    Duration::try_from_secs_f64(secs).map_err(|_| format!("invalid duration: {whole}"))
}

/// Render a duration the way users write them in config.
///
/// `90s` renders as `1m30s`, `1.5s` stays `1.5s`, sub-second values use `ms`.
pub fn format_duration(d: Duration) -> String {
    if d < Duration::from_secs(1) {
        return format!("{}ms", d.as_millis());
    }

    if d < Duration::from_secs(60) {
        if d.subsec_millis() == 0 {
            return format!("{}s", d.as_secs());
        }
        let text = format!("{:.3}", d.as_secs_f64());
        let text = text.trim_end_matches('0').trim_end_matches('.');
        return format!("{text}s");
    }

    let total = d.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 {
        out.push_str(&format!("{seconds}s"));
    }
    out
}

/// Deserialize a required duration string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

/// Deserialize an optional duration string.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(s) => parse_duration(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
