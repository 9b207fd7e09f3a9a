// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn names_skip_is_correct() {
    assert_eq!(names::SKIP, "SKIP");
}

#[test]
fn names_prehook_skip_is_correct() {
    assert_eq!(names::PREHOOK_SKIP, "PREHOOK_SKIP");
}

#[test]
fn names_prehook_log_is_correct() {
    assert_eq!(names::PREHOOK_LOG, "PREHOOK_LOG");
}

#[test]
fn names_prehook_config_is_correct() {
    assert_eq!(names::PREHOOK_CONFIG, "PREHOOK_CONFIG");
}

#[test]
fn names_no_color_is_correct() {
    assert_eq!(names::NO_COLOR, "NO_COLOR");
}

#[test]
fn var_returns_none_for_unset() {
    assert_eq!(var("PREHOOK_TEST_DEFINITELY_UNSET_VARIABLE"), None);
}
