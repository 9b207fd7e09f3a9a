// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use yare::parameterized;

#[parameterized(
    spaces = { b"a  \nb\n", b"a\nb\n" },
    tabs = { b"a\t\t\nb\n", b"a\nb\n" },
    crlf = { b"a \r\nb\t\r\n", b"a\r\nb\r\n" },
    no_final_newline = { b"a\nb  ", b"a\nb" },
    whitespace_only_line = { b"a\n   \nb\n", b"a\n\nb\n" },
    only_whitespace = { b"   ", b"" },
)]
fn strips_trailing_whitespace(input: &[u8], expected: &[u8]) {
    assert_eq!(strip_trailing_whitespace(input).unwrap(), expected);
}

#[parameterized(
    clean = { b"a\nb\n" },
    empty = { b"" },
    leading_spaces = { b"  indented\n" },
    newline_only = { b"\n" },
)]
fn clean_content_is_untouched(input: &[u8]) {
    assert_eq!(strip_trailing_whitespace(input), None);
}

#[test]
fn check_is_named_whitespace() {
    use crate::check::Check;
    assert_eq!(check().name(), "whitespace");
}
