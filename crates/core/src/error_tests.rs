// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    bug_not_found = { Error::BugNotFound(42), "42" },
    invalid_status = { Error::InvalidStatus("wontfix".into()), "wontfix" },
    invalid_priority = { Error::InvalidPriority("urgent".into()), "urgent" },
    invalid_bug_type = { Error::InvalidBugType("typo".into()), "typo" },
    field_empty = { Error::FieldEmpty { field: "Title" }, "Title cannot be empty" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_field_too_long_display() {
    let err = Error::FieldTooLong {
        field: "Title",
        actual: 250,
        max: 200,
    };
    assert_eq!(err.to_string(), "Title is too long (250 > 200)");
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[parameterized(
    empty = { Error::FieldEmpty { field: "Title" }, true },
    too_long = { Error::FieldTooLong { field: "Sprint", actual: 101, max: 100 }, true },
    stored_status = { Error::InvalidStatus("x".into()), false },
    not_found = { Error::BugNotFound(1), false },
    corrupted = { Error::CorruptedData("bad row".into()), false },
)]
fn error_is_validation(err: Error, expected: bool) {
    assert_eq!(err.is_validation(), expected);
}
