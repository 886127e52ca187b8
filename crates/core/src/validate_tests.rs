// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use crate::bug::{BugType, Priority};
use yare::parameterized;

fn new_bug(title: &str) -> NewBug {
    NewBug {
        title: title.to_string(),
        description: "details".to_string(),
        priority: Priority::Medium,
        bug_type: BugType::Logic,
        sprint: None,
    }
}

#[parameterized(
    simple = { "Crash on save" },
    padded = { "  padded  " },
    at_limit = { &"a".repeat(MAX_TITLE_LENGTH) },
    multibyte_at_limit = { &"é".repeat(MAX_TITLE_LENGTH) },
)]
fn title_valid(title: &str) {
    assert!(validate_title(title).is_ok());
}

#[parameterized(
    empty = { "" },
    spaces = { "   " },
    newline = { "\n\t" },
)]
fn title_blank_rejected(title: &str) {
    assert!(matches!(
        validate_title(title),
        Err(Error::FieldEmpty { field: "Title" })
    ));
}

#[test]
fn title_over_limit_rejected() {
    let title = "a".repeat(MAX_TITLE_LENGTH + 1);
    match validate_title(&title) {
        Err(Error::FieldTooLong { actual, max, .. }) => {
            assert_eq!(actual, MAX_TITLE_LENGTH + 1);
            assert_eq!(max, MAX_TITLE_LENGTH);
        }
        other => panic!("expected FieldTooLong, got {other:?}"),
    }
}

#[test]
fn description_may_be_empty() {
    assert!(validate_description("").is_ok());
}

#[test]
fn description_over_limit_rejected() {
    let description = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
    assert!(validate_description(&description).is_err());
}

#[test]
fn sprint_over_limit_rejected() {
    let sprint = "s".repeat(MAX_SPRINT_LENGTH + 1);
    assert!(validate_sprint(&sprint).is_err());
}

#[test]
fn new_bug_validate_checks_sprint() {
    let mut bug = new_bug("ok");
    assert!(bug.validate().is_ok());
    bug.sprint = Some("s".repeat(MAX_SPRINT_LENGTH + 1));
    assert!(bug.validate().is_err());
}

#[test]
fn new_bug_validate_checks_title() {
    assert!(new_bug("  ").validate().is_err());
}

#[test]
fn update_validate_ignores_absent_fields() {
    assert!(BugUpdate::default().validate().is_ok());
}

#[test]
fn update_validate_checks_present_title() {
    let update = BugUpdate {
        title: Some(String::new()),
        ..Default::default()
    };
    assert!(matches!(
        update.validate(),
        Err(Error::FieldEmpty { field: "Title" })
    ));
}

#[test]
fn update_validate_allows_clearing_sprint() {
    let update = BugUpdate {
        sprint: Some(None),
        ..Default::default()
    };
    assert!(update.validate().is_ok());
}
