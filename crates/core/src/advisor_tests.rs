// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    exact_high = { "High", Some(Severity::High) },
    exact_medium = { "Medium", Some(Severity::Medium) },
    exact_low = { "Low", Some(Severity::Low) },
    upper = { "HIGH", Some(Severity::High) },
    lower = { "low", Some(Severity::Low) },
    mixed = { "mEDIUM", Some(Severity::Medium) },
    padded = { "  High\n", Some(Severity::High) },
    trailing_period = { "High.", None },
    sentence = { "high and critical", None },
    critical = { "Critical", None },
    empty = { "", None },
    whitespace = { "   ", None },
)]
fn normalize_severity_cases(raw: &str, expected: Option<Severity>) {
    assert_eq!(normalize_severity(raw), expected);
}

#[test]
fn prompt_contains_title_and_description() {
    let prompt = build_prompt("Crash on save", "App crashes when saving");
    assert!(prompt.starts_with("You are a bug severity classifier."));
    assert!(prompt.contains("respond with ONLY one word: High, Medium, or Low."));
    assert!(prompt.contains("Bug Title: Crash on save\n"));
    assert!(prompt.contains("Bug Description: App crashes when saving\n\n"));
    assert!(prompt.ends_with("Severity:"));
}

struct Fixed(Severity);

#[async_trait]
impl SeverityAdvisor for Fixed {
    async fn suggest(&self, _title: &str, _description: &str) -> Severity {
        self.0
    }
}

#[tokio::test]
async fn advisor_is_object_safe() {
    let advisor: Box<dyn SeverityAdvisor> = Box::new(Fixed(Severity::Low));
    assert_eq!(advisor.suggest("t", "d").await, Severity::Low);
}
