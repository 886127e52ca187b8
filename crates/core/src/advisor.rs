// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Severity advisor contract.
//!
//! An advisor turns a bug's title and description into a [`Severity`] hint.
//! Implementations must absorb every failure and answer [`Severity::Medium`]
//! instead; record creation never fails because of the advisor.

use async_trait::async_trait;

use crate::bug::Severity;

/// Produces a best-effort severity hint for a new bug.
#[async_trait]
pub trait SeverityAdvisor: Send + Sync {
    /// Suggest a severity. Never fails; falls back to [`Severity::Medium`].
    async fn suggest(&self, title: &str, description: &str) -> Severity;
}

/// Build the one-word classification prompt for a bug.
pub fn build_prompt(title: &str, description: &str) -> String {
    format!(
        "You are a bug severity classifier. Based on the bug title and description, \n\
         respond with ONLY one word: High, Medium, or Low.\n\n\
         Bug Title: {title}\n\
         Bug Description: {description}\n\n\
         Severity:"
    )
}

/// Normalize a raw model answer and match it against the allowed labels.
///
/// The answer is trimmed, then capitalized (first character upper-case, the
/// rest lower-case) and must then equal `High`, `Medium`, or `Low` exactly.
/// `"HIGH"` is accepted; `"high and critical"` is not.
pub fn normalize_severity(raw: &str) -> Option<Severity> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => return None,
    };
    capitalized.parse().ok()
}

#[cfg(test)]
#[path = "advisor_tests.rs"]
mod tests;
