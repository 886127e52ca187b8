// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core bug record types.
//!
//! This module contains the [`Bug`] record, its enumerated fields, and the
//! payload types used to create and partially update records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Workflow status of a bug.
///
/// Any status may be set from any other; there are no enforced transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Reported and not yet picked up. Initial state for new bugs.
    Open,
    /// Someone is working on a fix.
    InProgress,
    /// A fix has landed.
    Fixed,
    /// Closed without further action.
    Closed,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Fixed => "fixed",
            Status::Closed => "closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "in_progress" => Ok(Status::InProgress),
            "fixed" => Ok(Status::Fixed),
            "closed" => Ok(Status::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// How urgently a bug should be addressed, as chosen by the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// Classification of a bug by the kind of defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugType {
    /// Process exits or hangs.
    Crash,
    /// Visual or layout defect.
    Ui,
    /// Too slow or too resource hungry.
    Performance,
    /// Wrong result.
    Logic,
    /// Exploitable weakness.
    Security,
    Other,
}

impl BugType {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            BugType::Crash => "crash",
            BugType::Ui => "ui",
            BugType::Performance => "performance",
            BugType::Logic => "logic",
            BugType::Security => "security",
            BugType::Other => "other",
        }
    }
}

impl fmt::Display for BugType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BugType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "crash" => Ok(BugType::Crash),
            "ui" => Ok(BugType::Ui),
            "performance" => Ok(BugType::Performance),
            "logic" => Ok(BugType::Logic),
            "security" => Ok(BugType::Security),
            "other" => Ok(BugType::Other),
            _ => Err(Error::InvalidBugType(s.to_string())),
        }
    }
}

/// Severity label suggested by the advisor at creation time.
///
/// Unlike the other enumerations this one is capitalized on the wire and in
/// storage, and parsing is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    /// Fallback whenever the advisor cannot produce a usable answer.
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "High" => Ok(Severity::High),
            "Medium" => Ok(Severity::Medium),
            "Low" => Ok(Severity::Low),
            _ => Err(Error::InvalidSeverity(s.to_string())),
        }
    }
}

/// A persisted bug record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    /// Store-assigned identifier. Never changes.
    pub id: i64,
    /// Short summary of the defect.
    pub title: String,
    /// Free-text details and reproduction steps.
    pub description: String,
    /// Current workflow state.
    pub status: Status,
    /// Reporter-assigned priority.
    pub priority: Priority,
    /// Kind of defect.
    pub bug_type: BugType,
    /// Free-form sprint label, e.g. `Sprint-1`.
    pub sprint: Option<String>,
    /// Advisor label computed once at creation; never recomputed.
    pub ai_suggested_severity: Option<Severity>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by a client when reporting a new bug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBug {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub bug_type: BugType,
    #[serde(default)]
    pub sprint: Option<String>,
}

/// A set of optionally-present fields for a partial update.
///
/// Absent fields keep their stored value. `sprint` is nullable, so it carries
/// two layers: `None` means absent, `Some(None)` means clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bug_type: Option<BugType>,
    #[serde(
        default,
        deserialize_with = "present_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub sprint: Option<Option<String>>,
}

impl BugUpdate {
    /// Returns true if no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.bug_type.is_none()
            && self.sprint.is_none()
    }
}

/// Deserialize a field that is present in the payload, keeping an explicit
/// `null` as `Some(None)`. Absent fields fall back to `#[serde(default)]`.
fn present_nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Per-dimension counts of bugs, keyed by the observed value.
///
/// Bugs without a sprint contribute to no `sprint` bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugStats {
    pub status: BTreeMap<String, u64>,
    pub priority: BTreeMap<String, u64>,
    pub bug_type: BTreeMap<String, u64>,
    pub sprint: BTreeMap<String, u64>,
}

#[cfg(test)]
#[path = "bug_tests.rs"]
mod tests;
