// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for bt-core operations.

use thiserror::Error;

/// All possible errors that can occur in bt-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("bug not found: {0}")]
    BugNotFound(i64),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: open, in_progress, fixed, closed")]
    InvalidStatus(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: high, medium, low")]
    InvalidPriority(String),

    #[error("invalid bug type: '{0}'\n  hint: valid types are: crash, ui, performance, logic, security, other")]
    InvalidBugType(String),

    #[error("invalid severity: '{0}'\n  hint: valid severities are: High, Medium, Low")]
    InvalidSeverity(String),

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("{field} is too long ({actual} > {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Returns true for field checks on a request payload.
    ///
    /// Enumeration values in payloads are rejected during deserialization,
    /// and a bad stored value is corruption, so the `Invalid*` variants are
    /// not counted here.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::FieldEmpty { .. } | Error::FieldTooLong { .. })
    }
}

/// A specialized Result type for bt-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
