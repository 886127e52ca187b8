// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Field validation for create and update payloads.
//!
//! Values are checked but never rewritten: a valid title is stored exactly
//! as supplied.

use crate::bug::{BugUpdate, NewBug};
use crate::error::{Error, Result};

// Input length limits
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1_000_000;
pub const MAX_SPRINT_LENGTH: usize = 100;

/// Validate that a title is non-blank and within length limits (in chars).
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::FieldEmpty { field: "Title" });
    }
    let chars = title.chars().count();
    if chars > MAX_TITLE_LENGTH {
        return Err(Error::FieldTooLong {
            field: "Title",
            actual: chars,
            max: MAX_TITLE_LENGTH,
        });
    }
    Ok(())
}

/// Validate that a description is within length limits
pub fn validate_description(description: &str) -> Result<()> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(Error::FieldTooLong {
            field: "Description",
            actual: description.len(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(())
}

/// Validate that a sprint label is within length limits
pub fn validate_sprint(sprint: &str) -> Result<()> {
    let chars = sprint.chars().count();
    if chars > MAX_SPRINT_LENGTH {
        return Err(Error::FieldTooLong {
            field: "Sprint",
            actual: chars,
            max: MAX_SPRINT_LENGTH,
        });
    }
    Ok(())
}

impl NewBug {
    /// Check every supplied field.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        if let Some(sprint) = &self.sprint {
            validate_sprint(sprint)?;
        }
        Ok(())
    }
}

impl BugUpdate {
    /// Check the fields that are present; absent fields are not inspected.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(Some(sprint)) = &self.sprint {
            validate_sprint(sprint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
