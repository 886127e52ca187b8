// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the server are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Read a variable, treating an empty or whitespace-only value as unset.
fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the value of `ANTHROPIC_API_KEY` if set and non-empty.
pub fn anthropic_api_key() -> Option<String> {
    non_empty(vars::ANTHROPIC_API_KEY)
}

/// Returns the value of `ANTHROPIC_BASE_URL` if set.
pub fn anthropic_base_url() -> Option<String> {
    non_empty(vars::ANTHROPIC_BASE_URL)
}

/// Returns the value of `BUGTRACKER_BIND` if set.
pub fn bind() -> Option<String> {
    non_empty(vars::BUGTRACKER_BIND)
}

/// Returns the value of `BUGTRACKER_DATABASE` if set.
pub fn database() -> Option<PathBuf> {
    non_empty(vars::BUGTRACKER_DATABASE).map(PathBuf::from)
}

/// Returns the value of `BUGTRACKER_ALLOWED_ORIGIN` if set.
pub fn allowed_origin() -> Option<String> {
    non_empty(vars::BUGTRACKER_ALLOWED_ORIGIN)
}

/// Returns the value of `BUGTRACKER_MODEL` if set.
pub fn model() -> Option<String> {
    non_empty(vars::BUGTRACKER_MODEL)
}

/// Returns the `RUST_LOG` filter directives if set.
pub fn rust_log() -> Option<String> {
    non_empty(vars::RUST_LOG)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
