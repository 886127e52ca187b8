// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bt-core: Shared library for the bugtracker service
//!
//! This crate provides the bug record data model, input validation, the
//! SQLite-backed record store, and the severity advisor contract used by the
//! bugtracker HTTP server.

pub mod advisor;
pub mod bug;
pub mod db;
pub mod error;
pub mod validate;

pub use advisor::{normalize_severity, SeverityAdvisor};
pub use bug::{Bug, BugStats, BugType, BugUpdate, NewBug, Priority, Severity, Status};
pub use db::Database;
pub use error::{Error, Result};
