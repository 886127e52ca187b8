// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bugtracker: HTTP service for tracking bugs.
//!
//! Wires the bt-core record store and severity advisor contract into a
//! REST API with an Anthropic-backed advisor.

pub mod api;
pub mod claude;
pub mod config;
pub mod env;
pub mod service;

pub use api::{router, ApiError};
pub use claude::ClaudeAdvisor;
pub use config::{AdvisorConfig, Config, ConfigError, Overrides};
pub use service::BugService;
