// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server configuration.
//!
//! Settings are resolved once at startup with the precedence
//! command-line flag, then environment variable, then built-in default.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::env;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_DATABASE: &str = "./bugtracker.db";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ADVISOR_TIMEOUT_SECS: u64 = 30;

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address: '{0}'\n  hint: expected host:port, e.g. 127.0.0.1:8000")]
    InvalidBind(String),

    #[error("invalid allowed origin: '{0}'\n  hint: expected an origin such as http://localhost:5173")]
    InvalidOrigin(String),

    #[error("advisor timeout must be at least one second")]
    ZeroTimeout,
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<SocketAddr>,
    pub database: Option<PathBuf>,
    pub allowed_origin: Option<String>,
    pub model: Option<String>,
    pub advisor_timeout_secs: Option<u64>,
}

/// Values read from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub bind: Option<String>,
    pub database: Option<PathBuf>,
    pub allowed_origin: Option<String>,
    pub model: Option<String>,
}

impl EnvSnapshot {
    /// Read every relevant variable from the current environment.
    pub fn capture() -> Self {
        EnvSnapshot {
            api_key: env::anthropic_api_key(),
            base_url: env::anthropic_base_url(),
            bind: env::bind(),
            database: env::database(),
            allowed_origin: env::allowed_origin(),
            model: env::model(),
        }
    }
}

/// Settings for the Anthropic-backed severity advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    /// Absent disables the advisor; every suggestion is then `Medium`.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl AdvisorConfig {
    /// An advisor configuration with no credential.
    pub fn disabled() -> Self {
        AdvisorConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_ADVISOR_TIMEOUT_SECS),
        }
    }
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub database: PathBuf,
    pub allowed_origin: HeaderValue,
    pub advisor: AdvisorConfig,
}

impl Config {
    /// Resolve configuration from command-line overrides and the environment.
    pub fn resolve(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_sources(overrides, EnvSnapshot::capture())
    }

    /// Resolve configuration from explicit sources.
    pub fn from_sources(overrides: Overrides, env: EnvSnapshot) -> Result<Self, ConfigError> {
        let bind = match (overrides.bind, env.bind) {
            (Some(addr), _) => addr,
            (None, Some(raw)) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBind(raw.clone()))?,
            (None, None) => DEFAULT_BIND
                .parse()
                .map_err(|_| ConfigError::InvalidBind(DEFAULT_BIND.to_string()))?,
        };

        let database = overrides
            .database
            .or(env.database)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

        let origin = overrides
            .allowed_origin
            .or(env.allowed_origin)
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin = parse_origin(&origin)?;

        let timeout_secs = overrides
            .advisor_timeout_secs
            .unwrap_or(DEFAULT_ADVISOR_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let advisor = AdvisorConfig {
            api_key: env.api_key,
            base_url: env
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: overrides
                .model
                .or(env.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Config {
            bind,
            database,
            allowed_origin,
            advisor,
        })
    }
}

/// Validate a CORS origin: scheme and host, no path.
fn parse_origin(origin: &str) -> Result<HeaderValue, ConfigError> {
    let trimmed = origin.trim().trim_end_matches('/');
    let valid_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let host = trimmed.split_once("://").map(|(_, rest)| rest).unwrap_or("");
    if !valid_scheme || host.is_empty() || host.contains('/') {
        return Err(ConfigError::InvalidOrigin(origin.to_string()));
    }
    HeaderValue::from_str(trimmed).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
