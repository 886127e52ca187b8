// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Severity advisor backed by the Anthropic Messages API.
//!
//! One request per bug creation, no retries. Every failure is logged and
//! collapses to [`Severity::Medium`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use bt_core::advisor::{build_prompt, normalize_severity};
use bt_core::{Severity, SeverityAdvisor};

use crate::config::AdvisorConfig;

/// API version header value sent with every request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Enough output for a single word.
pub const MAX_TOKENS: u32 = 10;

/// Reasons a classification attempt produced no usable label.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unrecognized answer: '{0}'")]
    Unrecognized(String),
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// Text of the first content block, empty if there is none.
    fn first_text(&self) -> &str {
        self.content
            .first()
            .and_then(|block| block.text.as_deref())
            .unwrap_or("")
    }
}

/// Anthropic-backed [`SeverityAdvisor`].
pub struct ClaudeAdvisor {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl ClaudeAdvisor {
    /// Build an advisor. The HTTP client carries the configured timeout.
    pub fn new(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(ClaudeAdvisor {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!("{}/v1/messages", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }

    /// Whether a credential is available.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the model for a label, surfacing every failure.
    pub async fn classify(&self, title: &str, description: &str) -> Result<Severity, AdvisorError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisorError::MissingApiKey)?;

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: [UserMessage {
                role: "user",
                content: build_prompt(title, description),
            }],
        };

        let response: MessagesResponse = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let raw = response.first_text();
        normalize_severity(raw).ok_or_else(|| AdvisorError::Unrecognized(raw.to_string()))
    }
}

#[async_trait]
impl SeverityAdvisor for ClaudeAdvisor {
    async fn suggest(&self, title: &str, description: &str) -> Severity {
        match self.classify(title, description).await {
            Ok(severity) => {
                debug!("advisor suggested {severity}");
                severity
            }
            Err(AdvisorError::MissingApiKey) => {
                debug!("advisor disabled, using {}", Severity::Medium);
                Severity::Medium
            }
            Err(e) => {
                warn!("advisor fallback to {}: {e}", Severity::Medium);
                Severity::Medium
            }
        }
    }
}

#[cfg(test)]
#[path = "claude_tests.rs"]
mod tests;
