//! Connection settings for the HTTP collaborator

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Where and how to reach the trip planner backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpCollaboratorConfig {
    /// Backend base URL, e.g. "http://127.0.0.1:8000"
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    defaults::BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    defaults::TIMEOUT_SECS
}

fn default_user_agent() -> String {
    defaults::USER_AGENT.to_string()
}

impl Default for HttpCollaboratorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpCollaboratorConfig {
    /// Default settings pointed at another backend
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Check the settings before building a client
    pub fn validate(&self) -> Result<(), HttpConfigError> {
        let url = self.base_url.trim();
        let has_host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .is_some_and(|rest| !rest.trim_end_matches('/').is_empty());
        if !has_host {
            return Err(HttpConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(HttpConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Errors building the HTTP collaborator
#[derive(Debug, thiserror::Error)]
pub enum HttpConfigError {
    #[error("Invalid base URL '{0}': expected http:// or https:// followed by a host")]
    InvalidBaseUrl(String),

    #[error("Timeout must be at least one second")]
    ZeroTimeout,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
