//! Run configuration and input validation

pub mod inputs;

pub use inputs::{Inputs, RawInputs};

use crate::github::types::Repository;
use serde::{Deserialize, Serialize};

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default request timeout. Uploads of large artifacts need the headroom.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Connection settings for the hosting service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// REST API base URL (`GITHUB_API_URL` on GitHub Enterprise)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Token used for every request; never written out
    #[serde(skip_serializing, default)]
    pub token: Option<String>,

    /// Repository that owns the release
    pub repository: Repository,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    pub fn new(repository: Repository) -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            repository,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the API URL, ignoring blank values and trailing slashes
    pub fn with_api_url(mut self, api_url: Option<&str>) -> Self {
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
