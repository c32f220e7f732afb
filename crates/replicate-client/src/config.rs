// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! Each client carries its own API location and credentials, so several clients
//! pointed at different endpoints (a mock server in tests, a proxy in production)
//! can coexist in one process.

use core::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use url::Url;

use crate::error::ReplicateError;

/// Public Replicate API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.replicate.com";
/// API version prefixed to every path
pub const DEFAULT_API_VERSION: &str = "v1";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Configuration for the Replicate API client
#[derive(Clone)]
pub struct ReplicateConfig {
    /// Base URL of the API, without the version segment
    pub base_url: Url,
    /// API version segment, e.g. `v1`
    pub api_version: String,
    /// API token sent as `Authorization: Token <token>`
    pub api_token: String,
    /// Request timeout in seconds, covering connect, send and body read
    pub timeout_seconds: u64,
    /// `User-Agent` sent with every request
    pub user_agent: String,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default Replicate URL is valid"),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_token: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("replicate-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for ReplicateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicateConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("api_token", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ReplicateConfig {
    /// Create a configuration for the public API with the given token
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    /// Point the client at another API location
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the API version segment
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Value of the `Authorization` header
    pub(crate) fn authorization(&self) -> String {
        format!("Token {}", self.api_token)
    }

    /// Full URL for the API path made of `segments`, e.g. `["predictions", id]`
    ///
    /// Each segment is percent-encoded on its own.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ReplicateError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ReplicateError::Config(format!("Base URL cannot carry a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(self.api_version.split('/').filter(|part| !part.is_empty()))
            .extend(segments);
        Ok(url)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ReplicateError> {
        if self.api_token.trim().is_empty() {
            return Err(ReplicateError::Config(
                "API token cannot be empty".to_string(),
            ));
        }

        if HeaderValue::from_str(&self.authorization()).is_err() {
            return Err(ReplicateError::Config(
                "API token contains characters not allowed in a header".to_string(),
            ));
        }

        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ReplicateError::Config(format!(
                "Unsupported base URL scheme: {}",
                self.base_url.scheme()
            )));
        }

        if self.api_version.trim_matches('/').trim().is_empty() {
            return Err(ReplicateError::Config(
                "API version cannot be empty".to_string(),
            ));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ReplicateError::Config(format!(
                "Invalid timeout: {} seconds (must be 1-{MAX_TIMEOUT_SECONDS})",
                self.timeout_seconds
            )));
        }

        Ok(())
    }
}
