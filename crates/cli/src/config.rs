// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line configuration
//!
//! Settings are loaded with the config crate from hierarchical sources
//! (later sources override earlier ones):
//! 1. Default values
//! 2. Optional `replicate.json` in the working directory
//! 3. Environment variables with the `REPLICATE_` prefix, e.g. `REPLICATE_API_TOKEN`

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use replicate_client::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, ReplicateClient, ReplicateConfig};
use serde::Deserialize;
use url::Url;

use crate::error::{CliError, CliResult};

const CONFIG_FILE: &str = "replicate.json";
const ENV_PREFIX: &str = "REPLICATE";

/// Settings for the command-line tool
#[derive(Clone, Deserialize)]
pub struct CliConfig {
    /// API token
    pub api_token: String,
    /// Model as `owner/model`
    pub model: String,
    /// Model version used for new predictions
    pub version: String,
    /// Base URL of the API
    pub base_url: Url,
    /// API version segment
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Delay between refreshes while waiting, in milliseconds
    pub poll_interval_ms: u64,
    /// Give up waiting after this many seconds
    pub max_wait_seconds: u64,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("model", &self.model)
            .field("version", &self.version)
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("max_wait_seconds", &self.max_wait_seconds)
            .finish_non_exhaustive()
    }
}

impl CliConfig {
    /// Load configuration from the config file and environment
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if a required setting is missing or invalid.
    pub fn from_env() -> CliResult<Self> {
        Self::load(
            Some(CONFIG_FILE),
            Environment::with_prefix(ENV_PREFIX).prefix_separator("_"),
        )
        .map_err(|e| CliError::Config {
            message: format!("failed to load configuration: {e}"),
        })
        .and_then(Self::validated)
    }

    fn load(config_file: Option<&str>, environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("api_version", DEFAULT_API_VERSION)?
            .set_default("timeout_seconds", 30)?
            .set_default("poll_interval_ms", 1000)?
            .set_default("max_wait_seconds", 600)?;

        if let Some(config_file) = config_file {
            builder = builder.add_source(File::with_name(config_file).required(false));
        }

        builder.add_source(environment).build()?.try_deserialize()
    }

    fn validated(self) -> CliResult<Self> {
        if self.poll_interval_ms == 0 {
            return Err(CliError::Config {
                message: "poll interval must be greater than 0".to_string(),
            });
        }
        if self.max_wait_seconds == 0 {
            return Err(CliError::Config {
                message: "max wait must be greater than 0".to_string(),
            });
        }
        Ok(self)
    }

    /// Library configuration derived from these settings
    pub fn client_config(&self) -> ReplicateConfig {
        ReplicateConfig::new(self.api_token.clone())
            .with_base_url(self.base_url.clone())
            .with_api_version(self.api_version.clone())
            .with_timeout(self.timeout_seconds)
    }

    /// Build a client bound to the configured model and version
    pub fn client(&self) -> CliResult<ReplicateClient> {
        Ok(ReplicateClient::new(
            self.client_config(),
            &self.model,
            self.version.clone(),
        )?)
    }

    /// Delay between refreshes while waiting
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Maximum time to wait for a terminal state
    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_seconds)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use replicate_client::ReplicateError;

    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .source(Some(source))
    }

    fn load(vars: &[(&str, &str)]) -> CliResult<CliConfig> {
        CliConfig::load(None, environment(vars))
            .map_err(|e| CliError::Config {
                message: e.to_string(),
            })
            .and_then(CliConfig::validated)
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("REPLICATE_API_TOKEN", "r8_token"),
        ("REPLICATE_MODEL", "acme/painter"),
        ("REPLICATE_VERSION", "5c7d5dc6dd8b"),
    ];

    #[test]
    fn defaults_applied() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.api_token, "r8_token");
        assert_eq!(config.model, "acme/painter");
        assert_eq!(config.base_url.as_str(), "https://api.replicate.com/");
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.max_wait(), Duration::from_secs(600));
    }

    #[test]
    fn environment_overrides_defaults() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("REPLICATE_BASE_URL", "http://127.0.0.1:9000"));
        vars.push(("REPLICATE_TIMEOUT_SECONDS", "5"));
        vars.push(("REPLICATE_POLL_INTERVAL_MS", "250"));

        let config = load(&vars).unwrap();

        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));

        let client_config = config.client_config();
        assert_eq!(client_config.timeout_seconds, 5);
        assert_eq!(client_config.base_url, config.base_url);
    }

    #[test]
    fn missing_token_is_config_error() {
        let result = load(&REQUIRED[1..]);
        assert!(matches!(result, Err(CliError::Config { .. })));
    }

    #[test]
    fn zero_poll_interval_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("REPLICATE_POLL_INTERVAL_MS", "0"));
        assert!(matches!(load(&vars), Err(CliError::Config { .. })));
    }

    #[test]
    fn invalid_model_rejected_at_client_construction() {
        let mut config = load(&REQUIRED).unwrap();
        config.model = "painter".to_string();

        assert!(matches!(
            config.client(),
            Err(CliError::Client(ReplicateError::InvalidModelIdentifier { .. }))
        ));
    }

    #[test]
    fn debug_hides_token() {
        let config = load(&REQUIRED).unwrap();
        assert!(!format!("{config:?}").contains("r8_token"));
    }
}
