//! Configuration for the SmartLead MCP server.
//!
//! All runtime knobs come from environment variables (optionally via a
//! `.env` file loaded at startup). The resulting [`Config`] is immutable
//! and shared by reference with every client; library code never reads
//! the environment on its own.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default SmartLead API root.
pub const DEFAULT_BASE_URL: &str = "https://server.smartlead.ai/api/v1";

/// Default Smart Senders API root (separate upstream host).
pub const DEFAULT_SMART_SENDERS_URL: &str = "https://smart-senders.smartlead.ai/api/v1";

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1_000
}

fn default_rate_limit() -> u32 {
    60
}

/// Error raised while building a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SMARTLEAD_API_KEY is not set - get your key from the SmartLead settings page")]
    MissingApiKey,

    #[error("API key must not be empty")]
    EmptyApiKey,

    #[error("invalid value {value:?} for {var}: expected a positive integer")]
    InvalidNumber { var: &'static str, value: String },
}

/// Immutable client configuration.
///
/// Constructed once at process start and passed by `Arc` into every
/// client. `api_key` is required; everything else has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SmartLead API key, sent as a query parameter on every request.
    pub api_key: String,

    /// Base URL for the main SmartLead API.
    pub base_url: String,

    /// Base URL for the Smart Senders API.
    pub smart_senders_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of retries after the initial attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff seed in milliseconds; doubled on each retry.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Advisory upstream rate limit in requests per minute. Logged at
    /// startup; individual calls still back off on 429 independently.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,
}

impl Config {
    /// Create a configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            smart_senders_url: DEFAULT_SMART_SENDERS_URL.to_string(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            rate_limit: default_rate_limit(),
        })
    }

    /// Build the configuration from environment variables.
    ///
    /// `SMARTLEAD_API_KEY` is required; `SMARTLEAD_BASE_URL`,
    /// `SMARTLEAD_SMART_SENDERS_URL`, `SMARTLEAD_TIMEOUT_MS`,
    /// `SMARTLEAD_MAX_RETRIES`, `SMARTLEAD_RETRY_DELAY_MS` and
    /// `SMARTLEAD_RATE_LIMIT` override the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("SMARTLEAD_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key)?;

        if let Ok(url) = std::env::var("SMARTLEAD_BASE_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim_end_matches('/').to_string();
            }
        }
        if let Ok(url) = std::env::var("SMARTLEAD_SMART_SENDERS_URL") {
            if !url.trim().is_empty() {
                config.smart_senders_url = url.trim_end_matches('/').to_string();
            }
        }

        config.timeout_ms = parse_env_u64("SMARTLEAD_TIMEOUT_MS", config.timeout_ms)?;
        config.max_retries = parse_env_u32("SMARTLEAD_MAX_RETRIES", config.max_retries)?;
        config.retry_delay_ms = parse_env_u64("SMARTLEAD_RETRY_DELAY_MS", config.retry_delay_ms)?;
        config.rate_limit = parse_env_u32("SMARTLEAD_RATE_LIMIT", config.rate_limit)?;

        Ok(config)
    }

    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Backoff seed as a [`Duration`].
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn parse_env_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        Err(_) => Ok(default),
    }
}

fn parse_env_u32(var: &'static str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "SMARTLEAD_API_KEY",
            "SMARTLEAD_BASE_URL",
            "SMARTLEAD_SMART_SENDERS_URL",
            "SMARTLEAD_TIMEOUT_MS",
            "SMARTLEAD_MAX_RETRIES",
            "SMARTLEAD_RETRY_DELAY_MS",
            "SMARTLEAD_RATE_LIMIT",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_new_with_defaults() {
        let config = Config::new("sk-test").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 1_000);
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(Config::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(Config::new("   "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    #[serial]
    fn test_from_env_missing_key() {
        clear_env();
        assert!(matches!(Config::from_env(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("SMARTLEAD_API_KEY", "sk-test");
        std::env::set_var("SMARTLEAD_BASE_URL", "http://localhost:9000/api/v1/");
        std::env::set_var("SMARTLEAD_MAX_RETRIES", "5");
        std::env::set_var("SMARTLEAD_RETRY_DELAY_MS", "250");

        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_delay_ms, 250);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_bad_number() {
        clear_env();
        std::env::set_var("SMARTLEAD_API_KEY", "sk-test");
        std::env::set_var("SMARTLEAD_TIMEOUT_MS", "soon");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "SMARTLEAD_TIMEOUT_MS", .. }));

        clear_env();
    }
}
