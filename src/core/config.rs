//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::retry::DEFAULT_RETRY_COUNT;

const DEFAULT_API_ENDPOINT: &str = "http://127.0.0.1:8080";

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Base URL of the metadata server
    pub api_endpoint: String,
    /// Bearer token; empty sends no auth header
    pub api_token: String,
    /// Per-request timeout
    pub timeout_ms: u64,
    /// Minimum gap between dispatch sequences
    pub rate_interval_ms: u64,
    /// Attempts per dispatch sequence
    pub max_retries: u32,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_endpoint: std::env::var("TRANSLATOR_API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string()),
            api_token: std::env::var("TRANSLATOR_API_TOKEN").unwrap_or_default(),
            timeout_ms: 30000,
            rate_interval_ms: 1000,
            max_retries: DEFAULT_RETRY_COUNT,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let api_endpoint = std::env::var("TRANSLATOR_API_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string());

        let api_token = std::env::var("TRANSLATOR_API_TOKEN").unwrap_or_default();

        let timeout_ms = std::env::var("TRANSLATOR_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()?;

        let rate_interval_ms = std::env::var("TRANSLATOR_RATE_INTERVAL_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()?;

        let max_retries = std::env::var("TRANSLATOR_MAX_RETRIES")
            .unwrap_or_else(|_| DEFAULT_RETRY_COUNT.to_string())
            .parse::<u32>()?;

        let config = Self {
            api_endpoint,
            api_token,
            timeout_ms,
            rate_interval_ms,
            max_retries,
        };
        config.validate()?;

        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_endpoint.trim().is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if self.rate_interval_ms == 0 {
            return Err(anyhow::anyhow!("rate_interval_ms must be greater than 0"));
        }

        Ok(())
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Rate limiter interval as a [`Duration`]
    pub fn rate_interval(&self) -> Duration {
        Duration::from_millis(self.rate_interval_ms)
    }

    /// Endpoint of the translate call, without a doubled slash
    pub fn translate_url(&self) -> String {
        format!("{}/v1/translate", self.api_endpoint.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TranslatorConfig {
        TranslatorConfig {
            api_endpoint: "https://metadata.test/".to_string(),
            api_token: String::new(),
            timeout_ms: 5000,
            rate_interval_ms: 1000,
            max_retries: 3,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_missing_endpoint() {
        let config = TranslatorConfig {
            api_endpoint: "  ".to_string(),
            ..config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_interval() {
        let config = TranslatorConfig {
            rate_interval_ms: 0,
            ..config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_translate_url() {
        assert_eq!(config().translate_url(), "https://metadata.test/v1/translate");
        assert_eq!(config().rate_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translator.json");
        std::fs::write(
            &path,
            r#"{"api_endpoint":"http://localhost:9000","api_token":"t","timeout_ms":100,"rate_interval_ms":250,"max_retries":5}"#,
        )
        .unwrap();

        let config = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(config.api_endpoint, "http://localhost:9000");
        assert_eq!(config.rate_interval(), Duration::from_millis(250));
        assert_eq!(config.max_retries, 5);
    }
}
