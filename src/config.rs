//! Client configuration

use crate::error::{ClientError, Result};
use std::time::Duration;
use url::Url;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "PORTFOLIO_API_BASE_URL";

/// Local development fallback, matching the backend's default port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Fixed request timeout applied to every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`HttpClient`](crate::http::HttpClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://api.example.com/api`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config for an explicit base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Build a config from the environment, falling back to localhost.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_explicit_url() {
        let config = ClientConfig::new("https://api.example.com/api").unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.example.com/api");
        assert_eq!(config.timeout, REQUEST_TIMEOUT);
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(ClientConfig::new("not a url").is_err());
    }
}
