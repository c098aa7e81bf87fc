//! Client configuration.
//!
//! Defaults target a search service running locally. Environment variables
//! override the defaults and command-line flags override both.

use std::time::Duration;

/// Default service address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8004";

/// Search endpoint, relative to the base URL
pub const SEARCH_PATH: &str = "/api/v1/bids";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "BIDSCOPE_BASE_URL";

/// Environment variable overriding the connect timeout, in seconds
pub const TIMEOUT_ENV: &str = "BIDSCOPE_TIMEOUT_SECS";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the search client.
///
/// # Example
///
/// ```ignore
/// use bidscope::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_base_url("http://search.internal:8004");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme, host and port of the search service
    pub base_url: String,
    /// Path of the streaming search endpoint
    pub search_path: String,
    /// Upper bound on establishing the connection; the stream itself is unbounded
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: SEARCH_PATH.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the search endpoint path.
    pub fn with_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = path.into();
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Create config from `BIDSCOPE_BASE_URL` and `BIDSCOPE_TIMEOUT_SECS`.
    ///
    /// Unset, empty or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                config = config.with_base_url(url);
            }
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    config = config.with_connect_timeout(Duration::from_secs(secs));
                }
                _ => tracing::warn!("Ignoring invalid {}={:?}", TIMEOUT_ENV, raw),
            }
        }

        config
    }

    /// Full URL of the search endpoint, without query parameters
    pub fn search_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.search_path.trim_start_matches('/')
        )
    }
}
