//! Client configuration for the log store gateway.

use std::time::Duration;

/// Environment variable selecting the store base URL.
pub const STORE_URL_ENV: &str = "SCRY_STORE_URL";

/// Base URL used when no configuration is given.
pub const DEFAULT_STORE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`LogStoreClient`](crate::LogStoreClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the log store, without a trailing path
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STORE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads the base URL from [`STORE_URL_ENV`], falling back to
    /// [`DEFAULT_STORE_URL`] when unset or blank.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_var(STORE_URL_ENV)
    }

    /// Reads the base URL from the named environment variable.
    ///
    /// Split out from [`from_env`](Self::from_env) so tests can use
    /// per-test variable names.
    #[must_use]
    pub fn from_env_var(name: &str) -> Self {
        match std::env::var(name) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url),
            _ => Self::default(),
        }
    }
}
