//! HTTP client for the log store REST API.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use scry_proto::{DEFAULT_PAGE_SIZE, LogLevel, LogRecord, NewLogEntry, QueryResult, SearchParams};

use crate::config::ClientConfig;
use crate::error::{Result, StoreError};
use crate::traits::LogStore;

/// Typed HTTP gateway to the log store.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct LogStoreClient {
    http: reqwest::Client,
    base_url: String,
}

/// Wire form of a search request. The filter triple is omitted when absent;
/// size and from are always sent, defaults applied.
#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service: Option<&'a str>,
    size: usize,
    from: usize,
}

impl LogStoreClient {
    /// Builds a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the base URL does not parse or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            StoreError::Config(format!("invalid base URL '{}': {e}", config.base_url))
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Builds a client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the configured base URL is
    /// unusable.
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env())
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stores a new log entry via `POST /logs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the entry or cannot be
    /// reached.
    pub async fn create_log(&self, entry: &NewLogEntry) -> Result<LogRecord> {
        let url = format!("{}/logs", self.base_url);
        debug!(level = %entry.level, service = %entry.service, "creating log entry");

        let response = self.http.post(&url).json(entry).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Searches logs via `GET /logs/search`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the query or cannot be
    /// reached.
    pub async fn search_logs(&self, params: &SearchParams) -> Result<QueryResult> {
        let url = format!("{}/logs/search", self.base_url);
        let query = SearchQuery {
            q: params.q.as_deref(),
            level: params.level,
            service: params.service.as_deref(),
            size: params.effective_size(),
            from: params.effective_from(),
        };
        debug!(size = query.size, from = query.from, "searching logs");

        let response = self.http.get(&url).query(&query).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Fetches the most recent logs via `GET /logs/latest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    pub async fn latest_logs(&self, size: Option<usize>) -> Result<QueryResult> {
        let url = format!("{}/logs/latest", self.base_url);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
        debug!(size, "fetching latest logs");

        let response = self.http.get(&url).query(&[("size", size)]).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Turns non-success responses into [`StoreError`]s, reading the body for
/// the store's `detail` message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "log store returned an error status");
    Err(StoreError::from_status(status, &body))
}

impl LogStore for LogStoreClient {
    fn create_log<'a>(
        &'a self,
        entry: &'a NewLogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<LogRecord>> + Send + 'a>> {
        Box::pin(self.create_log(entry))
    }

    fn search_logs<'a>(
        &'a self,
        params: &'a SearchParams,
    ) -> Pin<Box<dyn Future<Output = Result<QueryResult>> + Send + 'a>> {
        Box::pin(self.search_logs(params))
    }

    fn latest_logs(
        &self,
        size: Option<usize>,
    ) -> Pin<Box<dyn Future<Output = Result<QueryResult>> + Send + '_>> {
        Box::pin(self.latest_logs(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_base_url() {
        let config = ClientConfig::new().with_base_url("not a url");
        let err = LogStoreClient::new(&config).expect_err("must fail");
        match err {
            StoreError::Config(message) => assert!(message.contains("not a url")),
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn new_trims_trailing_slash() {
        let config = ClientConfig::new().with_base_url("http://localhost:8000/");
        let client = LogStoreClient::new(&config).expect("build client");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn default_config_builds() {
        let client = LogStoreClient::new(&ClientConfig::default()).expect("build client");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
