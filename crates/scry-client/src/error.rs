//! Error taxonomy for log store calls.

use thiserror::Error;

/// Errors that can occur when calling the log store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store received the request and rejected it (4xx). The message is
    /// the store's own `detail`, surfaced verbatim.
    #[error("store rejected request: {0}")]
    Validation(String),

    /// The request never produced a usable response: connection refused,
    /// timeout, DNS failure, or an unreadable body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The store failed internally (5xx), with whatever detail its error
    /// body carried.
    #[error("store failure (HTTP {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Server {
        /// HTTP status code returned by the store
        status: u16,
        /// Best-effort `detail` message from the error body
        detail: Option<String>,
    },

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Classifies a non-success response by status class.
    ///
    /// 4xx means the store understood and rejected the request; anything
    /// else that is not a success is treated as a store failure. Both pull
    /// their message from the body's `detail` field when present.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = extract_detail(body);
        if status.is_client_error() {
            let message = detail
                .unwrap_or_else(|| format!("request rejected (HTTP {})", status.as_u16()));
            Self::Validation(message)
        } else {
            Self::Server {
                status: status.as_u16(),
                detail,
            }
        }
    }
}

/// Pulls the `detail` field out of a JSON error body.
///
/// The store reports errors as `{"detail": …}`. A string detail is taken
/// as-is; any other JSON value is rendered as JSON. Non-JSON bodies yield
/// nothing.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
