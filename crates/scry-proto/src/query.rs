//! Search parameters and query results.
//!
//! This module provides:
//! - [`SearchParams`] — Parameters for a search call, absent fields omitted
//! - [`QueryResult`] — One page of results plus the total match count
//! - [`DEFAULT_PAGE_SIZE`] — Page size applied when none is given

use serde::{Deserialize, Serialize};

use crate::log::{LogLevel, LogRecord};

/// Page size applied when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Parameters for a log search call.
///
/// Every field is optional. An absent field is omitted from the wire
/// entirely, never sent as an empty string; the store treats omission as
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Full-text query over log messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Exact severity filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    /// Exact service-name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Page size, defaulting to [`DEFAULT_PAGE_SIZE`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    /// Result offset, defaulting to zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
}

impl SearchParams {
    /// Creates empty parameters matching everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a full-text query.
    #[must_use]
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Adds a severity filter.
    #[must_use]
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a service-name filter.
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the result offset.
    #[must_use]
    pub const fn with_from(mut self, from: usize) -> Self {
        self.from = Some(from);
        self
    }

    /// Page size with the default applied.
    #[must_use]
    pub const fn effective_size(&self) -> usize {
        match self.size {
            Some(size) => size,
            None => DEFAULT_PAGE_SIZE,
        }
    }

    /// Result offset with the default applied.
    #[must_use]
    pub const fn effective_from(&self) -> usize {
        match self.from {
            Some(from) => from,
            None => 0,
        }
    }
}

/// One page of search or latest-logs results.
///
/// The store returns records newest-first; order is preserved as received.
/// Each result replaces the previous one wholesale, so `total` is the match
/// count across all pages, not `logs.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Records for this page, in store order
    pub logs: Vec<LogRecord>,
    /// Total number of matching records across all pages
    pub total: u64,
    /// Store-side query latency in milliseconds, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub took: Option<u64>,
}

impl QueryResult {
    /// An empty result set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            logs: Vec::new(),
            total: 0,
            took: None,
        }
    }
}
