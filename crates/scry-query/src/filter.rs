//! Filter state and the search-vs-latest decision rule.
//!
//! This module provides:
//! - [`FilterState`] — The UI-owned filter triple, passed in as a snapshot
//! - [`QueryPlan`] — The operation a snapshot calls for

use scry_proto::{LogLevel, SearchParams};

/// The filter triple as the UI holds it.
///
/// Emptiness encodes absence: an empty string for the text fields, `None`
/// for the level. Values are taken as typed, so whitespace is a real query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Full-text query over log messages
    pub query: String,
    /// Exact severity filter
    pub level: Option<LogLevel>,
    /// Exact service-name filter
    pub service: String,
}

impl FilterState {
    /// Creates an all-absent filter state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets the severity filter.
    #[must_use]
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the service filter.
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// True when no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.level.is_none() && self.service.is_empty()
    }

    /// Maps exactly the active fields into search parameters.
    ///
    /// Paging is left unset; the client applies the defaults.
    #[must_use]
    pub fn to_params(&self) -> SearchParams {
        let mut params = SearchParams::new();
        if !self.query.is_empty() {
            params = params.with_query(self.query.clone());
        }
        if let Some(level) = self.level {
            params = params.with_level(level);
        }
        if !self.service.is_empty() {
            params = params.with_service(self.service.clone());
        }
        params
    }
}

/// The operation a filter snapshot calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// No filter is active; fetch the most recent logs.
    Latest,
    /// At least one filter is active; search with exactly those fields.
    Search(SearchParams),
}

impl QueryPlan {
    /// Decides search-vs-latest for a snapshot.
    #[must_use]
    pub fn from_filters(filters: &FilterState) -> Self {
        if filters.is_empty() {
            Self::Latest
        } else {
            Self::Search(filters.to_params())
        }
    }
}
