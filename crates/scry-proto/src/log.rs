//! Log records and severity levels.
//!
//! This module provides:
//! - [`LogLevel`] — Severity levels accepted by the log store
//! - [`LogRecord`] — A stored record with its server-assigned id
//! - [`NewLogEntry`] — Creation payload, identical minus the id

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log severity levels accepted by the store.
///
/// Serialized in their canonical UPPERCASE wire form. The store is the
/// validator of record: anything outside this set is rejected server-side,
/// and unknown levels fail deserialization here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// General information
    Info,
    /// Warning conditions
    Warning,
    /// Error conditions
    Error,
    /// Detailed debugging information
    Debug,
}

/// Error returned when parsing an unrecognized level string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl LogLevel {
    /// All levels, in the order the store documents them.
    pub const ALL: [Self; 4] = [Self::Info, Self::Warning, Self::Error, Self::Debug];

    /// Returns the canonical wire form of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ParseLevelError;

    /// Parses a level, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| s.eq_ignore_ascii_case(level.as_str()))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// A single log record as stored by the log store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Opaque identifier assigned by the store. Never fabricated client-side.
    pub id: String,
    /// When the event occurred, RFC 3339 on the wire
    pub timestamp: DateTime<Utc>,
    /// Severity level
    pub level: LogLevel,
    /// The log message
    pub message: String,
    /// Name of the originating service
    pub service: String,
}

/// Payload for creating a new log record.
///
/// The store assigns the id and echoes the full [`LogRecord`] back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLogEntry {
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Severity level
    pub level: LogLevel,
    /// The log message
    pub message: String,
    /// Name of the originating service
    pub service: String,
}

impl NewLogEntry {
    /// Creates an entry timestamped with the current time.
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            service: service.into(),
        }
    }

    /// Overrides the timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
