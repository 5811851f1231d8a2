//! # scry-proto
//!
//! Wire-level data model shared between the Scry log store client and the
//! query orchestration layer.
//!
//! This crate provides:
//! - [`LogLevel`] — Closed set of log severities understood by the store
//! - [`LogRecord`] — A stored log record, including its server-assigned id
//! - [`NewLogEntry`] — Payload for creating a new record
//! - [`SearchParams`] — Parameters for a search call, absent fields omitted
//! - [`QueryResult`] — One page of results plus the total match count
//!
//! # Example
//!
//! ```rust
//! use scry_proto::{LogLevel, SearchParams};
//!
//! let params = SearchParams::new()
//!     .with_level(LogLevel::Error)
//!     .with_query("timeout");
//!
//! assert_eq!(params.effective_size(), 20);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod log;
pub mod query;

pub use log::{LogLevel, LogRecord, NewLogEntry, ParseLevelError};
pub use query::{DEFAULT_PAGE_SIZE, QueryResult, SearchParams};
