//! Log store trait definition.

use std::future::Future;
use std::pin::Pin;

use scry_proto::{LogRecord, NewLogEntry, QueryResult, SearchParams};

use crate::error::Result;

/// Abstraction over the log store API.
///
/// Object-safe so callers can hold `Arc<dyn LogStore>` and tests can
/// substitute scripted stores; methods return boxed futures for that
/// reason. [`LogStoreClient`](crate::LogStoreClient) is the HTTP-backed
/// implementation.
pub trait LogStore: Send + Sync {
    /// Stores a new log entry and returns the stored record, including its
    /// store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the entry or cannot be
    /// reached.
    fn create_log<'a>(
        &'a self,
        entry: &'a NewLogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<LogRecord>> + Send + 'a>>;

    /// Searches logs matching the given parameters. Absent parameters mean
    /// "no constraint".
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the query or cannot be
    /// reached.
    fn search_logs<'a>(
        &'a self,
        params: &'a SearchParams,
    ) -> Pin<Box<dyn Future<Output = Result<QueryResult>> + Send + 'a>>;

    /// Fetches the most recent logs, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn latest_logs(
        &self,
        size: Option<usize>,
    ) -> Pin<Box<dyn Future<Output = Result<QueryResult>> + Send + '_>>;
}
