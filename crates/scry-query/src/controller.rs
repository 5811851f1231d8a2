//! Query state ownership and sequence-tagged outcome application.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use scry_client::{LogStore, StoreError};
use scry_proto::{LogRecord, QueryResult, SearchParams};

/// Message shown when the store never produced a usable response.
const FETCH_FAILED: &str = "Failed to fetch logs";

/// Snapshot of the query state the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Current result set, replaced wholesale by each applied outcome
    pub results: Vec<LogRecord>,
    /// Total matches across all pages, not `results.len()`
    pub total: u64,
    /// True while the newest dispatched request is in flight
    pub is_loading: bool,
    /// User-facing message from the newest failed request
    pub error: Option<String>,
}

/// Owns the canonical query state and applies request outcomes in issue
/// order.
///
/// Every dispatch is tagged with a monotonically increasing sequence number
/// at issue time, which is when the entry point is called, not when its
/// future first polls. An outcome is applied only when its sequence number
/// is higher than the highest applied so far; stale outcomes are discarded
/// silently. Requests are never cancelled — a superseded request simply has
/// no effect when it completes.
///
/// State is published through a [`watch`] channel, so observers always see
/// one consistent snapshot per update.
pub struct QueryController {
    store: Arc<dyn LogStore>,
    state: watch::Sender<QueryState>,
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl QueryController {
    /// Creates a controller over the given store with empty initial state.
    #[must_use]
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            store,
            state,
            issued: AtomicU64::new(0),
            applied: Mutex::new(0),
        }
    }

    /// The current state snapshot.
    #[must_use]
    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// Subscribes to state updates. The receiver starts at the current
    /// snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    /// Dispatches a search and applies its outcome under the epoch rule.
    ///
    /// The sequence number and the in-flight markers are taken before this
    /// returns, so issue order is call order; the returned future runs the
    /// store call and must be awaited. Failures land in
    /// [`QueryState::error`]; nothing propagates.
    pub fn search_logs(&self, params: SearchParams) -> impl Future<Output = ()> + Send {
        let seq = self.issue();
        self.complete_search(seq, params)
    }

    /// Dispatches a latest-logs load and applies its outcome under the
    /// epoch rule.
    ///
    /// The sequence number and the in-flight markers are taken before this
    /// returns, so issue order is call order; the returned future runs the
    /// store call and must be awaited. Failures land in
    /// [`QueryState::error`]; nothing propagates.
    pub fn load_latest(&self) -> impl Future<Output = ()> + Send {
        let seq = self.issue();
        self.complete_latest(seq)
    }

    /// Like [`search_logs`](Self::search_logs), with a future that owns a
    /// controller handle so the caller can spawn it.
    pub(crate) fn issue_search(
        this: Arc<Self>,
        params: SearchParams,
    ) -> impl Future<Output = ()> + Send + 'static {
        let seq = this.issue();
        async move { this.complete_search(seq, params).await }
    }

    /// Like [`load_latest`](Self::load_latest), with a future that owns a
    /// controller handle so the caller can spawn it.
    pub(crate) fn issue_latest(this: Arc<Self>) -> impl Future<Output = ()> + Send + 'static {
        let seq = this.issue();
        async move { this.complete_latest(seq).await }
    }

    async fn complete_search(&self, seq: u64, params: SearchParams) {
        let outcome = self.store.search_logs(&params).await;
        self.finish(seq, outcome);
    }

    async fn complete_latest(&self, seq: u64) {
        let outcome = self.store.latest_logs(None).await;
        self.finish(seq, outcome);
    }

    /// Takes the next sequence number and publishes the in-flight markers.
    /// Runs in the caller, never inside the dispatched future: spawned
    /// futures poll in scheduler order, and issue order must be call order.
    fn issue(&self) -> u64 {
        let seq = self.next_seq();
        self.begin(seq);
        seq
    }

    fn next_seq(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Publishes the in-flight markers unless something newer has already
    /// applied its outcome. The guard keeps a slow-to-start superseded
    /// dispatch from resurrecting the loading flag.
    fn begin(&self, seq: u64) {
        let applied = self.applied.lock();
        if seq <= *applied {
            return;
        }
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    /// Applies an outcome if `seq` is still the newest; discards it
    /// otherwise.
    fn finish(&self, seq: u64, outcome: Result<QueryResult, StoreError>) {
        let mut applied = self.applied.lock();
        if seq <= *applied {
            debug!(seq, applied = *applied, "discarding stale response");
            return;
        }
        *applied = seq;

        match outcome {
            Ok(result) => {
                debug!(
                    seq,
                    returned = result.logs.len(),
                    total = result.total,
                    "applying query result"
                );
                self.state.send_modify(|state| {
                    state.results = result.logs;
                    state.total = result.total;
                    state.is_loading = false;
                    state.error = None;
                });
            }
            Err(err) => {
                debug!(seq, error = %err, "applying query failure");
                let message = error_message(&err);
                self.state.send_modify(|state| {
                    state.results = Vec::new();
                    state.total = 0;
                    state.is_loading = false;
                    state.error = Some(message);
                });
            }
        }
    }
}

/// Maps a store failure to the message the user sees.
///
/// Messages the store itself produced are surfaced verbatim; transport
/// failures carry nothing worth showing, so they get the generic message.
fn error_message(err: &StoreError) -> String {
    match err {
        StoreError::Validation(message) => message.clone(),
        StoreError::Server {
            detail: Some(detail),
            ..
        } => detail.clone(),
        StoreError::Server {
            status,
            detail: None,
        } => format!("Log store error (HTTP {status})"),
        StoreError::Network(_) | StoreError::Config(_) => FETCH_FAILED.to_string(),
    }
}
