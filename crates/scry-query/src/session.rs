//! Session wiring for an embedding UI.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use scry_client::{LogStore, Result};
use scry_proto::{LogRecord, NewLogEntry};

use crate::controller::{QueryController, QueryState};
use crate::coordinator::{CoordinatorConfig, FilterCoordinator};
use crate::filter::FilterState;

/// One live log-viewer session: a controller and a coordinator over a
/// shared store.
///
/// The embedding UI owns the filter inputs and passes snapshots in; the
/// session owns dispatch timing and query state. Starting a session fetches
/// the latest logs exactly once, before any filter input exists.
pub struct QuerySession {
    store: Arc<dyn LogStore>,
    controller: Arc<QueryController>,
    coordinator: FilterCoordinator,
}

impl QuerySession {
    /// Starts a session: performs the activation load and spawns the
    /// coordinator.
    ///
    /// The activation load takes its sequence number before `start`
    /// returns, so it can never supersede a dispatch made afterwards.
    #[must_use]
    pub fn start(store: Arc<dyn LogStore>, config: CoordinatorConfig) -> Self {
        let controller = Arc::new(QueryController::new(Arc::clone(&store)));

        tokio::spawn(QueryController::issue_latest(Arc::clone(&controller)));

        let coordinator = FilterCoordinator::spawn(Arc::clone(&controller), config);
        debug!("query session started");

        Self {
            store,
            controller,
            coordinator,
        }
    }

    /// Hands the coordinator a new filter snapshot.
    pub fn set_filters(&self, filters: FilterState) {
        self.coordinator.filters_changed(filters);
    }

    /// Re-evaluates the given snapshot immediately, bypassing the
    /// debounce.
    pub fn refresh(&self, filters: &FilterState) {
        self.coordinator.refresh(filters.clone());
    }

    /// Creates a log entry. A successful create re-evaluates the given
    /// snapshot exactly once, so the new entry shows up under the current
    /// view; a failed create triggers nothing.
    ///
    /// # Errors
    ///
    /// Returns the store's error untouched; surfacing it belongs to the
    /// caller's form, not the query state.
    pub async fn create_log(
        &self,
        entry: &NewLogEntry,
        filters: &FilterState,
    ) -> Result<LogRecord> {
        let record = self.store.create_log(entry).await?;
        debug!(id = %record.id, "log entry created, re-evaluating filters");
        self.coordinator.refresh(filters.clone());
        Ok(record)
    }

    /// The current query state snapshot.
    #[must_use]
    pub fn state(&self) -> QueryState {
        self.controller.state()
    }

    /// Subscribes to query state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.controller.subscribe()
    }

    /// The controller, for direct sequence-tagged dispatches.
    #[must_use]
    pub fn controller(&self) -> &Arc<QueryController> {
        &self.controller
    }

    /// Stops the coordinator. Requests already in flight settle through
    /// the controller as usual.
    pub fn shutdown(&self) {
        self.coordinator.shutdown();
    }
}
