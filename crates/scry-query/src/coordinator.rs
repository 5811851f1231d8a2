//! Debounced translation of filter edits into query dispatches.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::controller::QueryController;
use crate::filter::{FilterState, QueryPlan};

/// Delay between the last filter edit and the dispatched query.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Configuration for [`FilterCoordinator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Debounce delay applied to filter edits
    pub debounce: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_DELAY,
        }
    }
}

impl CoordinatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the debounce delay.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

enum Command {
    FiltersChanged(FilterState),
    Refresh(FilterState),
}

/// Watches filter snapshots and turns them into controller dispatches.
///
/// Every snapshot received re-arms a single debounce timer, cancelling the
/// previously pending evaluation; when the timer expires, the decision rule
/// runs against the newest snapshot. A manual refresh skips the wait and
/// clears anything pending. At most one evaluation is ever scheduled.
///
/// Shutdown (or drop) cancels the pending evaluation and stops the loop,
/// but never touches requests already dispatched; their outcomes settle
/// through the controller's epoch rule.
pub struct FilterCoordinator {
    commands: mpsc::UnboundedSender<Command>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl FilterCoordinator {
    /// Spawns a coordinator driving the given controller.
    #[must_use]
    pub fn spawn(controller: Arc<QueryController>, config: CoordinatorConfig) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(controller, config, rx, cancel.clone()));
        Self {
            commands,
            cancel,
            task,
        }
    }

    /// Hands the coordinator a new filter snapshot, re-arming the debounce
    /// timer.
    pub fn filters_changed(&self, filters: FilterState) {
        if self.commands.send(Command::FiltersChanged(filters)).is_err() {
            warn!("filter change ignored: coordinator is shut down");
        }
    }

    /// Evaluates the given snapshot immediately, bypassing the debounce and
    /// cancelling any pending evaluation.
    pub fn refresh(&self, filters: FilterState) {
        if self.commands.send(Command::Refresh(filters)).is_err() {
            warn!("refresh ignored: coordinator is shut down");
        }
    }

    /// Stops the loop and cancels any pending evaluation.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// True once the loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for FilterCoordinator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    controller: Arc<QueryController>,
    config: CoordinatorConfig,
    mut commands: mpsc::UnboundedReceiver<Command>,
    cancel: CancellationToken,
) {
    let sleep = tokio::time::sleep(config.debounce);
    tokio::pin!(sleep);
    let mut pending: Option<FilterState> = None;

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            command = commands.recv() => match command {
                Some(Command::FiltersChanged(filters)) => {
                    debug!("debounce timer re-armed");
                    pending = Some(filters);
                    sleep
                        .as_mut()
                        .reset(tokio::time::Instant::now() + config.debounce);
                }
                Some(Command::Refresh(filters)) => {
                    pending = None;
                    dispatch(&controller, &filters);
                }
                None => break,
            },
            // The guard keeps an expired timer from firing again until the
            // next snapshot re-arms it.
            () = &mut sleep, if pending.is_some() => {
                if let Some(filters) = pending.take() {
                    dispatch(&controller, &filters);
                }
            }
        }
    }
    debug!("filter coordinator stopped");
}

/// Runs the decision rule and fires the dispatch without awaiting it;
/// outcome ordering is the controller's business. The sequence number is
/// taken here, before the spawn, so back-to-back dispatches are issued in
/// intent order no matter how the spawned completions get scheduled.
fn dispatch(controller: &Arc<QueryController>, filters: &FilterState) {
    match QueryPlan::from_filters(filters) {
        QueryPlan::Latest => {
            debug!("dispatching latest-logs load");
            tokio::spawn(QueryController::issue_latest(Arc::clone(controller)));
        }
        QueryPlan::Search(params) => {
            debug!("dispatching search");
            tokio::spawn(QueryController::issue_search(Arc::clone(controller), params));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_uses_standard_delay() {
        assert_eq!(CoordinatorConfig::default().debounce, DEBOUNCE_DELAY);
        assert_eq!(DEBOUNCE_DELAY, Duration::from_millis(300));
    }

    #[test]
    fn config_debounce_override() {
        let config = CoordinatorConfig::new().with_debounce(Duration::from_millis(50));
        assert_eq!(config.debounce, Duration::from_millis(50));
    }
}
