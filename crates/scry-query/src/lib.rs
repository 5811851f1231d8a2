//! # scry-query
//!
//! Client-side query orchestration for the Scry log viewer.
//!
//! This crate provides:
//! - [`QueryController`] — owns the canonical query state and applies
//!   request outcomes in issue order
//! - [`FilterCoordinator`] — debounces filter edits into single dispatches
//! - [`FilterState`] / [`QueryPlan`] — the filter triple and the pure
//!   search-vs-latest decision rule
//! - [`QuerySession`] — wiring for an embedding UI, including the one-time
//!   startup load
//!
//! The presentation layer owns the filter inputs and renders
//! [`QueryState`]; everything between it and the log store lives here.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use scry_client::{ClientConfig, LogStoreClient};
//! use scry_query::{CoordinatorConfig, FilterState, QuerySession};
//!
//! # fn example() -> scry_client::Result<()> {
//! let store = Arc::new(LogStoreClient::new(&ClientConfig::from_env())?);
//! let session = QuerySession::start(store, CoordinatorConfig::default());
//!
//! // Each keystroke hands the coordinator a fresh snapshot.
//! session.set_filters(FilterState::new().with_query("timeout"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod controller;
pub mod coordinator;
pub mod filter;
pub mod session;

pub use controller::{QueryController, QueryState};
pub use coordinator::{CoordinatorConfig, DEBOUNCE_DELAY, FilterCoordinator};
pub use filter::{FilterState, QueryPlan};
pub use session::QuerySession;
