//! # scry-client
//!
//! Typed HTTP gateway to the Scry log store.
//!
//! This crate provides:
//! - [`LogStoreClient`] — reqwest-backed client for the store's REST API
//! - [`LogStore`] — object-safe trait the orchestration layer depends on
//! - [`StoreError`] — failure taxonomy for store calls
//! - [`ClientConfig`] — base URL and timeout configuration
//!
//! Every call maps to exactly one HTTP request. There is no caching, no
//! retry, and no request deduplication; arbitration between overlapping
//! requests belongs to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use scry_client::{ClientConfig, LogStoreClient};
//! use scry_proto::SearchParams;
//!
//! # async fn example() -> scry_client::Result<()> {
//! let client = LogStoreClient::new(&ClientConfig::from_env())?;
//! let page = client.search_logs(&SearchParams::new().with_query("timeout")).await?;
//! println!("{} of {} records", page.logs.len(), page.total);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(test, allow(unsafe_code))]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod traits;

pub use client::LogStoreClient;
pub use config::{ClientConfig, DEFAULT_STORE_URL, STORE_URL_ENV};
pub use error::{Result, StoreError};
pub use traits::LogStore;
