//! # Catalog State
//!
//! Normalized collection state for a data-catalog front end.
//!
//! Records fetched from the catalog API (alerts, alert configs) are kept in
//! keyed collections, updated only by fulfilled fetch completions, and read
//! through pure selectors.
//!
//! ## Layers
//!
//! - [`storage`]: generic [`EntityAdapter`] and selectors over [`EntityState`]
//! - [`slices`]: state, action union and reducer per collection
//! - [`store`]: explicit [`Store`] container serializing reducer applications
//! - [`services`]: fetch orchestration that dispatches only successful outcomes
//!
//! ## Example
//!
//! ```rust
//! use catalog_state::models::{Alert, AlertId, AlertType, DataEntityId, Page, PageInfo};
//! use catalog_state::slices::alerts::{AlertsAction, AlertsStore, selectors};
//!
//! let mut store = AlertsStore::new();
//! let alert = Alert::new(
//!     AlertId::new(1),
//!     DataEntityId::new(42),
//!     AlertType::FailedJob,
//!     chrono::Utc::now(),
//! );
//! store.dispatch(AlertsAction::AllAlertListFetched(Page::new(
//!     vec![alert],
//!     PageInfo::new(1, 1, false),
//! )));
//!
//! assert!(selectors::get_alert(store.state(), AlertId::new(1)).is_some());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod services;
pub mod slices;
pub mod storage;
pub mod store;

pub use config::StateConfig;
pub use models::{Alert, AlertId, AlertStatus, AlertTotals, AlertsConfig, DataEntityId, Page, PageInfo};
pub use services::{AlertListView, AlertsApi, AlertsService};
pub use slices::alerts::{AlertsAction, AlertsSlice, AlertsState, AlertsStore};
pub use slices::{Action, PagedCollection, Slice};
pub use storage::{EntityAdapter, EntityState};
pub use store::Store;

/// Error type for catalog state operations.
///
/// Reducers and selectors never fail; errors only arise at the edges.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed replay lines, invalid configuration values |
/// | `OperationFailed` | Config or log file I/O, TOML parsing, logging init |
/// | `FetchFailed` | The fetch layer rejected a request; state is unchanged |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A fetch was rejected; nothing was dispatched.
    #[error("fetch '{operation}' failed: {cause}")]
    FetchFailed {
        /// The fetch operation.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for catalog state operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in seconds.
///
/// Falls back to 0 if the system clock is before the Unix epoch.
#[must_use]
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
