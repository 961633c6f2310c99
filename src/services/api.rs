//! Fetch layer seam for the alerts API.
//!
//! The host application implements [`AlertsApi`] over its transport of
//! choice. This crate never performs network I/O itself.

use crate::Result;
use crate::models::{Alert, AlertId, AlertStatus, AlertTotals, AlertsConfig, DataEntityId, Page};
use serde::{Deserialize, Serialize};

/// Page request parameters for alert list fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertListQuery {
    /// Page to fetch, starting at 1.
    pub page: u32,
    /// Records per page.
    pub size: u32,
}

impl AlertListQuery {
    /// Creates a query for `page`.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Creates a query for the first page.
    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self::new(1, size)
    }
}

/// Remote alert operations.
///
/// # Implementor Notes
///
/// - Methods use `&self` to enable sharing via `Arc<dyn AlertsApi>`
/// - Return `Err` for any transport or server failure; the caller decides
///   whether state changes
/// - Implementations may block; no method is called while holding a lock
pub trait AlertsApi: Send + Sync {
    /// Fetches a page of all alerts visible to the user.
    fn get_all_alerts(&self, query: AlertListQuery) -> Result<Page<Alert>>;

    /// Fetches a page of alerts on entities the user owns.
    fn get_associated_user_alerts(&self, query: AlertListQuery) -> Result<Page<Alert>>;

    /// Fetches a page of alerts on entities downstream of the user's entities.
    fn get_dependent_entities_alerts(&self, query: AlertListQuery) -> Result<Page<Alert>>;

    /// Fetches every alert of one data entity.
    fn get_data_entity_alerts(
        &self,
        data_entity_id: DataEntityId,
        query: AlertListQuery,
    ) -> Result<Page<Alert>>;

    /// Changes an alert's status and returns the updated alert.
    fn change_alert_status(&self, alert_id: AlertId, status: AlertStatus) -> Result<Alert>;

    /// Fetches alert counters.
    fn get_alert_totals(&self) -> Result<AlertTotals>;

    /// Fetches the alert config of one data entity.
    fn get_data_entity_alerts_config(&self, data_entity_id: DataEntityId) -> Result<AlertsConfig>;

    /// Saves the alert config of one data entity and returns the stored config.
    fn update_data_entity_alerts_config(&self, config: &AlertsConfig) -> Result<AlertsConfig>;
}
