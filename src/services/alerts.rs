//! Alerts fetch orchestration.
//!
//! Each operation calls the [`AlertsApi`] and, only when the call succeeds,
//! dispatches the matching fulfilled action into the caller's store. Failed
//! calls are logged, counted and published as [`StoreEvent::FetchFailed`],
//! then returned to the caller with the store untouched.

use super::api::{AlertListQuery, AlertsApi};
use crate::config::StateConfig;
use crate::models::{
    Alert, AlertId, AlertStatus, AlertTotals, AlertsConfig, DataEntityId, EventMeta, Page,
    PageInfo, StoreEvent,
};
use crate::slices::alerts::{AlertsAction, AlertsStore};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::instrument;

/// Paginated alert list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertListView {
    /// All alerts visible to the user.
    All,
    /// Alerts on entities the user owns.
    Mine,
    /// Alerts on entities downstream of the user's entities.
    MyDependents,
}

impl AlertListView {
    /// Returns the view name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Mine => "my",
            Self::MyDependents => "dependents",
        }
    }
}

/// Service running alert fetches against an [`AlertsApi`].
pub struct AlertsService {
    api: Arc<dyn AlertsApi>,
    page_size: u32,
}

impl AlertsService {
    /// Creates a new alerts service.
    #[must_use]
    pub fn new(api: Arc<dyn AlertsApi>, config: &StateConfig) -> Self {
        Self {
            api,
            page_size: config.page_size,
        }
    }

    /// Returns the page size used for list fetches.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetches alert counters and replaces the held totals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if the API call fails.
    #[instrument(skip_all)]
    pub fn fetch_alerts_totals(&self, store: &mut AlertsStore) -> Result<AlertTotals> {
        let outcome = self.api.get_alert_totals();
        settle(store, "fetch_alerts_totals", outcome, |totals| {
            AlertsAction::AlertsTotalsFetched(*totals)
        })
    }

    /// Fetches a page of a list view and merges it into the held alerts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if the API call fails.
    #[instrument(skip_all, fields(view = view.as_str(), page = page))]
    pub fn fetch_alert_list(
        &self,
        store: &mut AlertsStore,
        view: AlertListView,
        page: u32,
    ) -> Result<Page<Alert>> {
        let query = AlertListQuery::new(page, self.page_size);
        match view {
            AlertListView::All => {
                let outcome = self.api.get_all_alerts(query);
                settle(store, "fetch_all_alert_list", outcome, |page| {
                    AlertsAction::AllAlertListFetched(page.clone())
                })
            },
            AlertListView::Mine => {
                let outcome = self.api.get_associated_user_alerts(query);
                settle(store, "fetch_my_alert_list", outcome, |page| {
                    AlertsAction::MyAlertListFetched(page.clone())
                })
            },
            AlertListView::MyDependents => {
                let outcome = self.api.get_dependent_entities_alerts(query);
                settle(store, "fetch_my_dependents_alert_list", outcome, |page| {
                    AlertsAction::MyDependentsAlertListFetched(page.clone())
                })
            },
        }
    }

    /// Fetches the page after the held cursor for `view`.
    ///
    /// After a filter change the held alerts were cleared, so this starts
    /// again at page 1. Returns `Ok(None)` without calling the API when the
    /// cursor reports no further pages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if the API call fails.
    pub fn fetch_next_page(
        &self,
        store: &mut AlertsStore,
        view: AlertListView,
    ) -> Result<Option<Page<Alert>>> {
        let Some(next) = store.state().alerts.next_page() else {
            tracing::debug!(view = view.as_str(), "Alert list exhausted");
            return Ok(None);
        };
        self.fetch_alert_list(store, view, next).map(Some)
    }

    /// Fetches every alert of one data entity and replaces the held alerts.
    ///
    /// Pages are requested until the server reports no more, then applied
    /// as one replacement. A failure on any page leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if any API call fails.
    #[instrument(skip_all, fields(data_entity_id = data_entity_id.get()))]
    pub fn fetch_data_entity_alerts(
        &self,
        store: &mut AlertsStore,
        data_entity_id: DataEntityId,
    ) -> Result<Page<Alert>> {
        let outcome = self.collect_data_entity_alerts(data_entity_id);
        settle(store, "fetch_data_entity_alerts", outcome, |page| {
            AlertsAction::DataEntityAlertsFetched(page.clone())
        })
    }

    /// Walks every page of one entity's alerts into a single page.
    fn collect_data_entity_alerts(&self, data_entity_id: DataEntityId) -> Result<Page<Alert>> {
        let mut query = AlertListQuery::first(self.page_size);
        let mut items = Vec::new();

        loop {
            let page = self.api.get_data_entity_alerts(data_entity_id, query)?;
            // An empty page ends the walk even if the server claims more.
            let more = page.page_info.has_next && !page.is_empty();
            let total = page.page_info.total;
            items.extend(page.items);

            if !more {
                tracing::debug!(pages = query.page, alerts = items.len(), "Collected entity alerts");
                return Ok(Page::new(items, PageInfo::new(total, 1, false)));
            }
            query = AlertListQuery::new(query.page.saturating_add(1), query.size);
        }
    }

    /// Changes an alert's status and stores the returned alert.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if the API call fails.
    #[instrument(skip_all, fields(alert_id = alert_id.get(), status = status.as_str()))]
    pub fn update_alert_status(
        &self,
        store: &mut AlertsStore,
        alert_id: AlertId,
        status: AlertStatus,
    ) -> Result<Alert> {
        let outcome = self.api.change_alert_status(alert_id, status);
        settle(store, "update_alert_status", outcome, |alert| {
            AlertsAction::AlertStatusUpdated(alert.clone())
        })
    }

    /// Fetches one data entity's alert config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if the API call fails.
    #[instrument(skip_all, fields(data_entity_id = data_entity_id.get()))]
    pub fn fetch_data_entity_alerts_config(
        &self,
        store: &mut AlertsStore,
        data_entity_id: DataEntityId,
    ) -> Result<AlertsConfig> {
        let outcome = self.api.get_data_entity_alerts_config(data_entity_id);
        settle(store, "fetch_data_entity_alerts_config", outcome, |config| {
            AlertsAction::DataEntityAlertsConfigFetched(config.clone())
        })
    }

    /// Saves one data entity's alert config and stores the returned config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if the API call fails.
    #[instrument(skip_all, fields(data_entity_id = config.data_entity_id.get()))]
    pub fn update_data_entity_alerts_config(
        &self,
        store: &mut AlertsStore,
        config: &AlertsConfig,
    ) -> Result<AlertsConfig> {
        let outcome = self.api.update_data_entity_alerts_config(config);
        settle(store, "update_data_entity_alerts_config", outcome, |config| {
            AlertsAction::DataEntityAlertsConfigUpdated(config.clone())
        })
    }

    /// Drops held alerts after the list filter changed.
    ///
    /// The next [`fetch_next_page`](Self::fetch_next_page) requests page 1.
    pub fn change_alerts_filter(&self, store: &mut AlertsStore) {
        store.dispatch(AlertsAction::AlertsFilterChanged);
    }
}

/// Dispatches the fulfilled action for a successful outcome.
fn settle<T>(
    store: &mut AlertsStore,
    operation: &'static str,
    outcome: Result<T>,
    to_action: impl FnOnce(&T) -> AlertsAction,
) -> Result<T> {
    metrics::counter!("alerts_fetch_total", "operation" => operation).increment(1);

    match outcome {
        Ok(payload) => {
            store.dispatch(to_action(&payload));
            Ok(payload)
        },
        Err(e) => {
            let cause = match e {
                Error::FetchFailed { cause, .. } => cause,
                other => other.to_string(),
            };
            tracing::warn!(operation, error = %cause, "Alert fetch failed");
            metrics::counter!("alerts_fetch_failed_total", "operation" => operation).increment(1);
            store.event_bus().publish(StoreEvent::FetchFailed {
                meta: EventMeta::new("alerts_service"),
                operation,
                error: cause.clone(),
            });
            Err(Error::FetchFailed {
                operation: operation.to_string(),
                cause,
            })
        },
    }
}
