//! Alerts slice: paginated alert list, alert totals and per-entity configs.
//!
//! # Transitions
//!
//! | Action | Alerts | Page info | Totals | Configs |
//! |--------|--------|-----------|--------|---------|
//! | `AllAlertListFetched`, `MyAlertListFetched`, `MyDependentsAlertListFetched` | merge | replace | - | - |
//! | `DataEntityAlertsFetched` | replace | replace, `page = 1` | - | - |
//! | `AlertStatusUpdated` | upsert one | - | - | - |
//! | `AlertsTotalsFetched` | - | - | replace | - |
//! | `DataEntityAlertsConfigFetched`, `DataEntityAlertsConfigUpdated` | - | - | - | upsert one |
//! | `AlertsFilterChanged` | clear | - | - | - |

pub mod selectors;

use super::{Action, PagedCollection, Slice};
use crate::models::{Alert, AlertId, AlertTotals, AlertsConfig, DataEntityId, Page};
use crate::storage::{EntityAdapter, EntityState};
use crate::store::Store;
use serde::{Deserialize, Serialize};

/// Alerts keyed by alert id, kept in arrival order.
pub const ALERTS: EntityAdapter<AlertId, Alert> = EntityAdapter::new(|alert| alert.id);

/// Alert configs keyed by the data entity they belong to.
pub const ALERTS_CONFIGS: EntityAdapter<DataEntityId, AlertsConfig> =
    EntityAdapter::new(|config| config.data_entity_id);

/// State owned by the alerts slice.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertsState {
    /// Alert records and the cursor of the last list fetch.
    pub alerts: PagedCollection<AlertId, Alert>,
    /// Aggregate counters, replaced wholesale.
    pub totals: AlertTotals,
    /// Per-entity alert configs.
    pub configs: EntityState<DataEntityId, AlertsConfig>,
}

impl Default for AlertsState {
    fn default() -> Self {
        Self {
            alerts: PagedCollection::new(ALERTS),
            totals: AlertTotals::default(),
            configs: ALERTS_CONFIGS.initial_state(),
        }
    }
}

/// Fulfilled completions and UI actions the alerts slice reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum AlertsAction {
    /// Alert counters were fetched.
    AlertsTotalsFetched(AlertTotals),
    /// A page of all alerts visible to the user was fetched.
    AllAlertListFetched(Page<Alert>),
    /// A page of alerts on the user's own entities was fetched.
    MyAlertListFetched(Page<Alert>),
    /// A page of alerts on entities downstream of the user's entities was fetched.
    MyDependentsAlertListFetched(Page<Alert>),
    /// The full alert list of one data entity was fetched.
    DataEntityAlertsFetched(Page<Alert>),
    /// An alert's status was changed.
    AlertStatusUpdated(Alert),
    /// A data entity's alert config was fetched.
    DataEntityAlertsConfigFetched(AlertsConfig),
    /// A data entity's alert config was saved.
    DataEntityAlertsConfigUpdated(AlertsConfig),
    /// The alert list filter changed; held alerts no longer apply.
    AlertsFilterChanged,
}

impl Action for AlertsAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::AlertsTotalsFetched(_) => "alertsTotalsFetched",
            Self::AllAlertListFetched(_) => "allAlertListFetched",
            Self::MyAlertListFetched(_) => "myAlertListFetched",
            Self::MyDependentsAlertListFetched(_) => "myDependentsAlertListFetched",
            Self::DataEntityAlertsFetched(_) => "dataEntityAlertsFetched",
            Self::AlertStatusUpdated(_) => "alertStatusUpdated",
            Self::DataEntityAlertsConfigFetched(_) => "dataEntityAlertsConfigFetched",
            Self::DataEntityAlertsConfigUpdated(_) => "dataEntityAlertsConfigUpdated",
            Self::AlertsFilterChanged => "alertsFilterChanged",
        }
    }
}

/// The alerts slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertsSlice;

impl Slice for AlertsSlice {
    type State = AlertsState;
    type Action = AlertsAction;

    const NAME: &'static str = "alerts";

    fn reduce(state: &mut AlertsState, action: AlertsAction) {
        match action {
            AlertsAction::AlertsTotalsFetched(totals) => state.totals = totals,
            AlertsAction::AllAlertListFetched(page)
            | AlertsAction::MyAlertListFetched(page)
            | AlertsAction::MyDependentsAlertListFetched(page) => state.alerts.merge_page(page),
            AlertsAction::DataEntityAlertsFetched(page) => state.alerts.replace_page(page),
            AlertsAction::AlertStatusUpdated(alert) => state.alerts.set_one(alert),
            AlertsAction::DataEntityAlertsConfigFetched(config)
            | AlertsAction::DataEntityAlertsConfigUpdated(config) => {
                ALERTS_CONFIGS.set_one(&mut state.configs, config);
            },
            AlertsAction::AlertsFilterChanged => state.alerts.clear(),
        }
    }
}

/// Store holding the alerts slice.
pub type AlertsStore = Store<AlertsSlice>;
