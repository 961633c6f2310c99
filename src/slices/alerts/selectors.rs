//! Read-only views over [`AlertsState`].

use super::AlertsState;
use crate::models::{Alert, AlertId, AlertTotals, AlertsConfig, DataEntityId, PageInfo};
use crate::storage::selectors;

/// Returns the alert with `id`, if held.
#[must_use]
pub fn get_alert(state: &AlertsState, id: AlertId) -> Option<&Alert> {
    selectors::select_by_id(state.alerts.entities(), &id)
}

/// Returns held alerts in arrival order.
#[must_use]
pub fn get_alert_list(state: &AlertsState) -> Vec<&Alert> {
    selectors::select_all(state.alerts.entities())
}

/// Returns held alerts, most recently raised first.
#[must_use]
pub fn get_alert_list_newest_first(state: &AlertsState) -> Vec<&Alert> {
    selectors::select_all_sorted_by(state.alerts.entities(), |a, b| {
        b.last_seen_at().cmp(&a.last_seen_at())
    })
}

/// Returns held alerts that are still open.
#[must_use]
pub fn get_open_alerts(state: &AlertsState) -> Vec<&Alert> {
    selectors::select_where(state.alerts.entities(), Alert::is_open)
}

/// Returns held alerts raised against `data_entity_id`.
#[must_use]
pub fn get_data_entity_alerts(state: &AlertsState, data_entity_id: DataEntityId) -> Vec<&Alert> {
    selectors::select_where(state.alerts.entities(), |alert| {
        alert.data_entity_id == data_entity_id
    })
}

/// Returns the number of held alerts.
#[must_use]
pub fn get_alert_count(state: &AlertsState) -> usize {
    selectors::select_total(state.alerts.entities())
}

/// Returns the cursor of the last alert list fetch.
#[must_use]
pub const fn get_alert_list_page_info(state: &AlertsState) -> PageInfo {
    state.alerts.page_info()
}

/// Returns the alert counters.
#[must_use]
pub const fn get_alert_totals(state: &AlertsState) -> AlertTotals {
    state.totals
}

/// Returns the alert config of `data_entity_id`, if fetched.
#[must_use]
pub fn get_data_entity_alert_config(
    state: &AlertsState,
    data_entity_id: DataEntityId,
) -> Option<&AlertsConfig> {
    selectors::select_by_id(&state.configs, &data_entity_id)
}
