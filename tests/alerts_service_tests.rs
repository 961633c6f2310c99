//! Integration tests for alert fetch orchestration.
//!
//! Uses an in-memory [`AlertsApi`] with failure injection to check that only
//! fulfilled fetches reach the store.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use catalog_state::config::StateConfig;
use catalog_state::models::{
    Alert, AlertId, AlertStatus, AlertTotals, AlertType, AlertsConfig, DataEntityId, Page,
    PageInfo, StoreEvent,
};
use catalog_state::services::{AlertListQuery, AlertListView, AlertsApi, AlertsService};
use catalog_state::slices::alerts::{AlertsStore, selectors};
use catalog_state::{Error, Result};
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory catalog backing the fake API.
struct InMemoryAlertsApi {
    alerts: Mutex<Vec<Alert>>,
    configs: Mutex<HashMap<DataEntityId, AlertsConfig>>,
    failing: Mutex<Option<String>>,
    queries: Mutex<Vec<AlertListQuery>>,
}

impl InMemoryAlertsApi {
    fn with_alerts(count: i64) -> Self {
        let alerts = (1..=count)
            .map(|id| {
                Alert::new(
                    AlertId::new(id),
                    DataEntityId::new(100 + id % 3),
                    AlertType::FailedDqTest,
                    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                )
            })
            .collect();
        Self {
            alerts: Mutex::new(alerts),
            configs: Mutex::new(HashMap::new()),
            failing: Mutex::new(None),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn fail_with(&self, cause: &str) {
        *self.failing.lock().unwrap() = Some(cause.to_string());
    }

    fn recover(&self) {
        *self.failing.lock().unwrap() = None;
    }

    fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn check(&self, operation: &str) -> Result<()> {
        match self.failing.lock().unwrap().as_ref() {
            Some(cause) => Err(Error::FetchFailed {
                operation: operation.to_string(),
                cause: cause.clone(),
            }),
            None => Ok(()),
        }
    }

    fn paged(&self, query: AlertListQuery, filter: impl Fn(&Alert) -> bool) -> Page<Alert> {
        self.queries.lock().unwrap().push(query);
        let matching: Vec<Alert> = self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| filter(a))
            .cloned()
            .collect();
        let size = query.size as usize;
        let start = (query.page.saturating_sub(1) as usize) * size;
        let items: Vec<Alert> = matching.iter().skip(start).take(size).cloned().collect();
        let has_next = start + items.len() < matching.len();
        Page::new(
            items,
            PageInfo::new(matching.len() as u64, query.page, has_next),
        )
    }
}

impl AlertsApi for InMemoryAlertsApi {
    fn get_all_alerts(&self, query: AlertListQuery) -> Result<Page<Alert>> {
        self.check("get_all_alerts")?;
        Ok(self.paged(query, |_| true))
    }

    fn get_associated_user_alerts(&self, query: AlertListQuery) -> Result<Page<Alert>> {
        self.check("get_associated_user_alerts")?;
        Ok(self.paged(query, |a| a.data_entity_id == DataEntityId::new(100)))
    }

    fn get_dependent_entities_alerts(&self, query: AlertListQuery) -> Result<Page<Alert>> {
        self.check("get_dependent_entities_alerts")?;
        Ok(self.paged(query, |a| a.data_entity_id == DataEntityId::new(101)))
    }

    fn get_data_entity_alerts(
        &self,
        data_entity_id: DataEntityId,
        query: AlertListQuery,
    ) -> Result<Page<Alert>> {
        self.check("get_data_entity_alerts")?;
        Ok(self.paged(query, |a| a.data_entity_id == data_entity_id))
    }

    fn change_alert_status(&self, alert_id: AlertId, status: AlertStatus) -> Result<Alert> {
        self.check("change_alert_status")?;
        let mut alerts = self.alerts.lock().unwrap();
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| Error::FetchFailed {
                operation: "change_alert_status".to_string(),
                cause: format!("alert {alert_id} not found"),
            })?;
        alert.status = status;
        alert.status_updated_by = Some("tester".to_string());
        Ok(alert.clone())
    }

    fn get_alert_totals(&self) -> Result<AlertTotals> {
        self.check("get_alert_totals")?;
        let total = self.alerts.lock().unwrap().len() as u64;
        Ok(AlertTotals {
            total,
            my_total: total / 3,
            dependent_total: total / 3,
        })
    }

    fn get_data_entity_alerts_config(&self, data_entity_id: DataEntityId) -> Result<AlertsConfig> {
        self.check("get_data_entity_alerts_config")?;
        Ok(self
            .configs
            .lock()
            .unwrap()
            .get(&data_entity_id)
            .cloned()
            .unwrap_or_else(|| AlertsConfig::new(data_entity_id)))
    }

    fn update_data_entity_alerts_config(&self, config: &AlertsConfig) -> Result<AlertsConfig> {
        self.check("update_data_entity_alerts_config")?;
        self.configs
            .lock()
            .unwrap()
            .insert(config.data_entity_id, config.clone());
        Ok(config.clone())
    }
}

fn service(api: &Arc<InMemoryAlertsApi>, page_size: u32) -> AlertsService {
    let api: Arc<dyn AlertsApi> = api.clone();
    AlertsService::new(api, &StateConfig::default().with_page_size(page_size))
}

#[test]
fn test_paging_through_all_alerts() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(5));
    let service = service(&api, 2);
    let mut store = AlertsStore::new();

    service
        .fetch_alert_list(&mut store, AlertListView::All, 1)
        .expect("first page");
    while service
        .fetch_next_page(&mut store, AlertListView::All)
        .expect("next page")
        .is_some()
    {}

    assert_eq!(selectors::get_alert_count(store.state()), 5);
    assert_eq!(
        selectors::get_alert_list_page_info(store.state()),
        PageInfo::new(5, 3, false)
    );
    assert_eq!(api.query_count(), 3);
}

#[test]
fn test_exhausted_cursor_skips_api_call() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(1));
    let service = service(&api, 10);
    let mut store = AlertsStore::new();

    service
        .fetch_alert_list(&mut store, AlertListView::All, 1)
        .expect("only page");
    let next = service
        .fetch_next_page(&mut store, AlertListView::All)
        .expect("exhausted");

    assert!(next.is_none());
    assert_eq!(api.query_count(), 1);
    assert_eq!(store.sequence(), 1);
}

#[test]
fn test_rejected_fetch_leaves_state_untouched() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(4));
    let service = service(&api, 10);
    let mut store = AlertsStore::new();
    service
        .fetch_alert_list(&mut store, AlertListView::All, 1)
        .expect("initial load");
    let before = store.state().clone();
    let sequence = store.sequence();
    let mut failures = store.event_bus().subscribe_event_type("fetch_failed");

    api.fail_with("503 service unavailable");
    let err = service
        .fetch_data_entity_alerts(&mut store, DataEntityId::new(100))
        .expect_err("rejected");

    match err {
        Error::FetchFailed { operation, cause } => {
            assert_eq!(operation, "fetch_data_entity_alerts");
            assert_eq!(cause, "503 service unavailable");
        },
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.state(), &before);
    assert_eq!(store.sequence(), sequence);
    match failures.try_recv() {
        Some(StoreEvent::FetchFailed { operation, .. }) => {
            assert_eq!(operation, "fetch_data_entity_alerts");
        },
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn test_recovery_after_failure() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(3));
    let service = service(&api, 10);
    let mut store = AlertsStore::new();

    api.fail_with("timeout");
    assert!(service.fetch_alerts_totals(&mut store).is_err());
    assert_eq!(selectors::get_alert_totals(store.state()), AlertTotals::default());

    api.recover();
    let totals = service.fetch_alerts_totals(&mut store).expect("totals");
    assert_eq!(selectors::get_alert_totals(store.state()), totals);
    assert_eq!(totals.total, 3);
}

#[test]
fn test_entity_view_replaces_list_views() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(6));
    let service = service(&api, 10);
    let mut store = AlertsStore::new();

    service
        .fetch_alert_list(&mut store, AlertListView::All, 1)
        .expect("all");
    service
        .fetch_data_entity_alerts(&mut store, DataEntityId::new(101))
        .expect("entity");

    let ids: Vec<i64> = selectors::get_alert_list(store.state())
        .into_iter()
        .map(|a| a.id.get())
        .collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(selectors::get_alert_list_page_info(store.state()).page, 1);
}

#[test]
fn test_status_update_round_trip() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(2));
    let service = service(&api, 10);
    let mut store = AlertsStore::new();
    service
        .fetch_alert_list(&mut store, AlertListView::All, 1)
        .expect("load");

    let updated = service
        .update_alert_status(&mut store, AlertId::new(2), AlertStatus::Resolved)
        .expect("resolve");

    assert_eq!(updated.status, AlertStatus::Resolved);
    let held = selectors::get_alert(store.state(), AlertId::new(2)).expect("held");
    assert_eq!(held, &updated);
    assert_eq!(held.status_updated_by.as_deref(), Some("tester"));
}

#[test]
fn test_config_fetch_and_update() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(0));
    let service = service(&api, 10);
    let mut store = AlertsStore::new();
    let entity = DataEntityId::new(7);

    let fetched = service
        .fetch_data_entity_alerts_config(&mut store, entity)
        .expect("fetch config");
    assert_eq!(fetched, AlertsConfig::new(entity));

    let mut changed = fetched;
    changed.disable_all_until = Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
    service
        .update_data_entity_alerts_config(&mut store, &changed)
        .expect("update config");

    assert_eq!(
        selectors::get_data_entity_alert_config(store.state(), entity),
        Some(&changed)
    );
    assert_eq!(store.state().configs.len(), 1);
}

#[test]
fn test_filter_change_clears_held_alerts() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(3));
    let service = service(&api, 10);
    let mut store = AlertsStore::new();
    service
        .fetch_alert_list(&mut store, AlertListView::Mine, 1)
        .expect("mine");
    assert_eq!(selectors::get_alert_count(store.state()), 1);

    service.change_alerts_filter(&mut store);

    assert_eq!(selectors::get_alert_count(store.state()), 0);
}

#[tokio::test]
async fn test_failure_events_reach_async_subscribers() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(1));
    let service = service(&api, 10);
    let mut store = AlertsStore::new();
    let mut receiver = store.event_bus().subscribe();

    api.fail_with("connection reset");
    let _ = service.update_alert_status(&mut store, AlertId::new(1), AlertStatus::Resolved);

    let event = receiver.recv().await.expect("event");
    assert_eq!(event.event_type(), "fetch_failed");
}

fn held_ids(store: &AlertsStore) -> Vec<i64> {
    selectors::get_alert_list(store.state())
        .into_iter()
        .map(|a| a.id.get())
        .collect()
}

#[test]
fn test_next_page_after_filter_change_starts_at_first_page() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(6));
    let service = service(&api, 2);
    let mut store = AlertsStore::new();
    service
        .fetch_alert_list(&mut store, AlertListView::All, 1)
        .expect("page 1");
    service
        .fetch_next_page(&mut store, AlertListView::All)
        .expect("page 2")
        .expect("page 2 available");

    service.change_alerts_filter(&mut store);
    let fetched = service
        .fetch_next_page(&mut store, AlertListView::Mine)
        .expect("mine")
        .expect("mine restarts");

    assert_eq!(fetched.page_info, PageInfo::new(2, 1, false));
    assert_eq!(held_ids(&store), vec![3, 6]);
    assert_eq!(
        selectors::get_alert_list_page_info(store.state()),
        PageInfo::new(2, 1, false)
    );
}

#[test]
fn test_next_page_after_filter_change_on_exhausted_cursor() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(3));
    let service = service(&api, 10);
    let mut store = AlertsStore::new();
    service
        .fetch_alert_list(&mut store, AlertListView::All, 1)
        .expect("all");
    assert!(
        service
            .fetch_next_page(&mut store, AlertListView::All)
            .expect("exhausted")
            .is_none()
    );

    service.change_alerts_filter(&mut store);
    let fetched = service
        .fetch_next_page(&mut store, AlertListView::MyDependents)
        .expect("dependents");

    assert!(fetched.is_some());
    assert_eq!(held_ids(&store), vec![1]);
    assert!(
        service
            .fetch_next_page(&mut store, AlertListView::MyDependents)
            .expect("dependents exhausted")
            .is_none()
    );
}

#[test]
fn test_entity_fetch_walks_every_page() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(10));
    let service = service(&api, 2);
    let mut store = AlertsStore::new();

    let page = service
        .fetch_data_entity_alerts(&mut store, DataEntityId::new(101))
        .expect("entity alerts");

    assert_eq!(page.len(), 4);
    assert_eq!(held_ids(&store), vec![1, 4, 7, 10]);
    assert_eq!(
        selectors::get_alert_list_page_info(store.state()),
        PageInfo::new(4, 1, false)
    );
    assert_eq!(api.query_count(), 2);
    assert_eq!(store.sequence(), 1);
}

#[test]
fn test_entity_fetch_then_next_page_does_not_mix_views() {
    let api = Arc::new(InMemoryAlertsApi::with_alerts(10));
    let service = service(&api, 2);
    let mut store = AlertsStore::new();
    service
        .fetch_data_entity_alerts(&mut store, DataEntityId::new(101))
        .expect("entity alerts");

    let next = service
        .fetch_next_page(&mut store, AlertListView::All)
        .expect("no next page");

    assert!(next.is_none());
    assert_eq!(held_ids(&store), vec![1, 4, 7, 10]);
}
