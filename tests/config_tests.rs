//! Integration tests for configuration loading and replay files.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use catalog_state::Error;
use catalog_state::cli::replay_file;
use catalog_state::config::{DEFAULT_PAGE_SIZE, StateConfig};
use catalog_state::observability::{LogFormat, LoggingConfig};
use catalog_state::services::AlertsService;
use std::io::Write;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
    path
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "config.toml",
        r#"
page_size = 12

[logging]
format = "json"
file = "/tmp/catalog-state.log"
"#,
    );

    let config = StateConfig::load_from_file(&path).expect("load config");

    assert_eq!(config.page_size, 12);
    assert_eq!(config.logging.format.as_deref(), Some("json"));
    assert!(config.logging.file.is_some());

    let logging = LoggingConfig::from_settings(Some(&config.logging), false);
    assert_eq!(logging.format, LogFormat::Json);
}

#[test]
fn test_missing_file_is_operation_failure() {
    let dir = TempDir::new().expect("temp dir");
    let err = StateConfig::load_from_file(&dir.path().join("absent.toml")).expect_err("missing");
    assert!(matches!(err, Error::OperationFailed { .. }));
}

#[test]
fn test_malformed_toml_is_operation_failure() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "config.toml", "page_size = [");
    let err = StateConfig::load_from_file(&path).expect_err("malformed");
    assert!(matches!(err, Error::OperationFailed { .. }));
}

#[test]
fn test_page_size_flows_into_service() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "config.toml", "event_bus_capacity = 0\n");
    let config = StateConfig::load_from_file(&path).expect("load config");

    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.event_bus_capacity, 1);

    let api = std::sync::Arc::new(NoAlerts);
    let service = AlertsService::new(api, &config.with_page_size(25));
    assert_eq!(service.page_size(), 25);
}

#[test]
fn test_replay_file_from_disk() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "session.jsonl",
        concat!(
            "# totals then a filter change\n",
            r#"{"type": "alertsTotalsFetched", "payload": {"total": 5, "myTotal": 2, "dependentTotal": 1}}"#,
            "\n",
            r#"{"type": "alertsFilterChanged"}"#,
            "\n",
        ),
    );

    let store = replay_file(&path, &StateConfig::default()).expect("replay");
    assert_eq!(store.sequence(), 2);
    assert_eq!(store.state().totals.total, 5);
}

#[test]
fn test_replay_missing_file() {
    let dir = TempDir::new().expect("temp dir");
    let err = replay_file(&dir.path().join("nope.jsonl"), &StateConfig::default())
        .expect_err("missing");
    assert!(matches!(err, Error::OperationFailed { .. }));
}

/// API that fails every call; only used to construct a service.
struct NoAlerts;

impl catalog_state::services::AlertsApi for NoAlerts {
    fn get_all_alerts(
        &self,
        _query: catalog_state::services::AlertListQuery,
    ) -> catalog_state::Result<catalog_state::Page<catalog_state::Alert>> {
        Err(unavailable())
    }

    fn get_associated_user_alerts(
        &self,
        _query: catalog_state::services::AlertListQuery,
    ) -> catalog_state::Result<catalog_state::Page<catalog_state::Alert>> {
        Err(unavailable())
    }

    fn get_dependent_entities_alerts(
        &self,
        _query: catalog_state::services::AlertListQuery,
    ) -> catalog_state::Result<catalog_state::Page<catalog_state::Alert>> {
        Err(unavailable())
    }

    fn get_data_entity_alerts(
        &self,
        _data_entity_id: catalog_state::DataEntityId,
        _query: catalog_state::services::AlertListQuery,
    ) -> catalog_state::Result<catalog_state::Page<catalog_state::Alert>> {
        Err(unavailable())
    }

    fn change_alert_status(
        &self,
        _alert_id: catalog_state::AlertId,
        _status: catalog_state::AlertStatus,
    ) -> catalog_state::Result<catalog_state::Alert> {
        Err(unavailable())
    }

    fn get_alert_totals(&self) -> catalog_state::Result<catalog_state::AlertTotals> {
        Err(unavailable())
    }

    fn get_data_entity_alerts_config(
        &self,
        _data_entity_id: catalog_state::DataEntityId,
    ) -> catalog_state::Result<catalog_state::AlertsConfig> {
        Err(unavailable())
    }

    fn update_data_entity_alerts_config(
        &self,
        _config: &catalog_state::AlertsConfig,
    ) -> catalog_state::Result<catalog_state::AlertsConfig> {
        Err(unavailable())
    }
}

fn unavailable() -> Error {
    Error::FetchFailed {
        operation: "no_alerts".to_string(),
        cause: "unavailable".to_string(),
    }
}
