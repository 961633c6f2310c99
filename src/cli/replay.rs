//! Replays recorded alert actions into a fresh store.

use crate::config::StateConfig;
use crate::models::{Alert, AlertTotals, PageInfo};
use crate::slices::alerts::{AlertsAction, AlertsStore, selectors};
use crate::{Error, Result};
use serde::Serialize;
use std::io::BufRead;
use std::path::Path;

/// Snapshot of an alerts store after a replay.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary<'a> {
    /// Number of actions applied.
    pub dispatched: u64,
    /// Held alerts in arrival order.
    pub alerts: Vec<&'a Alert>,
    /// Cursor of the last list fetch.
    pub page_info: PageInfo,
    /// Alert counters.
    pub totals: AlertTotals,
    /// Number of held alert configs.
    pub configs: usize,
}

impl<'a> ReplaySummary<'a> {
    /// Summarizes the current state of `store`.
    #[must_use]
    pub fn of(store: &'a AlertsStore) -> Self {
        let state = store.state();
        Self {
            dispatched: store.sequence(),
            alerts: selectors::get_alert_list(state),
            page_info: selectors::get_alert_list_page_info(state),
            totals: selectors::get_alert_totals(state),
            configs: state.configs.len(),
        }
    }
}

/// Dispatches one JSON-encoded [`AlertsAction`] per line into a new store.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] naming the line number of the first line
/// that is not a valid action, or [`Error::OperationFailed`] on read errors.
pub fn replay_actions<R: BufRead>(reader: R, config: &StateConfig) -> Result<AlertsStore> {
    let mut store = AlertsStore::with_config(config);

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| Error::OperationFailed {
            operation: "read_replay_input".to_string(),
            cause: format!("line {line_no}: {e}"),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let action: AlertsAction = serde_json::from_str(trimmed)
            .map_err(|e| Error::InvalidInput(format!("line {line_no}: {e}")))?;
        store.dispatch(action);
    }

    tracing::info!(dispatched = store.sequence(), "Replay complete");
    Ok(store)
}

/// Replays actions from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or contains an invalid line.
pub fn replay_file(path: &Path, config: &StateConfig) -> Result<AlertsStore> {
    let file = std::fs::File::open(path).map_err(|e| Error::OperationFailed {
        operation: "open_replay_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;
    replay_actions(std::io::BufReader::new(file), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertId;

    const SESSION: &str = r#"
# initial list load
{"type": "allAlertListFetched", "payload": {"items": [{"id": 1, "dataEntityId": 10, "type": "FAILED_JOB", "status": "OPEN", "createdAt": "2024-01-01T00:00:00Z"}, {"id": 2, "dataEntityId": 11, "type": "FAILED_DQ_TEST", "status": "OPEN", "createdAt": "2024-01-02T00:00:00Z"}], "pageInfo": {"total": 2, "page": 1, "hasNext": false}}}

{"type": "alertStatusUpdated", "payload": {"id": 2, "dataEntityId": 11, "type": "FAILED_DQ_TEST", "status": "RESOLVED", "createdAt": "2024-01-02T00:00:00Z"}}
{"type": "alertsTotalsFetched", "payload": {"total": 2, "myTotal": 1, "dependentTotal": 0}}
"#;

    #[test]
    fn test_replay_applies_actions_in_order() {
        let store = replay_actions(SESSION.as_bytes(), &StateConfig::default()).expect("replay");
        let summary = ReplaySummary::of(&store);

        assert_eq!(summary.dispatched, 3);
        assert_eq!(summary.alerts.len(), 2);
        assert_eq!(summary.page_info, PageInfo::new(2, 1, false));
        assert_eq!(summary.totals.my_total, 1);
        let resolved = selectors::get_alert(store.state(), AlertId::new(2)).expect("alert 2");
        assert!(!resolved.is_open());
    }

    #[test]
    fn test_replay_reports_bad_line_number() {
        let input = "{\"type\": \"alertsFilterChanged\"}\n\n{\"type\": \"bogus\"}\n";
        let err = replay_actions(input.as_bytes(), &StateConfig::default()).expect_err("bad line");
        match err {
            Error::InvalidInput(message) => assert!(message.starts_with("line 3:")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_replay_summary_serializes() {
        let store = replay_actions(SESSION.as_bytes(), &StateConfig::default()).expect("replay");
        let json = serde_json::to_value(ReplaySummary::of(&store)).expect("serialize");
        assert_eq!(json["dispatched"], 3);
        assert_eq!(json["pageInfo"]["hasNext"], false);
        assert_eq!(json["alerts"][1]["status"], "RESOLVED");
    }
}
