//! Per-entity alert notification settings.

use super::{AlertType, DataEntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert silencing configuration for a single data entity.
///
/// Each `*_until` field, when set, suppresses the matching alert type until
/// that instant. `disable_all_until` suppresses every type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsConfig {
    /// The data entity the configuration belongs to. Also the record key.
    pub data_entity_id: DataEntityId,
    /// Suppresses all alert types until this instant.
    #[serde(default)]
    pub disable_all_until: Option<DateTime<Utc>>,
    /// Suppresses failed job alerts until this instant.
    #[serde(default)]
    pub failed_job_until: Option<DateTime<Utc>>,
    /// Suppresses failed data quality test alerts until this instant.
    #[serde(default, rename = "failedDQTestUntil", alias = "failedDqTestUntil")]
    pub failed_dq_test_until: Option<DateTime<Utc>>,
    /// Suppresses backwards incompatible schema alerts until this instant.
    #[serde(default)]
    pub incompatible_schema_until: Option<DateTime<Utc>>,
    /// Suppresses distribution anomaly alerts until this instant.
    #[serde(default)]
    pub distribution_anomaly_until: Option<DateTime<Utc>>,
}

impl AlertsConfig {
    /// Creates a configuration with nothing suppressed.
    #[must_use]
    pub const fn new(data_entity_id: DataEntityId) -> Self {
        Self {
            data_entity_id,
            disable_all_until: None,
            failed_job_until: None,
            failed_dq_test_until: None,
            incompatible_schema_until: None,
            distribution_anomaly_until: None,
        }
    }

    /// Returns the suppression deadline configured for an alert type.
    #[must_use]
    pub const fn until_for(&self, alert_type: AlertType) -> Option<DateTime<Utc>> {
        match alert_type {
            AlertType::BackwardsIncompatibleSchema => self.incompatible_schema_until,
            AlertType::FailedJob => self.failed_job_until,
            AlertType::FailedDqTest => self.failed_dq_test_until,
            AlertType::DistributionAnomaly => self.distribution_anomaly_until,
        }
    }

    /// Returns true if alerts of the given type are suppressed at `now`.
    #[must_use]
    pub fn is_suppressed(&self, alert_type: AlertType, now: DateTime<Utc>) -> bool {
        self.disable_all_until.is_some_and(|until| until > now)
            || self.until_for(alert_type).is_some_and(|until| until > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_config_suppresses_nothing() {
        let config = AlertsConfig::new(DataEntityId::new(1));
        let now = Utc::now();
        for alert_type in AlertType::all() {
            assert!(!config.is_suppressed(*alert_type, now));
        }
    }

    #[test]
    fn test_disable_all_suppresses_every_type() {
        let now = Utc::now();
        let mut config = AlertsConfig::new(DataEntityId::new(1));
        config.disable_all_until = Some(now + Duration::hours(1));
        for alert_type in AlertType::all() {
            assert!(config.is_suppressed(*alert_type, now));
        }
    }

    #[test]
    fn test_expired_deadline_does_not_suppress() {
        let now = Utc::now();
        let mut config = AlertsConfig::new(DataEntityId::new(1));
        config.failed_job_until = Some(now - Duration::minutes(5));
        assert!(!config.is_suppressed(AlertType::FailedJob, now));
    }

    #[test]
    fn test_type_specific_deadline() {
        let now = Utc::now();
        let mut config = AlertsConfig::new(DataEntityId::new(1));
        config.failed_dq_test_until = Some(now + Duration::days(1));
        assert!(config.is_suppressed(AlertType::FailedDqTest, now));
        assert!(!config.is_suppressed(AlertType::FailedJob, now));
    }

    #[test]
    fn test_deserialize_wire_field_names() {
        let json = r#"{"dataEntityId": 9, "failedDQTestUntil": "2030-01-01T00:00:00Z"}"#;
        let config: AlertsConfig = serde_json::from_str(json).expect("parse config");
        assert_eq!(config.data_entity_id, DataEntityId::new(9));
        assert!(config.failed_dq_test_until.is_some());
        assert!(config.disable_all_until.is_none());
    }
}
