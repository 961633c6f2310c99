//! Alert records and identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(i64);

impl AlertId {
    /// Creates a new alert ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AlertId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a catalog data entity (dataset, job, transformer, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataEntityId(i64);

impl DataEntityId {
    /// Creates a new data entity ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DataEntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DataEntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Kind of condition that raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    /// A schema change broke backwards compatibility.
    BackwardsIncompatibleSchema,
    /// A job run failed.
    FailedJob,
    /// A data quality test failed.
    #[serde(rename = "FAILED_DQ_TEST")]
    FailedDqTest,
    /// A value distribution drifted outside expected bounds.
    DistributionAnomaly,
}

impl AlertType {
    /// Returns all alert types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::BackwardsIncompatibleSchema,
            Self::FailedJob,
            Self::FailedDqTest,
            Self::DistributionAnomaly,
        ]
    }

    /// Returns the wire name of the alert type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BackwardsIncompatibleSchema => "BACKWARDS_INCOMPATIBLE_SCHEMA",
            Self::FailedJob => "FAILED_JOB",
            Self::FailedDqTest => "FAILED_DQ_TEST",
            Self::DistributionAnomaly => "DISTRIBUTION_ANOMALY",
        }
    }

    /// Returns the human-readable title shown for the alert type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::BackwardsIncompatibleSchema => "Backwards incompatible schema",
            Self::FailedJob => "Failed job",
            Self::FailedDqTest => "Failed DQ test",
            Self::DistributionAnomaly => "Distribution anomaly",
        }
    }

    /// Parses an alert type from its wire name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BACKWARDS_INCOMPATIBLE_SCHEMA" => Some(Self::BackwardsIncompatibleSchema),
            "FAILED_JOB" => Some(Self::FailedJob),
            "FAILED_DQ_TEST" => Some(Self::FailedDqTest),
            "DISTRIBUTION_ANOMALY" => Some(Self::DistributionAnomaly),
            _ => None,
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Lifecycle status of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    /// Alert is active and unacknowledged.
    #[default]
    Open,
    /// Alert has been resolved by a user.
    Resolved,
}

impl AlertStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Resolved => "RESOLVED",
        }
    }

    /// Returns the status an alert toggles to from this one.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Resolved,
            Self::Resolved => Self::Open,
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An alert raised against a data entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Unique identifier.
    pub id: AlertId,
    /// The data entity this alert was raised against.
    pub data_entity_id: DataEntityId,
    /// What kind of condition raised the alert.
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Current status.
    pub status: AlertStatus,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the alert was first raised.
    pub created_at: DateTime<Utc>,
    /// When the alert condition was last observed again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_created_at: Option<DateTime<Utc>>,
    /// When the status last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_updated_at: Option<DateTime<Utc>>,
    /// Who last changed the status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_updated_by: Option<String>,
}

impl Alert {
    /// Creates an open alert with only the required fields set.
    #[must_use]
    pub const fn new(
        id: AlertId,
        data_entity_id: DataEntityId,
        alert_type: AlertType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            data_entity_id,
            alert_type,
            status: AlertStatus::Open,
            description: None,
            created_at,
            last_created_at: None,
            status_updated_at: None,
            status_updated_by: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: AlertStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns true if the alert is still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.status, AlertStatus::Open)
    }

    /// Returns the most recent time this alert was raised.
    #[must_use]
    pub fn last_seen_at(&self) -> DateTime<Utc> {
        self.last_created_at.unwrap_or(self.created_at)
    }
}

/// Aggregate alert counters shown next to the alert list tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertTotals {
    /// All alerts visible to the user.
    pub total: u64,
    /// Alerts on entities the user owns.
    pub my_total: u64,
    /// Alerts on entities downstream of the user's entities.
    pub dependent_total: u64,
}
