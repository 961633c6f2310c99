//! Store event types for observability.

use crate::current_timestamp;
use uuid::Uuid;

/// Shared event metadata.
#[derive(Debug, Clone)]
pub struct EventMeta {
    /// Unique identifier for this event.
    pub event_id: String,
    /// Event source component.
    pub source: &'static str,
    /// Timestamp (Unix epoch seconds).
    pub timestamp: u64,
}

impl EventMeta {
    /// Creates new event metadata using the current timestamp.
    #[must_use]
    pub fn new(source: &'static str) -> Self {
        Self::with_timestamp(source, current_timestamp())
    }

    /// Creates new event metadata with a specified timestamp.
    #[must_use]
    pub fn with_timestamp(source: &'static str, timestamp: u64) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            source,
            timestamp,
        }
    }
}

/// Events emitted by stores and the services feeding them.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// An action was applied to a slice.
    Dispatched {
        /// Event metadata.
        meta: EventMeta,
        /// Name of the slice the action was applied to.
        slice: &'static str,
        /// Action type name.
        action: &'static str,
        /// Dispatch sequence number after the application.
        sequence: u64,
    },
    /// A fetch was rejected and never reached the reducer.
    FetchFailed {
        /// Event metadata.
        meta: EventMeta,
        /// Fetch operation name.
        operation: &'static str,
        /// Error message.
        error: String,
    },
}

impl StoreEvent {
    /// Returns the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Dispatched { .. } => "dispatched",
            Self::FetchFailed { .. } => "fetch_failed",
        }
    }

    /// Returns the event metadata.
    #[must_use]
    pub const fn meta(&self) -> &EventMeta {
        match self {
            Self::Dispatched { meta, .. } | Self::FetchFailed { meta, .. } => meta,
        }
    }

    /// Returns the timestamp of the event.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.meta().timestamp
    }
}
