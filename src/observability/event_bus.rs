//! Tokio broadcast event bus for store notifications.

use crate::models::StoreEvent;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

/// Default buffer capacity of a new event bus.
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 1024;

/// Broadcasts [`StoreEvent`]s to any number of subscribers.
///
/// Publishing never blocks and never fails from the caller's point of view;
/// slow subscribers skip ahead and count what they missed.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUS_CAPACITY)
    }
}

impl EventBus {
    /// Creates a new event bus with the given buffer capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all current subscribers.
    pub fn publish(&self, event: StoreEvent) {
        let event_type = event.event_type();
        let delivered = self.sender.send(event).unwrap_or(0);
        metrics::counter!("event_bus_publish_total", "event_type" => event_type).increment(1);
        if delivered == 0 {
            metrics::counter!("event_bus_publish_dropped_total", "event_type" => event_type)
                .increment(1);
        }
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Subscribes to every event as a raw broadcast receiver.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Subscribes to events accepted by `filter`.
    #[must_use]
    pub fn subscribe_with(&self, filter: EventFilter) -> EventSubscription {
        EventSubscription {
            receiver: self.sender.subscribe(),
            filter,
            lagged: 0,
        }
    }

    /// Subscribes to events of one type (`dispatched`, `fetch_failed`).
    #[must_use]
    pub fn subscribe_event_type(&self, event_type: &'static str) -> EventSubscription {
        self.subscribe_with(EventFilter::EventType(event_type))
    }

    /// Subscribes to dispatches of a single action type.
    #[must_use]
    pub fn subscribe_action(&self, action_type: &'static str) -> EventSubscription {
        self.subscribe_with(EventFilter::Action(action_type))
    }
}

/// Selects which store events a subscription yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    /// Every event.
    Any,
    /// Events whose [`StoreEvent::event_type`] equals the name.
    EventType(&'static str),
    /// Dispatches applied to the named slice.
    Slice(&'static str),
    /// Dispatches of the named action type.
    Action(&'static str),
}

impl EventFilter {
    /// Returns true if `event` passes this filter.
    #[must_use]
    pub fn matches(&self, event: &StoreEvent) -> bool {
        match (*self, event) {
            (Self::Any, _) => true,
            (Self::EventType(name), _) => event.event_type() == name,
            (Self::Slice(name), StoreEvent::Dispatched { slice, .. }) => *slice == name,
            (Self::Action(name), StoreEvent::Dispatched { action, .. }) => *action == name,
            (Self::Slice(_) | Self::Action(_), StoreEvent::FetchFailed { .. }) => false,
        }
    }
}

/// A filtered view of one store's event stream.
#[derive(Debug)]
pub struct EventSubscription {
    receiver: broadcast::Receiver<StoreEvent>,
    filter: EventFilter,
    lagged: u64,
}

impl EventSubscription {
    /// Returns the filter this subscription applies.
    #[must_use]
    pub const fn filter(&self) -> EventFilter {
        self.filter
    }

    /// Returns how many events were overwritten before this subscriber read them.
    #[must_use]
    pub const fn lagged(&self) -> u64 {
        self.lagged
    }

    /// Waits for the next accepted event.
    ///
    /// Returns `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<StoreEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {},
                Err(RecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next accepted event already buffered, without waiting.
    pub fn try_recv(&mut self) -> Option<StoreEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {},
                Err(TryRecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    fn record_lag(&mut self, skipped: u64) {
        self.lagged = self.lagged.saturating_add(skipped);
        metrics::counter!("event_bus_lagged_total").increment(skipped);
    }
}
