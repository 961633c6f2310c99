//! Explicit state container for a slice.
//!
//! A [`Store`] owns one slice's state and applies actions to it one at a
//! time. Stores are plain values: create as many isolated instances as
//! needed, pass them where state is read or changed.
//!
//! # Ordering
//!
//! Actions are applied in dispatch order and the last application wins.
//! Two overlapping fetches that complete out of order will leave the slower
//! one's result in place. [`Store::sequence`] increases by one per dispatch,
//! so callers that care can record it when starting a fetch and compare on
//! completion.

use crate::config::StateConfig;
use crate::models::{EventMeta, StoreEvent};
use crate::observability::EventBus;
use crate::slices::{Action, Slice};
use std::fmt;

/// State container that serializes reducer applications for slice `S`.
pub struct Store<S: Slice> {
    state: S::State,
    sequence: u64,
    events: EventBus,
}

impl<S: Slice> Default for Store<S> {
    fn default() -> Self {
        Self::with_state(S::State::default())
    }
}

impl<S: Slice> fmt::Debug for Store<S>
where
    S::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("slice", &S::NAME)
            .field("sequence", &self.sequence)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S: Slice> Store<S> {
    /// Creates a store holding the slice's initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store sized by `config`.
    #[must_use]
    pub fn with_config(config: &StateConfig) -> Self {
        Self {
            state: S::State::default(),
            sequence: 0,
            events: EventBus::new(config.event_bus_capacity),
        }
    }

    /// Creates a store holding `state`.
    #[must_use]
    pub fn with_state(state: S::State) -> Self {
        Self {
            state,
            sequence: 0,
            events: EventBus::default(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &S::State {
        &self.state
    }

    /// Applies a selector to the current state.
    pub fn select<'a, T, F>(&'a self, selector: F) -> T
    where
        F: FnOnce(&'a S::State) -> T,
    {
        selector(&self.state)
    }

    /// Returns the number of actions applied so far.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the bus this store publishes to.
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.events
    }

    /// Applies `action` and returns the new sequence number.
    pub fn dispatch(&mut self, action: S::Action) -> u64 {
        let action_type = action.action_type();
        S::reduce(&mut self.state, action);
        self.sequence += 1;

        tracing::debug!(
            slice = S::NAME,
            action = action_type,
            sequence = self.sequence,
            "Applied action"
        );
        metrics::counter!(
            "store_dispatch_total",
            "slice" => S::NAME,
            "action" => action_type
        )
        .increment(1);

        self.events.publish(StoreEvent::Dispatched {
            meta: EventMeta::new("store"),
            slice: S::NAME,
            action: action_type,
            sequence: self.sequence,
        });

        self.sequence
    }

    /// Consumes the store and returns its state.
    #[must_use]
    pub fn into_state(self) -> S::State {
        self.state
    }
}
