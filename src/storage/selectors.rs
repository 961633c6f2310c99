//! Read-only views over an [`EntityState`].
//!
//! Every selector is total: absent keys yield `None`, empty or partially
//! loaded collections yield empty or partial results.

use super::EntityState;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Returns keys in adapter-defined order.
#[must_use]
pub fn select_ids<K, R>(state: &EntityState<K, R>) -> &[K]
where
    K: Eq + Hash,
{
    state.ids()
}

/// Returns the key to record map.
#[must_use]
pub fn select_entities<K, R>(state: &EntityState<K, R>) -> &HashMap<K, R>
where
    K: Eq + Hash,
{
    state.entities()
}

/// Returns every record in adapter-defined order.
#[must_use]
pub fn select_all<K, R>(state: &EntityState<K, R>) -> Vec<&R>
where
    K: Eq + Hash,
{
    state.iter().collect()
}

/// Returns every record ordered by `compare`, ties in adapter order.
#[must_use]
pub fn select_all_sorted_by<K, R, F>(state: &EntityState<K, R>, mut compare: F) -> Vec<&R>
where
    K: Eq + Hash,
    F: FnMut(&R, &R) -> Ordering,
{
    let mut records = select_all(state);
    records.sort_by(|a, b| compare(a, b));
    records
}

/// Returns records matching `predicate` in adapter-defined order.
#[must_use]
pub fn select_where<K, R, P>(state: &EntityState<K, R>, mut predicate: P) -> Vec<&R>
where
    K: Eq + Hash,
    P: FnMut(&R) -> bool,
{
    state.iter().filter(|record| predicate(record)).collect()
}

/// Returns the number of records.
#[must_use]
pub fn select_total<K, R>(state: &EntityState<K, R>) -> usize
where
    K: Eq + Hash,
{
    state.len()
}

/// Returns the record stored under `key`, or `None`.
#[must_use]
pub fn select_by_id<'a, K, R>(state: &'a EntityState<K, R>, key: &K) -> Option<&'a R>
where
    K: Eq + Hash,
{
    state.get(key)
}
