//! Generic normalized collection with keyed upsert/replace/remove operations.
//!
//! An [`EntityAdapter`] knows how to derive a record's key and, optionally,
//! how to order records. It operates on a separate [`EntityState`] value so a
//! single adapter (usually a `const`) serves every instance of a collection.
//!
//! # Operations
//!
//! | Operation | Existing key | New key | Unmentioned keys |
//! |-----------|--------------|---------|------------------|
//! | `set_one` / `set_many` | Replaced | Inserted | Kept |
//! | `set_all` | Replaced | Inserted | Removed |
//! | `add_one` / `add_many` | Kept | Inserted | Kept |
//! | `update_one` | Mutated in place | No-op | Kept |
//! | `remove_one` / `remove_many` | Removed | No-op | Kept |
//! | `remove_all` | Removed | - | Removed |
//!
//! Replacement is whole-record: no field of the previous value survives.
//!
//! # Example
//!
//! ```rust
//! use catalog_state::storage::{EntityAdapter, EntityState};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Tag {
//!     id: u32,
//!     name: &'static str,
//! }
//!
//! const TAGS: EntityAdapter<u32, Tag> = EntityAdapter::new(|tag| tag.id);
//!
//! let mut state = EntityState::new();
//! TAGS.set_many(&mut state, vec![Tag { id: 1, name: "pii" }, Tag { id: 2, name: "gold" }]);
//! TAGS.set_one(&mut state, Tag { id: 1, name: "sensitive" });
//!
//! assert_eq!(state.len(), 2);
//! assert_eq!(state.get(&1).map(|t| t.name), Some("sensitive"));
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Derives the key of a record.
pub type IdSelector<K, R> = fn(&R) -> K;

/// Orders two records for sorted collections.
pub type SortComparer<R> = fn(&R, &R) -> Ordering;

/// Normalized collection: an ordered id list plus a key to record map.
///
/// `ids` and `entities` always hold exactly the same key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityState<K, R>
where
    K: Eq + Hash,
{
    ids: Vec<K>,
    entities: HashMap<K, R>,
}

impl<K, R> Default for EntityState<K, R>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            entities: HashMap::new(),
        }
    }
}

impl<K, R> EntityState<K, R>
where
    K: Eq + Hash,
{
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns keys in adapter-defined order.
    #[must_use]
    pub fn ids(&self) -> &[K] {
        &self.ids
    }

    /// Returns the key to record map.
    #[must_use]
    pub const fn entities(&self) -> &HashMap<K, R> {
        &self.entities
    }

    /// Returns the record stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&R> {
        self.entities.get(key)
    }

    /// Returns true if a record is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entities.contains_key(key)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates records in adapter-defined order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }
}

/// Keyed collection operations for records of type `R` identified by `K`.
pub struct EntityAdapter<K, R> {
    select_id: IdSelector<K, R>,
    sort_comparer: Option<SortComparer<R>>,
}

impl<K, R> Clone for EntityAdapter<K, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, R> Copy for EntityAdapter<K, R> {}

impl<K, R> fmt::Debug for EntityAdapter<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityAdapter")
            .field("sorted", &self.sort_comparer.is_some())
            .finish_non_exhaustive()
    }
}

impl<K, R> EntityAdapter<K, R>
where
    K: Eq + Hash + Clone,
{
    /// Creates an adapter that keeps records in insertion order.
    #[must_use]
    pub const fn new(select_id: IdSelector<K, R>) -> Self {
        Self {
            select_id,
            sort_comparer: None,
        }
    }

    /// Returns an adapter that keeps ids sorted by `compare`.
    ///
    /// Ties keep their relative insertion order.
    #[must_use]
    pub const fn with_sort_comparer(self, compare: SortComparer<R>) -> Self {
        Self {
            select_id: self.select_id,
            sort_comparer: Some(compare),
        }
    }

    /// Returns true if this adapter keeps ids sorted.
    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.sort_comparer.is_some()
    }

    /// Returns an empty collection for this adapter.
    #[must_use]
    pub fn initial_state(&self) -> EntityState<K, R> {
        EntityState::new()
    }

    /// Derives the key of `record`.
    #[must_use]
    pub fn select_id(&self, record: &R) -> K {
        (self.select_id)(record)
    }

    /// Inserts or fully replaces a single record.
    pub fn set_one(&self, state: &mut EntityState<K, R>, record: R) {
        self.put(state, record);
        self.resort(state);
    }

    /// Inserts or fully replaces each record. Records not mentioned are kept.
    pub fn set_many<I>(&self, state: &mut EntityState<K, R>, records: I)
    where
        I: IntoIterator<Item = R>,
    {
        for record in records {
            self.put(state, record);
        }
        self.resort(state);
    }

    /// Replaces the whole collection with `records`.
    ///
    /// When two records share a key the later one wins.
    pub fn set_all<I>(&self, state: &mut EntityState<K, R>, records: I)
    where
        I: IntoIterator<Item = R>,
    {
        state.ids.clear();
        state.entities.clear();
        self.set_many(state, records);
    }

    /// Inserts a record only if its key is absent. Returns true if inserted.
    pub fn add_one(&self, state: &mut EntityState<K, R>, record: R) -> bool {
        let inserted = self.insert_absent(state, record);
        if inserted {
            self.resort(state);
        }
        inserted
    }

    /// Inserts each record whose key is absent. Returns the number inserted.
    pub fn add_many<I>(&self, state: &mut EntityState<K, R>, records: I) -> usize
    where
        I: IntoIterator<Item = R>,
    {
        let mut inserted = 0;
        for record in records {
            if self.insert_absent(state, record) {
                inserted += 1;
            }
        }
        if inserted > 0 {
            self.resort(state);
        }
        inserted
    }

    /// Mutates the record stored under `key` in place.
    ///
    /// If the mutation changes the record's key, the record moves to the new
    /// key and takes over the old key's position; a record already stored
    /// under the new key is replaced. Returns false if `key` was absent.
    pub fn update_one<F>(&self, state: &mut EntityState<K, R>, key: &K, update: F) -> bool
    where
        F: FnOnce(&mut R),
    {
        let Some(mut record) = state.entities.remove(key) else {
            return false;
        };
        update(&mut record);

        let new_key = self.select_id(&record);
        if new_key != *key {
            if state.entities.remove(&new_key).is_some() {
                state.ids.retain(|id| *id != new_key);
            }
            if let Some(slot) = state.ids.iter_mut().find(|id| **id == *key) {
                *slot = new_key.clone();
            }
        }
        state.entities.insert(new_key, record);
        self.resort(state);
        true
    }

    /// Removes the record stored under `key`. Returns true if it existed.
    pub fn remove_one(&self, state: &mut EntityState<K, R>, key: &K) -> bool {
        if state.entities.remove(key).is_none() {
            return false;
        }
        state.ids.retain(|id| id != key);
        true
    }

    /// Removes every listed key. Returns the number of records removed.
    pub fn remove_many<'a, I>(&self, state: &mut EntityState<K, R>, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let removed = keys
            .into_iter()
            .filter(|key| state.entities.remove(*key).is_some())
            .count();
        if removed > 0 {
            let entities = &state.entities;
            state.ids.retain(|id| entities.contains_key(id));
        }
        removed
    }

    /// Empties the collection.
    pub fn remove_all(&self, state: &mut EntityState<K, R>) {
        state.ids.clear();
        state.entities.clear();
    }

    fn put(&self, state: &mut EntityState<K, R>, record: R) {
        let key = self.select_id(&record);
        if state.entities.insert(key.clone(), record).is_none() {
            state.ids.push(key);
        }
    }

    fn insert_absent(&self, state: &mut EntityState<K, R>, record: R) -> bool {
        let key = self.select_id(&record);
        if state.entities.contains_key(&key) {
            return false;
        }
        state.entities.insert(key.clone(), record);
        state.ids.push(key);
        true
    }

    fn resort(&self, state: &mut EntityState<K, R>) {
        let Some(compare) = self.sort_comparer else {
            return;
        };
        let entities = &state.entities;
        state
            .ids
            .sort_by(|a, b| match (entities.get(a), entities.get(b)) {
                (Some(left), Some(right)) => compare(left, right),
                _ => Ordering::Equal,
            });
    }
}
