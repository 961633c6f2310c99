//! A normalized collection paired with its pagination cursor.

use crate::models::{Page, PageInfo};
use crate::storage::{EntityAdapter, EntityState};
use std::hash::Hash;

/// Keyed collection plus the [`PageInfo`] of the last list fetch.
///
/// Two loading modes share the collection:
///
/// - [`merge_page`](Self::merge_page) for incrementally paginated lists:
///   records merge into what is already held.
/// - [`replace_page`](Self::replace_page) for small lists always fetched in
///   full: the collection is replaced so server-side deletions disappear.
///
/// [`clear`](Self::clear) keeps the cursor for display but marks the
/// collection as reset, so the next paginated load starts over at page 1.
#[derive(Debug, Clone)]
pub struct PagedCollection<K, R>
where
    K: Eq + Hash,
{
    adapter: EntityAdapter<K, R>,
    entities: EntityState<K, R>,
    page_info: PageInfo,
    reset: bool,
}

impl<K, R> PagedCollection<K, R>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty collection managed by `adapter`.
    #[must_use]
    pub fn new(adapter: EntityAdapter<K, R>) -> Self {
        Self {
            adapter,
            entities: adapter.initial_state(),
            page_info: PageInfo::default(),
            reset: false,
        }
    }

    /// Returns the held records.
    #[must_use]
    pub const fn entities(&self) -> &EntityState<K, R> {
        &self.entities
    }

    /// Returns the pagination cursor of the last list fetch.
    #[must_use]
    pub const fn page_info(&self) -> PageInfo {
        self.page_info
    }

    /// Returns true if the collection was cleared and no page has arrived since.
    #[must_use]
    pub const fn is_reset(&self) -> bool {
        self.reset
    }

    /// Returns the page the next paginated load should request.
    ///
    /// After a [`clear`](Self::clear) this is page 1 regardless of the held
    /// cursor. Otherwise it follows [`PageInfo::next_page`].
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.reset {
            Some(1)
        } else {
            self.page_info.next_page()
        }
    }

    /// Returns the adapter managing this collection.
    #[must_use]
    pub const fn adapter(&self) -> EntityAdapter<K, R> {
        self.adapter
    }

    /// Merges a fetched page into the collection and adopts its cursor.
    pub fn merge_page(&mut self, page: Page<R>) {
        self.adapter.set_many(&mut self.entities, page.items);
        self.page_info = page.page_info;
        self.reset = false;
    }

    /// Replaces the collection with a fully fetched list.
    ///
    /// The list counts as a single page, so the cursor's `page` is set to 1.
    pub fn replace_page(&mut self, page: Page<R>) {
        self.adapter.set_all(&mut self.entities, page.items);
        self.page_info = page.page_info.with_page(1);
        self.reset = false;
    }

    /// Inserts or replaces one record without touching the cursor.
    pub fn set_one(&mut self, record: R) {
        self.adapter.set_one(&mut self.entities, record);
    }

    /// Removes every record and marks the collection reset. The cursor is
    /// left as is.
    pub fn clear(&mut self) {
        self.adapter.remove_all(&mut self.entities);
        self.reset = true;
    }
}

impl<K, R> PartialEq for PagedCollection<K, R>
where
    K: Eq + Hash,
    R: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
            && self.page_info == other.page_info
            && self.reset == other.reset
    }
}
