//! Normalized in-memory collections.
//!
//! [`EntityAdapter`] applies keyed upserts and removals to an
//! [`EntityState`]; the [`selectors`] module reads from it. Nothing here
//! persists beyond the owning store.

mod adapter;
pub mod selectors;

pub use adapter::{EntityAdapter, EntityState, IdSelector, SortComparer};
