//! Command implementations backing the `catalog-state` binary.

mod replay;

pub use replay::{ReplaySummary, replay_actions, replay_file};
