//! State slices: a state type, its action union, and a pure reducer.
//!
//! Reducers only ever see fulfilled completions. Rejected fetches are handled
//! by the service layer and never become actions.

pub mod alerts;
mod paged;

pub use paged::PagedCollection;

/// An action a slice reducer can apply.
pub trait Action {
    /// Returns the action type name used in logs, metrics and events.
    fn action_type(&self) -> &'static str;
}

/// A state slice with an exhaustive, infallible reducer.
///
/// # Implementor Notes
///
/// - `reduce` must be total: every action yields a valid state
/// - `reduce` must not perform I/O; it only rearranges the state it is given
pub trait Slice {
    /// The state owned by this slice.
    type State: Default;
    /// The actions this slice reacts to.
    type Action: Action;

    /// Slice name, used as a prefix in logs and events.
    const NAME: &'static str;

    /// Applies `action` to `state`.
    fn reduce(state: &mut Self::State, action: Self::Action);
}
