//! Reducers: pure state transitions, and the combinators that compose them.
//!
//! A reducer is the only place where state transitions happen. It must be a
//! pure function apart from the state it is handed: no I/O, no suspension,
//! no shared mutable data beyond the argument. Anything asynchronous a
//! transition needs is returned as an [`Effect`](crate::effect::Effect)
//! instead of performed inline.
//!
//! Reducers that need collaborators (clocks, clients, generators) carry
//! them as struct fields; the runtime stores nothing on their behalf.

mod combine;
mod for_each;
mod optional;
mod scope;

pub use combine::Either;
pub use for_each::ForEach;
pub use optional::Optional;
pub use scope::Scope;

use crate::effect::Effect;

/// A pure transition from `(state, action)` to an effect.
///
/// The state is mutated in place through the exclusive reference; the
/// returned effect describes any follow-up asynchronous work. Return
/// [`Effect::none`] when there is none.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer handles.
    type Action;

    /// Process one action against the current state.
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action>;

    /// Lift this reducer over `Option<State>`; absent state is a no-op.
    ///
    /// Lets a parent holding an optional child feature embed the child's
    /// reducer without guard logic at every call site.
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional::new(self)
    }
}
