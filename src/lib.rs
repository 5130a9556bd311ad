//! Unidirectional state management runtime.
//!
//! A single mutable state value is advanced only by pure reducers applied to
//! discrete actions; any asynchronous work a transition needs is described as
//! a cancellable, composable [`Effect`] rather than performed inline.
//!
//! # Architecture
//!
//! ```text
//! caller ──→ Store::send(action) ──→ Reducer::reduce ──→ State
//!               ↑                          │
//!               └────── ActionSender ←── Effect
//! ```
//!
//! - **State**: owned exclusively by the [`Store`]; mutated only inside a
//!   reducer call, never concurrently
//! - **Action**: immutable value describing one discrete event
//! - **Reducer**: pure transition `(state, action) -> Effect`
//! - **Effect**: value describing zero or more async operations and the
//!   actions they may emit; becomes a task only when a Store runs it
//!
//! Composition is wiring, not machinery: [`Scope`] embeds a child reducer
//! behind an [`ActionPath`], [`ForEach`] routes element actions into a
//! [`KeyedList`] of child states, and tuples of reducers run in sequence
//! against the same state.

pub mod effect;
pub mod keyed;
pub mod reducer;
pub mod routing;
pub mod store;

pub use effect::{ActionSender, CancelId, Effect, Priority};
pub use keyed::{Keyed, KeyedList};
pub use reducer::{Either, ForEach, Optional, Reducer, Scope};
pub use routing::ActionPath;
pub use store::Store;
