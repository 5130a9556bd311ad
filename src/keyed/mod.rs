//! Order-preserving collection with unique, O(1)-addressable element keys.

mod list;

pub use list::{Keyed, KeyedList};
