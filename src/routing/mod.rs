//! Bidirectional projection between a composite action space and a
//! sub-action space.

mod path;

pub use path::ActionPath;
