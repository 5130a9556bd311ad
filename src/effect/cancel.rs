//! Identifiers for in-flight effect cancellation.

use std::borrow::Cow;
use std::fmt;

/// Key under which a running effect subtree is registered for cancellation.
///
/// Built from a string so callers can use fixed ids for singleton work
/// (`"search"`) or formatted ids for per-element work (`format!("row-{id}")`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CancelId(Cow<'static, str>);

impl From<&'static str> for CancelId {
    fn from(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl From<String> for CancelId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl fmt::Display for CancelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
