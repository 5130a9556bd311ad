//! Scheduling hints for effect operations.

/// Priority hint for an effect's async operation.
///
/// A hint only: it asks the store to schedule the operation as a distinctly
/// spawned task, and is recorded in trace output, but it never changes the
/// semantics of the actions the operation emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Latency-sensitive work.
    High,
    /// Work that can yield to anything latency-sensitive.
    Low,
    /// Bulk or housekeeping work.
    Background,
}
