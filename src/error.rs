//! Error types for priority queue operations.
//!
//! Both kinds are caller-side preconditions, never structural faults:
//!
//! - [`QueueError::EmptyQueue`]: a min/max accessor was called on an empty queue
//! - [`QueueError::KeyNotFound`]: `change_value` named a key with no entry
//!
//! `delete_min` / `delete_max` never produce an error; on an empty queue
//! they do nothing.

/// Failure of a priority queue operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum QueueError {
    /// The operation needs at least one entry.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// No entry carries the requested key.
    #[error("key not found in priority queue")]
    KeyNotFound,
}

/// Result alias used by fallible queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;
