//! # Dual Index Queue
//!
//! Associative priority queue: a mapping from keys to values where keys
//! and values may both repeat.
//!
//! ## Architecture
//!
//! - **Queue**: [`PriorityQueue`], entries in a slab arena with a value
//!   index (O(1) min/max) and a key index (O(log n) `change_value`)
//! - **Errors**: [`QueueError`], the two precondition failures
//!
//! ## Error Asymmetry
//!
//! The four accessors (`min_value`, `max_value`, `min_key`, `max_key`)
//! return [`QueueError::EmptyQueue`] on an empty queue, while `delete_min`
//! and `delete_max` simply do nothing.
//!
//! ## Concurrency
//!
//! Single-threaded. Callers sharing a queue across threads must wrap it in
//! their own lock.

// ============================================================================
// Module declarations
// ============================================================================

/// Error kinds and result alias
pub mod error;

/// Priority queue: slab arena plus value and key indices
pub mod queue;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{QueueError, Result};
pub use queue::{swap, KeyedQueue, PriorityQueue};
