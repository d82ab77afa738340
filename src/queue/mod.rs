//! Keyed priority queue built on a slab arena.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: one node per entry, addressed by slot
//! - **Value index**: distinct (value, key) pairs in a BTreeMap
//! - **Key index**: every slot carrying a key, for key-based updates
//!
//! Both indices are keyed by clones: one (value, key) per distinct pair and
//! one key per distinct key.
//!
//! ## Components
//!
//! - `EntryNode` (internal): a (key, value) entry with one link pair per index
//! - `Chain` (internal): head/tail of one intrusive list of slots
//! - [`PriorityQueue`]: the queue itself
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Min/max value or key | O(1) |
//! | Insert | O(log n) |
//! | Delete min/max | O(log n) |
//! | Change value by key | O(log n) |
//! | Merge (m into n) | O(min(n, m) log(n + m)) |
//! | Swap | O(1) |
//! | Compare / equality | O(n) |
//!
//! Min/max read slots cached after every mutation.
//!
//! ## Example
//!
//! ```
//! use dual_index_queue::queue::{KeyedQueue, PriorityQueue};
//!
//! let mut queue: PriorityQueue<&str, u32> = PriorityQueue::new();
//! queue.insert("low", 1);
//! queue.insert("high", 9);
//!
//! let size: <PriorityQueue<&str, u32> as KeyedQueue>::Size = queue.len();
//! assert_eq!(size, 2);
//! assert_eq!(queue.min_key(), Ok(&"low"));
//! ```

mod node;
mod chain;
mod priority_queue;

pub(crate) use node::{EntryNode, Thread};
pub(crate) use chain::Chain;
pub use priority_queue::{swap, PriorityQueue};

/// Type-level description of a keyed queue: its key, value and size types.
pub trait KeyedQueue {
    /// Type of the keys entries are looked up by
    type Key;
    /// Type of the values entries are ordered by
    type Value;
    /// Unsigned type used for entry counts
    type Size;
}
