//! Associative priority queue over a slab arena with two ordered indices.
//!
//! ## Architecture
//!
//! - **Slab**: one node per entry, owning its key and value
//! - **Value index**: `BTreeMap<(V, K), Chain>`, distinct pairs in
//!   value-then-key order; the chain holds every slot carrying that pair
//! - **Key index**: `BTreeMap<K, Chain>`, every slot carrying a key
//! - **Extremes**: slots at the head of the first and last value chains,
//!   so the min/max accessors read the slab directly
//!
//! The map keys are clones: a distinct (value, key) pair is copied once
//! into the value index and a distinct key once into the key index, however
//! many entries share them.
//!
//! Each slab node sits in one chain of each index, so removing it by slot
//! costs two map lookups plus O(1) unlinking.
//!
//! ## Tie-breaking
//!
//! - Equal values order by key: `min_key` returns the smallest key among
//!   the minimum-valued entries, `max_key` the largest among the maximum.
//! - `change_value` on a key with several entries replaces the oldest
//!   surviving entry inserted under that key.
//!
//! ## Example
//!
//! ```
//! use dual_index_queue::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! queue.insert("a", 1);
//! queue.insert("c", 3);
//!
//! let mut other = PriorityQueue::new();
//! other.insert("b", 2);
//!
//! queue.merge(&mut other);
//!
//! assert!(other.is_empty());
//! assert_eq!(queue.len(), 3);
//! assert_eq!(queue.min_value(), Ok(&1));
//! assert_eq!(queue.max_key(), Ok(&"c"));
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::iter;

use slab::Slab;
use tracing::trace;

use crate::error::{QueueError, Result};
use crate::queue::{Chain, EntryNode, KeyedQueue, Thread};

/// An entry with every clone it needs already made.
///
/// Every `Clone` call of an insertion happens while building this, before
/// the structure is touched.
struct Staged<K, V> {
    node: EntryNode<K, V>,
    pair: (V, K),
    key: K,
}

/// Priority queue mapping keys to values, ordered by value.
///
/// Keys and values may both repeat; every `insert` adds a distinct entry.
pub struct PriorityQueue<K, V> {
    /// Entry storage
    /// Key: slab slot, Value: EntryNode linked into both indices
    entries: Slab<EntryNode<K, V>>,

    /// Distinct (value, key) pairs in ascending order
    /// First = minimum, last = maximum
    by_value: BTreeMap<(V, K), Chain>,

    /// Slots grouped by key (for O(log n) change_value)
    by_key: BTreeMap<K, Chain>,

    /// Head slot of the first value chain, None when empty
    min_slot: Option<usize>,

    /// Head slot of the last value chain, None when empty
    max_slot: Option<usize>,
}

impl<K, V> Default for PriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyedQueue for PriorityQueue<K, V> {
    type Key = K;
    type Value = V;
    type Size = usize;
}

impl<K, V> PriorityQueue<K, V> {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            entries: Slab::new(),
            by_value: BTreeMap::new(),
            by_key: BTreeMap::new(),
            min_slot: None,
            max_slot: None,
        }
    }

    /// Create a queue with room for `capacity` entries in the arena
    ///
    /// # Example
    ///
    /// ```
    /// use dual_index_queue::PriorityQueue;
    ///
    /// let queue: PriorityQueue<u32, u64> = PriorityQueue::with_capacity(1_000);
    /// assert!(queue.capacity() >= 1_000);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Slab::with_capacity(capacity),
            by_value: BTreeMap::new(),
            by_key: BTreeMap::new(),
            min_slot: None,
            max_slot: None,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Get the number of pre-allocated arena slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Reserve arena room for at least `additional` more entries
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    /// Release unused arena slots
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
    }

    /// Get the number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the queue holds no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_value.clear();
        self.by_key.clear();
        self.min_slot = None;
        self.max_slot = None;
    }

    /// Exchange the contents of two queues in O(1)
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Entries in (value, key) order, each repeated by its multiplicity
    fn sorted_entries(&self) -> impl Iterator<Item = (&V, &K)> + '_ {
        self.by_value
            .iter()
            .flat_map(|((value, key), chain)| iter::repeat((value, key)).take(chain.len))
    }
}

impl<K: Ord + Clone, V: Ord + Clone> PriorityQueue<K, V> {
    // ========================================================================
    // Min / Max
    // ========================================================================

    /// Get the least stored value
    ///
    /// # Errors
    ///
    /// [`QueueError::EmptyQueue`] if there are no entries
    #[inline]
    pub fn min_value(&self) -> Result<&V> {
        self.min_slot
            .map(|slot| &self.entries[slot].value)
            .ok_or(QueueError::EmptyQueue)
    }

    /// Get the greatest stored value
    ///
    /// # Errors
    ///
    /// [`QueueError::EmptyQueue`] if there are no entries
    #[inline]
    pub fn max_value(&self) -> Result<&V> {
        self.max_slot
            .map(|slot| &self.entries[slot].value)
            .ok_or(QueueError::EmptyQueue)
    }

    /// Get a key paired with the least value
    ///
    /// # Errors
    ///
    /// [`QueueError::EmptyQueue`] if there are no entries
    #[inline]
    pub fn min_key(&self) -> Result<&K> {
        self.min_slot
            .map(|slot| &self.entries[slot].key)
            .ok_or(QueueError::EmptyQueue)
    }

    /// Get a key paired with the greatest value
    ///
    /// # Errors
    ///
    /// [`QueueError::EmptyQueue`] if there are no entries
    #[inline]
    pub fn max_key(&self) -> Result<&K> {
        self.max_slot
            .map(|slot| &self.entries[slot].key)
            .ok_or(QueueError::EmptyQueue)
    }

    // ========================================================================
    // Key Lookup
    // ========================================================================

    /// Check if any entry carries `key`
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.by_key.contains_key(key)
    }

    /// Get the number of entries carrying `key`
    pub fn key_count(&self, key: &K) -> usize {
        self.by_key.get(key).map_or(0, |chain| chain.len)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add an entry
    ///
    /// Duplicate keys and duplicate values are kept as separate entries.
    ///
    /// # Example
    ///
    /// ```
    /// use dual_index_queue::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::new();
    /// queue.insert("job", 5);
    /// queue.insert("job", 5);
    ///
    /// assert_eq!(queue.len(), 2);
    /// assert_eq!(queue.key_count(&"job"), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        let staged = Self::stage(key, value);
        self.commit(staged);
    }

    /// Remove one entry holding the minimum value
    ///
    /// Does nothing on an empty queue; that is not an error.
    ///
    /// # Returns
    ///
    /// The removed (key, value), or None if the queue was empty
    pub fn delete_min(&mut self) -> Option<(K, V)> {
        let slot = self.min_slot?;
        Some(self.detach(slot))
    }

    /// Remove one entry holding the maximum value
    ///
    /// Does nothing on an empty queue; that is not an error.
    ///
    /// # Returns
    ///
    /// The removed (key, value), or None if the queue was empty
    pub fn delete_max(&mut self) -> Option<(K, V)> {
        let slot = self.max_slot?;
        Some(self.detach(slot))
    }

    /// Replace the value of one entry carrying `key`
    ///
    /// The old entry is removed and (key, value) inserted in its place, so
    /// the entry count does not change.
    ///
    /// # Errors
    ///
    /// [`QueueError::KeyNotFound`] if no entry carries `key`; the queue is
    /// left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use dual_index_queue::{PriorityQueue, QueueError};
    ///
    /// let mut queue = PriorityQueue::new();
    /// queue.insert("a", 1);
    /// queue.insert("b", 2);
    ///
    /// queue.change_value(&"a", 10).unwrap();
    /// assert_eq!(queue.max_key(), Ok(&"a"));
    /// assert_eq!(queue.change_value(&"z", 0), Err(QueueError::KeyNotFound));
    /// ```
    pub fn change_value(&mut self, key: &K, value: V) -> Result<()> {
        let Some(slot) = self.by_key.get(key).and_then(Chain::peek_head) else {
            trace!(target: "dual_index_queue", len = self.len(), "change_value: key not found");
            return Err(QueueError::KeyNotFound);
        };

        let staged = Self::stage(key.clone(), value);
        self.detach(slot);
        self.commit(staged);
        Ok(())
    }

    /// Move every entry of `other` into `self`, leaving `other` empty
    ///
    /// Entries keep their (key, value) pairing; nothing is collapsed. The
    /// smaller side is the one re-inserted, so the cost is
    /// O(min(n, m) log(n + m)).
    pub fn merge(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }
        if self.len() < other.len() {
            self.swap(other);
        }

        let source = std::mem::take(other);
        trace!(
            target: "dual_index_queue",
            into = self.len(),
            moved = source.len(),
            "merge"
        );

        self.entries.reserve(source.len());
        for (_, node) in source.entries {
            let (key, value) = node.into_entry();
            self.insert(key, value);
        }
    }

    // ========================================================================
    // Index Maintenance
    // ========================================================================

    /// Make the clones both indices need
    fn stage(key: K, value: V) -> Staged<K, V> {
        Staged {
            pair: (value.clone(), key.clone()),
            key: key.clone(),
            node: EntryNode::new(key, value),
        }
    }

    /// Store a staged entry and link it into both indices
    fn commit(&mut self, staged: Staged<K, V>) {
        let Staged { node, pair, key } = staged;
        let slot = self.entries.insert(node);

        self.by_value
            .entry(pair)
            .or_default()
            .push_back(Thread::Value, slot, &mut self.entries);
        self.by_key
            .entry(key)
            .or_default()
            .push_back(Thread::Key, slot, &mut self.entries);

        self.refresh_extremes();
    }

    /// Re-read the head slots of the first and last value chains
    fn refresh_extremes(&mut self) {
        self.min_slot = self.by_value.first_key_value().and_then(|(_, chain)| chain.peek_head());
        self.max_slot = self.by_value.last_key_value().and_then(|(_, chain)| chain.peek_head());
    }

    /// Take a slot out of the arena and unlink it from both indices
    ///
    /// Chains left empty are dropped from their index.
    fn detach(&mut self, slot: usize) -> (K, V) {
        let EntryNode {
            key,
            value,
            value_link,
            key_link,
        } = self.entries.remove(slot);

        let pair = (value, key);
        if let Some(chain) = self.by_value.get_mut(&pair) {
            chain.unlink(Thread::Value, slot, value_link, &mut self.entries);
            if chain.is_empty() {
                self.by_value.remove(&pair);
            }
        }

        let (value, key) = pair;
        if let Some(chain) = self.by_key.get_mut(&key) {
            chain.unlink(Thread::Key, slot, key_link, &mut self.entries);
            if chain.is_empty() {
                self.by_key.remove(&key);
            }
        }

        self.refresh_extremes();
        (key, value)
    }
}

/// Exchange the contents of two queues in O(1)
pub fn swap<K, V>(a: &mut PriorityQueue<K, V>, b: &mut PriorityQueue<K, V>) {
    a.swap(b);
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<K: Clone, V: Clone> Clone for PriorityQueue<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            by_value: self.by_value.clone(),
            by_key: self.by_key.clone(),
            min_slot: self.min_slot,
            max_slot: self.max_slot,
        }
    }

    /// Build the full copy first, then swap it in; a panic while copying
    /// leaves `self` as it was.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for PriorityQueue<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted_entries().eq(other.sorted_entries())
    }
}

impl<K: Eq, V: Eq> Eq for PriorityQueue<K, V> {}

impl<K: Ord, V: Ord> PartialOrd for PriorityQueue<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V: Ord> Ord for PriorityQueue<K, V> {
    /// Lexicographic comparison of the sorted (value, key) sequences
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted_entries().cmp(other.sorted_entries())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PriorityQueue<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.sorted_entries()).finish()
    }
}

impl<K: Ord + Clone, V: Ord + Clone> Extend<(K, V)> for PriorityQueue<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.entries.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + Clone, V: Ord + Clone> FromIterator<(K, V)> for PriorityQueue<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
