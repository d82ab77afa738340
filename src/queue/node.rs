//! Entry node for slab-based storage.
//!
//! ## Design
//!
//! `EntryNode` owns one (key, value) entry and carries two pairs of
//! doubly-linked list pointers, one per index:
//!
//! - the **value thread** links every node holding the same (value, key) pair
//! - the **key thread** links every node holding the same key
//!
//! Pointers are slab keys (`usize`), not references, so a node can be
//! unlinked from either thread in O(1) once its slot is known.
//!
//! Slab keys may be reused after `slab.remove()`; a slot is only ever
//! reachable from the two chains that own it.

/// Which of the two intrusive lists an operation walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thread {
    /// Nodes sharing an identical (value, key) pair
    Value,
    /// Nodes sharing a key
    Key,
}

/// Neighbour pointers of a node inside one thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Link {
    /// Next (newer) node in the chain, None at the tail
    pub next: Option<usize>,
    /// Previous (older) node in the chain, None at the head
    pub prev: Option<usize>,
}

impl Link {
    /// Check if neither neighbour is set
    #[cfg(test)]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

/// Entry node stored in the slab.
///
/// ## Memory Layout
///
/// ```text
/// EntryNode {
///     key: K
///     value: V
///     value_link: Link (value thread)
///     key_link: Link (key thread)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EntryNode<K, V> {
    /// The entry's key
    pub key: K,

    /// The entry's value (its priority)
    pub value: V,

    /// Position among nodes with the same (value, key)
    pub value_link: Link,

    /// Position among nodes with the same key
    pub key_link: Link,
}

impl<K, V> EntryNode<K, V> {
    /// Create a new entry node (not yet linked)
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            value_link: Link::default(),
            key_link: Link::default(),
        }
    }

    /// Borrow the link pair for `thread`
    #[cfg(test)]
    pub fn link(&self, thread: Thread) -> &Link {
        match thread {
            Thread::Value => &self.value_link,
            Thread::Key => &self.key_link,
        }
    }

    /// Mutably borrow the link pair for `thread`
    #[inline]
    pub fn link_mut(&mut self, thread: Thread) -> &mut Link {
        match thread {
            Thread::Value => &mut self.value_link,
            Thread::Key => &mut self.key_link,
        }
    }

    /// Check if the node is detached from both threads
    #[cfg(test)]
    pub fn is_unlinked(&self) -> bool {
        self.value_link.is_unlinked() && self.key_link.is_unlinked()
    }

    /// Split the node into its owned (key, value) entry
    #[inline]
    pub fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
