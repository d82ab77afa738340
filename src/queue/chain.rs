//! Intrusive chains of slab slots.
//!
//! ## Design
//!
//! A `Chain` is the head/tail/length metadata of one doubly-linked list
//! threaded through [`EntryNode`]s. The node data lives in the slab; the
//! chain only records where the list starts and ends.
//!
//! ```text
//! head (oldest) <-> node2 <-> node3 <-> tail (newest)
//! ```
//!
//! - New nodes are appended at the tail
//! - Any node can be unlinked in O(1) using its slab key
//!
//! The same node sits in two chains at once, one per [`Thread`].

use slab::Slab;

use crate::queue::node::{EntryNode, Link, Thread};

/// Head/tail metadata for one thread of linked entry nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    /// Oldest node in the chain (slab key)
    pub head: Option<usize>,

    /// Newest node in the chain (slab key)
    pub tail: Option<usize>,

    /// Number of nodes in the chain
    pub len: usize,
}

impl Chain {
    /// Check if the chain holds no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a node to the tail of the chain
    ///
    /// # Arguments
    ///
    /// * `thread` - Which link pair of the node to use
    /// * `slot` - The slab key of the node
    /// * `slab` - The slab containing all entry nodes
    ///
    /// # Panics
    ///
    /// Panics if `slot` or the current tail is not in the slab
    pub fn push_back<K, V>(&mut self, thread: Thread, slot: usize, slab: &mut Slab<EntryNode<K, V>>) {
        let node = slab.get_mut(slot).expect("Invalid slab key");
        *node.link_mut(thread) = Link {
            next: None,
            prev: self.tail,
        };

        if let Some(tail_slot) = self.tail {
            let tail_node = slab.get_mut(tail_slot).expect("Invalid tail key");
            tail_node.link_mut(thread).next = Some(slot);
        } else {
            self.head = Some(slot);
        }

        self.tail = Some(slot);
        self.len += 1;
    }

    /// Unlink a node that has already been taken out of the slab
    ///
    /// `link` is the removed node's link pair for `thread`; its neighbours
    /// (still in the slab) are stitched together.
    ///
    /// # Panics
    ///
    /// Panics if a neighbour named by `link` is not in the slab
    pub fn unlink<K, V>(&mut self, thread: Thread, slot: usize, link: Link, slab: &mut Slab<EntryNode<K, V>>) {
        if let Some(prev) = link.prev {
            let prev_node = slab.get_mut(prev).expect("Invalid prev key");
            prev_node.link_mut(thread).next = link.next;
        } else {
            debug_assert_eq!(self.head, Some(slot));
            self.head = link.next;
        }

        if let Some(next) = link.next {
            let next_node = slab.get_mut(next).expect("Invalid next key");
            next_node.link_mut(thread).prev = link.prev;
        } else {
            debug_assert_eq!(self.tail, Some(slot));
            self.tail = link.prev;
        }

        self.len -= 1;
    }

    /// Get the head node's slab key (oldest node)
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
