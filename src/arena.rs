//! Slot-arena node storage and circular sibling rings.
//!
//! Every node of the forest lives in a single `slotmap::SlotMap`; the pointer
//! fields of a classical Fibonacci heap become slot keys. Generational keys
//! mean a stale key left over from a freed node can never silently alias a
//! reused slot.
//!
//! A node always belongs to exactly one circular doubly-linked ring (the root
//! ring or some node's child ring). A node on its own forms a ring of one,
//! with `left` and `right` pointing at itself. The only two operations that
//! ever rewrite ring links are [`NodeArena::splice_after`] and
//! [`NodeArena::remove_from_ring`]; everything above them is key
//! reassignment, so ring integrity is preserved by construction.

use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational index of a node slot in the arena.
    pub struct NodeKey;
}

/// One key occupying one position in the forest.
pub(crate) struct Node<K> {
    pub key: K,
    /// Number of immediate children, i.e. the length of the child ring.
    pub degree: usize,
    /// `None` iff the node is currently in the root ring.
    pub parent: Option<NodeKey>,
    /// Arbitrary entry point into the child ring, `None` if childless.
    pub child: Option<NodeKey>,
    pub left: NodeKey,
    pub right: NodeKey,
}

/// Contiguous storage for all nodes of one heap.
///
/// Freed slots go back to the slotmap's internal free list, so extraction
/// never deallocates individual nodes and insertion reuses slots.
pub(crate) struct NodeArena<K> {
    nodes: SlotMap<NodeKey, Node<K>>,
}

impl<K> NodeArena<K> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates a fresh singleton: a self-linked ring of one.
    pub fn alloc(&mut self, key: K) -> NodeKey {
        self.nodes.insert_with_key(|slot| Node {
            key,
            degree: 0,
            parent: None,
            child: None,
            left: slot,
            right: slot,
        })
    }

    /// Returns the slot to the free list and hands back the stored node.
    ///
    /// The caller must have detached `node` from its ring first.
    pub fn free(&mut self, node: NodeKey) -> Node<K> {
        self.nodes.remove(node).expect("freed a dead node key")
    }

    /// Splices `node` into a ring immediately to the right of `anchor`.
    ///
    /// `node` must currently be a singleton ring.
    pub fn splice_after(&mut self, anchor: NodeKey, node: NodeKey) {
        debug_assert!(
            self.nodes[node].left == node && self.nodes[node].right == node,
            "spliced a node that is still linked elsewhere"
        );
        let anchor_right = self.nodes[anchor].right;
        self.nodes[node].left = anchor;
        self.nodes[node].right = anchor_right;
        self.nodes[anchor].right = node;
        self.nodes[anchor_right].left = node;
    }

    /// Detaches `node` from its ring, relinking its neighbors to each other,
    /// and resets it to a singleton. A no-op on a node that already is one.
    pub fn remove_from_ring(&mut self, node: NodeKey) {
        let (left, right) = {
            let n = &self.nodes[node];
            (n.left, n.right)
        };
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        let n = &mut self.nodes[node];
        n.left = node;
        n.right = node;
    }

    /// Snapshot of the ring containing `start`, in `right` order starting
    /// at `start`. Used wherever a ring is mutated while being walked.
    pub fn ring_members(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut members = vec![start];
        let mut current = self.nodes[start].right;
        while current != start {
            members.push(current);
            current = self.nodes[current].right;
        }
        members
    }
}

impl<K> Index<NodeKey> for NodeArena<K> {
    type Output = Node<K>;

    #[inline]
    fn index(&self, key: NodeKey) -> &Node<K> {
        &self.nodes[key]
    }
}

impl<K> IndexMut<NodeKey> for NodeArena<K> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut Node<K> {
        &mut self.nodes[key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ring(arena: &NodeArena<i32>, expected: &[NodeKey]) {
        // Forward traversal yields exactly the expected members, and
        // left/right are mutual inverses at every step.
        assert_eq!(arena.ring_members(expected[0]), expected);
        for &m in expected {
            assert_eq!(arena[arena[m].right].left, m);
            assert_eq!(arena[arena[m].left].right, m);
        }
    }

    #[test]
    fn alloc_is_singleton_ring() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        assert_eq!(arena[a].left, a);
        assert_eq!(arena[a].right, a);
        assert_eq!(arena[a].degree, 0);
        assert!(arena[a].parent.is_none());
        assert!(arena[a].child.is_none());
        assert_ring(&arena, &[a]);
    }

    #[test]
    fn splice_after_orders_ring() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let c = arena.alloc(3);

        arena.splice_after(a, b);
        assert_ring(&arena, &[a, b]);

        arena.splice_after(a, c);
        // c lands immediately to the right of a.
        assert_ring(&arena, &[a, c, b]);
    }

    #[test]
    fn remove_from_two_leaves_singleton() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        arena.splice_after(a, b);

        arena.remove_from_ring(a);
        assert_ring(&arena, &[a]);
        assert_ring(&arena, &[b]);
    }

    #[test]
    fn remove_middle_relinks_neighbors() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let c = arena.alloc(3);
        arena.splice_after(a, b);
        arena.splice_after(b, c);
        assert_ring(&arena, &[a, b, c]);

        arena.remove_from_ring(b);
        assert_ring(&arena, &[a, c]);
        assert_ring(&arena, &[b]);
    }

    #[test]
    fn remove_singleton_is_noop() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        arena.remove_from_ring(a);
        assert_ring(&arena, &[a]);
    }

    #[test]
    fn free_recycles_slots() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        assert_eq!(arena.len(), 1);

        let node = arena.free(a);
        assert_eq!(node.key, 1);
        assert_eq!(arena.len(), 0);

        // The recycled slot gets a new generation; the old key stays dead.
        let b = arena.alloc(2);
        assert_ne!(a, b);
        assert_eq!(arena[b].key, 2);
    }
}
