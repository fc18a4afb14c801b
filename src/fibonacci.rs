//! Fibonacci heap over arena-allocated nodes.
//!
//! A Fibonacci heap is a priority queue built from a forest of heap-ordered
//! multi-way trees:
//! - O(1) amortized insert and peek-min
//! - O(log n) amortized extract-min
//!
//! Tree roots are linked in a circular doubly linked list and the heap caches
//! a pointer to the root holding the minimum key. Extraction promotes the
//! minimum root's children into the root ring and then consolidates the ring,
//! merging trees of equal degree until at most one tree per degree remains.
//!
//! Nodes are slots in a [`NodeArena`] rather than individual allocations, so
//! the whole structure is safe code and dropping the heap drops every node
//! with the arena.

use std::fmt;

use smallvec::{smallvec, SmallVec};

use crate::arena::{NodeArena, NodeKey};
use crate::error::HeapError;

/// Degree-table slots kept inline during consolidation. A heap would need
/// more than 2^31 nodes to overflow this into a spill allocation.
const DEGREE_TABLE_INLINE: usize = 32;

/// Fibonacci min-heap storing keys of type `K`.
///
/// Keys only need a total order; duplicates coexist and are extracted with
/// correct multiplicity. The structure is single-threaded: callers sharing a
/// heap across threads must serialize every operation externally.
///
/// Operations that need a minimum (`peek_min`, `extract_min`) return
/// [`HeapError::Empty`] on an empty heap.
///
/// # Example
///
/// ```rust
/// use fibheap::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<i32> = [5, 3, 8, 1].into_iter().collect();
/// assert_eq!(heap.peek_min(), Ok(&1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(3));
/// assert_eq!(heap.len(), 2);
/// ```
pub struct FibonacciHeap<K: Ord> {
    arena: NodeArena<K>,
    /// Root holding the global minimum, `None` iff the heap is empty.
    min_root: Option<NodeKey>,
    len: usize,
}

impl<K: Ord> FibonacciHeap<K> {
    /// Creates a new empty heap.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            min_root: None,
            len: 0,
        }
    }

    /// Returns true if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts a key as a fresh singleton root.
    ///
    /// O(1) worst-case: the new node is spliced into the root ring next to
    /// the cached minimum, which is updated if the new key is smaller.
    pub fn insert(&mut self, key: K) {
        let node = self.arena.alloc(key);
        self.add_to_root_ring(node);
        self.len += 1;
    }

    /// Returns a reference to the minimum key without removing it.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap holds no elements.
    pub fn peek_min(&self) -> Result<&K, HeapError> {
        let min = self.min_root.ok_or(HeapError::Empty)?;
        Ok(&self.arena[min].key)
    }

    /// Removes and returns the minimum key.
    ///
    /// Promotes the minimum root's children into the root ring, removes the
    /// root, and consolidates the ring so at most one tree of each degree
    /// remains. O(log n) amortized.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap holds no elements, the same
    /// condition as [`peek_min`](Self::peek_min).
    pub fn extract_min(&mut self) -> Result<K, HeapError> {
        let z = self.min_root.ok_or(HeapError::Empty)?;

        // Promote every child of z to root rank. Their keys are all >= z's,
        // so the cached minimum stays at z throughout.
        if let Some(child) = self.arena[z].child {
            for c in self.arena.ring_members(child) {
                self.arena.remove_from_ring(c);
                self.add_to_root_ring(c);
            }
            self.arena[z].child = None;
            self.arena[z].degree = 0;
        }

        if self.arena[z].right == z {
            // z was the only root; the heap becomes empty.
            self.min_root = None;
        } else {
            let next = self.arena[z].right;
            self.arena.remove_from_ring(z);
            self.min_root = Some(next);
            self.consolidate();
        }

        self.len -= 1;
        Ok(self.arena.free(z).key)
    }

    /// Splices `node` (a singleton) into the root ring and clears its parent.
    ///
    /// Takes over as `min_root` if the ring was empty or its key beats the
    /// cached minimum.
    fn add_to_root_ring(&mut self, node: NodeKey) {
        self.arena[node].parent = None;
        match self.min_root {
            Some(min) => {
                self.arena.splice_after(min, node);
                if self.arena[node].key < self.arena[min].key {
                    self.min_root = Some(node);
                }
            }
            None => self.min_root = Some(node),
        }
    }

    /// Makes `child` a child of `parent`, merging two trees of equal degree.
    ///
    /// `parent`'s key must not exceed `child`'s, so heap order holds for the
    /// new edge.
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        debug_assert!(self.arena[parent].key <= self.arena[child].key);
        self.arena.remove_from_ring(child);
        self.arena[child].parent = Some(parent);
        match self.arena[parent].child {
            Some(first) => self.arena.splice_after(first, child),
            None => self.arena[parent].child = Some(child),
        }
        self.arena[parent].degree += 1;
    }

    /// Merges root trees pairwise by degree until at most one tree of each
    /// degree remains, then rebuilds the root ring and the minimum cache.
    ///
    /// Runs only at the end of `extract_min`. The ring is snapshotted up
    /// front so merging never mutates a ring that is being walked.
    fn consolidate(&mut self) {
        let Some(start) = self.min_root else { return };

        // Maximum possible degree is bounded by log-phi of the node count;
        // floor(log2 n) + 2 slots always cover it. `len` still counts the
        // node being extracted here, which only widens the bound.
        let slots = self.len.ilog2() as usize + 2;
        let mut by_degree: SmallVec<[Option<NodeKey>; DEGREE_TABLE_INLINE]> =
            smallvec![None; slots];

        for root in self.arena.ring_members(start) {
            self.arena.remove_from_ring(root);
            let mut x = root;
            let mut d = self.arena[x].degree;
            loop {
                debug_assert!(d < by_degree.len(), "degree exceeded the log2 bound");
                match by_degree[d].take() {
                    None => {
                        by_degree[d] = Some(x);
                        break;
                    }
                    Some(mut y) => {
                        // The smaller key becomes the parent.
                        if self.arena[y].key < self.arena[x].key {
                            std::mem::swap(&mut x, &mut y);
                        }
                        self.link(y, x);
                        d += 1;
                    }
                }
            }
        }

        // Rebuild the root ring from the surviving trees; add_to_root_ring
        // recomputes the minimum as it goes.
        self.min_root = None;
        for root in by_degree.into_iter().flatten() {
            self.add_to_root_ring(root);
        }
    }
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for FibonacciHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for FibonacciHeap<K> {
    /// Builds a heap by repeated insertion, O(1) amortized per key.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for FibonacciHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.min_root.map(|m| &self.arena[m].key))
            .finish()
    }
}

#[cfg(test)]
impl<K: Ord> FibonacciHeap<K> {
    /// Walks the whole forest and asserts every structural invariant:
    /// ring integrity, root-ness, degree bookkeeping, heap order, minimum
    /// cache correctness, and size accounting.
    fn check_invariants(&self) {
        let Some(min) = self.min_root else {
            assert_eq!(self.len, 0, "empty min cache but nonzero len");
            assert_eq!(self.arena.len(), 0);
            return;
        };
        assert_ne!(self.len, 0);

        let roots = self.arena.ring_members(min);
        self.check_ring(&roots);
        let mut visited = 0;
        for &r in &roots {
            assert!(self.arena[r].parent.is_none(), "root with a parent");
            assert!(
                self.arena[min].key <= self.arena[r].key,
                "min cache does not hold the smallest root key"
            );
            visited += self.check_tree(r);
        }
        assert_eq!(visited, self.len, "reachable nodes != len");
        assert_eq!(self.arena.len(), self.len, "arena holds unreachable nodes");
    }

    /// Checks one tree rooted at `node`, returning its node count.
    fn check_tree(&self, node: NodeKey) -> usize {
        let mut count = 1;
        match self.arena[node].child {
            None => assert_eq!(self.arena[node].degree, 0),
            Some(child) => {
                let ring = self.arena.ring_members(child);
                self.check_ring(&ring);
                assert_eq!(
                    ring.len(),
                    self.arena[node].degree,
                    "degree != child ring length"
                );
                for &c in &ring {
                    assert_eq!(self.arena[c].parent, Some(node), "child with wrong parent");
                    assert!(
                        self.arena[node].key <= self.arena[c].key,
                        "heap order violated"
                    );
                    count += self.check_tree(c);
                }
            }
        }
        count
    }

    fn check_ring(&self, members: &[NodeKey]) {
        for &m in members {
            assert_eq!(self.arena[self.arena[m].right].left, m);
            assert_eq!(self.arena[self.arena[m].left].right, m);
        }
    }

    /// Largest degree anywhere in the forest.
    fn max_degree(&self) -> usize {
        fn walk<K: Ord>(heap: &FibonacciHeap<K>, node: NodeKey) -> usize {
            let mut max = heap.arena[node].degree;
            if let Some(child) = heap.arena[node].child {
                for c in heap.arena.ring_members(child) {
                    max = max.max(walk(heap, c));
                }
            }
            max
        }
        match self.min_root {
            None => 0,
            Some(min) => self
                .arena
                .ring_members(min)
                .into_iter()
                .map(|r| walk(self, r))
                .max()
                .unwrap_or(0),
        }
    }
}
