//! Arena-backed Fibonacci min-heap.
//!
//! This crate provides a single priority-queue data structure: a Fibonacci
//! heap storing totally-ordered keys, with
//!
//! - O(1) worst-case `insert` and `peek_min`
//! - O(log n) amortized `extract_min`
//!
//! The forest of heap-ordered multi-way trees is laid out in a contiguous
//! slot arena ([`slotmap`]) instead of individually allocated nodes, so the
//! implementation contains no `unsafe` code: parent/child/sibling pointers
//! are generational slot keys, and extracted slots return to a free list.
//!
//! Accessing the minimum of an empty heap is a recoverable error
//! ([`HeapError::Empty`]), never a panic or a sentinel value.
//!
//! # Example
//!
//! ```rust
//! use fibheap::{FibonacciHeap, HeapError};
//!
//! let mut heap = FibonacciHeap::new();
//! heap.insert(5);
//! heap.insert(3);
//! heap.insert(8);
//!
//! assert_eq!(heap.peek_min(), Ok(&3));
//! assert_eq!(heap.extract_min(), Ok(3));
//! assert_eq!(heap.extract_min(), Ok(5));
//! assert_eq!(heap.extract_min(), Ok(8));
//! assert_eq!(heap.extract_min(), Err(HeapError::Empty));
//! ```
//!
//! # Scope
//!
//! The heap intentionally exposes only insert, peek-min, extract-min and the
//! size queries: no decrease-key, no merge, no iteration, no handles to live
//! nodes. Callers needing concurrent access must wrap the heap in their own
//! lock; no internal synchronization exists.

mod arena;
mod error;
mod fibonacci;

pub use error::HeapError;
pub use fibonacci::FibonacciHeap;
