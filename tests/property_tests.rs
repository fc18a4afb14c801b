//! Property-based tests using proptest
//!
//! These tests generate random key sets and operation sequences and verify
//! the heap against an independent sorted reference.

use proptest::prelude::*;

use fibheap::{FibonacciHeap, HeapError};

proptest! {
    /// Inserting N keys then extracting N times yields the sorted input
    /// multiset, duplicates included.
    #[test]
    fn extraction_order_is_sorted_input(keys in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut heap: FibonacciHeap<i32> = keys.iter().copied().collect();
        prop_assert_eq!(heap.len(), keys.len());

        let mut expected = keys;
        expected.sort_unstable();

        let mut drained = Vec::with_capacity(expected.len());
        while let Ok(k) = heap.extract_min() {
            drained.push(k);
        }
        prop_assert_eq!(drained, expected);
        prop_assert!(heap.is_empty());
        prop_assert_eq!(heap.peek_min(), Err(HeapError::Empty));
    }

    /// Random interleavings of insert and extract always agree with a
    /// reference multiset on minimum, size, and extraction result.
    #[test]
    fn random_op_sequences_match_reference(
        ops in prop::collection::vec((any::<bool>(), -1000i32..1000), 0..400)
    ) {
        let mut heap = FibonacciHeap::new();
        let mut reference: Vec<i32> = Vec::new();

        for (should_extract, key) in ops {
            if should_extract && !reference.is_empty() {
                let expected = *reference.iter().min().unwrap();
                prop_assert_eq!(heap.extract_min(), Ok(expected));
                let pos = reference.iter().position(|&k| k == expected).unwrap();
                reference.swap_remove(pos);
            } else {
                heap.insert(key);
                reference.push(key);
            }

            // Size accounting: inserted minus extracted.
            prop_assert_eq!(heap.len(), reference.len());
            prop_assert_eq!(heap.is_empty(), reference.is_empty());

            // Min correctness against the reference.
            match reference.iter().min() {
                Some(min) => prop_assert_eq!(heap.peek_min(), Ok(min)),
                None => prop_assert_eq!(heap.peek_min(), Err(HeapError::Empty)),
            }
        }
    }

    /// Draining after an arbitrary prefix of extractions still yields the
    /// remaining keys in non-decreasing order.
    #[test]
    fn partial_drain_stays_sorted(
        keys in prop::collection::vec(0u16..500, 1..200),
        prefix in 0usize..100,
    ) {
        let mut heap: FibonacciHeap<u16> = keys.iter().copied().collect();
        let prefix = prefix.min(keys.len());
        for _ in 0..prefix {
            heap.extract_min().unwrap();
        }

        let mut last = None;
        while let Ok(k) = heap.extract_min() {
            if let Some(prev) = last {
                prop_assert!(prev <= k, "extraction went backwards: {} after {}", k, prev);
            }
            last = Some(k);
        }
    }
}
