//! Tests for the buffer hasher feature flags.
//!
//! Whichever of `fxhash`, `ahash` or the std hasher is selected, buffers must
//! keep first-wins semantics and insertion order.

use rstest::rstest;
use seqflow::Sequence;
use seqflow::set::{Buffer, BufferHasher, unique_by_hash};
use seqflow::source::array;
use std::hash::BuildHasher;

// =============================================================================
// Hasher Consistency Tests
// =============================================================================

#[rstest]
fn test_hasher_is_consistent_within_a_state() {
    let state = BufferHasher::default();
    assert_eq!(state.hash_one("key"), state.hash_one("key"));
    assert_eq!(state.hash_one(42_u64), state.hash_one(42_u64));
}

/// The selected hasher does not change first-wins buffering.
#[rstest]
fn test_buffer_first_wins_with_selected_hasher() {
    let mut buffer = Buffer::new();
    buffer.extend([("b", 1), ("a", 2), ("b", 3), ("c", 4)]);
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.get(&"b"), Some(&1));
    assert_eq!(buffer.values().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
}

#[rstest]
#[case(1_000)]
#[case(10_000)]
fn test_many_keys(#[case] size: u64) {
    let mut buffer = Buffer::new();
    for key in 0..size {
        assert!(buffer.mark(key));
    }
    assert!((0..size).all(|key| buffer.contains(&key)));
    assert!(!buffer.mark(0));
}

/// Output order follows the input, whatever hasher is selected.
#[rstest]
fn test_unique_by_hash_order_is_hasher_independent() {
    let values: Vec<String> = unique_by_hash(
        array(vec!["Zeta".to_owned(), "alpha".to_owned(), "zebra".to_owned(), "Alpine".to_owned()]),
        |word: &String| word.to_lowercase().chars().next(),
    )
    .values()
    .collect();
    assert_eq!(values, vec!["Zeta".to_owned(), "alpha".to_owned()]);
}
