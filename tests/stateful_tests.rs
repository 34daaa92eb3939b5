//! Integration tests for the stateful combinators.

use rstest::rstest;
use seqflow::Sequence;
use seqflow::source::{array, from_fn};
use seqflow::stateful::{
    StrideOptions, counter, cusome, dedupe, dedupe_by, replicate, replicate_by, strided,
    strided_by,
};
use std::cell::Cell;

// =============================================================================
// dedupe
// =============================================================================

#[rstest]
#[case(1, vec![1, 2, 3, 4])]
#[case(2, vec![1, 1, 2, 3, 3, 4, 4])]
#[case(4, vec![1, 1, 2, 3, 3, 3, 3, 4, 4, 4])]
fn test_dedupe_limits(#[case] limit: usize, #[case] expected: Vec<i32>) {
    let source = array(vec![1, 1, 2, 3, 3, 3, 3, 4, 4, 4]);
    let values: Vec<i32> = dedupe(source, limit).unwrap().values().collect();
    assert_eq!(values, expected);
}

/// Runs are found by comparing the resolved keys, not the raw values.
#[rstest]
fn test_dedupe_by_case_insensitive() {
    let words = array(vec!["Hello", "hello", "HELLO", "world", "World"]);
    let values: Vec<&str> = dedupe_by(words, 1, |arguments| arguments.current.to_lowercase())
        .unwrap()
        .values()
        .collect();
    assert_eq!(values, vec!["Hello", "world"]);
}

#[rstest]
fn test_dedupe_first_value_always_emitted() {
    let values: Vec<i32> = dedupe_by(array(vec![7]), 1, |arguments| {
        assert!(arguments.previous_resolved.is_none());
        assert_eq!(arguments.run_length, 0);
        *arguments.current
    })
    .unwrap()
    .values()
    .collect();
    assert_eq!(values, vec![7]);
}

// =============================================================================
// replicate
// =============================================================================

/// A zero count drops the value and keeps pulling.
#[rstest]
fn test_replicate_by_skips_zero_without_ending() {
    let values: Vec<i32> = replicate_by(array(vec![1, 2, 3, 4]), |value, _, _| {
        usize::from(value % 2 == 0) * 2
    })
    .values()
    .collect();
    assert_eq!(values, vec![2, 2, 4, 4]);
}

#[rstest]
fn test_replicate_by_output_index() {
    let seen = Cell::new(Vec::new());
    let _ = replicate_by(array(vec!['a', 'b']), |_, source_index, output_index| {
        let mut indices = seen.take();
        indices.push((source_index, output_index));
        seen.set(indices);
        3
    })
    .values()
    .count();
    assert_eq!(seen.take(), vec![(0, 0), (1, 3)]);
}

#[rstest]
fn test_replicate_times() {
    let values: Vec<u8> = replicate(array(vec![1, 2]), 3).unwrap().values().collect();
    assert_eq!(values, vec![1, 1, 1, 2, 2, 2]);
}

// =============================================================================
// strided
// =============================================================================

#[rstest]
#[case(1, 0, vec![0, 1, 2, 3, 4, 5, 6])]
#[case(3, 0, vec![0, 3, 6])]
#[case(3, 2, vec![2, 5])]
#[case(10, 1, vec![1])]
fn test_strided(#[case] stride: usize, #[case] offset: usize, #[case] expected: Vec<i32>) {
    let source = array(vec![0, 1, 2, 3, 4, 5, 6]);
    let values: Vec<i32> = strided(source, stride, StrideOptions::offset(offset))
        .unwrap()
        .values()
        .collect();
    assert_eq!(values, expected);
}

/// An eager stride consumes its offset before the first pull.
#[rstest]
fn test_eager_strided_pulls_at_construction() {
    let pulled = Cell::new(0);
    let source = from_fn(|| {
        pulled.set(pulled.get() + 1);
        Some(pulled.get())
    });
    let mut sequence = strided(source, 2, StrideOptions::offset(3).eager()).unwrap();
    assert_eq!(pulled.get(), 3);
    assert_eq!(sequence.next(), seqflow::Step::Yielded(4));
}

/// The callback sees the stride it returned for the previous value.
#[rstest]
fn test_strided_by_receives_current_stride() {
    let strides = Cell::new(Vec::new());
    let values: Vec<i32> = strided_by(
        array(vec![0, 1, 2, 3, 4, 5, 6, 7]),
        |_, _, _, stride| {
            let mut seen = strides.take();
            seen.push(stride);
            strides.set(seen);
            stride * 2
        },
        StrideOptions::default(),
    )
    .values()
    .collect();
    assert_eq!(values, vec![0, 2, 6]);
    assert_eq!(strides.take(), vec![1, 2, 4]);
}

// =============================================================================
// counters
// =============================================================================

#[rstest]
fn test_counter_replaces_values() {
    let counts: Vec<usize> = counter(array(vec!["a", "b", "c"])).values().collect();
    assert_eq!(counts, vec![1, 2, 3]);
}

#[rstest]
fn test_cusome_turns_true_at_threshold() {
    let flags: Vec<bool> = cusome(array(vec![0, 1, 0, 1, 1]), 2).unwrap().values().collect();
    assert_eq!(flags, vec![false, false, false, true, true]);
}
