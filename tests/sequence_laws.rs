//! Property-based tests for combinator laws.
//!
//! Each property compares a combinator against a direct computation over
//! plain vectors.

use proptest::prelude::*;
use seqflow::multi::{concat, map_n};
use seqflow::set::{intersection, union, unique};
use seqflow::source::array;
use seqflow::stateful::dedupe;
use seqflow::stateless::{filter, head, map};
use seqflow::terminal::length;
use seqflow::{Sequence, Step};
use std::collections::HashSet;

// =============================================================================
// Strategies
// =============================================================================

fn small_values() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..16, 0..40)
}

fn distinct_in_order(values: impl IntoIterator<Item = u8>) -> Vec<u8> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|value| seen.insert(*value)).collect()
}

// =============================================================================
// Set laws
// =============================================================================

proptest! {
    /// Intersection equals the distinct first input filtered by membership.
    #[test]
    fn prop_intersection_matches_filtered_first_input(left in small_values(), right in small_values()) {
        let right_set: HashSet<u8> = right.iter().copied().collect();
        let expected: Vec<u8> = distinct_in_order(left.iter().copied())
            .into_iter()
            .filter(|value| right_set.contains(value))
            .collect();
        let actual: Vec<u8> = intersection([array(left), array(right)]).unwrap().values().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_union_is_distinct_concatenation(left in small_values(), right in small_values()) {
        let expected = distinct_in_order(left.iter().chain(right.iter()).copied());
        let actual: Vec<u8> = union([array(left), array(right)]).unwrap().values().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_unique_keeps_first_occurrences(values in small_values()) {
        let expected = distinct_in_order(values.iter().copied());
        let actual: Vec<u8> = unique(array(values)).values().collect();
        prop_assert_eq!(actual, expected);
    }
}

// =============================================================================
// Stateful and multi-source laws
// =============================================================================

proptest! {
    #[test]
    fn prop_dedupe_once_matches_vec_dedup(values in small_values()) {
        let mut expected = values.clone();
        expected.dedup();
        let actual: Vec<u8> = dedupe(array(values), 1).unwrap().values().collect();
        prop_assert_eq!(actual, expected);
    }

    /// No run in the output is longer than the limit.
    #[test]
    fn prop_dedupe_never_exceeds_limit(values in small_values(), limit in 1usize..4) {
        let actual: Vec<u8> = dedupe(array(values), limit).unwrap().values().collect();
        let longest = actual
            .chunk_by(|a, b| a == b)
            .map(<[u8]>::len)
            .max()
            .unwrap_or(0);
        prop_assert!(longest <= limit);
    }

    #[test]
    fn prop_concat_length_is_sum(left in small_values(), right in small_values()) {
        let expected = left.len() + right.len();
        prop_assert_eq!(length(concat([array(left), array(right)]).unwrap()), expected);
    }

    #[test]
    fn prop_map_n_stops_at_shortest(left in small_values(), right in small_values()) {
        let expected: Vec<u16> = left
            .iter()
            .zip(&right)
            .map(|(a, b)| u16::from(*a) + u16::from(*b))
            .collect();
        let actual: Vec<u16> = map_n([array(left), array(right)], |row: &[u8], _| {
            u16::from(row[0]) + u16::from(row[1])
        })
        .unwrap()
        .values()
        .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Closing again returns the same step and the sequence stays done.
    #[test]
    fn prop_close_is_idempotent(values in small_values(), pulls in 0usize..5, payload in any::<u8>()) {
        let mut sequence = head(map(array(values), |value, _| value), 10);
        for _ in 0..pulls {
            let _ = sequence.next();
        }
        let first = sequence.close(Some(payload));
        prop_assert_eq!(first, Step::Done(Some(payload)));
        prop_assert_eq!(sequence.close(Some(payload)), first);
        prop_assert_eq!(sequence.next(), Step::Done(None));
    }

    #[test]
    fn prop_nested_combinators_match_iterator(values in small_values(), limit in 0usize..10) {
        let expected: Vec<u16> = values
            .iter()
            .filter(|value| *value % 3 != 0)
            .map(|value| u16::from(*value) * 7)
            .take(limit)
            .collect();
        let filtered = filter(array(values), |value: &u8, _| value % 3 != 0);
        let actual: Vec<u16> = head(map(filtered, |value, _| u16::from(value) * 7), limit)
            .values()
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
