//! Integration tests for the set combinators.
//!
//! Covers union, intersection and unique, including the hash-keyed variants
//! and their first-wins collision policy.

use rstest::{fixture, rstest};
use seqflow::set::{intersection, intersection_by_hash, union, union_by_hash, unique, unique_by};
#[cfg(feature = "random")]
use seqflow::source::randu;
use seqflow::source::{array, from_iter};
use seqflow::{BoxedSequence, Sequence, SequenceError, Step};

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn letters() -> Vec<Vec<char>> {
    vec![
        vec!['a', 'b', 'a', 'c'],
        vec!['c', 'd', 'b'],
        vec!['e', 'a', 'c', 'b'],
    ]
}

fn sources(groups: &[Vec<char>]) -> Vec<seqflow::source::ArraySequence<char>> {
    groups.iter().map(|group| array(group.clone())).collect()
}

// =============================================================================
// union
// =============================================================================

/// Values appear in the order their first copy is pulled across all inputs.
#[rstest]
fn test_union_emits_first_seen_order(letters: Vec<Vec<char>>) {
    let values: Vec<char> = union(sources(&letters)).unwrap().values().collect();
    assert_eq!(values, vec!['a', 'b', 'c', 'd', 'e']);
}

#[rstest]
#[case(vec![1, 2], vec![2, 3], vec![1, 2, 3])]
#[case(vec![], vec![5, 5], vec![5])]
#[case(vec![4, 4, 4], vec![], vec![4])]
#[case(vec![], vec![], vec![])]
fn test_union_pairs(#[case] left: Vec<i32>, #[case] right: Vec<i32>, #[case] expected: Vec<i32>) {
    let values: Vec<i32> = union([array(left), array(right)]).unwrap().values().collect();
    assert_eq!(values, expected);
}

/// Of two values sharing a key, the one from the earlier input survives.
#[rstest]
fn test_union_by_hash_keeps_first_value_per_key() {
    let words = [array(vec!["apple", "avocado"]), array(vec!["banana", "blueberry", "cherry"])];
    let values: Vec<&str> = union_by_hash(words, |word: &&str| word.chars().next())
        .unwrap()
        .values()
        .collect();
    assert_eq!(values, vec!["apple", "banana", "cherry"]);
}

#[rstest]
fn test_union_mixes_source_types() {
    let inputs: Vec<BoxedSequence<'_, i32>> = vec![
        array(vec![1, 2]).boxed(),
        from_iter(vec![2, 3, 1]).boxed(),
    ];
    let values: Vec<i32> = union(inputs).unwrap().values().collect();
    assert_eq!(values, vec![1, 2, 3]);
}

/// Union pulls only as much as the consumer asks for.
#[cfg(feature = "random")]
#[rstest]
fn test_union_by_hash_is_lazy_over_infinite_inputs() {
    use seqflow::stateless::head;

    let sequence = union_by_hash([randu(1), randu(2)], |value: &f64| value.to_bits()).unwrap();
    let values: Vec<f64> = head(sequence, 3).values().collect();
    assert_eq!(values.len(), 3);
    assert!(values.iter().all(|value| (0.0..1.0).contains(value)));
}

/// Closing a union closes every input, exhausted or not.
#[rstest]
fn test_union_close_cascades() {
    let mut first = array(vec![1, 2]);
    let mut second = array(vec![3]);
    let mut sequence = union([first.by_ref(), second.by_ref()]).unwrap();
    assert_eq!(sequence.next(), Step::Yielded(1));
    assert_eq!(sequence.close(None), Step::Done(None));
    assert_eq!(sequence.next(), Step::Done(None));
    drop(sequence);
    assert_eq!(first.next(), Step::Done(None));
    assert_eq!(second.next(), Step::Done(None));
}

// =============================================================================
// intersection
// =============================================================================

#[rstest]
fn test_intersection_of_three(letters: Vec<Vec<char>>) {
    let values: Vec<char> = intersection(sources(&letters)).unwrap().values().collect();
    assert_eq!(values, vec!['b', 'c']);
}

#[rstest]
#[case(vec![3, 1, 3, 2], vec![2, 3], vec![3, 2])]
#[case(vec![1, 2], vec![3, 4], vec![])]
#[case(vec![], vec![1], vec![])]
fn test_intersection_pairs(
    #[case] left: Vec<i32>,
    #[case] right: Vec<i32>,
    #[case] expected: Vec<i32>,
) {
    let values: Vec<i32> = intersection([array(left), array(right)])
        .unwrap()
        .values()
        .collect();
    assert_eq!(values, expected);
}

/// Membership is decided by key, and the first input supplies the values.
#[rstest]
fn test_intersection_by_hash_uses_keys() {
    let values: Vec<i32> = intersection_by_hash(
        [array(vec![1, 2, 3, 4, 5, 6]), array(vec![10, 30])],
        |value: &i32| value % 3,
    )
    .unwrap()
    .values()
    .collect();
    assert_eq!(values, vec![1, 3]);
}

#[rstest]
#[case(0)]
#[case(1)]
fn test_set_combinators_require_two_inputs(#[case] count: usize) {
    let inputs = || (0..count).map(|_| array(vec![1])).collect::<Vec<_>>();
    let expected = SequenceError::InsufficientSequences {
        combinator: "union",
        minimum: 2,
        provided: count,
    };
    assert_eq!(union(inputs()).err(), Some(expected));
    assert!(intersection(inputs()).is_err());
}

// =============================================================================
// unique
// =============================================================================

#[rstest]
fn test_unique_drops_repeats() {
    let values: Vec<char> = unique(array(vec!['x', 'y', 'x', 'z', 'y'])).values().collect();
    assert_eq!(values, vec!['x', 'y', 'z']);
}

/// A value is kept only if the predicate accepts it against every kept value.
#[rstest]
fn test_unique_by_compares_against_all_accepted() {
    let far_apart = |previous: &i32, current: &i32| (previous - current).abs() > 5;
    let values: Vec<i32> = unique_by(array(vec![1, 2, 10, 11, 25, 3]), far_apart)
        .values()
        .collect();
    assert_eq!(values, vec![1, 10, 25]);
}
