//! Short-circuiting truthiness and predicate tests.

use super::Truthy;
use crate::error::{Result, ensure_positive};
use crate::sequence::{Sequence, Step};

/// Returns `true` if any value (or the terminal payload) is truthy.
///
/// Stops pulling at the first truthy value.
///
/// # Examples
///
/// ```rust
/// use seqflow::source::array;
/// use seqflow::terminal::any;
///
/// assert!(any(array(vec![0, 0, 1])));
/// assert!(!any(array(Vec::<i32>::new())));
/// ```
pub fn any<S>(mut sequence: S) -> bool
where
    S: Sequence,
    S::Item: Truthy,
{
    loop {
        match sequence.next() {
            Step::Yielded(value) if value.is_truthy() => return true,
            Step::Yielded(_) => {}
            Step::Done(payload) => return payload.is_truthy(),
        }
    }
}

/// Returns `true` if `predicate(&value, index)` holds for any value.
pub fn any_by<S, P>(mut sequence: S, mut predicate: P) -> bool
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
{
    let mut index = 0;
    while let Step::Yielded(value) = sequence.next() {
        if predicate(&value, index) {
            return true;
        }
        index += 1;
    }
    false
}

/// Returns `true` if every value is truthy. An empty sequence yields `true`.
pub fn every<S>(sequence: S) -> bool
where
    S: Sequence,
    S::Item: Truthy,
{
    every_by(sequence, |value, _| value.is_truthy())
}

/// Returns `true` if `predicate(&value, index)` holds for every value.
pub fn every_by<S, P>(sequence: S, mut predicate: P) -> bool
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
{
    !any_by(sequence, |value, index| !predicate(value, index))
}

/// Returns `true` if no value is truthy. An empty sequence yields `true`.
///
/// # Examples
///
/// ```rust
/// use seqflow::source::array;
/// use seqflow::terminal::none;
///
/// assert!(none(array(vec![false, false])));
/// assert!(!none(array(vec![false, true])));
/// ```
pub fn none<S>(sequence: S) -> bool
where
    S: Sequence,
    S::Item: Truthy,
{
    !any_by(sequence, |value, _| value.is_truthy())
}

/// Returns `true` if `predicate(&value, index)` holds for no value.
pub fn none_by<S, P>(sequence: S, predicate: P) -> bool
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
{
    !any_by(sequence, predicate)
}

/// Returns `true` if at least `count` values are truthy.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`](crate::SequenceError) when
/// `count` is zero.
///
/// # Examples
///
/// ```rust
/// use seqflow::source::array;
/// use seqflow::terminal::some;
///
/// assert!(some(array(vec![1, 0, 1]), 2)?);
/// assert!(!some(array(vec![1, 0, 0]), 2)?);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn some<S>(sequence: S, count: usize) -> Result<bool>
where
    S: Sequence,
    S::Item: Truthy,
{
    let count = ensure_positive("some", "count", count)?;
    Ok(count_until(sequence, count, |value, _| value.is_truthy()))
}

/// Returns `true` if `predicate(&value, index)` holds for at least `count`
/// values.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`](crate::SequenceError) when
/// `count` is zero.
pub fn some_by<S, P>(sequence: S, count: usize, predicate: P) -> Result<bool>
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
{
    let count = ensure_positive("some_by", "count", count)?;
    Ok(count_until(sequence, count, predicate))
}

fn count_until<S, P>(mut sequence: S, count: usize, mut predicate: P) -> bool
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
{
    let mut matched = 0;
    let mut index = 0;
    while let Step::Yielded(value) = sequence.next() {
        if predicate(&value, index) {
            matched += 1;
            if matched == count {
                return true;
            }
        }
        index += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{array, constant, from_fn};
    use rstest::rstest;

    struct Payload(bool);

    impl Sequence for Payload {
        type Item = i32;

        fn next(&mut self) -> Step<i32> {
            if self.0 {
                Step::Done(None)
            } else {
                self.0 = true;
                Step::Done(Some(5))
            }
        }
    }

    #[test]
    fn test_any_counts_truthy_payload() {
        assert!(any(Payload(false)));
        assert!(!any_by(Payload(false), |value, _| *value == 5));
    }

    #[test]
    fn test_any_stops_on_infinite_sequence() {
        assert!(any(constant(true, None)));
    }

    #[rstest]
    #[case(vec![], true)]
    #[case(vec![1, 2], true)]
    #[case(vec![1, 0], false)]
    fn test_every(#[case] values: Vec<i32>, #[case] expected: bool) {
        assert_eq!(every(array(values)), expected);
    }

    #[test]
    fn test_some_by_short_circuits() {
        let mut pulled = 0;
        let source = from_fn(|| {
            pulled += 1;
            Some(pulled)
        });
        assert_eq!(some_by(source, 3, |value, _| value % 2 == 0), Ok(true));
        assert_eq!(pulled, 6);
    }

    #[test]
    fn test_none_by_uses_index() {
        assert!(none_by(array(vec![5, 5]), |_, index| index > 1));
        assert!(!any_by(array(vec![5, 5]), |_, index| index > 1));
    }

    #[test]
    fn test_some_rejects_zero() {
        assert!(some(array(vec![1]), 0).is_err());
    }
}
