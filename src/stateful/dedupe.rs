use std::rc::Rc;

use crate::capability;
use crate::error::{Result, ensure_positive};
use crate::sequence::{Sequence, Shared, Step, share, trace_close};

/// The record handed to a [`dedupe_by`] callback for every source value.
#[derive(Debug)]
pub struct DedupeArgs<'a, T, R> {
    /// The value being considered.
    pub current: &'a T,
    /// The previous source value, emitted or not.
    pub previous_seen: Option<&'a T>,
    /// The most recently emitted value.
    pub previous_emitted: Option<&'a T>,
    /// Zero-based index of `current` in the source.
    pub index: usize,
    /// The callback's result for the previous source value.
    pub previous_resolved: Option<&'a R>,
    /// How many consecutive values resolved to `previous_resolved`.
    pub run_length: usize,
}

/// Removes consecutive duplicates beyond a run limit.
///
/// Created by [`dedupe`] and [`dedupe_by`].
pub struct DedupeBy<S: Sequence, F, R> {
    upstream: S,
    function: Shared<F>,
    limit: usize,
    previous_seen: Option<S::Item>,
    previous_emitted: Option<S::Item>,
    resolved: Option<R>,
    run: usize,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// The sequence returned by [`dedupe`].
pub type Dedupe<S> = DedupeBy<
    S,
    fn(DedupeArgs<'_, <S as Sequence>::Item, <S as Sequence>::Item>) -> <S as Sequence>::Item,
    <S as Sequence>::Item,
>;

fn identity<T: Clone>(arguments: DedupeArgs<'_, T, T>) -> T {
    arguments.current.clone()
}

/// Returns a sequence which allows at most `limit` consecutive equal values.
///
/// Equality is [`PartialEq`], so `f64::NAN` is never a duplicate of itself.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`](crate::SequenceError) when
/// `limit` is zero.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateful::dedupe;
///
/// let values: Vec<i32> = dedupe(array(vec![1, 1, 2, 3, 3, 3, 3, 4, 4, 4]), 2)?
///     .values()
///     .collect();
/// assert_eq!(values, vec![1, 1, 2, 3, 3, 4, 4]);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn dedupe<S>(upstream: S, limit: usize) -> Result<Dedupe<S>>
where
    S: Sequence,
    S::Item: Clone + PartialEq,
{
    let function: fn(DedupeArgs<'_, S::Item, S::Item>) -> S::Item = identity;
    build("dedupe", upstream, limit, function)
}

/// Returns a sequence which removes consecutive values resolving to the same
/// key, allowing runs of at most `limit` values.
///
/// `function` resolves each source value to a key. A value is a duplicate
/// when its key equals the key of the previous source value; the first value
/// is never a duplicate.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`](crate::SequenceError) when
/// `limit` is zero.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateful::dedupe_by;
///
/// let words = array(vec!["apple", "avocado", "banana", "blueberry", "cherry"]);
/// let values: Vec<&str> = dedupe_by(words, 1, |arguments| arguments.current.chars().next())?
///     .values()
///     .collect();
/// assert_eq!(values, vec!["apple", "banana", "cherry"]);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn dedupe_by<S, F, R>(upstream: S, limit: usize, function: F) -> Result<DedupeBy<S, F, R>>
where
    S: Sequence,
    S::Item: Clone,
    F: FnMut(DedupeArgs<'_, S::Item, R>) -> R,
    R: PartialEq,
{
    build("dedupe_by", upstream, limit, function)
}

fn build<S: Sequence, F, R>(
    combinator: &'static str,
    upstream: S,
    limit: usize,
    function: F,
) -> Result<DedupeBy<S, F, R>> {
    let limit = ensure_positive(combinator, "limit", limit)?;
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Ok(DedupeBy {
        upstream,
        function: share(function),
        limit,
        previous_seen: None,
        previous_emitted: None,
        resolved: None,
        run: 0,
        index: 0,
        finished: false,
        iterable,
    })
}

impl<S, F, R> Sequence for DedupeBy<S, F, R>
where
    S: Sequence,
    S::Item: Clone,
    F: FnMut(DedupeArgs<'_, S::Item, R>) -> R,
    R: PartialEq,
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        loop {
            let value = match self.upstream.next() {
                Step::Yielded(value) => value,
                Step::Done(payload) => {
                    self.finished = true;
                    return Step::Done(payload);
                }
            };
            let resolved = (*self.function.borrow_mut())(DedupeArgs {
                current: &value,
                previous_seen: self.previous_seen.as_ref(),
                previous_emitted: self.previous_emitted.as_ref(),
                index: self.index,
                previous_resolved: self.resolved.as_ref(),
                run_length: self.run,
            });
            self.index += 1;
            if self.resolved.as_ref() == Some(&resolved) {
                self.run += 1;
            } else {
                self.run = 1;
            }
            self.resolved = Some(resolved);
            self.previous_seen = Some(value.clone());
            if self.run <= self.limit {
                self.previous_emitted = Some(value.clone());
                return Step::Yielded(value);
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        trace_close("dedupe_by");
        let _ = self.upstream.close(None);
        Step::Done(value)
    }

    fn is_iterable(&self) -> bool {
        self.iterable
    }

    fn fresh(&self) -> Option<Self> {
        if !self.iterable {
            return None;
        }
        Some(Self {
            upstream: self.upstream.fresh()?,
            function: Rc::clone(&self.function),
            limit: self.limit,
            previous_seen: None,
            previous_emitted: None,
            resolved: None,
            run: 0,
            index: 0,
            finished: false,
            iterable: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceError;
    use crate::source::array;
    use rstest::rstest;

    const RUNS: [i32; 10] = [1, 1, 2, 3, 3, 3, 3, 4, 4, 4];

    #[rstest]
    #[case(1, vec![1, 2, 3, 4])]
    #[case(2, vec![1, 1, 2, 3, 3, 4, 4])]
    #[case(3, vec![1, 1, 2, 3, 3, 3, 4, 4, 4])]
    fn test_dedupe_limits(#[case] limit: usize, #[case] expected: Vec<i32>) {
        let values: Vec<i32> = dedupe(array(RUNS), limit).unwrap().values().collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_dedupe_rejects_zero_limit() {
        let error = dedupe(array(RUNS), 0).err();
        assert_eq!(
            error,
            Some(SequenceError::InvalidArgument {
                combinator: "dedupe",
                parameter: "limit",
                reason: "must be a positive integer",
            })
        );
    }

    #[test]
    fn test_dedupe_keeps_nan() {
        let values: Vec<f64> = dedupe(array(vec![f64::NAN, f64::NAN]), 1)
            .unwrap()
            .values()
            .collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_dedupe_by_receives_history() {
        let mut history: Vec<(i32, Option<i32>, Option<i32>, usize, Option<i32>, usize)> =
            Vec::new();
        let values: Vec<i32> = dedupe_by(array(vec![5, 5, 6]), 1, |arguments| {
            history.push((
                *arguments.current,
                arguments.previous_seen.copied(),
                arguments.previous_emitted.copied(),
                arguments.index,
                arguments.previous_resolved.copied(),
                arguments.run_length,
            ));
            *arguments.current
        })
        .unwrap()
        .values()
        .collect();
        assert_eq!(values, vec![5, 6]);
        assert_eq!(
            history,
            vec![
                (5, None, None, 0, None, 0),
                (5, Some(5), Some(5), 1, Some(5), 1),
                (6, Some(5), Some(5), 2, Some(5), 2),
            ]
        );
    }

    #[test]
    fn test_dedupe_by_resolved_key_groups_values() {
        let values: Vec<i32> = dedupe_by(array(vec![1, 3, 5, 2, 4, 7]), 1, |arguments| {
            arguments.current % 2
        })
        .unwrap()
        .values()
        .collect();
        assert_eq!(values, vec![1, 2, 7]);
    }
}
