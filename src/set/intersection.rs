use std::hash::Hash;
use std::rc::Rc;

use super::Buffer;
use super::key_of;
use crate::capability;
use crate::error::{Result, ensure_sequences};
use crate::sequence::{Sequence, Shared, Step, close_all, fresh_all, share, trace_close};

/// The values of the first sequence present in every other sequence.
///
/// Created by [`intersection`] and [`intersection_by_hash`].
pub struct IntersectionByHash<S, H, K> {
    sequences: Vec<S>,
    hash: Shared<H>,
    others: Option<Vec<Buffer<K>>>,
    emitted: Buffer<K>,
    finished: bool,
    iterable: bool,
}

/// The sequence returned by [`intersection`].
pub type Intersection<S> = IntersectionByHash<
    S,
    fn(&<S as Sequence>::Item) -> <S as Sequence>::Item,
    <S as Sequence>::Item,
>;

/// Returns a sequence of the distinct values of the first input which every
/// other input also produces, in the first input's order.
///
/// Every input but the first is drained into a buffer on the first pull, so
/// all of them must be finite. The terminal payload of the first input is
/// forwarded.
///
/// # Errors
///
/// Returns [`SequenceError::InsufficientSequences`](crate::SequenceError)
/// for fewer than two inputs.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::set::intersection;
/// use seqflow::source::array;
///
/// let values: Vec<i32> = intersection([array(vec![2, 1, 2, 3]), array(vec![3, 2, 5])])?
///     .values()
///     .collect();
/// assert_eq!(values, vec![2, 3]);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn intersection<I, S>(sequences: I) -> Result<Intersection<S>>
where
    I: IntoIterator<Item = S>,
    S: Sequence,
    S::Item: Clone + Hash + Eq,
{
    let hash: fn(&S::Item) -> S::Item = key_of;
    build("intersection", sequences, hash)
}

/// Returns a sequence of the values of the first input whose `hash` is
/// produced by every other input.
///
/// `hash` is called once for every value of every input. Only the first value
/// of the first input with a given hash is emitted.
///
/// # Errors
///
/// Returns [`SequenceError::InsufficientSequences`](crate::SequenceError)
/// for fewer than two inputs.
pub fn intersection_by_hash<I, S, H, K>(
    sequences: I,
    hash: H,
) -> Result<IntersectionByHash<S, H, K>>
where
    I: IntoIterator<Item = S>,
    S: Sequence,
    H: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    build("intersection_by_hash", sequences, hash)
}

fn build<I, S, H, K>(
    combinator: &'static str,
    sequences: I,
    hash: H,
) -> Result<IntersectionByHash<S, H, K>>
where
    I: IntoIterator<Item = S>,
    S: Sequence,
    K: Hash + Eq,
{
    let sequences: Vec<S> = sequences.into_iter().collect();
    ensure_sequences(combinator, 2, &sequences)?;
    let iterable = capability::negotiate(sequences.iter().map(S::is_iterable));
    Ok(IntersectionByHash {
        sequences,
        hash: share(hash),
        others: None,
        emitted: Buffer::new(),
        finished: false,
        iterable,
    })
}

impl<S, H, K> IntersectionByHash<S, H, K>
where
    S: Sequence,
    H: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    fn materialize(&mut self) -> Vec<Buffer<K>> {
        let mut hash = self.hash.borrow_mut();
        let buffers: Vec<Buffer<K>> = self
            .sequences
            .iter_mut()
            .skip(1)
            .map(|sequence| {
                let mut buffer = Buffer::new();
                while let Step::Yielded(value) = sequence.next() {
                    buffer.mark((*hash)(&value));
                }
                buffer
            })
            .collect();
        tracing::trace!(
            buffers = buffers.len(),
            keys = buffers.iter().map(Buffer::len).sum::<usize>(),
            "materialized intersection inputs"
        );
        buffers
    }
}

impl<S, H, K> Sequence for IntersectionByHash<S, H, K>
where
    S: Sequence,
    H: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        if self.others.is_none() {
            self.others = Some(self.materialize());
        }
        let Some(others) = self.others.as_ref() else {
            return Step::done();
        };
        let Some(first) = self.sequences.first_mut() else {
            return Step::done();
        };
        loop {
            match first.next() {
                Step::Yielded(value) => {
                    let key = (*self.hash.borrow_mut())(&value);
                    if self.emitted.contains(&key) {
                        continue;
                    }
                    if others.iter().all(|buffer| buffer.contains(&key)) {
                        self.emitted.mark(key);
                        return Step::Yielded(value);
                    }
                }
                Step::Done(payload) => {
                    self.finished = true;
                    return Step::Done(payload);
                }
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        trace_close("intersection");
        close_all(&mut self.sequences);
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
            sequences: fresh_all(&self.sequences)?,
            hash: Rc::clone(&self.hash),
            others: None,
            emitted: Buffer::new(),
            finished: false,
            iterable: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{array, from_fn};
    use std::cell::Cell;

    #[test]
    fn test_intersection_of_three() {
        let values: Vec<i32> = intersection([
            array(vec![1, 2, 3, 4]),
            array(vec![4, 3, 2]),
            array(vec![2, 4, 6]),
        ])
        .unwrap()
        .values()
        .collect();
        assert_eq!(values, vec![2, 4]);
    }

    #[test]
    fn test_intersection_is_lazy_until_first_pull() {
        let pulled = Cell::new(0);
        let counted = from_fn(|| {
            pulled.set(pulled.get() + 1);
            (pulled.get() <= 2).then(|| pulled.get())
        })
        .boxed();
        let mut sequence = intersection([array(vec![2, 1]).boxed(), counted]).unwrap();
        assert_eq!(pulled.get(), 0);
        assert_eq!(sequence.next(), Step::Yielded(2));
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn test_intersection_by_hash_calls_hash_for_every_value() {
        let mut calls = 0;
        let values: Vec<f64> = intersection_by_hash(
            [array(vec![1.5, 2.5]), array(vec![2.5, 3.5, 4.5])],
            |value: &f64| {
                calls += 1;
                value.to_bits()
            },
        )
        .unwrap()
        .values()
        .collect();
        assert_eq!(values, vec![2.5]);
        assert_eq!(calls, 5);
    }

    #[test]
    fn test_intersection_with_empty_other_is_empty() {
        let values: Vec<i32> = intersection([array(vec![1, 2]), array(Vec::new())])
            .unwrap()
            .values()
            .collect();
        assert!(values.is_empty());
    }
}
