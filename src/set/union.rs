use std::hash::Hash;
use std::rc::Rc;

use super::Buffer;
use super::key_of;
use crate::capability;
use crate::error::{Result, ensure_sequences};
use crate::sequence::{Sequence, Shared, Step, close_all, fresh_all, share, trace_close};

/// The distinct values of several sequences, keyed by a hash function.
///
/// Created by [`union`] and [`union_by_hash`].
pub struct UnionByHash<S, H, K> {
    sequences: Vec<S>,
    hash: Shared<H>,
    seen: Buffer<K>,
    active: usize,
    finished: bool,
    iterable: bool,
}

/// The sequence returned by [`union`].
pub type Union<S> =
    UnionByHash<S, fn(&<S as Sequence>::Item) -> <S as Sequence>::Item, <S as Sequence>::Item>;

/// Returns a sequence of the distinct values of every input, in first-seen
/// order.
///
/// Inputs are drained one after another in argument order; a value equal to
/// one already emitted is skipped. The terminal payload of the last input
/// is forwarded.
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
/// use seqflow::set::union;
/// use seqflow::source::array;
///
/// let values: Vec<i32> = union([array(vec![1, 2, 1]), array(vec![3, 2, 4])])?
///     .values()
///     .collect();
/// assert_eq!(values, vec![1, 2, 3, 4]);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn union<I, S>(sequences: I) -> Result<Union<S>>
where
    I: IntoIterator<Item = S>,
    S: Sequence,
    S::Item: Clone + Hash + Eq,
{
    let hash: fn(&S::Item) -> S::Item = key_of;
    build("union", sequences, hash)
}

/// Returns a sequence of the values of every input whose `hash` has not been
/// seen before.
///
/// Only the first value producing a given hash is emitted, so the order of
/// the inputs decides which of two colliding values survives.
///
/// # Errors
///
/// Returns [`SequenceError::InsufficientSequences`](crate::SequenceError)
/// for fewer than two inputs.
pub fn union_by_hash<I, S, H, K>(sequences: I, hash: H) -> Result<UnionByHash<S, H, K>>
where
    I: IntoIterator<Item = S>,
    S: Sequence,
    H: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    build("union_by_hash", sequences, hash)
}

fn build<I, S, H, K>(combinator: &'static str, sequences: I, hash: H) -> Result<UnionByHash<S, H, K>>
where
    I: IntoIterator<Item = S>,
    S: Sequence,
    K: Hash + Eq,
{
    let sequences: Vec<S> = sequences.into_iter().collect();
    ensure_sequences(combinator, 2, &sequences)?;
    let iterable = capability::negotiate(sequences.iter().map(S::is_iterable));
    Ok(UnionByHash {
        sequences,
        hash: share(hash),
        seen: Buffer::new(),
        active: 0,
        finished: false,
        iterable,
    })
}

impl<S, H, K> Sequence for UnionByHash<S, H, K>
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
        let mut payload = None;
        while let Some(sequence) = self.sequences.get_mut(self.active) {
            match sequence.next() {
                Step::Yielded(value) => {
                    let key = (*self.hash.borrow_mut())(&value);
                    if self.seen.mark(key) {
                        return Step::Yielded(value);
                    }
                }
                Step::Done(value) => {
                    payload = value;
                    self.active += 1;
                }
            }
        }
        tracing::trace!(distinct = self.seen.len(), "union exhausted its inputs");
        self.finished = true;
        Step::Done(payload)
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        trace_close("union");
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
            seen: Buffer::new(),
            active: 0,
            finished: false,
            iterable: true,
        })
    }
}
