use std::rc::Rc;

use smallvec::SmallVec;

use crate::capability;
use crate::error::{Result, ensure_sequences};
use crate::sequence::{Sequence, Shared, Step, close_all, fresh_all, share, trace_close};

/// Values pulled in lock-step, stored inline for the common small arities.
type Row<T> = SmallVec<[T; 4]>;

/// Applies a function to values pulled from several sequences in lock-step.
///
/// Created by [`map_n`].
pub struct MapN<S: Sequence, F> {
    sequences: Vec<S>,
    function: Shared<F>,
    row: Row<S::Item>,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence of `function(&[a, b, ..], index)`, where the slice
/// holds one value from each input.
///
/// The result ends as soon as any input ends.
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
/// use seqflow::multi::map_n;
/// use seqflow::source::array;
///
/// let sums = map_n([array(vec![1, 2]), array(vec![3, 4, 5])], |values: &[i32], _| {
///     values.iter().sum::<i32>()
/// })?;
/// assert_eq!(sums.values().collect::<Vec<_>>(), vec![4, 6]);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn map_n<I, S, U, F>(sequences: I, function: F) -> Result<MapN<S, F>>
where
    I: IntoIterator<Item = S>,
    S: Sequence,
    F: FnMut(&[S::Item], usize) -> U,
{
    let sequences: Vec<S> = sequences.into_iter().collect();
    ensure_sequences("map_n", 2, &sequences)?;
    Ok(build(sequences, share(function)))
}

fn build<S: Sequence, F>(sequences: Vec<S>, function: Shared<F>) -> MapN<S, F> {
    let iterable = capability::negotiate(sequences.iter().map(S::is_iterable));
    MapN {
        row: Row::with_capacity(sequences.len()),
        sequences,
        function,
        index: 0,
        finished: false,
        iterable,
    }
}

impl<S, U, F> Sequence for MapN<S, F>
where
    S: Sequence,
    F: FnMut(&[S::Item], usize) -> U,
{
    type Item = U;

    fn next(&mut self) -> Step<U> {
        if self.finished {
            return Step::done();
        }
        self.row.clear();
        for sequence in &mut self.sequences {
            match sequence.next() {
                Step::Yielded(value) => self.row.push(value),
                Step::Done(_) => {
                    self.finished = true;
                    self.row.clear();
                    return Step::done();
                }
            }
        }
        let index = self.index;
        self.index += 1;
        Step::Yielded((*self.function.borrow_mut())(self.row.as_slice(), index))
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<U>) -> Step<U> {
        self.finished = true;
        trace_close("map_n");
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
        Some(MapN {
            iterable: true,
            ..build(fresh_all(&self.sequences)?, Rc::clone(&self.function))
        })
    }
}
