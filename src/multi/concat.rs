use crate::capability;
use crate::error::{Result, ensure_sequences};
use crate::sequence::{Sequence, Step, fresh_all, trace_close};

/// Drains several sequences one after another.
///
/// Created by [`concat`].
#[derive(Debug, Clone)]
pub struct Concat<S> {
    sequences: Vec<S>,
    active: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence of the values of every input, in argument order.
///
/// Closing the result closes only the input currently being drained. When the
/// last input ends, its terminal payload is forwarded.
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
/// use seqflow::multi::concat;
/// use seqflow::source::array;
///
/// let values: Vec<i32> = concat([array(vec![1, 2]), array(vec![3])])?.values().collect();
/// assert_eq!(values, vec![1, 2, 3]);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn concat<I, S>(sequences: I) -> Result<Concat<S>>
where
    I: IntoIterator<Item = S>,
    S: Sequence,
{
    let sequences: Vec<S> = sequences.into_iter().collect();
    ensure_sequences("concat", 2, &sequences)?;
    let iterable = capability::negotiate(sequences.iter().map(S::is_iterable));
    Ok(Concat {
        sequences,
        active: 0,
        finished: false,
        iterable,
    })
}

impl<S> Concat<S> {
    /// Index of the input currently being drained.
    pub fn active(&self) -> usize {
        self.active
    }
}

impl<S: Sequence> Sequence for Concat<S> {
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        let last = self.sequences.len().saturating_sub(1);
        while let Some(sequence) = self.sequences.get_mut(self.active) {
            match sequence.next() {
                Step::Yielded(value) => return Step::Yielded(value),
                Step::Done(payload) if self.active == last => {
                    self.finished = true;
                    return Step::Done(payload);
                }
                Step::Done(_) => self.active += 1,
            }
        }
        self.finished = true;
        Step::done()
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        if !self.finished {
            trace_close("concat");
            if let Some(sequence) = self.sequences.get_mut(self.active) {
                let _ = sequence.close(None);
            }
        }
        self.finished = true;
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
            active: 0,
            finished: false,
            iterable: true,
        })
    }
}
