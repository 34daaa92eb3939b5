use std::rc::Rc;

use crate::capability;
use crate::error::{Result, ensure_positive};
use crate::sequence::{Sequence, Shared, Step, share, trace_close};

/// Repeats every value a fixed number of times.
///
/// Created by [`replicate`].
pub struct Replicate<S: Sequence> {
    upstream: S,
    times: usize,
    current: Option<S::Item>,
    remaining: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which yields each value of `upstream` `times` times.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`](crate::SequenceError) when
/// `times` is zero.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateful::replicate;
///
/// let values: Vec<i32> = replicate(array(vec![1, 2]), 2)?.values().collect();
/// assert_eq!(values, vec![1, 1, 2, 2]);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn replicate<S>(upstream: S, times: usize) -> Result<Replicate<S>>
where
    S: Sequence,
    S::Item: Clone,
{
    let times = ensure_positive("replicate", "times", times)?;
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Ok(Replicate {
        upstream,
        times,
        current: None,
        remaining: 0,
        finished: false,
        iterable,
    })
}

impl<S> Sequence for Replicate<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        if self.remaining == 0 {
            match self.upstream.next() {
                Step::Yielded(value) => {
                    self.current = Some(value);
                    self.remaining = self.times;
                }
                Step::Done(payload) => {
                    self.finished = true;
                    return Step::Done(payload);
                }
            }
        }
        self.remaining -= 1;
        let value = if self.remaining == 0 {
            self.current.take()
        } else {
            self.current.clone()
        };
        value.map_or_else(Step::done, Step::Yielded)
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        self.current = None;
        trace_close("replicate");
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
            times: self.times,
            current: None,
            remaining: 0,
            finished: false,
            iterable: true,
        })
    }
}

/// Repeats every value a callback-computed number of times.
///
/// Created by [`replicate_by`].
pub struct ReplicateBy<S: Sequence, F> {
    upstream: S,
    function: Shared<F>,
    current: Option<S::Item>,
    remaining: usize,
    source_index: usize,
    output_index: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which yields each value `function(&value, source_index,
/// output_index)` times.
///
/// `output_index` is the number of values emitted so far. A count of zero
/// skips the value and pulls the next one.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateful::replicate_by;
///
/// let values: Vec<usize> = replicate_by(array(vec![2, 0, 1]), |value, _, _| *value)
///     .values()
///     .collect();
/// assert_eq!(values, vec![2, 2, 1]);
/// ```
pub fn replicate_by<S, F>(upstream: S, function: F) -> ReplicateBy<S, F>
where
    S: Sequence,
    S::Item: Clone,
    F: FnMut(&S::Item, usize, usize) -> usize,
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    ReplicateBy {
        upstream,
        function: share(function),
        current: None,
        remaining: 0,
        source_index: 0,
        output_index: 0,
        finished: false,
        iterable,
    }
}

impl<S, F> Sequence for ReplicateBy<S, F>
where
    S: Sequence,
    S::Item: Clone,
    F: FnMut(&S::Item, usize, usize) -> usize,
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        while self.remaining == 0 {
            match self.upstream.next() {
                Step::Yielded(value) => {
                    self.remaining =
                        (*self.function.borrow_mut())(&value, self.source_index, self.output_index);
                    self.source_index += 1;
                    self.current = Some(value);
                }
                Step::Done(payload) => {
                    self.finished = true;
                    self.current = None;
                    return Step::Done(payload);
                }
            }
        }
        self.remaining -= 1;
        self.output_index += 1;
        let value = if self.remaining == 0 {
            self.current.take()
        } else {
            self.current.clone()
        };
        value.map_or_else(Step::done, Step::Yielded)
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        self.current = None;
        trace_close("replicate_by");
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
            current: None,
            remaining: 0,
            source_index: 0,
            output_index: 0,
            finished: false,
            iterable: true,
        })
    }
}
