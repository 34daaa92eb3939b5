use std::rc::Rc;

use crate::capability;
use crate::sequence::{Sequence, Shared, Step, share, trace_close};

/// Keeps (or rejects) values according to a predicate.
///
/// Created by [`filter`] and [`reject`].
pub struct Filter<S, P> {
    upstream: S,
    predicate: Shared<P>,
    keep: bool,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence of the values for which `predicate(&value, index)`
/// returns `true`.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateless::filter;
///
/// let values: Vec<i32> = filter(array(vec![1, 3, 2, 4]), |value, _| *value > 2).values().collect();
/// assert_eq!(values, vec![3, 4]);
/// ```
pub fn filter<S, P>(upstream: S, predicate: P) -> Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
{
    build(upstream, predicate, true)
}

/// Returns a sequence of the values for which `predicate(&value, index)`
/// returns `false`.
pub fn reject<S, P>(upstream: S, predicate: P) -> Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
{
    build(upstream, predicate, false)
}

fn build<S: Sequence, P>(upstream: S, predicate: P, keep: bool) -> Filter<S, P> {
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Filter {
        upstream,
        predicate: share(predicate),
        keep,
        index: 0,
        finished: false,
        iterable,
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        loop {
            match self.upstream.next() {
                Step::Yielded(value) => {
                    let index = self.index;
                    self.index += 1;
                    if (*self.predicate.borrow_mut())(&value, index) == self.keep {
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
        trace_close(if self.keep { "filter" } else { "reject" });
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
            predicate: Rc::clone(&self.predicate),
            keep: self.keep,
            index: 0,
            finished: false,
            iterable: true,
        })
    }
}
