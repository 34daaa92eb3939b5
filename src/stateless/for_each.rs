use std::rc::Rc;

use crate::capability;
use crate::sequence::{Sequence, Shared, Step, share, trace_close};

/// Invokes a callback for every value before passing it through.
///
/// Created by [`for_each`].
pub struct ForEach<S, F> {
    upstream: S,
    function: Shared<F>,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which calls `function(&value, index)` for each value
/// before returning it unchanged.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateless::for_each;
///
/// let values: Vec<f64> = for_each(array(vec![1.0, 2.0]), |value: &f64, _| {
///     assert!(!value.is_nan(), "should not be NaN");
/// })
/// .values()
/// .collect();
/// assert_eq!(values, vec![1.0, 2.0]);
/// ```
pub fn for_each<S, F>(upstream: S, function: F) -> ForEach<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item, usize),
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    ForEach {
        upstream,
        function: share(function),
        index: 0,
        finished: false,
        iterable,
    }
}

impl<S, F> Sequence for ForEach<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item, usize),
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        match self.upstream.next() {
            Step::Yielded(value) => {
                (*self.function.borrow_mut())(&value, self.index);
                self.index += 1;
                Step::Yielded(value)
            }
            Step::Done(payload) => {
                self.finished = true;
                Step::Done(payload)
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        trace_close("for_each");
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
            index: 0,
            finished: false,
            iterable: true,
        })
    }
}

/// Invokes a callback for each value while a predicate holds.
///
/// Created by [`while_each`].
pub struct WhileEach<S, P, F> {
    upstream: S,
    predicate: Shared<P>,
    function: Shared<F>,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which calls `function(&value, index)` for each value
/// before returning it, ending as soon as `predicate(&value, index)` returns
/// `false` or the upstream is exhausted.
///
/// The value failing the predicate is consumed but neither passed to
/// `function` nor returned.
pub fn while_each<S, P, F>(upstream: S, predicate: P, function: F) -> WhileEach<S, P, F>
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
    F: FnMut(&S::Item, usize),
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    WhileEach {
        upstream,
        predicate: share(predicate),
        function: share(function),
        index: 0,
        finished: false,
        iterable,
    }
}

impl<S, P, F> Sequence for WhileEach<S, P, F>
where
    S: Sequence,
    P: FnMut(&S::Item, usize) -> bool,
    F: FnMut(&S::Item, usize),
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        match self.upstream.next() {
            Step::Yielded(value) => {
                let index = self.index;
                self.index += 1;
                if !(*self.predicate.borrow_mut())(&value, index) {
                    self.finished = true;
                    return Step::done();
                }
                (*self.function.borrow_mut())(&value, index);
                Step::Yielded(value)
            }
            Step::Done(payload) => {
                self.finished = true;
                Step::Done(payload)
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        trace_close("while_each");
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
            function: Rc::clone(&self.function),
            index: 0,
            finished: false,
            iterable: true,
        })
    }
}
