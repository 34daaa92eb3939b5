use std::rc::Rc;

use crate::capability;
use crate::sequence::{Sequence, Shared, Step, share, trace_close};

/// Transforms each value with a function of `(value, index)`.
///
/// Created by [`map`].
pub struct Map<S, F> {
    upstream: S,
    function: Shared<F>,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which applies `function` to every value.
///
/// The function receives the value and its zero-based iteration index.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateless::map;
///
/// let values: Vec<i32> = map(array(vec![1, 2, 3]), |value, _| value * 10).values().collect();
/// assert_eq!(values, vec![10, 20, 30]);
/// ```
pub fn map<S, U, F>(upstream: S, function: F) -> Map<S, F>
where
    S: Sequence,
    F: FnMut(S::Item, usize) -> U,
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Map {
        upstream,
        function: share(function),
        index: 0,
        finished: false,
        iterable,
    }
}

impl<S, U, F> Sequence for Map<S, F>
where
    S: Sequence,
    F: FnMut(S::Item, usize) -> U,
{
    type Item = U;

    fn next(&mut self) -> Step<U> {
        if self.finished {
            return Step::done();
        }
        match self.upstream.next() {
            Step::Yielded(value) => {
                let index = self.index;
                self.index += 1;
                Step::Yielded((*self.function.borrow_mut())(value, index))
            }
            Step::Done(_) => {
                self.finished = true;
                Step::done()
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<U>) -> Step<U> {
        self.finished = true;
        trace_close("map");
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

/// Filters and maps in one pass.
///
/// Created by [`filter_map`].
pub struct FilterMap<S, F> {
    upstream: S,
    function: Shared<F>,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which applies `function` to every value and yields the
/// `Some` results, pulling the next value whenever the function returns
/// `None`.
pub fn filter_map<S, U, F>(upstream: S, function: F) -> FilterMap<S, F>
where
    S: Sequence,
    F: FnMut(S::Item, usize) -> Option<U>,
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    FilterMap {
        upstream,
        function: share(function),
        index: 0,
        finished: false,
        iterable,
    }
}

impl<S, U, F> Sequence for FilterMap<S, F>
where
    S: Sequence,
    F: FnMut(S::Item, usize) -> Option<U>,
{
    type Item = U;

    fn next(&mut self) -> Step<U> {
        if self.finished {
            return Step::done();
        }
        loop {
            match self.upstream.next() {
                Step::Yielded(value) => {
                    let index = self.index;
                    self.index += 1;
                    if let Some(mapped) = (*self.function.borrow_mut())(value, index) {
                        return Step::Yielded(mapped);
                    }
                }
                Step::Done(_) => {
                    self.finished = true;
                    return Step::done();
                }
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<U>) -> Step<U> {
        self.finished = true;
        trace_close("filter_map");
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
