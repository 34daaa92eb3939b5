//! Combinators that add or drop values at either end of a sequence.

use std::rc::Rc;

use crate::capability;
use crate::sequence::{Sequence, Shared, Step, share, trace_close};

/// Skips the first value, handing it to a callback.
///
/// Created by [`shift`] and [`shift_with`].
pub struct Shift<S, F> {
    upstream: S,
    on_skipped: Shared<F>,
    started: bool,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which skips the first value of `upstream`.
///
/// # Examples
///
/// ```rust
/// use seqflow::{Sequence, Step};
/// use seqflow::source::array;
/// use seqflow::stateless::shift;
///
/// let mut sequence = shift(array(vec![1, 2]));
/// assert_eq!(sequence.next(), Step::Yielded(2));
/// assert_eq!(sequence.next(), Step::Done(None));
/// ```
pub fn shift<S: Sequence>(upstream: S) -> Shift<S, fn(S::Item)> {
    shift_with(upstream, drop)
}

/// Returns a sequence which skips the first value of `upstream`, passing it
/// to `on_skipped`.
pub fn shift_with<S, F>(upstream: S, on_skipped: F) -> Shift<S, F>
where
    S: Sequence,
    F: FnMut(S::Item),
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Shift {
        upstream,
        on_skipped: share(on_skipped),
        started: false,
        finished: false,
        iterable,
    }
}

impl<S, F> Sequence for Shift<S, F>
where
    S: Sequence,
    F: FnMut(S::Item),
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        if !self.started {
            self.started = true;
            match self.upstream.next() {
                Step::Yielded(skipped) => (*self.on_skipped.borrow_mut())(skipped),
                Step::Done(payload) => {
                    self.finished = true;
                    return Step::Done(payload);
                }
            }
        }
        match self.upstream.next() {
            Step::Yielded(value) => Step::Yielded(value),
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
        trace_close("shift");
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
            on_skipped: Rc::clone(&self.on_skipped),
            started: false,
            finished: false,
            iterable: true,
        })
    }
}

/// Skips the last value, handing it to a callback.
///
/// Created by [`pop`] and [`pop_with`]. Holds one value of lookahead.
pub struct Pop<S: Sequence, F> {
    upstream: S,
    on_skipped: Shared<F>,
    pending: Option<S::Item>,
    started: bool,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which skips the last value of `upstream`.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateless::pop;
///
/// let values: Vec<i32> = pop(array(vec![1, 2, 3])).values().collect();
/// assert_eq!(values, vec![1, 2]);
/// ```
pub fn pop<S: Sequence>(upstream: S) -> Pop<S, fn(S::Item)> {
    pop_with(upstream, drop)
}

/// Returns a sequence which skips the last value of `upstream`, passing it
/// to `on_skipped` once the upstream ends.
pub fn pop_with<S, F>(upstream: S, on_skipped: F) -> Pop<S, F>
where
    S: Sequence,
    F: FnMut(S::Item),
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Pop {
        upstream,
        on_skipped: share(on_skipped),
        pending: None,
        started: false,
        finished: false,
        iterable,
    }
}

impl<S, F> Sequence for Pop<S, F>
where
    S: Sequence,
    F: FnMut(S::Item),
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        if !self.started {
            self.started = true;
            match self.upstream.next() {
                Step::Yielded(value) => self.pending = Some(value),
                Step::Done(payload) => {
                    self.finished = true;
                    return Step::Done(payload);
                }
            }
        }
        match self.upstream.next() {
            Step::Yielded(value) => match self.pending.replace(value) {
                Some(previous) => Step::Yielded(previous),
                None => Step::done(),
            },
            Step::Done(payload) => {
                self.finished = true;
                if let Some(last) = self.pending.take() {
                    (*self.on_skipped.borrow_mut())(last);
                }
                Step::Done(payload)
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        self.pending = None;
        trace_close("pop");
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
            on_skipped: Rc::clone(&self.on_skipped),
            pending: None,
            started: false,
            finished: false,
            iterable: true,
        })
    }
}

/// Appends values after the upstream ends.
///
/// Created by [`push`].
#[derive(Debug, Clone)]
pub struct Push<S, T> {
    upstream: S,
    items: Rc<[T]>,
    position: usize,
    upstream_done: bool,
    payload: Option<T>,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which yields `items` after the values of `upstream`.
///
/// A terminal payload of `upstream` is held back and reported once `items`
/// are exhausted.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateless::push;
///
/// let values: Vec<i32> = push(array(vec![1, 2]), [3, 4]).values().collect();
/// assert_eq!(values, vec![1, 2, 3, 4]);
/// ```
pub fn push<S, I>(upstream: S, items: I) -> Push<S, S::Item>
where
    S: Sequence,
    S::Item: Clone,
    I: IntoIterator<Item = S::Item>,
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Push {
        upstream,
        items: items.into_iter().collect(),
        position: 0,
        upstream_done: false,
        payload: None,
        finished: false,
        iterable,
    }
}

impl<S, T> Sequence for Push<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Step<T> {
        if self.finished {
            return Step::done();
        }
        if !self.upstream_done {
            match self.upstream.next() {
                Step::Yielded(value) => return Step::Yielded(value),
                Step::Done(payload) => {
                    self.upstream_done = true;
                    self.payload = payload;
                }
            }
        }
        match self.items.get(self.position) {
            Some(item) => {
                self.position += 1;
                Step::Yielded(item.clone())
            }
            None => {
                self.finished = true;
                Step::Done(self.payload.take())
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<T>) -> Step<T> {
        self.finished = true;
        self.payload = None;
        trace_close("push");
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
            items: Rc::clone(&self.items),
            position: 0,
            upstream_done: false,
            payload: None,
            finished: false,
            iterable: true,
        })
    }
}

/// Prepends values before the upstream's values.
///
/// Created by [`unshift`].
#[derive(Debug, Clone)]
pub struct Unshift<S, T> {
    upstream: S,
    items: Rc<[T]>,
    position: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which yields `items` before the values of `upstream`.
pub fn unshift<S, I>(upstream: S, items: I) -> Unshift<S, S::Item>
where
    S: Sequence,
    S::Item: Clone,
    I: IntoIterator<Item = S::Item>,
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Unshift {
        upstream,
        items: items.into_iter().collect(),
        position: 0,
        finished: false,
        iterable,
    }
}

impl<S, T> Sequence for Unshift<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Step<T> {
        if self.finished {
            return Step::done();
        }
        if let Some(item) = self.items.get(self.position) {
            self.position += 1;
            return Step::Yielded(item.clone());
        }
        match self.upstream.next() {
            Step::Yielded(value) => Step::Yielded(value),
            Step::Done(payload) => {
                self.finished = true;
                Step::Done(payload)
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<T>) -> Step<T> {
        self.finished = true;
        trace_close("unshift");
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
            items: Rc::clone(&self.items),
            position: 0,
            finished: false,
            iterable: true,
        })
    }
}
