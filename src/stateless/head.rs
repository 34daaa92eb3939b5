use crate::capability;
use crate::sequence::{Sequence, Step, trace_close};

/// Returns at most the first `n` values of a sequence.
///
/// Created by [`head`].
#[derive(Debug, Clone)]
pub struct Head<S> {
    upstream: S,
    limit: usize,
    emitted: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence of the first `limit` values of `upstream`.
///
/// If the upstream produces fewer values, all of them are returned.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateless::head;
///
/// let values: Vec<i32> = head(array(vec![1, 2, 3]), 2).values().collect();
/// assert_eq!(values, vec![1, 2]);
/// ```
pub fn head<S: Sequence>(upstream: S, limit: usize) -> Head<S> {
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Head {
        upstream,
        limit,
        emitted: 0,
        finished: false,
        iterable,
    }
}

impl<S: Sequence> Sequence for Head<S> {
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished || self.emitted >= self.limit {
            self.finished = true;
            return Step::done();
        }
        match self.upstream.next() {
            Step::Yielded(value) => {
                self.emitted += 1;
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
        trace_close("head");
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
            iterable: true,
            ..head(self.upstream.fresh()?, self.limit)
        })
    }
}

/// Returns the values whose iteration index lies in `[begin, end)`.
///
/// Created by [`slice`].
#[derive(Debug, Clone)]
pub struct Slice<S> {
    upstream: S,
    begin: usize,
    end: Option<usize>,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a subsequence of `upstream` from `begin` (inclusive) to `end`
/// (exclusive). `None` means "until the upstream ends".
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateless::slice;
///
/// let values: Vec<i32> = slice(array(vec![1, 2, 3, 4]), 1, Some(3)).values().collect();
/// assert_eq!(values, vec![2, 3]);
/// ```
pub fn slice<S: Sequence>(upstream: S, begin: usize, end: Option<usize>) -> Slice<S> {
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Slice {
        upstream,
        begin,
        end,
        index: 0,
        finished: false,
        iterable,
    }
}

impl<S: Sequence> Sequence for Slice<S> {
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        loop {
            if self.end.is_some_and(|end| self.index >= end) {
                self.finished = true;
                return Step::done();
            }
            match self.upstream.next() {
                Step::Yielded(value) => {
                    let index = self.index;
                    self.index += 1;
                    if index >= self.begin {
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
        trace_close("slice");
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
            iterable: true,
            ..slice(self.upstream.fresh()?, self.begin, self.end)
        })
    }
}

/// Replaces the values in an index range with a static value.
///
/// Created by [`fill`].
#[derive(Debug, Clone)]
pub struct Fill<S, T> {
    upstream: S,
    value: T,
    begin: usize,
    end: Option<usize>,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which replaces the values of `upstream` from `begin`
/// (inclusive) to `end` (exclusive) with `value`.
///
/// If `end` exceeds the upstream length, every value from `begin` onward is
/// replaced.
pub fn fill<S>(upstream: S, value: S::Item, begin: usize, end: Option<usize>) -> Fill<S, S::Item>
where
    S: Sequence,
    S::Item: Clone,
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Fill {
        upstream,
        value,
        begin,
        end,
        index: 0,
        finished: false,
        iterable,
    }
}

impl<S, T> Sequence for Fill<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Step<T> {
        if self.finished {
            return Step::done();
        }
        match self.upstream.next() {
            Step::Yielded(value) => {
                let index = self.index;
                self.index += 1;
                let replaced = index >= self.begin && self.end.is_none_or(|end| index < end);
                Step::Yielded(if replaced { self.value.clone() } else { value })
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

    fn close(&mut self, value: Option<T>) -> Step<T> {
        self.finished = true;
        trace_close("fill");
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
            iterable: true,
            ..fill(
                self.upstream.fresh()?,
                self.value.clone(),
                self.begin,
                self.end,
            )
        })
    }
}
