use crate::capability;
use crate::error::{Result, ensure_positive};
use crate::sequence::{Sequence, Step, trace_close};
use crate::terminal::Truthy;

/// Replaces every value with the running count of pulled values.
///
/// Created by [`counter`].
#[derive(Debug, Clone)]
pub struct Counter<S> {
    upstream: S,
    count: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence yielding `1, 2, 3, ..` for as long as `upstream` yields
/// values.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateful::counter;
///
/// let values: Vec<usize> = counter(array(vec!['a', 'b', 'c'])).values().collect();
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
pub fn counter<S: Sequence>(upstream: S) -> Counter<S> {
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Counter {
        upstream,
        count: 0,
        finished: false,
        iterable,
    }
}

impl<S: Sequence> Sequence for Counter<S> {
    type Item = usize;

    fn next(&mut self) -> Step<usize> {
        if self.finished {
            return Step::done();
        }
        if self.upstream.next().is_done() {
            self.finished = true;
            return Step::done();
        }
        self.count += 1;
        Step::Yielded(self.count)
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<usize>) -> Step<usize> {
        self.finished = true;
        trace_close("counter");
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
            ..counter(self.upstream.fresh()?)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Test {
    Any,
    Every,
    Nothing,
    AtLeast(usize),
}

impl Test {
    const fn name(self) -> &'static str {
        match self {
            Self::Any => "cuany",
            Self::Every => "cuevery",
            Self::Nothing => "cunone",
            Self::AtLeast(_) => "cusome",
        }
    }
}

/// Cumulatively tests the truthiness of the values seen so far.
///
/// Created by [`cuany`], [`cuevery`], [`cunone`] and [`cusome`].
#[derive(Debug, Clone)]
pub struct Cumulative<S> {
    upstream: S,
    test: Test,
    truthy: usize,
    pulled: usize,
    finished: bool,
    iterable: bool,
}

fn cumulative<S: Sequence>(upstream: S, test: Test) -> Cumulative<S> {
    let iterable = capability::negotiate([upstream.is_iterable()]);
    Cumulative {
        upstream,
        test,
        truthy: 0,
        pulled: 0,
        finished: false,
        iterable,
    }
}

/// Returns a sequence which yields, for every value, whether at least one
/// value so far was truthy.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateful::cuany;
///
/// let values: Vec<bool> = cuany(array(vec![0, 0, 1, 0])).values().collect();
/// assert_eq!(values, vec![false, false, true, true]);
/// ```
pub fn cuany<S>(upstream: S) -> Cumulative<S>
where
    S: Sequence,
    S::Item: Truthy,
{
    cumulative(upstream, Test::Any)
}

/// Returns a sequence which yields, for every value, whether every value so
/// far was truthy.
pub fn cuevery<S>(upstream: S) -> Cumulative<S>
where
    S: Sequence,
    S::Item: Truthy,
{
    cumulative(upstream, Test::Every)
}

/// Returns a sequence which yields, for every value, whether every value so
/// far was falsy.
pub fn cunone<S>(upstream: S) -> Cumulative<S>
where
    S: Sequence,
    S::Item: Truthy,
{
    cumulative(upstream, Test::Nothing)
}

/// Returns a sequence which yields, for every value, whether at least
/// `count` values so far were truthy.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`](crate::SequenceError) when
/// `count` is zero.
pub fn cusome<S>(upstream: S, count: usize) -> Result<Cumulative<S>>
where
    S: Sequence,
    S::Item: Truthy,
{
    let count = ensure_positive("cusome", "count", count)?;
    Ok(cumulative(upstream, Test::AtLeast(count)))
}

impl<S> Sequence for Cumulative<S>
where
    S: Sequence,
    S::Item: Truthy,
{
    type Item = bool;

    fn next(&mut self) -> Step<bool> {
        if self.finished {
            return Step::done();
        }
        let value = match self.upstream.next() {
            Step::Yielded(value) => value,
            Step::Done(_) => {
                self.finished = true;
                return Step::done();
            }
        };
        self.pulled += 1;
        if value.is_truthy() {
            self.truthy += 1;
        }
        Step::Yielded(match self.test {
            Test::Any => self.truthy > 0,
            Test::Every => self.truthy == self.pulled,
            Test::Nothing => self.truthy == 0,
            Test::AtLeast(count) => self.truthy >= count,
        })
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<bool>) -> Step<bool> {
        self.finished = true;
        trace_close(self.test.name());
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
            ..cumulative(self.upstream.fresh()?, self.test)
        })
    }
}
