//! Generators that need no upstream data.

use std::marker::PhantomData;

use crate::capability;
use crate::error::{Result, SequenceError};
use crate::sequence::{Sequence, Step};

/// A sequence that is exhausted from the start.
#[derive(Debug)]
pub struct Empty<T> {
    iterable: bool,
    marker: PhantomData<T>,
}

/// Creates an empty sequence.
pub fn empty<T>() -> Empty<T> {
    Empty {
        iterable: capability::negotiate([]),
        marker: PhantomData,
    }
}

impl<T> Sequence for Empty<T> {
    type Item = T;

    fn next(&mut self) -> Step<T> {
        Step::done()
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<T>) -> Step<T> {
        Step::Done(value)
    }

    fn is_iterable(&self) -> bool {
        self.iterable
    }

    fn fresh(&self) -> Option<Self> {
        self.iterable.then(|| Self {
            iterable: true,
            marker: PhantomData,
        })
    }
}

/// A sequence repeating one value.
#[derive(Debug, Clone)]
pub struct Constant<T> {
    value: T,
    iterations: Option<usize>,
    emitted: usize,
    finished: bool,
    iterable: bool,
}

/// Creates a sequence returning `value` `iterations` times, or forever when
/// `iterations` is `None`.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::constant;
///
/// let values: Vec<&str> = constant("beep", Some(2)).values().collect();
/// assert_eq!(values, vec!["beep", "beep"]);
/// ```
pub fn constant<T: Clone>(value: T, iterations: Option<usize>) -> Constant<T> {
    Constant {
        value,
        iterations,
        emitted: 0,
        finished: false,
        iterable: capability::negotiate([]),
    }
}

impl<T: Clone> Sequence for Constant<T> {
    type Item = T;

    fn next(&mut self) -> Step<T> {
        if self.finished {
            return Step::done();
        }
        if self.iterations.is_some_and(|limit| self.emitted >= limit) {
            self.finished = true;
            return Step::done();
        }
        self.emitted += 1;
        Step::Yielded(self.value.clone())
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<T>) -> Step<T> {
        self.finished = true;
        Step::Done(value)
    }

    fn is_iterable(&self) -> bool {
        self.iterable
    }

    fn fresh(&self) -> Option<Self> {
        self.iterable
            .then(|| Self {
                iterable: true,
                ..constant(self.value.clone(), self.iterations)
            })
    }
}

/// An arithmetic progression of `f64` values, optionally bounded.
///
/// Each value is computed as `start + index * delta` so that rounding errors
/// do not accumulate. Bounded progressions built by [`linspace`] end exactly
/// on their stop value.
#[derive(Debug, Clone, Copy)]
pub struct Arithmetic {
    start: f64,
    delta: f64,
    length: Option<usize>,
    last: Option<f64>,
    index: usize,
    finished: bool,
    iterable: bool,
}

impl Arithmetic {
    fn new(start: f64, delta: f64, length: Option<usize>, last: Option<f64>) -> Self {
        Self {
            start,
            delta,
            length,
            last,
            index: 0,
            finished: false,
            iterable: capability::negotiate([]),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
impl Sequence for Arithmetic {
    type Item = f64;

    fn next(&mut self) -> Step<f64> {
        if self.finished {
            return Step::done();
        }
        if let Some(length) = self.length {
            if self.index >= length {
                self.finished = true;
                return Step::done();
            }
            if self.index + 1 == length
                && let Some(last) = self.last
            {
                self.index += 1;
                return Step::Yielded(last);
            }
        }
        let value = (self.index as f64).mul_add(self.delta, self.start);
        self.index += 1;
        Step::Yielded(value)
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<f64>) -> Step<f64> {
        self.finished = true;
        Step::Done(value)
    }

    fn is_iterable(&self) -> bool {
        self.iterable
    }

    fn fresh(&self) -> Option<Self> {
        self.iterable
            .then(|| Self {
                iterable: true,
                ..Self::new(self.start, self.delta, self.length, self.last)
            })
    }
}

/// Returns `start, start + increment, ...` for `count` values, or forever
/// when `count` is `None`.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::step;
///
/// let values: Vec<f64> = step(0.0, 2.0, Some(3)).values().collect();
/// assert_eq!(values, vec![0.0, 2.0, 4.0]);
/// ```
pub fn step(start: f64, increment: f64, count: Option<usize>) -> Arithmetic {
    Arithmetic::new(start, increment, count, None)
}

/// Returns evenly spaced values from `start` (inclusive) toward `stop`
/// (exclusive) using `increment`.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`] if `increment` is zero or not
/// finite.
pub fn incrspace(start: f64, stop: f64, increment: f64) -> Result<Arithmetic> {
    if increment == 0.0 || !increment.is_finite() {
        return Err(SequenceError::invalid(
            "incrspace",
            "increment",
            "must be a finite, non-zero number",
        ));
    }
    Ok(Arithmetic::new(
        start,
        increment,
        Some(span_length(start, stop, increment)),
        None,
    ))
}

/// Returns `count` evenly spaced values over `[start, stop]`.
///
/// A single value is the stop value.
pub fn linspace(start: f64, stop: f64, count: usize) -> Arithmetic {
    match count {
        0 | 1 => Arithmetic::new(stop, 0.0, Some(count), None),
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let delta = (stop - start) / (count - 1) as f64;
            Arithmetic::new(start, delta, Some(count), Some(stop))
        }
    }
}

/// Returns values incremented by one from `start` (inclusive) toward
/// `stop` (exclusive).
pub fn unitspace(start: f64, stop: f64) -> Arithmetic {
    Arithmetic::new(start, 1.0, Some(span_length(start, stop, 1.0)), None)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn span_length(start: f64, stop: f64, increment: f64) -> usize {
    let steps = ((stop - start) / increment).ceil();
    if steps.is_nan() || steps <= 0.0 {
        0
    } else {
        steps as usize
    }
}

/// Values evenly spaced on a logarithmic scale.
#[derive(Debug, Clone, Copy)]
pub struct Logspace {
    exponents: Arithmetic,
    base: f64,
}

/// Returns `count` values `base^e` for exponents evenly spaced over
/// `[start, stop]`.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`] if `base` is not a positive,
/// finite number.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::logspace;
///
/// let values: Vec<f64> = logspace(0.0, 3.0, 4, 2.0).unwrap().values().collect();
/// assert_eq!(values, vec![1.0, 2.0, 4.0, 8.0]);
/// ```
pub fn logspace(start: f64, stop: f64, count: usize, base: f64) -> Result<Logspace> {
    if base <= 0.0 || !base.is_finite() {
        return Err(SequenceError::invalid(
            "logspace",
            "base",
            "must be a positive, finite number",
        ));
    }
    Ok(Logspace {
        exponents: linspace(start, stop, count),
        base,
    })
}

impl Sequence for Logspace {
    type Item = f64;

    fn next(&mut self) -> Step<f64> {
        match self.exponents.next() {
            Step::Yielded(exponent) => Step::Yielded(self.base.powf(exponent)),
            Step::Done(_) => Step::done(),
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<f64>) -> Step<f64> {
        let _ = self.exponents.close(None);
        Step::Done(value)
    }

    fn is_iterable(&self) -> bool {
        self.exponents.is_iterable()
    }

    fn fresh(&self) -> Option<Self> {
        self.exponents.fresh().map(|exponents| Self {
            exponents,
            base: self.base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 5.0, 2.0, vec![0.0, 2.0, 4.0])]
    #[case(0.0, 6.0, 2.0, vec![0.0, 2.0, 4.0])]
    #[case(5.0, 0.0, -2.5, vec![5.0, 2.5])]
    #[case(0.0, 5.0, -1.0, vec![])]
    fn test_incrspace(
        #[case] start: f64,
        #[case] stop: f64,
        #[case] increment: f64,
        #[case] expected: Vec<f64>,
    ) {
        let values: Vec<f64> = incrspace(start, stop, increment).unwrap().values().collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_incrspace_rejects_zero_increment() {
        assert!(incrspace(0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_linspace_ends_exactly_on_stop() {
        let values: Vec<f64> = linspace(0.0, 1.0, 11).values().collect();
        assert_eq!(values.len(), 11);
        assert_eq!(values[10], 1.0);
    }

    #[test]
    fn test_linspace_single_value_is_stop() {
        let values: Vec<f64> = linspace(3.0, 7.0, 1).values().collect();
        assert_eq!(values, vec![7.0]);
    }

    #[test]
    fn test_unitspace() {
        let values: Vec<f64> = unitspace(-1.0, 2.0).values().collect();
        assert_eq!(values, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_logspace_rejects_non_positive_base() {
        assert!(logspace(0.0, 1.0, 2, 0.0).is_err());
        assert!(logspace(0.0, 1.0, 2, -2.0).is_err());
    }

    #[test]
    fn test_constant_unbounded_keeps_going() {
        let mut sequence = constant(1, None);
        for _ in 0..1000 {
            assert_eq!(sequence.next(), Step::Yielded(1));
        }
    }

    #[test]
    fn test_empty_is_done_immediately() {
        let mut sequence = empty::<i32>();
        assert_eq!(sequence.next(), Step::Done(None));
    }
}
