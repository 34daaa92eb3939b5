//! Type-erased sequences.

use std::fmt;

use super::{Sequence, Step};

/// Object-safe mirror of [`Sequence`] that keeps the iterable capability
/// available behind a trait object.
trait ErasedSequence<'a, T> {
    fn erased_next(&mut self) -> Step<T>;
    fn erased_supports_close(&self) -> bool;
    fn erased_close(&mut self, value: Option<T>) -> Step<T>;
    fn erased_is_iterable(&self) -> bool;
    fn erased_fresh(&self) -> Option<BoxedSequence<'a, T>>;
}

impl<'a, S> ErasedSequence<'a, S::Item> for S
where
    S: Sequence + 'a,
{
    fn erased_next(&mut self) -> Step<S::Item> {
        self.next()
    }

    fn erased_supports_close(&self) -> bool {
        self.supports_close()
    }

    fn erased_close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.close(value)
    }

    fn erased_is_iterable(&self) -> bool {
        self.is_iterable()
    }

    fn erased_fresh(&self) -> Option<BoxedSequence<'a, S::Item>> {
        self.fresh().map(BoxedSequence::new)
    }
}

/// A heap-allocated sequence whose concrete type has been erased.
///
/// Use it to mix sequences of different concrete types in the multi-source
/// and set combinators, or to store heterogeneous pipeline stages.
///
/// # Examples
///
/// ```rust
/// use seqflow::{BoxedSequence, Sequence};
/// use seqflow::multi::concat;
/// use seqflow::source::{array, constant};
///
/// let sources: Vec<BoxedSequence<'_, i32>> = vec![
///     array(vec![1, 2]).boxed(),
///     constant(0, Some(2)).boxed(),
/// ];
/// let values: Vec<i32> = concat(sources).unwrap().values().collect();
/// assert_eq!(values, vec![1, 2, 0, 0]);
/// ```
pub struct BoxedSequence<'a, T> {
    inner: Box<dyn ErasedSequence<'a, T> + 'a>,
}

impl<'a, T> BoxedSequence<'a, T> {
    /// Boxes `sequence`, keeping its close and iterable capabilities.
    pub fn new<S>(sequence: S) -> Self
    where
        S: Sequence<Item = T> + 'a,
    {
        Self {
            inner: Box::new(sequence),
        }
    }
}

impl<'a, T> Sequence for BoxedSequence<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Step<T> {
        self.inner.erased_next()
    }

    fn supports_close(&self) -> bool {
        self.inner.erased_supports_close()
    }

    fn close(&mut self, value: Option<T>) -> Step<T> {
        self.inner.erased_close(value)
    }

    fn is_iterable(&self) -> bool {
        self.inner.erased_is_iterable()
    }

    fn fresh(&self) -> Option<Self> {
        self.inner.erased_fresh()
    }
}

impl<T> fmt::Debug for BoxedSequence<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BoxedSequence")
            .field("iterable", &self.inner.erased_is_iterable())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_not_impl_any!(BoxedSequence<'static, i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::with_iterable_support;
    use crate::source::{array, from_fn};

    #[test]
    fn test_boxed_fresh_restarts_traversal() {
        with_iterable_support(true, || {
            let mut boxed = array(vec![1, 2, 3]).boxed();
            assert_eq!(boxed.next(), Step::Yielded(1));

            let mut fresh = boxed.fresh().expect("array sequences are iterable");
            assert_eq!(fresh.next(), Step::Yielded(1));
            assert_eq!(boxed.next(), Step::Yielded(2));
        });
    }

    #[test]
    fn test_boxed_non_iterable_has_no_fresh() {
        let boxed = from_fn(|| Some(1)).boxed();
        assert!(!boxed.is_iterable());
        assert!(boxed.fresh().is_none());
    }

    #[test]
    fn test_reboxing_keeps_behaviour() {
        let mut twice = array(vec![5]).boxed().boxed();
        assert_eq!(twice.next(), Step::Yielded(5));
        assert_eq!(twice.next(), Step::Done(None));
    }
}
