//! The pull-based sequence protocol.
//!
//! Every combinator in this crate consumes and produces values implementing
//! [`Sequence`]. A sequence is pulled with [`Sequence::next`], which returns a
//! [`Step`]: either a yielded value or the end of iteration.
//!
//! Two capabilities are optional:
//!
//! - **Close**: [`Sequence::close`] requests early termination. After a close,
//!   `next` must behave as exhausted. Combinators cascade the close to the
//!   sequences they wrap.
//! - **Iterable**: [`Sequence::fresh`] produces a new traversal over the same
//!   logical data. A combinator is iterable only if the environment supports it
//!   and every wrapped input is iterable (see [`capability`]).
//!
//! # Examples
//!
//! ```rust
//! use seqflow::{Sequence, Step};
//! use seqflow::source::array;
//!
//! let mut sequence = array(vec![1, 2]);
//! assert_eq!(sequence.next(), Step::Yielded(1));
//! assert_eq!(sequence.close(Some(7)), Step::Done(Some(7)));
//! assert_eq!(sequence.next(), Step::Done(None));
//! ```

mod boxed;
pub mod capability;
mod step;

pub use boxed::BoxedSequence;
pub use step::Step;

use std::cell::RefCell;
use std::rc::Rc;

/// A pull-based, single-threaded sequence of values.
///
/// Implementors only need [`next`](Self::next). Once `next` reports
/// [`Step::Done`], all subsequent calls must report `Done(None)`.
pub trait Sequence {
    /// The type of the yielded values.
    type Item;

    /// Pulls the next value.
    fn next(&mut self) -> Step<Self::Item>;

    /// Returns `true` if [`close`](Self::close) terminates this sequence.
    fn supports_close(&self) -> bool {
        false
    }

    /// Requests early termination and echoes `value` back as the terminal
    /// payload.
    ///
    /// The default implementation has no effect beyond the echo; sequences
    /// that support closing mark themselves exhausted and cascade the close
    /// to every sequence they wrap. Closing twice returns the same result.
    fn close(&mut self, value: Option<Self::Item>) -> Step<Self::Item> {
        Step::Done(value)
    }

    /// Returns `true` if [`fresh`](Self::fresh) produces a new traversal.
    fn is_iterable(&self) -> bool {
        false
    }

    /// Returns a new traversal over the same logical data, if iterable.
    fn fresh(&self) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }

    /// Adapts this sequence into a standard [`Iterator`] over yielded values.
    fn values(self) -> Values<Self>
    where
        Self: Sized,
    {
        Values { sequence: self }
    }

    /// Erases the concrete type of this sequence.
    fn boxed<'a>(self) -> BoxedSequence<'a, Self::Item>
    where
        Self: Sized + 'a,
    {
        BoxedSequence::new(self)
    }

    /// Borrows this sequence so that a combinator can drive it without
    /// taking ownership.
    fn by_ref(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self
    }
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Step<Self::Item> {
        (**self).next()
    }

    fn supports_close(&self) -> bool {
        (**self).supports_close()
    }

    fn close(&mut self, value: Option<Self::Item>) -> Step<Self::Item> {
        (**self).close(value)
    }
}

impl<S: Sequence> Sequence for Box<S> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Step<Self::Item> {
        (**self).next()
    }

    fn supports_close(&self) -> bool {
        (**self).supports_close()
    }

    fn close(&mut self, value: Option<Self::Item>) -> Step<Self::Item> {
        (**self).close(value)
    }

    fn is_iterable(&self) -> bool {
        (**self).is_iterable()
    }

    fn fresh(&self) -> Option<Self> {
        (**self).fresh().map(Box::new)
    }
}

/// A standard [`Iterator`] over the yielded values of a [`Sequence`].
///
/// Created by [`Sequence::values`].
#[derive(Debug, Clone)]
pub struct Values<S> {
    sequence: S,
}

impl<S> Values<S> {
    /// Returns the wrapped sequence.
    pub fn into_inner(self) -> S {
        self.sequence
    }
}

impl<S: Sequence> Iterator for Values<S> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.sequence.next().into_yielded()
    }
}

/// A callback shared between a combinator and the fresh traversals it
/// creates.
pub(crate) type Shared<F> = Rc<RefCell<F>>;

pub(crate) fn share<F>(function: F) -> Shared<F> {
    Rc::new(RefCell::new(function))
}

pub(crate) fn trace_close(combinator: &'static str) {
    tracing::trace!(combinator, "closing sequence and cascading upstream");
}

/// Fresh traversals of every sequence, or `None` if any is not iterable.
pub(crate) fn fresh_all<S: Sequence>(sequences: &[S]) -> Option<Vec<S>> {
    sequences.iter().map(S::fresh).collect()
}

pub(crate) fn close_all<S: Sequence>(sequences: &mut [S]) {
    for sequence in sequences {
        let _ = sequence.close(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{array, from_fn};

    #[test]
    fn test_values_collects_yielded_values() {
        let collected: Vec<i32> = array(vec![1, 2, 3]).values().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn test_mutable_reference_drives_without_ownership() {
        let mut sequence = array(vec![1, 2, 3]);
        assert_eq!(sequence.by_ref().next(), Step::Yielded(1));
        assert_eq!(sequence.next(), Step::Yielded(2));
    }

    #[test]
    fn test_mutable_reference_is_not_iterable() {
        let mut sequence = array(vec![1]);
        let borrowed = &mut sequence;
        assert!(!borrowed.is_iterable());
    }

    struct Naturals(u32);

    impl Sequence for Naturals {
        type Item = u32;

        fn next(&mut self) -> Step<u32> {
            self.0 += 1;
            Step::Yielded(self.0)
        }
    }

    #[test]
    fn test_default_close_echoes_value() {
        let mut sequence = Naturals(0);
        assert!(!sequence.supports_close());
        assert_eq!(sequence.close(Some(9)), Step::Done(Some(9)));
        assert_eq!(sequence.next(), Step::Yielded(1));
    }

    #[test]
    fn test_from_fn_supports_close() {
        let mut sequence = from_fn(|| Some(1));
        assert!(sequence.supports_close());
        assert_eq!(sequence.close(None), Step::Done(None));
        assert_eq!(sequence.next(), Step::Done(None));
    }

    #[test]
    fn test_boxed_forwards_capabilities() {
        let boxed = Box::new(array(vec![1, 2]));
        assert_eq!(boxed.is_iterable(), capability::environment_supports_iterable());
    }
}
