use crate::sequence::{Sequence, Step};

/// A sequence over a standard [`Iterator`]. Not iterable.
#[derive(Debug, Clone)]
pub struct IterSequence<I> {
    iterator: I,
    finished: bool,
}

/// Adapts any [`IntoIterator`] into a sequence.
///
/// # Examples
///
/// ```rust
/// use seqflow::{Sequence, Step};
/// use seqflow::source::from_iter;
///
/// let mut sequence = from_iter(1..3);
/// assert_eq!(sequence.next(), Step::Yielded(1));
/// assert!(!sequence.is_iterable());
/// ```
pub fn from_iter<I: IntoIterator>(iterable: I) -> IterSequence<I::IntoIter> {
    IterSequence {
        iterator: iterable.into_iter(),
        finished: false,
    }
}

impl<I: Iterator> Sequence for IterSequence<I> {
    type Item = I::Item;

    fn next(&mut self) -> Step<I::Item> {
        if self.finished {
            return Step::done();
        }
        self.iterator.next().map_or_else(
            || {
                self.finished = true;
                Step::done()
            },
            Step::Yielded,
        )
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<I::Item>) -> Step<I::Item> {
        self.finished = true;
        Step::Done(value)
    }
}

/// A sequence pulling from a closure until it returns `None`. Not iterable.
pub struct FnSequence<F> {
    function: F,
    finished: bool,
}

/// Creates a sequence that calls `function` on every pull.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::from_fn;
///
/// let mut count = 0;
/// let sequence = from_fn(move || {
///     count += 1;
///     (count <= 3).then_some(count)
/// });
/// assert_eq!(sequence.values().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
pub fn from_fn<T, F>(function: F) -> FnSequence<F>
where
    F: FnMut() -> Option<T>,
{
    FnSequence {
        function,
        finished: false,
    }
}

impl<T, F> Sequence for FnSequence<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Step<T> {
        if self.finished {
            return Step::done();
        }
        match (self.function)() {
            Some(value) => Step::Yielded(value),
            None => {
                self.finished = true;
                Step::done()
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<T>) -> Step<T> {
        self.finished = true;
        Step::Done(value)
    }
}
