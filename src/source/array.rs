use std::rc::Rc;

use crate::capability;
use crate::sequence::{Sequence, Step};

/// An iterable sequence over shared, indexable data.
///
/// Values are cloned out of the shared buffer, so [`fresh`](Sequence::fresh)
/// traversals are cheap and never copy the data.
#[derive(Debug, Clone)]
pub struct ArraySequence<T> {
    data: Rc<[T]>,
    index: usize,
    finished: bool,
    iterable: bool,
}

/// Creates a sequence over `values`.
///
/// # Examples
///
/// ```rust
/// use seqflow::{Sequence, Step};
/// use seqflow::source::array;
///
/// let mut sequence = array(vec![1, 2]);
/// assert_eq!(sequence.next(), Step::Yielded(1));
/// assert_eq!(sequence.next(), Step::Yielded(2));
/// assert_eq!(sequence.next(), Step::Done(None));
/// ```
pub fn array<T, D>(values: D) -> ArraySequence<T>
where
    D: Into<Rc<[T]>>,
{
    ArraySequence {
        data: values.into(),
        index: 0,
        finished: false,
        iterable: capability::negotiate([]),
    }
}

impl<T> ArraySequence<T> {
    /// The number of values not yet pulled.
    pub fn remaining(&self) -> usize {
        if self.finished {
            0
        } else {
            self.data.len() - self.index
        }
    }
}

impl<T: Clone> Sequence for ArraySequence<T> {
    type Item = T;

    fn next(&mut self) -> Step<T> {
        if self.finished {
            return Step::done();
        }
        match self.data.get(self.index) {
            Some(value) => {
                self.index += 1;
                Step::Yielded(value.clone())
            }
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

    fn is_iterable(&self) -> bool {
        self.iterable
    }

    fn fresh(&self) -> Option<Self> {
        self.iterable.then(|| Self {
            data: Rc::clone(&self.data),
            index: 0,
            finished: false,
            iterable: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::with_iterable_support;

    #[test]
    fn test_remaining_tracks_progress() {
        let mut sequence = array(vec![1, 2, 3]);
        assert_eq!(sequence.remaining(), 3);
        let _ = sequence.next();
        assert_eq!(sequence.remaining(), 2);
        let _ = sequence.close(None);
        assert_eq!(sequence.remaining(), 0);
    }

    #[test]
    fn test_fresh_starts_from_the_beginning() {
        with_iterable_support(true, || {
            let mut sequence = array(vec!["a", "b"]);
            let _ = sequence.next();
            let _ = sequence.close(None);
            let fresh: Vec<&str> = sequence.fresh().unwrap().values().collect();
            assert_eq!(fresh, vec!["a", "b"]);
        });
    }

    #[test]
    fn test_not_iterable_without_environment_support() {
        let sequence = with_iterable_support(false, || array(vec![1]));
        assert!(!sequence.is_iterable());
        assert!(sequence.fresh().is_none());
    }
}
