//! The result record returned by every pull.

/// The outcome of a single pull on a [`Sequence`](super::Sequence).
///
/// `Yielded` corresponds to `done = false`: the carried value is significant.
/// `Done` corresponds to `done = true`: iteration has ended. A sequence may
/// attach a terminal payload to the first `Done` it reports (for example the
/// value handed to [`close`](super::Sequence::close)); every later pull
/// reports `Done(None)`.
///
/// # Examples
///
/// ```rust
/// use seqflow::Step;
///
/// let step = Step::Yielded(3);
/// assert!(!step.is_done());
/// assert_eq!(step.value(), Some(3));
///
/// let finished: Step<i32> = Step::done();
/// assert!(finished.is_done());
/// assert_eq!(finished.value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step<T> {
    /// A value was produced.
    Yielded(T),
    /// Iteration has ended, optionally carrying a terminal payload.
    Done(Option<T>),
}

impl<T> Step<T> {
    /// A terminal step without payload.
    #[inline]
    pub const fn done() -> Self {
        Self::Done(None)
    }

    /// Returns `true` if this step ends iteration.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Returns the yielded value or the terminal payload.
    #[inline]
    pub fn value(self) -> Option<T> {
        match self {
            Self::Yielded(value) => Some(value),
            Self::Done(payload) => payload,
        }
    }

    /// Returns the value only if this step yielded one.
    #[inline]
    pub fn into_yielded(self) -> Option<T> {
        match self {
            Self::Yielded(value) => Some(value),
            Self::Done(_) => None,
        }
    }

    /// Converts `&Step<T>` into `Step<&T>`.
    #[inline]
    pub const fn as_ref(&self) -> Step<&T> {
        match self {
            Self::Yielded(value) => Step::Yielded(value),
            Self::Done(payload) => Step::Done(payload.as_ref()),
        }
    }

    /// Applies `function` to the yielded value or the terminal payload.
    #[inline]
    pub fn map<U, F>(self, function: F) -> Step<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Yielded(value) => Step::Yielded(function(value)),
            Self::Done(payload) => Step::Done(payload.map(function)),
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    /// `Some` becomes `Yielded`, `None` becomes a payload-free `Done`.
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Done(None), Self::Yielded)
    }
}
