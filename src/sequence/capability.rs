//! Iterable capability negotiation.
//!
//! A combinator exposes [`Sequence::fresh`](super::Sequence::fresh) only if
//! the environment supports iterable sequences **and** every wrapped input is
//! iterable. The negotiation runs once, at construction, and the result is
//! stored on the combinator.
//!
//! Environment support defaults to the `iterable` cargo feature. Tests (or
//! embedders emulating a restricted environment) can override it for the
//! current thread with [`with_iterable_support`].
//!
//! # Examples
//!
//! ```rust
//! use seqflow::Sequence;
//! use seqflow::capability::with_iterable_support;
//! use seqflow::source::array;
//!
//! let sequence = with_iterable_support(false, || array(vec![1, 2]));
//! assert!(!sequence.is_iterable());
//! ```

use std::cell::Cell;

thread_local! {
    static ITERABLE_OVERRIDE: Cell<Option<bool>> = const { Cell::new(None) };
}

/// Returns `true` if the environment advertises iterable support.
pub fn environment_supports_iterable() -> bool {
    ITERABLE_OVERRIDE
        .with(Cell::get)
        .unwrap_or(cfg!(feature = "iterable"))
}

/// Runs `function` with environment iterable support forced to `supported`
/// on the current thread, restoring the previous setting afterwards (also on
/// unwind).
pub fn with_iterable_support<R, F>(supported: bool, function: F) -> R
where
    F: FnOnce() -> R,
{
    struct Restore(Option<bool>);

    impl Drop for Restore {
        fn drop(&mut self) {
            ITERABLE_OVERRIDE.with(|setting| setting.set(self.0));
        }
    }

    let previous = ITERABLE_OVERRIDE.with(|setting| setting.replace(Some(supported)));
    let _restore = Restore(previous);
    function()
}

/// Negotiates the iterable capability from the capabilities of the inputs.
pub fn negotiate<I>(inputs: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    environment_supports_iterable() && inputs.into_iter().all(|iterable| iterable)
}
