use std::hash::Hash;
use std::rc::Rc;

use super::Buffer;
use super::key_of;
use crate::capability;
use crate::sequence::{Sequence, Shared, Step, share, trace_close};

/// The values of a sequence whose hash was not seen before.
///
/// Created by [`unique`] and [`unique_by_hash`].
pub struct UniqueByHash<S, H, K> {
    upstream: S,
    hash: Shared<H>,
    seen: Buffer<K>,
    finished: bool,
    iterable: bool,
}

/// The sequence returned by [`unique`].
pub type Unique<S> =
    UniqueByHash<S, fn(&<S as Sequence>::Item) -> <S as Sequence>::Item, <S as Sequence>::Item>;

/// Returns a sequence of the distinct values of `upstream`, in first-seen
/// order.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::set::unique;
/// use seqflow::source::array;
///
/// let values: Vec<i32> = unique(array(vec![3, 1, 3, 2, 1])).values().collect();
/// assert_eq!(values, vec![3, 1, 2]);
/// ```
pub fn unique<S>(upstream: S) -> Unique<S>
where
    S: Sequence,
    S::Item: Clone + Hash + Eq,
{
    let hash: fn(&S::Item) -> S::Item = key_of;
    unique_by_hash(upstream, hash)
}

/// Returns a sequence of the values of `upstream` whose `hash` has not been
/// seen before. The first value with a given hash wins.
pub fn unique_by_hash<S, H, K>(upstream: S, hash: H) -> UniqueByHash<S, H, K>
where
    S: Sequence,
    H: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    UniqueByHash {
        upstream,
        hash: share(hash),
        seen: Buffer::new(),
        finished: false,
        iterable,
    }
}

impl<S, H, K> Sequence for UniqueByHash<S, H, K>
where
    S: Sequence,
    H: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        loop {
            match self.upstream.next() {
                Step::Yielded(value) => {
                    if self.seen.mark((*self.hash.borrow_mut())(&value)) {
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
        trace_close("unique_by_hash");
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
            hash: Rc::clone(&self.hash),
            seen: Buffer::new(),
            finished: false,
            iterable: true,
        })
    }
}

/// The values of a sequence distinct from every earlier accepted value under
/// a pairwise predicate.
///
/// Created by [`unique_by`].
pub struct UniqueBy<S: Sequence, P> {
    upstream: S,
    predicate: Shared<P>,
    accepted: Vec<S::Item>,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence of the values of `upstream` for which
/// `predicate(&accepted, &value)` returns `true` against every previously
/// accepted value.
///
/// The predicate returns `true` when its arguments are **distinct**. Each new
/// value is compared with the whole buffer, so the cost is quadratic in the
/// number of accepted values.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::set::unique_by;
/// use seqflow::source::array;
///
/// let far_apart = |a: &f64, b: &f64| (a - b).abs() > 0.5;
/// let values: Vec<f64> = unique_by(array(vec![1.0, 1.2, 3.0, 2.9]), far_apart)
///     .values()
///     .collect();
/// assert_eq!(values, vec![1.0, 3.0]);
/// ```
pub fn unique_by<S, P>(upstream: S, predicate: P) -> UniqueBy<S, P>
where
    S: Sequence,
    S::Item: Clone,
    P: FnMut(&S::Item, &S::Item) -> bool,
{
    let iterable = capability::negotiate([upstream.is_iterable()]);
    UniqueBy {
        upstream,
        predicate: share(predicate),
        accepted: Vec::new(),
        finished: false,
        iterable,
    }
}

impl<S, P> Sequence for UniqueBy<S, P>
where
    S: Sequence,
    S::Item: Clone,
    P: FnMut(&S::Item, &S::Item) -> bool,
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        loop {
            match self.upstream.next() {
                Step::Yielded(value) => {
                    let mut predicate = self.predicate.borrow_mut();
                    let distinct = self
                        .accepted
                        .iter()
                        .all(|accepted| (*predicate)(accepted, &value));
                    if distinct {
                        self.accepted.push(value.clone());
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
        trace_close("unique_by");
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
            predicate: Rc::clone(&self.predicate),
            accepted: Vec::new(),
            finished: false,
            iterable: true,
        })
    }
}
