//! Typed fluent chaining.

use std::hash::Hash;
use std::iter;

use crate::error::Result;
use crate::multi::{self, Concat, MapN};
use crate::sequence::{Sequence, Step};
use crate::set::{
    self, Intersection, IntersectionByHash, Union, UnionByHash, Unique, UniqueBy, UniqueByHash,
};
use crate::source::{ArraySequence, array};
use crate::stateful::{
    self, Counter, Cumulative, Dedupe, DedupeArgs, DedupeBy, Replicate, ReplicateBy,
    StrideOptions, Strided, StridedBy,
};
use crate::stateless::{
    self, Fill, Filter, FilterMap, ForEach, Head, Map, Pop, Push, Shift, Slice, Unshift, WhileEach,
};
use crate::terminal::{self, Truthy};

/// A sequence wrapper whose methods apply combinators.
///
/// Every method returning a sequence returns another `Flow`, so chains read
/// left to right. Methods mirroring terminal consumers return the scalar
/// directly, and fallible combinators return a [`Result`].
///
/// Draining `flow(s).filter(p).map(f).head(n)` yields the same values as
/// `head(map(filter(s, p), f), n)`.
///
/// # Examples
///
/// ```rust
/// use seqflow::compose::flow;
/// use seqflow::source::array;
///
/// let matched = flow(array(vec![1, 2, 3, 4, 5, 6, 7]))
///     .filter(|value, _| value % 2 == 1)
///     .map(|value, _| value * 10)
///     .head(3)
///     .last();
/// assert_eq!(matched, Some(50));
/// ```
#[derive(Debug, Clone)]
pub struct Flow<S> {
    sequence: S,
}

/// Wraps `sequence` for fluent chaining.
pub fn flow<S: Sequence>(sequence: S) -> Flow<S> {
    Flow::new(sequence)
}

impl<T: Clone> Flow<ArraySequence<T>> {
    /// Wraps a fresh [`array`] source.
    pub fn from_values<D: Into<std::rc::Rc<[T]>>>(values: D) -> Self {
        Self::new(array(values))
    }
}

impl<S: Sequence> Flow<S> {
    /// Wraps `sequence`.
    pub const fn new(sequence: S) -> Self {
        Self { sequence }
    }

    /// Returns the wrapped sequence.
    pub fn into_inner(self) -> S {
        self.sequence
    }

    /// Applies an arbitrary combinator, typically a [`thunk!`](crate::thunk).
    pub fn then<R, F>(self, function: F) -> R
    where
        F: FnOnce(S) -> R,
    {
        function(self.sequence)
    }

    /// Applies an arbitrary sequence combinator and keeps chaining.
    pub fn pipe<Q, F>(self, function: F) -> Flow<Q>
    where
        Q: Sequence,
        F: FnOnce(S) -> Q,
    {
        Flow::new(function(self.sequence))
    }

    // Stateless

    /// See [`stateless::map`].
    pub fn map<U, F>(self, function: F) -> Flow<Map<S, F>>
    where
        F: FnMut(S::Item, usize) -> U,
    {
        Flow::new(stateless::map(self.sequence, function))
    }

    /// See [`stateless::filter_map`].
    pub fn filter_map<U, F>(self, function: F) -> Flow<FilterMap<S, F>>
    where
        F: FnMut(S::Item, usize) -> Option<U>,
    {
        Flow::new(stateless::filter_map(self.sequence, function))
    }

    /// See [`stateless::filter`].
    pub fn filter<P>(self, predicate: P) -> Flow<Filter<S, P>>
    where
        P: FnMut(&S::Item, usize) -> bool,
    {
        Flow::new(stateless::filter(self.sequence, predicate))
    }

    /// See [`stateless::reject`].
    pub fn reject<P>(self, predicate: P) -> Flow<Filter<S, P>>
    where
        P: FnMut(&S::Item, usize) -> bool,
    {
        Flow::new(stateless::reject(self.sequence, predicate))
    }

    /// See [`stateless::for_each`].
    pub fn for_each<F>(self, function: F) -> Flow<ForEach<S, F>>
    where
        F: FnMut(&S::Item, usize),
    {
        Flow::new(stateless::for_each(self.sequence, function))
    }

    /// See [`stateless::while_each`].
    pub fn while_each<P, F>(self, predicate: P, function: F) -> Flow<WhileEach<S, P, F>>
    where
        P: FnMut(&S::Item, usize) -> bool,
        F: FnMut(&S::Item, usize),
    {
        Flow::new(stateless::while_each(self.sequence, predicate, function))
    }

    /// See [`stateless::head`].
    pub fn head(self, limit: usize) -> Flow<Head<S>> {
        Flow::new(stateless::head(self.sequence, limit))
    }

    /// See [`stateless::slice`].
    pub fn slice(self, begin: usize, end: Option<usize>) -> Flow<Slice<S>> {
        Flow::new(stateless::slice(self.sequence, begin, end))
    }

    /// See [`stateless::fill`].
    pub fn fill(self, value: S::Item, begin: usize, end: Option<usize>) -> Flow<Fill<S, S::Item>>
    where
        S::Item: Clone,
    {
        Flow::new(stateless::fill(self.sequence, value, begin, end))
    }

    /// See [`stateless::shift`].
    pub fn shift(self) -> Flow<Shift<S, fn(S::Item)>> {
        Flow::new(stateless::shift(self.sequence))
    }

    /// See [`stateless::pop`].
    pub fn pop(self) -> Flow<Pop<S, fn(S::Item)>> {
        Flow::new(stateless::pop(self.sequence))
    }

    /// See [`stateless::push`].
    pub fn push<I>(self, items: I) -> Flow<Push<S, S::Item>>
    where
        S::Item: Clone,
        I: IntoIterator<Item = S::Item>,
    {
        Flow::new(stateless::push(self.sequence, items))
    }

    /// See [`stateless::unshift`].
    pub fn unshift<I>(self, items: I) -> Flow<Unshift<S, S::Item>>
    where
        S::Item: Clone,
        I: IntoIterator<Item = S::Item>,
    {
        Flow::new(stateless::unshift(self.sequence, items))
    }

    // Stateful

    /// See [`stateful::dedupe`].
    ///
    /// # Errors
    ///
    /// Fails when `limit` is zero.
    pub fn dedupe(self, limit: usize) -> Result<Flow<Dedupe<S>>>
    where
        S::Item: Clone + PartialEq,
    {
        stateful::dedupe(self.sequence, limit).map(Flow::new)
    }

    /// See [`stateful::dedupe_by`].
    ///
    /// # Errors
    ///
    /// Fails when `limit` is zero.
    pub fn dedupe_by<F, R>(self, limit: usize, function: F) -> Result<Flow<DedupeBy<S, F, R>>>
    where
        S::Item: Clone,
        F: FnMut(DedupeArgs<'_, S::Item, R>) -> R,
        R: PartialEq,
    {
        stateful::dedupe_by(self.sequence, limit, function).map(Flow::new)
    }

    /// See [`stateful::replicate`].
    ///
    /// # Errors
    ///
    /// Fails when `times` is zero.
    pub fn replicate(self, times: usize) -> Result<Flow<Replicate<S>>>
    where
        S::Item: Clone,
    {
        stateful::replicate(self.sequence, times).map(Flow::new)
    }

    /// See [`stateful::replicate_by`].
    pub fn replicate_by<F>(self, function: F) -> Flow<ReplicateBy<S, F>>
    where
        S::Item: Clone,
        F: FnMut(&S::Item, usize, usize) -> usize,
    {
        Flow::new(stateful::replicate_by(self.sequence, function))
    }

    /// See [`stateful::strided`].
    ///
    /// # Errors
    ///
    /// Fails when `stride` is zero.
    pub fn strided(self, stride: usize, options: StrideOptions) -> Result<Flow<Strided<S>>> {
        stateful::strided(self.sequence, stride, options).map(Flow::new)
    }

    /// See [`stateful::strided_by`].
    pub fn strided_by<F>(self, function: F, options: StrideOptions) -> Flow<StridedBy<S, F>>
    where
        F: FnMut(&S::Item, usize, usize, usize) -> usize,
    {
        Flow::new(stateful::strided_by(self.sequence, function, options))
    }

    /// See [`stateful::counter`].
    pub fn counter(self) -> Flow<Counter<S>> {
        Flow::new(stateful::counter(self.sequence))
    }

    /// See [`stateful::cuany`].
    pub fn cuany(self) -> Flow<Cumulative<S>>
    where
        S::Item: Truthy,
    {
        Flow::new(stateful::cuany(self.sequence))
    }

    /// See [`stateful::cuevery`].
    pub fn cuevery(self) -> Flow<Cumulative<S>>
    where
        S::Item: Truthy,
    {
        Flow::new(stateful::cuevery(self.sequence))
    }

    /// See [`stateful::cunone`].
    pub fn cunone(self) -> Flow<Cumulative<S>>
    where
        S::Item: Truthy,
    {
        Flow::new(stateful::cunone(self.sequence))
    }

    /// See [`stateful::cusome`].
    ///
    /// # Errors
    ///
    /// Fails when `count` is zero.
    pub fn cusome(self, count: usize) -> Result<Flow<Cumulative<S>>>
    where
        S::Item: Truthy,
    {
        stateful::cusome(self.sequence, count).map(Flow::new)
    }

    // Set and multi-source

    /// See [`set::unique`].
    pub fn unique(self) -> Flow<Unique<S>>
    where
        S::Item: Clone + Hash + Eq,
    {
        Flow::new(set::unique(self.sequence))
    }

    /// See [`set::unique_by`].
    pub fn unique_by<P>(self, predicate: P) -> Flow<UniqueBy<S, P>>
    where
        S::Item: Clone,
        P: FnMut(&S::Item, &S::Item) -> bool,
    {
        Flow::new(set::unique_by(self.sequence, predicate))
    }

    /// See [`set::unique_by_hash`].
    pub fn unique_by_hash<H, K>(self, hash: H) -> Flow<UniqueByHash<S, H, K>>
    where
        H: FnMut(&S::Item) -> K,
        K: Hash + Eq,
    {
        Flow::new(set::unique_by_hash(self.sequence, hash))
    }

    /// See [`set::union`]; the wrapped sequence comes first.
    ///
    /// # Errors
    ///
    /// Fails when `others` is empty.
    pub fn union<I>(self, others: I) -> Result<Flow<Union<S>>>
    where
        I: IntoIterator<Item = S>,
        S::Item: Clone + Hash + Eq,
    {
        set::union(iter::once(self.sequence).chain(others)).map(Flow::new)
    }

    /// See [`set::intersection`]; the wrapped sequence comes first.
    ///
    /// # Errors
    ///
    /// Fails when `others` is empty.
    pub fn intersection<I>(self, others: I) -> Result<Flow<Intersection<S>>>
    where
        I: IntoIterator<Item = S>,
        S::Item: Clone + Hash + Eq,
    {
        set::intersection(iter::once(self.sequence).chain(others)).map(Flow::new)
    }

    /// See [`set::union_by_hash`]; the wrapped sequence comes first.
    ///
    /// # Errors
    ///
    /// Fails when `others` is empty.
    pub fn union_by_hash<I, H, K>(self, others: I, hash: H) -> Result<Flow<UnionByHash<S, H, K>>>
    where
        I: IntoIterator<Item = S>,
        H: FnMut(&S::Item) -> K,
        K: Hash + Eq,
    {
        set::union_by_hash(iter::once(self.sequence).chain(others), hash).map(Flow::new)
    }

    /// See [`set::intersection_by_hash`]; the wrapped sequence comes first.
    ///
    /// # Errors
    ///
    /// Fails when `others` is empty.
    pub fn intersection_by_hash<I, H, K>(
        self,
        others: I,
        hash: H,
    ) -> Result<Flow<IntersectionByHash<S, H, K>>>
    where
        I: IntoIterator<Item = S>,
        H: FnMut(&S::Item) -> K,
        K: Hash + Eq,
    {
        set::intersection_by_hash(iter::once(self.sequence).chain(others), hash).map(Flow::new)
    }

    /// See [`multi::concat`]; the wrapped sequence comes first.
    ///
    /// # Errors
    ///
    /// Fails when `others` is empty.
    pub fn concat<I>(self, others: I) -> Result<Flow<Concat<S>>>
    where
        I: IntoIterator<Item = S>,
    {
        multi::concat(iter::once(self.sequence).chain(others)).map(Flow::new)
    }

    /// See [`multi::map_n`]; the wrapped sequence supplies the first column.
    ///
    /// # Errors
    ///
    /// Fails when `others` is empty.
    pub fn map_n<I, U, F>(self, others: I, function: F) -> Result<Flow<MapN<S, F>>>
    where
        I: IntoIterator<Item = S>,
        F: FnMut(&[S::Item], usize) -> U,
    {
        multi::map_n(iter::once(self.sequence).chain(others), function).map(Flow::new)
    }

    // Terminal

    /// See [`terminal::any`].
    pub fn any(self) -> bool
    where
        S::Item: Truthy,
    {
        terminal::any(self.sequence)
    }

    /// See [`terminal::any_by`].
    pub fn any_by<P>(self, predicate: P) -> bool
    where
        P: FnMut(&S::Item, usize) -> bool,
    {
        terminal::any_by(self.sequence, predicate)
    }

    /// See [`terminal::every`].
    pub fn every(self) -> bool
    where
        S::Item: Truthy,
    {
        terminal::every(self.sequence)
    }

    /// See [`terminal::every_by`].
    pub fn every_by<P>(self, predicate: P) -> bool
    where
        P: FnMut(&S::Item, usize) -> bool,
    {
        terminal::every_by(self.sequence, predicate)
    }

    /// See [`terminal::none`].
    pub fn none(self) -> bool
    where
        S::Item: Truthy,
    {
        terminal::none(self.sequence)
    }

    /// See [`terminal::none_by`].
    pub fn none_by<P>(self, predicate: P) -> bool
    where
        P: FnMut(&S::Item, usize) -> bool,
    {
        terminal::none_by(self.sequence, predicate)
    }

    /// See [`terminal::some`].
    ///
    /// # Errors
    ///
    /// Fails when `count` is zero.
    pub fn some(self, count: usize) -> Result<bool>
    where
        S::Item: Truthy,
    {
        terminal::some(self.sequence, count)
    }

    /// See [`terminal::some_by`].
    ///
    /// # Errors
    ///
    /// Fails when `count` is zero.
    pub fn some_by<P>(self, count: usize, predicate: P) -> Result<bool>
    where
        P: FnMut(&S::Item, usize) -> bool,
    {
        terminal::some_by(self.sequence, count, predicate)
    }

    /// See [`terminal::first`].
    pub fn first(self) -> Option<S::Item> {
        terminal::first(self.sequence)
    }

    /// See [`terminal::last`].
    pub fn last(self) -> Option<S::Item> {
        terminal::last(self.sequence)
    }

    /// See [`terminal::length`].
    pub fn length(self) -> usize {
        terminal::length(self.sequence)
    }

    /// See [`terminal::nth`].
    ///
    /// # Errors
    ///
    /// Fails when `position` is zero.
    pub fn nth(self, position: usize) -> Result<Option<S::Item>> {
        terminal::nth(self.sequence, position)
    }

    /// See [`terminal::advance`].
    pub fn advance(self, steps: Option<usize>) -> Self {
        Self::new(terminal::advance(self.sequence, steps))
    }
}

impl<S: Sequence> Sequence for Flow<S> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Step<S::Item> {
        self.sequence.next()
    }

    fn supports_close(&self) -> bool {
        self.sequence.supports_close()
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.sequence.close(value)
    }

    fn is_iterable(&self) -> bool {
        self.sequence.is_iterable()
    }

    fn fresh(&self) -> Option<Self> {
        self.sequence.fresh().map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::constant;

    #[test]
    fn test_head_then_some() {
        let matched = Flow::from_values(vec![1, 1, 0, 1, 1, 1])
            .head(5)
            .some(3)
            .unwrap();
        assert!(matched);
    }

    #[test]
    fn test_union_chain() {
        let values: Vec<i32> = Flow::from_values(vec![1, 2])
            .union([array(vec![2, 3])])
            .unwrap()
            .unique()
            .values()
            .collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_hashed_set_methods() {
        let united: Vec<&str> = Flow::from_values(vec!["ant", "bee"])
            .union_by_hash([array(vec!["asp", "cow"])], |word: &&str| word.chars().next())
            .unwrap()
            .values()
            .collect();
        assert_eq!(united, vec!["ant", "bee", "cow"]);

        let shared: Vec<i32> = Flow::from_values(vec![1, 4, 7, 8])
            .intersection_by_hash([array(vec![10, 13])], |value: &i32| value % 3)
            .unwrap()
            .values()
            .collect();
        assert_eq!(shared, vec![1]);
    }

    #[test]
    fn test_map_n_zips_others() {
        let sums: Vec<i32> = Flow::from_values(vec![1, 2, 3])
            .map_n([array(vec![10, 20])], |row: &[i32], _| row[0] + row[1])
            .unwrap()
            .values()
            .collect();
        assert_eq!(sums, vec![11, 22]);
    }

    #[test]
    fn test_then_applies_any_combinator() {
        let total = flow(constant(2, Some(3))).then(terminal::length);
        assert_eq!(total, 3);
    }

    #[test]
    fn test_flow_forwards_fresh() {
        let chained = Flow::from_values(vec![1, 2, 3]).map(|value, _| value + 1);
        if let Some(again) = chained.fresh() {
            assert_eq!(again.values().collect::<Vec<i32>>(), vec![2, 3, 4]);
        }
        assert_eq!(chained.length(), 3);
    }
}
