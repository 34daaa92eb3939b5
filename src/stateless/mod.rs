//! Stateless combinators.
//!
//! These combinators transform one sequence into another without memory of
//! earlier values beyond an iteration index:
//!
//! - [`map`], [`filter_map`]: transform values
//! - [`filter`], [`reject`]: select values with a predicate
//! - [`for_each`], [`while_each`]: observe values
//! - [`head`], [`slice`], [`fill`]: index-range operations
//! - [`shift`], [`pop`], [`push`], [`unshift`]: edits at either end
//!
//! Each combinator is iterable exactly when its upstream is iterable and the
//! environment supports iterable sequences.

mod edge;
mod filter;
mod for_each;
mod head;
mod map;

pub use edge::{Pop, Push, Shift, Unshift, pop, pop_with, push, shift, shift_with, unshift};
pub use filter::{Filter, filter, reject};
pub use for_each::{ForEach, WhileEach, for_each, while_each};
pub use head::{Fill, Head, Slice, fill, head, slice};
pub use map::{FilterMap, Map, filter_map, map};
