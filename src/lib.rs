//! # seqflow
//!
//! Lazy, pull-based sequence combinators.
//!
//! ## Overview
//!
//! Every combinator takes one or more [`Sequence`]s and returns a new
//! sequence which does no work until it is pulled. Sequences optionally
//! support early termination ([`Sequence::close`]) and re-traversal
//! ([`Sequence::fresh`]); combinators propagate both capabilities from their
//! inputs.
//!
//! - **Sources**: arrays, adapters, numeric generators, seeded random streams
//! - **Stateless**: map, filter, head, slice, fill, push, unshift and friends
//! - **Stateful**: dedupe, replicate, strided, counters and cumulative tests
//! - **Set**: union, intersection and unique with hash-keyed buffers
//! - **Multi-source**: concat and lock-step `map_n`
//! - **Terminal**: any, every, some, nth, length and array views
//! - **Compose**: fluent chaining, thunks and pipelines
//!
//! ## Feature Flags
//!
//! - `compose`: fluent flows, pipelines, `thunk!` and `pipeline!` (default)
//! - `iterable`: the environment supports re-traversal by default (default)
//! - `random`: the `randu` source (default)
//! - `fxhash` / `ahash`: alternative hashers for set buffers
//! - `serde`: serialization of [`Step`] and fluent values
//! - `full`: every feature except the hasher choice
//!
//! ## Example
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let values: Vec<i32> = head(unique(array(vec![3, 1, 3, 2, 1, 4])), 3).values().collect();
//! assert_eq!(values, vec![3, 1, 2]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

/// Prelude module for convenient imports.
///
/// Re-exports the protocol types and every combinator.
///
/// # Usage
///
/// ```rust
/// use seqflow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, SequenceError};
    pub use crate::sequence::{BoxedSequence, Sequence, Step};

    pub use crate::multi::*;
    pub use crate::set::*;
    pub use crate::source::*;
    pub use crate::stateful::*;
    pub use crate::stateless::*;
    pub use crate::terminal::*;

    #[cfg(feature = "compose")]
    pub use crate::compose::*;
}

pub mod error;
pub mod sequence;

pub mod multi;
pub mod set;
pub mod source;
pub mod stateful;
pub mod stateless;
pub mod terminal;

#[cfg(feature = "compose")]
pub mod compose;

pub use error::{Result, SequenceError};
pub use sequence::{BoxedSequence, Sequence, Step, Values, capability};
