//! Multi-source combinators.
//!
//! [`concat`] drains its inputs strictly in order; [`map_n`] pulls from all of
//! them in lock-step and ends with the shortest one. Both take any
//! `IntoIterator` of same-typed sequences; box the inputs with
//! [`Sequence::boxed`](crate::Sequence::boxed) to mix concrete types.

mod concat;
mod map_n;

pub use concat::{Concat, concat};
pub use map_n::{MapN, map_n};
