//! Set combinators.
//!
//! These combinators keep a [`Buffer`] of the keys they have seen so that
//! every value is emitted at most once. Keys are the values themselves
//! ([`union`], [`intersection`], [`unique`]) or the result of a caller-supplied
//! hash function (the `_by_hash` variants). When two values share a key, the
//! first one encountered wins.
//!
//! Buffers never shrink. These combinators are meant for finite inputs;
//! [`intersection`] additionally drains every input but the first before
//! emitting anything.

mod buffer;
mod intersection;
mod union;
mod unique;

pub use buffer::{Buffer, BufferHasher};
pub use intersection::{Intersection, IntersectionByHash, intersection, intersection_by_hash};
pub use union::{Union, UnionByHash, union, union_by_hash};
pub use unique::{Unique, UniqueBy, UniqueByHash, unique, unique_by, unique_by_hash};

fn key_of<T: Clone>(value: &T) -> T {
    value.clone()
}
