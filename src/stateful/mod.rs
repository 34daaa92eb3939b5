//! Stateful combinators.
//!
//! These combinators remember something about earlier values: the previous
//! value and run length ([`dedupe_by`]), a pending repetition
//! ([`replicate_by`]), a stride ([`strided_by`]) or a running tally
//! ([`counter`], [`cuany`]).

mod counter;
mod dedupe;
mod replicate;
mod strided;

pub use counter::{Counter, Cumulative, counter, cuany, cuevery, cunone, cusome};
pub use dedupe::{Dedupe, DedupeArgs, DedupeBy, dedupe, dedupe_by};
pub use replicate::{Replicate, ReplicateBy, replicate, replicate_by};
pub use strided::{StrideOptions, Strided, StridedBy, strided, strided_by};
