//! Source adapters.
//!
//! Sources turn plain data into [`Sequence`](crate::Sequence)s:
//!
//! - [`array`]: an iterable sequence over shared, indexable data
//! - [`from_iter`] / [`from_fn`]: adapters over std iterators and closures (not iterable)
//! - [`empty`] / [`constant`]: trivial sequences
//! - [`step`], [`incrspace`], [`linspace`], [`logspace`], [`unitspace`]: numeric generators
//! - [`randu`]: a seeded uniform pseudo-random stream (feature `random`)
//!
//! # Examples
//!
//! ```rust
//! use seqflow::Sequence;
//! use seqflow::source::{array, linspace};
//!
//! let letters: Vec<char> = array(vec!['a', 'b']).values().collect();
//! assert_eq!(letters, vec!['a', 'b']);
//!
//! let points: Vec<f64> = linspace(0.0, 1.0, 3).values().collect();
//! assert_eq!(points, vec![0.0, 0.5, 1.0]);
//! ```

mod adapter;
mod array;
mod generator;
#[cfg(feature = "random")]
mod random;

pub use adapter::{FnSequence, IterSequence, from_fn, from_iter};
pub use array::{ArraySequence, array};
pub use generator::{
    Arithmetic, Constant, Empty, Logspace, constant, empty, incrspace, linspace, logspace, step,
    unitspace,
};
#[cfg(feature = "random")]
pub use random::{Uniform, randu};
