//! Composition of combinators (feature `compose`).
//!
//! Three ways to chain combinators are provided:
//!
//! - [`flow`] / [`Flow`]: a typed wrapper whose methods apply combinators
//! - [`FlowSpec`] / [`FluentSequence`]: named methods registered at runtime,
//!   chained while each method returns a sequence
//! - [`thunk!`](crate::thunk) and [`pipeline!`](crate::pipeline): partial
//!   application and left-to-right composition, with [`Pipeline`] as the
//!   runtime counterpart
//!
//! # Examples
//!
//! ```rust
//! use seqflow::compose::flow;
//! use seqflow::source::array;
//! use seqflow::stateless::{filter, head};
//! use seqflow::terminal::length;
//! use seqflow::{pipeline, thunk};
//!
//! let odd = filter(array(vec![1, 2, 3, 4, 5]), |value: &i32, _| value % 2 == 1);
//! let nested = length(head(odd, 2));
//! let fluent = flow(array(vec![1, 2, 3, 4, 5]))
//!     .filter(|value, _| value % 2 == 1)
//!     .head(2)
//!     .length();
//! let first_two_odd = pipeline!(
//!     thunk!(filter, |value: &i32, _: usize| value % 2 == 1),
//!     thunk!(head, 2),
//!     length,
//! );
//! let piped = first_two_odd(array(vec![1, 2, 3, 4, 5]));
//!
//! assert_eq!(nested, 2);
//! assert_eq!(fluent, nested);
//! assert_eq!(piped, nested);
//! ```

mod flow;
mod fluent;
mod pipeline;
mod pipeline_macro;
mod thunk_macro;

pub use flow::{Flow, flow};
pub use fluent::{Chained, FlowConstructor, FlowSpec, FluentSequence, MethodOutput, Value};
pub use pipeline::{Pipeline, PipelineBuilder};
