//! Terminal consumers.
//!
//! Consumers pull from a sequence eagerly and return a scalar. They take the
//! sequence by value; pass `&mut sequence` to keep using it afterwards.
//! Consumers whose answer can be known early ([`any`], [`every`], [`some`],
//! [`nth`], [`first`]) stop pulling as soon as it is.

mod consume;
mod predicate;
mod truthy;

pub use consume::{advance, first, last, length, nth, to_array_view, to_array_view_right};
pub use predicate::{any, any_by, every, every_by, none, none_by, some, some_by};
pub use truthy::Truthy;
