//! Dynamic fluent chaining over named methods.
//!
//! A [`FlowSpec`] maps method names to combinators. Building it yields a
//! [`FlowConstructor`], which wraps source sequences into
//! [`FluentSequence`]s. Calling a method by name applies its combinator and
//! either wraps the resulting sequence again or returns a scalar [`Value`],
//! so a chain continues only while each step produces a sequence.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, SequenceError};
use crate::sequence::{BoxedSequence, Sequence, Step};

/// A scalar produced by a fluent method.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value<T> {
    /// The result of a test such as `any` or `some`.
    Bool(bool),
    /// A count such as the result of `length`.
    Count(usize),
    /// A single optional value such as the result of `first` or `nth`.
    Item(Option<T>),
}

/// The result of a fluent method: a sequence to keep chaining, or a scalar.
pub enum MethodOutput<'a, T> {
    /// A sequence, wrapped again into a [`FluentSequence`].
    Sequence(BoxedSequence<'a, T>),
    /// A scalar ending the chain.
    Value(Value<T>),
}

impl<'a, T> From<BoxedSequence<'a, T>> for MethodOutput<'a, T> {
    fn from(sequence: BoxedSequence<'a, T>) -> Self {
        Self::Sequence(sequence)
    }
}

impl<T> From<Value<T>> for MethodOutput<'_, T> {
    fn from(value: Value<T>) -> Self {
        Self::Value(value)
    }
}

impl<T> From<bool> for MethodOutput<'_, T> {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl<T> From<usize> for MethodOutput<'_, T> {
    fn from(value: usize) -> Self {
        Self::Value(Value::Count(value))
    }
}

impl<T> From<Option<T>> for MethodOutput<'_, T> {
    fn from(value: Option<T>) -> Self {
        Self::Value(Value::Item(value))
    }
}

impl<T> fmt::Debug for MethodOutput<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(sequence) => formatter.debug_tuple("Sequence").field(sequence).finish(),
            Self::Value(value) => formatter.debug_tuple("Value").field(value).finish(),
        }
    }
}

type Method<'a, T, A> = Rc<dyn Fn(BoxedSequence<'a, T>, A) -> Result<MethodOutput<'a, T>> + 'a>;
type Methods<'a, T, A> = Rc<HashMap<String, Method<'a, T, A>>>;

/// Registers the named methods of a fluent sequence.
///
/// Every method receives the wrapped sequence and an argument of type `A`.
/// Use an enum for `A` when methods need different arguments.
///
/// # Examples
///
/// ```rust
/// use seqflow::compose::{FlowSpec, Value};
/// use seqflow::source::array;
/// use seqflow::stateless::head;
/// use seqflow::terminal::some;
/// use seqflow::Sequence;
///
/// let constructor = FlowSpec::<i32, usize>::new()
///     .method("head", |sequence, limit: usize| Ok(head(sequence, limit).boxed()))
///     .method("some", |sequence, count: usize| some(sequence, count))
///     .build()?;
///
/// let chained = constructor
///     .construct(array(vec![1, 1, 0, 1, 1, 1]))
///     .call("head", 5)?
///     .call("some", 3)?;
/// assert_eq!(chained.into_value(), Some(Value::Bool(true)));
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub struct FlowSpec<'a, T, A> {
    methods: Vec<(String, Method<'a, T, A>)>,
}

impl<'a, T: 'a, A: 'a> FlowSpec<'a, T, A> {
    /// Creates an empty method table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            methods: Vec::new(),
        }
    }

    /// Registers `function` under `name`.
    #[must_use]
    pub fn method<N, R, F>(mut self, name: N, function: F) -> Self
    where
        N: Into<String>,
        R: Into<MethodOutput<'a, T>>,
        F: Fn(BoxedSequence<'a, T>, A) -> Result<R> + 'a,
    {
        let method: Method<'a, T, A> =
            Rc::new(move |sequence, args| function(sequence, args).map(Into::into));
        self.methods.push((name.into(), method));
        self
    }

    /// Finishes the spec.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::DuplicateMethod`] when a name was registered
    /// twice.
    pub fn build(self) -> Result<FlowConstructor<'a, T, A>> {
        let mut methods = HashMap::with_capacity(self.methods.len());
        for (name, method) in self.methods {
            if methods.contains_key(&name) {
                tracing::debug!(name = %name, "rejected duplicate fluent method");
                return Err(SequenceError::DuplicateMethod { name });
            }
            methods.insert(name, method);
        }
        Ok(FlowConstructor {
            methods: Rc::new(methods),
        })
    }
}

impl<'a, T: 'a, A: 'a> Default for FlowSpec<'a, T, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps source sequences into [`FluentSequence`]s sharing one method table.
pub struct FlowConstructor<'a, T, A> {
    methods: Methods<'a, T, A>,
}

impl<'a, T, A> FlowConstructor<'a, T, A> {
    /// Wraps `sequence`.
    pub fn construct<S>(&self, sequence: S) -> FluentSequence<'a, T, A>
    where
        S: Sequence<Item = T> + 'a,
    {
        FluentSequence {
            sequence: sequence.boxed(),
            methods: Rc::clone(&self.methods),
        }
    }

    /// Returns `true` if `name` was registered.
    #[must_use]
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn methods(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<T, A> Clone for FlowConstructor<'_, T, A> {
    fn clone(&self) -> Self {
        Self {
            methods: Rc::clone(&self.methods),
        }
    }
}

impl<T, A> fmt::Debug for FlowConstructor<'_, T, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FlowConstructor")
            .field("methods", &self.methods())
            .finish()
    }
}

/// A sequence whose named methods come from a [`FlowConstructor`].
pub struct FluentSequence<'a, T, A> {
    sequence: BoxedSequence<'a, T>,
    methods: Methods<'a, T, A>,
}

impl<'a, T, A> FluentSequence<'a, T, A> {
    /// Applies the method registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::UnknownMethod`] for an unregistered name,
    /// and otherwise whatever the method's combinator returns.
    pub fn call(self, name: &str, args: A) -> Result<Chained<'a, T, A>> {
        let Some(method) = self.methods.get(name).map(Rc::clone) else {
            tracing::debug!(name, "unknown fluent method");
            return Err(SequenceError::UnknownMethod {
                name: name.to_owned(),
            });
        };
        match method(self.sequence, args)? {
            MethodOutput::Sequence(sequence) => Ok(Chained::Sequence(Self {
                sequence,
                methods: self.methods,
            })),
            MethodOutput::Value(value) => Ok(Chained::Value(value)),
        }
    }

    /// Returns the wrapped sequence.
    pub fn into_inner(self) -> BoxedSequence<'a, T> {
        self.sequence
    }
}

impl<T, A> Sequence for FluentSequence<'_, T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Step<T> {
        self.sequence.next()
    }

    fn supports_close(&self) -> bool {
        self.sequence.supports_close()
    }

    fn close(&mut self, value: Option<T>) -> Step<T> {
        self.sequence.close(value)
    }

    fn is_iterable(&self) -> bool {
        self.sequence.is_iterable()
    }

    fn fresh(&self) -> Option<Self> {
        Some(Self {
            sequence: self.sequence.fresh()?,
            methods: Rc::clone(&self.methods),
        })
    }
}

impl<T, A> fmt::Debug for FluentSequence<'_, T, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FluentSequence")
            .field("sequence", &self.sequence)
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// The result of [`FluentSequence::call`].
#[derive(Debug)]
pub enum Chained<'a, T, A> {
    /// The method produced a sequence; chaining can continue.
    Sequence(FluentSequence<'a, T, A>),
    /// The method produced a scalar.
    Value(Value<T>),
}

impl<'a, T, A> Chained<'a, T, A> {
    /// Calls `name` on the chained sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidArgument`] when the previous method
    /// produced a scalar, which has no fluent methods, and otherwise the
    /// errors of [`FluentSequence::call`].
    pub fn call(self, name: &str, args: A) -> Result<Self> {
        match self {
            Self::Sequence(sequence) => sequence.call(name, args),
            Self::Value(_) => Err(SequenceError::invalid(
                "flow",
                "receiver",
                "is not a fluent sequence",
            )),
        }
    }

    /// Returns the sequence, if the last method produced one.
    pub fn into_sequence(self) -> Option<FluentSequence<'a, T, A>> {
        match self {
            Self::Sequence(sequence) => Some(sequence),
            Self::Value(_) => None,
        }
    }

    /// Returns the scalar, if the last method produced one.
    pub fn into_value(self) -> Option<Value<T>> {
        match self {
            Self::Sequence(_) => None,
            Self::Value(value) => Some(value),
        }
    }
}
