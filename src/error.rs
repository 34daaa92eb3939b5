//! Construction-time validation errors.
//!
//! Every fallible constructor in this crate validates its arguments eagerly
//! and returns a [`SequenceError`] before any value is pulled. Pulling from a
//! sequence never fails; a panicking user callback propagates to the caller
//! of `next`, and the sequence must not be driven afterwards.

use std::fmt;

/// Errors raised while constructing a sequence, fluent chain or pipeline.
///
/// # Examples
///
/// ```rust
/// use seqflow::SequenceError;
/// use seqflow::multi::concat;
/// use seqflow::source::array;
///
/// let error = concat(vec![array(vec![1])]).unwrap_err();
/// assert_eq!(
///     error,
///     SequenceError::InsufficientSequences { combinator: "concat", minimum: 2, provided: 1 }
/// );
/// assert_eq!(
///     format!("{error}"),
///     "concat: expected at least 2 sequences, received 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Fewer input sequences than the combinator requires.
    InsufficientSequences {
        /// The combinator that rejected its inputs.
        combinator: &'static str,
        /// The minimum number of sequences.
        minimum: usize,
        /// The number of sequences provided.
        provided: usize,
    },
    /// A scalar option is out of range.
    InvalidArgument {
        /// The combinator that rejected the argument.
        combinator: &'static str,
        /// The name of the offending parameter.
        parameter: &'static str,
        /// What the parameter must satisfy.
        reason: &'static str,
    },
    /// A fluent method name that was never registered.
    UnknownMethod {
        /// The requested method name.
        name: String,
    },
    /// A fluent method name registered more than once.
    DuplicateMethod {
        /// The duplicated method name.
        name: String,
    },
    /// A pipeline built without any stage.
    EmptyPipeline,
}

impl SequenceError {
    pub(crate) fn insufficient(combinator: &'static str, minimum: usize, provided: usize) -> Self {
        tracing::debug!(combinator, minimum, provided, "rejected input sequences");
        Self::InsufficientSequences {
            combinator,
            minimum,
            provided,
        }
    }

    pub(crate) fn invalid(
        combinator: &'static str,
        parameter: &'static str,
        reason: &'static str,
    ) -> Self {
        tracing::debug!(combinator, parameter, reason, "rejected argument");
        Self::InvalidArgument {
            combinator,
            parameter,
            reason,
        }
    }
}

impl fmt::Display for SequenceError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientSequences {
                combinator,
                minimum,
                provided,
            } => write!(
                formatter,
                "{combinator}: expected at least {minimum} sequences, received {provided}"
            ),
            Self::InvalidArgument {
                combinator,
                parameter,
                reason,
            } => write!(formatter, "{combinator}: `{parameter}` {reason}"),
            Self::UnknownMethod { name } => write!(formatter, "unknown fluent method `{name}`"),
            Self::DuplicateMethod { name } => {
                write!(formatter, "fluent method `{name}` is registered more than once")
            }
            Self::EmptyPipeline => write!(formatter, "a pipeline requires at least one stage"),
        }
    }
}

impl std::error::Error for SequenceError {}

/// Result alias for fallible constructors.
pub type Result<T> = std::result::Result<T, SequenceError>;

/// Ensures a count-like argument is at least one.
pub(crate) fn ensure_positive(
    combinator: &'static str,
    parameter: &'static str,
    value: usize,
) -> Result<usize> {
    if value == 0 {
        Err(SequenceError::invalid(
            combinator,
            parameter,
            "must be a positive integer",
        ))
    } else {
        Ok(value)
    }
}

/// Ensures at least `minimum` sequences were collected.
pub(crate) fn ensure_sequences<S>(
    combinator: &'static str,
    minimum: usize,
    sequences: &[S],
) -> Result<()> {
    if sequences.len() < minimum {
        Err(SequenceError::insufficient(
            combinator,
            minimum,
            sequences.len(),
        ))
    } else {
        Ok(())
    }
}
