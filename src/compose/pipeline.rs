//! Runtime pipelines of boxed stages.
//!
//! [`pipeline!`](crate::pipeline) composes thunks statically. A [`Pipeline`]
//! does the same with stages collected at runtime, at the cost of boxing the
//! sequence between each stage.

use std::fmt;

use crate::error::{Result, SequenceError};
use crate::sequence::{BoxedSequence, Sequence};

type Stage<'a, T> = Box<dyn Fn(BoxedSequence<'a, T>) -> Result<BoxedSequence<'a, T>> + 'a>;
type Terminal<'a, T, R> = Box<dyn Fn(BoxedSequence<'a, T>) -> R + 'a>;

/// Collects the stages of a [`Pipeline`].
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::compose::PipelineBuilder;
/// use seqflow::source::array;
/// use seqflow::stateful::dedupe;
/// use seqflow::stateless::head;
///
/// let pipeline = PipelineBuilder::new()
///     .try_stage(|sequence| dedupe(sequence, 1))
///     .stage(|sequence| head(sequence, 2))
///     .build()?;
///
/// let values: Vec<i32> = pipeline.apply(array(vec![1, 1, 2, 2, 3]))?.values().collect();
/// assert_eq!(values, vec![1, 2]);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub struct PipelineBuilder<'a, T> {
    stages: Vec<Stage<'a, T>>,
}

impl<'a, T: 'a> PipelineBuilder<'a, T> {
    /// Creates a builder without stages.
    #[must_use]
    pub const fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends an infallible stage.
    #[must_use]
    pub fn stage<S, F>(mut self, stage: F) -> Self
    where
        S: Sequence<Item = T> + 'a,
        F: Fn(BoxedSequence<'a, T>) -> S + 'a,
    {
        self.stages
            .push(Box::new(move |sequence| Ok(stage(sequence).boxed())));
        self
    }

    /// Appends a stage whose construction can fail.
    #[must_use]
    pub fn try_stage<S, F>(mut self, stage: F) -> Self
    where
        S: Sequence<Item = T> + 'a,
        F: Fn(BoxedSequence<'a, T>) -> Result<S> + 'a,
    {
        self.stages
            .push(Box::new(move |sequence| stage(sequence).map(Sequence::boxed)));
        self
    }

    /// Returns the number of stages collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if no stage was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Finishes a pipeline whose result is the final sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyPipeline`] when no stage was added.
    pub fn build(self) -> Result<Pipeline<'a, T, BoxedSequence<'a, T>>> {
        if self.stages.is_empty() {
            tracing::debug!("rejected pipeline without stages");
            return Err(SequenceError::EmptyPipeline);
        }
        Ok(Pipeline {
            stages: self.stages,
            terminal: Box::new(|sequence| sequence),
        })
    }

    /// Finishes a pipeline ending in a terminal consumer.
    ///
    /// The terminal counts as a stage, so this never fails.
    pub fn build_with<R, F>(self, terminal: F) -> Pipeline<'a, T, R>
    where
        F: Fn(BoxedSequence<'a, T>) -> R + 'a,
    {
        Pipeline {
            stages: self.stages,
            terminal: Box::new(terminal),
        }
    }
}

impl<'a, T: 'a> Default for PipelineBuilder<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PipelineBuilder<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PipelineBuilder")
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// An ordered list of stages threading a source sequence to a result.
///
/// # Examples
///
/// ```rust
/// use seqflow::compose::PipelineBuilder;
/// use seqflow::source::array;
/// use seqflow::stateless::filter;
/// use seqflow::terminal::length;
///
/// let count_even = PipelineBuilder::new()
///     .stage(|sequence| filter(sequence, |value: &i32, _| value % 2 == 0))
///     .build_with(length);
///
/// assert_eq!(count_even.apply(array(vec![1, 2, 3, 4]))?, 2);
/// assert_eq!(count_even.apply(array(vec![6]))?, 1);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub struct Pipeline<'a, T, R> {
    stages: Vec<Stage<'a, T>>,
    terminal: Terminal<'a, T, R>,
}

impl<'a, T: 'a, R> Pipeline<'a, T, R> {
    /// Threads `source` through every stage in order.
    ///
    /// # Errors
    ///
    /// Propagates the first stage construction error.
    pub fn apply<Q>(&self, source: Q) -> Result<R>
    where
        Q: Sequence<Item = T> + 'a,
    {
        let mut sequence = source.boxed();
        for stage in &self.stages {
            sequence = stage(sequence)?;
        }
        Ok((self.terminal)(sequence))
    }

    /// Returns the number of sequence stages, excluding the terminal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if the pipeline only has a terminal consumer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<T, R> fmt::Debug for Pipeline<'_, T, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::array;
    use crate::stateful::replicate;
    use crate::stateless::map;
    use crate::terminal::last;

    #[test]
    fn test_empty_pipeline_is_rejected() {
        let result = PipelineBuilder::<i32>::new().build();
        assert_eq!(result.err(), Some(SequenceError::EmptyPipeline));
    }

    #[test]
    fn test_stage_error_propagates() {
        let pipeline = PipelineBuilder::new()
            .try_stage(|sequence| replicate(sequence, 0))
            .build_with(last);
        assert!(pipeline.apply(array(vec![1])).is_err());
    }

    #[test]
    fn test_stages_run_in_order() {
        let pipeline = PipelineBuilder::new()
            .stage(|sequence| map(sequence, |value: i32, _| value + 1))
            .stage(|sequence| map(sequence, |value: i32, _| value * 10))
            .build_with(last);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.apply(array(vec![1, 2])), Ok(Some(30)));
    }
}
