use std::rc::Rc;

use crate::capability;
use crate::error::{Result, ensure_positive};
use crate::sequence::{Sequence, Shared, Step, share, trace_close};

/// Where a strided traversal starts and whether the offset is consumed
/// immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrideOptions {
    /// Index of the first returned value.
    pub offset: usize,
    /// Consume the values before `offset` at construction instead of on the
    /// first pull.
    pub eager: bool,
}

impl StrideOptions {
    /// Options starting at `offset`, consumed lazily.
    pub const fn offset(offset: usize) -> Self {
        Self {
            offset,
            eager: false,
        }
    }

    /// Returns these options with eager offset consumption.
    #[must_use]
    pub const fn eager(self) -> Self {
        Self {
            eager: true,
            ..self
        }
    }
}

/// Pull position shared by the strided combinators.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    pulled: usize,
    target: usize,
}

impl Cursor {
    /// Pulls until the value at `target` is reached.
    fn seek<S: Sequence>(&mut self, upstream: &mut S) -> Step<S::Item> {
        loop {
            match upstream.next() {
                Step::Yielded(value) => {
                    let index = self.pulled;
                    self.pulled += 1;
                    if index >= self.target {
                        return Step::Yielded(value);
                    }
                }
                done @ Step::Done(_) => return done,
            }
        }
    }

    /// Pulls and discards every value before `target`.
    fn skip_to_target<S: Sequence>(&mut self, upstream: &mut S) -> bool {
        while self.pulled < self.target {
            if upstream.next().is_done() {
                return false;
            }
            self.pulled += 1;
        }
        true
    }
}

/// Returns every `stride`-th value starting at an offset.
///
/// Created by [`strided`].
pub struct Strided<S> {
    upstream: S,
    stride: usize,
    options: StrideOptions,
    cursor: Cursor,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence of every `stride`-th value of `upstream`, starting at
/// `options.offset`.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`](crate::SequenceError) when
/// `stride` is zero.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateful::{StrideOptions, strided};
///
/// let values: Vec<i32> = strided(array(vec![1, 2, 3, 4, 5, 6]), 2, StrideOptions::offset(1))?
///     .values()
///     .collect();
/// assert_eq!(values, vec![2, 4, 6]);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn strided<S: Sequence>(
    upstream: S,
    stride: usize,
    options: StrideOptions,
) -> Result<Strided<S>> {
    let stride = ensure_positive("strided", "stride", stride)?;
    let iterable = capability::negotiate([upstream.is_iterable()]);
    let mut sequence = Strided {
        upstream,
        stride,
        options,
        cursor: Cursor {
            pulled: 0,
            target: options.offset,
        },
        finished: false,
        iterable,
    };
    if options.eager {
        sequence.finished = !sequence.cursor.skip_to_target(&mut sequence.upstream);
    }
    Ok(sequence)
}

impl<S: Sequence> Sequence for Strided<S> {
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        match self.cursor.seek(&mut self.upstream) {
            Step::Yielded(value) => {
                self.cursor.target = self.cursor.pulled - 1 + self.stride;
                Step::Yielded(value)
            }
            Step::Done(payload) => {
                self.finished = true;
                Step::Done(payload)
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        trace_close("strided");
        let _ = self.upstream.close(None);
        Step::Done(value)
    }

    fn is_iterable(&self) -> bool {
        self.iterable
    }

    fn fresh(&self) -> Option<Self> {
        if !self.iterable {
            return None;
        }
        strided(self.upstream.fresh()?, self.stride, self.options)
            .ok()
            .map(|fresh| Self {
                iterable: true,
                ..fresh
            })
    }
}

/// Returns values separated by a callback-computed stride.
///
/// Created by [`strided_by`].
pub struct StridedBy<S, F> {
    upstream: S,
    function: Shared<F>,
    options: StrideOptions,
    cursor: Cursor,
    stride: usize,
    emitted: usize,
    finished: bool,
    iterable: bool,
}

/// Returns a sequence which starts at `options.offset` and, after each
/// returned value, advances by `function(&value, input_index, output_index,
/// current_stride)`.
///
/// The stride before the first call is `1`. A returned stride of `0` is
/// treated as `1`.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateful::{StrideOptions, strided_by};
///
/// let growing = strided_by(
///     array(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]),
///     |_, _, _, stride| stride + 1,
///     StrideOptions::default(),
/// );
/// let values: Vec<i32> = growing.values().collect();
/// assert_eq!(values, vec![0, 2, 5, 9]);
/// ```
pub fn strided_by<S, F>(upstream: S, function: F, options: StrideOptions) -> StridedBy<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item, usize, usize, usize) -> usize,
{
    build_strided_by(upstream, share(function), options)
}

fn build_strided_by<S: Sequence, F>(
    upstream: S,
    function: Shared<F>,
    options: StrideOptions,
) -> StridedBy<S, F> {
    let iterable = capability::negotiate([upstream.is_iterable()]);
    let mut sequence = StridedBy {
        upstream,
        function,
        options,
        cursor: Cursor {
            pulled: 0,
            target: options.offset,
        },
        stride: 1,
        emitted: 0,
        finished: false,
        iterable,
    };
    if options.eager {
        sequence.finished = !sequence.cursor.skip_to_target(&mut sequence.upstream);
    }
    sequence
}

impl<S, F> Sequence for StridedBy<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item, usize, usize, usize) -> usize,
{
    type Item = S::Item;

    fn next(&mut self) -> Step<S::Item> {
        if self.finished {
            return Step::done();
        }
        match self.cursor.seek(&mut self.upstream) {
            Step::Yielded(value) => {
                let index = self.cursor.pulled - 1;
                let output = self.emitted;
                self.emitted += 1;
                let stride = (*self.function.borrow_mut())(&value, index, output, self.stride);
                self.stride = stride.max(1);
                self.cursor.target = index + self.stride;
                Step::Yielded(value)
            }
            Step::Done(payload) => {
                self.finished = true;
                Step::Done(payload)
            }
        }
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<S::Item>) -> Step<S::Item> {
        self.finished = true;
        trace_close("strided_by");
        let _ = self.upstream.close(None);
        Step::Done(value)
    }

    fn is_iterable(&self) -> bool {
        self.iterable
    }

    fn fresh(&self) -> Option<Self> {
        if !self.iterable {
            return None;
        }
        Some(Self {
            iterable: true,
            ..build_strided_by(
                self.upstream.fresh()?,
                Rc::clone(&self.function),
                self.options,
            )
        })
    }
}
