//! Consumers which drain a sequence into a single value.

use crate::error::{Result, ensure_positive};
use crate::sequence::{Sequence, Step};

/// Returns the first value, pulling exactly once.
pub fn first<S: Sequence>(mut sequence: S) -> Option<S::Item> {
    sequence.next().into_yielded()
}

/// Returns the last yielded value, draining the sequence.
///
/// # Examples
///
/// ```rust
/// use seqflow::source::array;
/// use seqflow::terminal::last;
///
/// assert_eq!(last(array(vec![1, 2, 3])), Some(3));
/// assert_eq!(last(array(Vec::<i32>::new())), None);
/// ```
pub fn last<S: Sequence>(mut sequence: S) -> Option<S::Item> {
    let mut last = None;
    while let Step::Yielded(value) = sequence.next() {
        last = Some(value);
    }
    last
}

/// Returns the number of yielded values, draining the sequence.
pub fn length<S: Sequence>(mut sequence: S) -> usize {
    let mut count = 0;
    while !sequence.next().is_done() {
        count += 1;
    }
    count
}

/// Returns the `position`-th value (1-based), or `None` if the sequence ends
/// first.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidArgument`](crate::SequenceError) when
/// `position` is zero.
///
/// # Examples
///
/// ```rust
/// use seqflow::source::array;
/// use seqflow::terminal::nth;
///
/// assert_eq!(nth(array(vec!['a', 'b', 'c']), 2)?, Some('b'));
/// assert_eq!(nth(array(vec!['a']), 2)?, None);
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
pub fn nth<S: Sequence>(mut sequence: S, position: usize) -> Result<Option<S::Item>> {
    let position = ensure_positive("nth", "position", position)?;
    let mut index = 0;
    while let Step::Yielded(value) = sequence.next() {
        index += 1;
        if index == position {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Eagerly pulls and discards `steps` values (all of them for `None`) and
/// returns the sequence.
///
/// # Examples
///
/// ```rust
/// use seqflow::{Sequence, Step};
/// use seqflow::source::array;
/// use seqflow::terminal::advance;
///
/// let mut sequence = advance(array(vec![1, 2, 3]), Some(2));
/// assert_eq!(sequence.next(), Step::Yielded(3));
/// ```
pub fn advance<S: Sequence>(mut sequence: S, steps: Option<usize>) -> S {
    match steps {
        Some(steps) => {
            for _ in 0..steps {
                if sequence.next().is_done() {
                    break;
                }
            }
        }
        None => while !sequence.next().is_done() {},
    }
    sequence
}

/// Copies values into `output[begin..end]`, transformed by
/// `map(value, output_index, iteration_index)`.
///
/// Stops when the range is full or the sequence ends, and returns the number
/// of values written. `end` defaults to `output.len()` and is clamped to it.
///
/// # Examples
///
/// ```rust
/// use seqflow::source::array;
/// use seqflow::terminal::to_array_view;
///
/// let mut output = [0.0; 4];
/// let written = to_array_view(array(vec![1, 2, 3]), &mut output, 1, None, |value, _, _| {
///     f64::from(value) / 2.0
/// });
/// assert_eq!(written, 3);
/// assert_eq!(output, [0.0, 0.5, 1.0, 1.5]);
/// ```
pub fn to_array_view<S, U, F>(
    mut sequence: S,
    output: &mut [U],
    begin: usize,
    end: Option<usize>,
    mut map: F,
) -> usize
where
    S: Sequence,
    F: FnMut(S::Item, usize, usize) -> U,
{
    let end = end.map_or(output.len(), |end| end.min(output.len()));
    let mut written = 0;
    for (position, slot) in output.iter_mut().enumerate().take(end).skip(begin) {
        match sequence.next() {
            Step::Yielded(value) => {
                *slot = map(value, position, written);
                written += 1;
            }
            Step::Done(_) => break,
        }
    }
    written
}

/// Like [`to_array_view`], but fills `output[begin..end]` from the right:
/// the first value lands at `end - 1`.
pub fn to_array_view_right<S, U, F>(
    mut sequence: S,
    output: &mut [U],
    begin: usize,
    end: Option<usize>,
    mut map: F,
) -> usize
where
    S: Sequence,
    F: FnMut(S::Item, usize, usize) -> U,
{
    let end = end.map_or(output.len(), |end| end.min(output.len()));
    let mut written = 0;
    for (position, slot) in output.iter_mut().enumerate().take(end).skip(begin).rev() {
        match sequence.next() {
            Step::Yielded(value) => {
                *slot = map(value, position, written);
                written += 1;
            }
            Step::Done(_) => break,
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{array, constant};

    #[test]
    fn test_length_counts_values() {
        assert_eq!(length(array(vec!['x'; 5])), 5);
    }

    #[test]
    fn test_first_pulls_once() {
        let mut source = array(vec![1, 2]);
        assert_eq!(first(&mut source), Some(1));
        assert_eq!(source.next(), Step::Yielded(2));
    }

    #[test]
    fn test_nth_rejects_zero() {
        assert!(nth(array(vec![1]), 0).is_err());
    }

    #[test]
    fn test_advance_without_steps_drains() {
        let mut sequence = advance(array(vec![1, 2]), None);
        assert_eq!(sequence.next(), Step::Done(None));
    }

    #[test]
    fn test_advance_zero_steps_is_identity() {
        let mut sequence = advance(array(vec![1, 2]), Some(0));
        assert_eq!(sequence.next(), Step::Yielded(1));
    }

    #[test]
    fn test_to_array_view_stops_at_range_end() {
        let mut output = [0; 5];
        let written = to_array_view(constant(7, None), &mut output, 1, Some(3), |value, _, _| value);
        assert_eq!(written, 2);
        assert_eq!(output, [0, 7, 7, 0, 0]);
    }

    #[test]
    fn test_to_array_view_right_fills_backwards() {
        let mut output = ['.'; 4];
        let written = to_array_view_right(
            array(vec!['a', 'b', 'c']),
            &mut output,
            0,
            None,
            |value, _, _| value,
        );
        assert_eq!(written, 3);
        assert_eq!(output, ['.', 'c', 'b', 'a']);
    }

    #[test]
    fn test_to_array_view_indices() {
        let mut output = [(0, 0); 3];
        let _ = to_array_view(array(vec![9, 9]), &mut output, 1, None, |_, position, n| {
            (position, n)
        });
        assert_eq!(output, [(0, 0), (1, 0), (2, 1)]);
    }
}
