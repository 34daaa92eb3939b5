//! The [`pipeline!`] macro for left-to-right composition of thunks.

/// Composes thunks left to right into a single closure.
///
/// `pipeline!(t0, t1, t2)` produces `|sequence| t2(t1(t0(sequence)))`. The
/// last thunk may be a terminal consumer, in which case the pipeline returns
/// its scalar.
///
/// # Examples
///
/// ```rust
/// use seqflow::source::array;
/// use seqflow::stateless::{filter, head, map};
/// use seqflow::terminal::last;
/// use seqflow::{pipeline, thunk};
///
/// let largest_odd_square = pipeline!(
///     thunk!(filter, |value: &i32, _: usize| value % 2 == 1),
///     thunk!(map, |value: i32, _: usize| value * value),
///     thunk!(head, 3),
///     last,
/// );
/// assert_eq!(largest_odd_square(array(vec![1, 2, 3, 4, 5, 6, 7])), Some(25));
/// ```
#[macro_export]
macro_rules! pipeline {
    ($thunk:expr $(,)?) => {
        $thunk
    };

    ($first:expr, $($rest:expr),+ $(,)?) => {{
        let first = $first;
        let rest = $crate::pipeline!($($rest),+);
        move |sequence| rest(first(sequence))
    }};
}

#[cfg(test)]
mod tests {
    use crate::Sequence;
    use crate::source::array;
    use crate::stateless::{head, push, unshift};
    use crate::thunk;

    #[test]
    fn test_pipeline_applies_left_to_right() {
        let framed = pipeline!(thunk!(unshift, [0]), thunk!(push, [9]), thunk!(head, 3));
        let values: Vec<i32> = framed(array(vec![1, 2, 3])).values().collect();
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[test]
    fn test_single_thunk_pipeline() {
        let only = pipeline!(thunk!(head, 1));
        let values: Vec<i32> = only(array(vec![4, 5])).values().collect();
        assert_eq!(values, vec![4]);
    }
}
