//! The [`thunk!`] macro for fixing every argument but the sequence.
//!
//! A thunk turns a combinator `f(sequence, a, b, ..)` into a unary closure
//! `|sequence| f(sequence, a, b, ..)`. Fixed arguments are cloned on each
//! call, so the thunk can be applied any number of times.

/// Partially applies a combinator, leaving its leading sequence argument
/// open.
///
/// Fixed arguments must implement [`Clone`]. Up to four fixed arguments are
/// supported, which covers every combinator in this crate.
///
/// # Examples
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateless::{head, map};
/// use seqflow::thunk;
///
/// let first_two = thunk!(head, 2);
/// let doubled = thunk!(map, |value: i32, _: usize| value * 2);
///
/// let values: Vec<i32> = doubled(first_two(array(vec![1, 2, 3]))).values().collect();
/// assert_eq!(values, vec![2, 4]);
/// ```
///
/// Fallible combinators keep their `Result`:
///
/// ```rust
/// use seqflow::Sequence;
/// use seqflow::source::array;
/// use seqflow::stateful::replicate;
/// use seqflow::thunk;
///
/// let twice = thunk!(replicate, 2);
/// let values: Vec<char> = twice(array(vec!['a', 'b']))?.values().collect();
/// assert_eq!(values, vec!['a', 'a', 'b', 'b']);
/// let never = thunk!(replicate, 0);
/// assert!(never(array(vec!['a'])).is_err());
/// # Ok::<(), seqflow::SequenceError>(())
/// ```
#[macro_export]
macro_rules! thunk {
    ($combinator:expr $(,)?) => {{
        let combinator = $combinator;
        move |sequence| combinator(sequence)
    }};

    ($combinator:expr, $arg1:expr $(,)?) => {{
        let combinator = $combinator;
        let arg1 = $arg1;
        move |sequence| combinator(sequence, arg1.clone())
    }};

    ($combinator:expr, $arg1:expr, $arg2:expr $(,)?) => {{
        let combinator = $combinator;
        let arg1 = $arg1;
        let arg2 = $arg2;
        move |sequence| combinator(sequence, arg1.clone(), arg2.clone())
    }};

    ($combinator:expr, $arg1:expr, $arg2:expr, $arg3:expr $(,)?) => {{
        let combinator = $combinator;
        let arg1 = $arg1;
        let arg2 = $arg2;
        let arg3 = $arg3;
        move |sequence| combinator(sequence, arg1.clone(), arg2.clone(), arg3.clone())
    }};

    ($combinator:expr, $arg1:expr, $arg2:expr, $arg3:expr, $arg4:expr $(,)?) => {{
        let combinator = $combinator;
        let arg1 = $arg1;
        let arg2 = $arg2;
        let arg3 = $arg3;
        let arg4 = $arg4;
        move |sequence| {
            combinator(
                sequence,
                arg1.clone(),
                arg2.clone(),
                arg3.clone(),
                arg4.clone(),
            )
        }
    }};
}
