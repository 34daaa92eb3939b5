use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::capability;
use crate::sequence::{Sequence, Step};

/// An infinite stream of uniformly distributed values in `[0, 1)`.
///
/// The stream is deterministic for a given seed; a
/// [`fresh`](Sequence::fresh) traversal replays the stream from the start.
#[derive(Debug, Clone)]
pub struct Uniform {
    generator: StdRng,
    seed: u64,
    finished: bool,
    iterable: bool,
}

/// Creates a seeded uniform pseudo-random sequence.
///
/// # Examples
///
/// ```rust
/// use seqflow::{Sequence, Step};
/// use seqflow::source::randu;
///
/// let mut sequence = randu(42);
/// match sequence.next() {
///     Step::Yielded(value) => assert!((0.0..1.0).contains(&value)),
///     Step::Done(_) => unreachable!("uniform streams are infinite"),
/// }
/// ```
pub fn randu(seed: u64) -> Uniform {
    Uniform {
        generator: StdRng::seed_from_u64(seed),
        seed,
        finished: false,
        iterable: capability::negotiate([]),
    }
}

impl Uniform {
    /// The seed this stream was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Sequence for Uniform {
    type Item = f64;

    fn next(&mut self) -> Step<f64> {
        if self.finished {
            return Step::done();
        }
        Step::Yielded(self.generator.random::<f64>())
    }

    fn supports_close(&self) -> bool {
        true
    }

    fn close(&mut self, value: Option<f64>) -> Step<f64> {
        self.finished = true;
        Step::Done(value)
    }

    fn is_iterable(&self) -> bool {
        self.iterable
    }

    fn fresh(&self) -> Option<Self> {
        self.iterable.then(|| Self {
            iterable: true,
            ..randu(self.seed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::with_iterable_support;

    #[test]
    fn test_same_seed_same_stream() {
        let first: Vec<f64> = randu(7).values().take(10).collect();
        let second: Vec<f64> = randu(7).values().take(10).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fresh_replays_from_start() {
        with_iterable_support(true, || {
            let mut sequence = randu(11);
            let head = sequence.next();
            let _ = sequence.next();
            let mut fresh = sequence.fresh().unwrap();
            assert_eq!(fresh.next(), head);
        });
    }
}
