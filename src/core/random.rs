use std::ops::RangeInclusive;

use rand::Rng;

/// Source of randomness for the synthetic generators.
///
/// Every [`Rng`] is a random source, so production code passes a thread or entropy-seeded
/// generator, and tests pass a seeded [`rand::rngs::StdRng`] or a fixed stub.
pub trait RandomSource {
    /// Uniform sample from the closed range. A degenerate range yields its start.
    fn uniform(&mut self, range: RangeInclusive<f64>) -> f64;

    fn coin_flip(&mut self) -> bool {
        self.uniform(0.0..=1.0) > 0.5
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, range: RangeInclusive<f64>) -> f64 {
        if range.start() >= range.end() { *range.start() } else { self.gen_range(range) }
    }
}

/// Always picks the same relative position within the requested range.
#[cfg(test)]
pub struct Fixed(pub f64);

#[cfg(test)]
impl RandomSource for Fixed {
    fn uniform(&mut self, range: RangeInclusive<f64>) -> f64 {
        range.start() + (range.end() - range.start()) * self.0
    }
}
