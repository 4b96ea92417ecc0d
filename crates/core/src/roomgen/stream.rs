//! Seeded pseudo-random stream shared by seed derivation and candidate selection.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Deterministic integer stream reproducible from a 32-bit seed on any platform.
#[derive(Clone, Debug)]
pub struct SeededStream {
    rng: ChaCha8Rng,
    draws: u64,
}

impl SeededStream {
    pub fn new(seed: i32) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(u64::from(seed.cast_unsigned())), draws: 0 }
    }

    /// Uniform integer in `[min, max]` inclusive. Returns `min` when the range is empty.
    pub fn rand_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            self.draws += 1;
            return min;
        }
        let span = (i64::from(max) - i64::from(min)) as u64 + 1;
        (i64::from(min) + self.below(span) as i64) as i32
    }

    /// Uniform index into a collection of `len` elements; `len` must be non-zero.
    /// Same draw as `rand_range(0, len - 1)` for every length that fits in an `i32`.
    pub fn rand_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        match u64::try_from(len) {
            Ok(span) if span > 1 => self.below(span) as usize,
            _ => {
                self.draws += 1;
                0
            }
        }
    }

    /// One logical draw uniform in `[0, span)`, `span >= 2`.
    fn below(&mut self, span: u64) -> u64 {
        self.draws += 1;
        // Values below 2^64 mod span would bias the low end.
        let threshold = span.wrapping_neg() % span;
        loop {
            let value = self.rng.next_u64();
            if value >= threshold {
                return value % span;
            }
        }
    }

    /// Number of bounded draws taken so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}
