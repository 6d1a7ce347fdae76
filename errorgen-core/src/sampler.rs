//! Sampling with replacement from a [`WeightedDistribution`].
//!
//! The random source is always passed in by the caller. Given the same
//! distribution and the same seeded generator, the sequence of draws is
//! identical across runs, as long as the `rand` version stays fixed (`StdRng`
//! output may change between `rand` releases).

use rand::Rng;

use crate::classify::DrawnCode;
use crate::distribution::WeightedDistribution;

/// Draw one code token.
///
/// Picks an integer uniformly in `[0, total_weight)` and returns the code
/// whose cumulative interval contains it (binary search, O(log k)).
pub fn draw<'d, R: Rng>(distribution: &'d WeightedDistribution, rng: &mut R) -> &'d str {
    let point = rng.gen_range(0..distribution.total_weight());
    let idx = distribution.index_for(point);
    &distribution.entries()[idx].code
}

/// A distribution paired with the generator that drives it for one run.
///
/// The sampler owns its generator for the lifetime of the run and never
/// reseeds it.
#[derive(Debug)]
pub struct Sampler<'d, R> {
    distribution: &'d WeightedDistribution,
    rng: R,
    drawn: u64,
}

impl<'d, R: Rng> Sampler<'d, R> {
    pub fn new(distribution: &'d WeightedDistribution, rng: R) -> Self {
        Self {
            distribution,
            rng,
            drawn: 0,
        }
    }

    /// Draw the next token, classified.
    pub fn next_code(&mut self) -> DrawnCode {
        self.drawn += 1;
        DrawnCode::new(draw(self.distribution, &mut self.rng))
    }

    /// Number of draws taken so far.
    pub fn drawn(&self) -> u64 {
        self.drawn
    }

    pub fn distribution(&self) -> &WeightedDistribution {
        self.distribution
    }

    /// Iterator over the next `n` draws, in draw order.
    pub fn take_draws(&mut self, n: u64) -> Draws<'_, 'd, R> {
        Draws {
            sampler: self,
            remaining: n,
        }
    }
}

/// The next `remaining` draws of a [`Sampler`]. See [`Sampler::take_draws`].
#[derive(Debug)]
pub struct Draws<'s, 'd, R> {
    sampler: &'s mut Sampler<'d, R>,
    remaining: u64,
}

impl<R: Rng> Iterator for Draws<'_, '_, R> {
    type Item = DrawnCode;

    fn next(&mut self) -> Option<DrawnCode> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.sampler.next_code())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
