//! Sources of daily arrival counts.

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use tracing::warn;

/// Largest daily arrival rate accepted by the simulator.
pub const MAX_ARRIVAL_RATE: f64 = 1e12;

/// Produces the number of arrivals for one simulated day.
///
/// The simulator never touches a global generator: every run receives its
/// source explicitly, so seeded or scripted sources give reproducible traces.
pub trait ArrivalSource {
    /// Draws one count from a Poisson distribution with mean `lambda`.
    ///
    /// Callers guarantee `lambda` is finite and in `[0, MAX_ARRIVAL_RATE]`.
    fn sample_poisson(&mut self, lambda: f64) -> u64;
}

/// Poisson arrivals drawn from a random number generator.
#[derive(Debug, Clone)]
pub struct RngArrivals<R> {
    rng: R,
}

impl<R: Rng> RngArrivals<R> {
    /// Wraps a random number generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> ArrivalSource for RngArrivals<R> {
    fn sample_poisson(&mut self, lambda: f64) -> u64 {
        if lambda <= 0.0 {
            return 0;
        }
        match Poisson::new(lambda) {
            Ok(dist) => dist.sample(&mut self.rng) as u64,
            Err(e) => {
                warn!(lambda, error = %e, "poisson rate rejected, using the mean");
                lambda.round() as u64
            }
        }
    }
}

/// A fixed sequence of arrival counts, ignoring the requested mean.
///
/// Yields zero once the sequence is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedArrivals {
    counts: Vec<u64>,
    pos: usize,
}

impl ScriptedArrivals {
    /// Creates a source that replays `counts` in order.
    pub fn new(counts: impl Into<Vec<u64>>) -> Self {
        Self {
            counts: counts.into(),
            pos: 0,
        }
    }
}

impl ArrivalSource for ScriptedArrivals {
    fn sample_poisson(&mut self, _lambda: f64) -> u64 {
        let n = self.counts.get(self.pos).copied().unwrap_or(0);
        self.pos += 1;
        n
    }
}
