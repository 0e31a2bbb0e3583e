//! Random policy for testing and baselines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::learned::{decode_q_values, Q_OUTPUT_DIM};
use super::trait_::Policy;
use crate::action::Action;
use crate::observation::Observation;

/// Uniformly random moves.
///
/// Each unit independently draws one of the nine discrete moves (eight
/// headings or stay). Stands in for an untrained learned policy and serves
/// as a lower-bound baseline.
pub struct RandomPolicy<R = StdRng> {
    rng: R,
}

impl RandomPolicy<StdRng> {
    /// Creates a reproducible random policy.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> RandomPolicy<R> {
    /// Creates a random policy drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> Policy for RandomPolicy<R> {
    fn decide(&mut self, _observation: &Observation) -> Action {
        // Random scores decoded greedily give a uniform pick per unit.
        let q: Vec<f32> = (0..Q_OUTPUT_DIM).map(|_| self.rng.gen::<f32>()).collect();
        decode_q_values(&q)
    }

    fn name(&self) -> &str {
        "random"
    }
}
