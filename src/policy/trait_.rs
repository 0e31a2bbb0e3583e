//! Policy trait for the decision engine.

use crate::action::Action;
use crate::observation::Observation;

/// Maps one observation to one complete action.
///
/// Implementations may keep internal state (an RNG, a network, counters),
/// hence `&mut self`. They must be `Send` so agents can be moved onto
/// worker threads for parallel evaluation.
pub trait Policy: Send {
    /// Chooses the action for this step.
    fn decide(&mut self, observation: &Observation) -> Action;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;

    /// Clears per-episode state. No-op by default.
    fn reset(&mut self) {}
}
