//! Hybrid arbitration between rule-based and learned decisions.

use std::fmt;

use rand::Rng;

use crate::config::TacticsConfig;
use crate::situation::Situation;

/// Which decision path a hybrid step takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arbitration {
    /// Critical situation: rule-based emergency evasion, learned policy skipped.
    Emergency,
    /// Learned policy output.
    Learned,
    /// Rule-based tactic output.
    RuleBased,
}

impl fmt::Display for Arbitration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arbitration::Emergency => write!(f, "emergency"),
            Arbitration::Learned => write!(f, "learned"),
            Arbitration::RuleBased => write!(f, "rule_based"),
        }
    }
}

/// Chooses a decision path from the situation.
///
/// 1. Critical → [`Arbitration::Emergency`].
/// 2. Confidence above `learned_confidence` → [`Arbitration::Learned`].
/// 3. Otherwise one uniform draw `u` from the injected RNG:
///    `u < learned_weight` → learned, else rule-based.
///
/// Step 3 is a random blend, not an ensemble: two arbiters only agree
/// step for step when their RNGs are seeded identically.
#[derive(Debug, Clone)]
pub struct HybridArbiter<R> {
    learned_confidence: f64,
    learned_weight: f64,
    rng: R,
}

impl<R: Rng> HybridArbiter<R> {
    pub fn new(config: &TacticsConfig, rng: R) -> Self {
        Self {
            learned_confidence: config.learned_confidence,
            learned_weight: config.learned_weight,
            rng,
        }
    }

    pub fn arbitrate(&mut self, situation: &Situation) -> Arbitration {
        if situation.is_critical {
            Arbitration::Emergency
        } else if situation.confidence > self.learned_confidence {
            Arbitration::Learned
        } else if self.rng.gen::<f64>() < self.learned_weight {
            Arbitration::Learned
        } else {
            Arbitration::RuleBased
        }
    }
}
