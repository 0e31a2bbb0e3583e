//! Hybrid agent: rule-based tactics blended with a learned policy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::arbiter::{Arbitration, HybridArbiter};
use super::clock::{Clock, MonotonicClock};
use super::guard::StepGuard;
use super::metrics::PerformanceStats;
use super::Agent;
use crate::action::Action;
use crate::config::TacticsConfig;
use crate::observation::Observation;
use crate::policy::{Policy, RuleBasedPolicy};
use crate::situation::{Situation, SituationAnalyzer};
use crate::{generate_id, Id};

/// Scores every observation, then lets a [`HybridArbiter`] route the step
/// to emergency evasion, the learned policy, or the rule-based tactics.
///
/// Only the chosen path is evaluated, so a critical step never touches the
/// learned policy.
pub struct HybridAgent<R = StdRng> {
    id: Id,
    analyzer: SituationAnalyzer,
    rule_based: RuleBasedPolicy,
    learned: Box<dyn Policy>,
    arbiter: HybridArbiter<R>,
    guard: StepGuard,
    last: Option<(Situation, Arbitration)>,
}

impl HybridAgent<StdRng> {
    /// Creates a hybrid agent whose blend is seeded from `config.seed`.
    pub fn new(config: TacticsConfig, learned: Box<dyn Policy>) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, learned, rng)
    }
}

impl<R: Rng + Send> HybridAgent<R> {
    /// Creates a hybrid agent drawing blend decisions from `rng`.
    ///
    /// # Arguments
    ///
    /// * `config` - Scoring constants, thresholds and step budget
    /// * `learned` - Policy consulted on confident or blended steps
    /// * `rng` - Source of the blend draw, one value per blended step
    pub fn with_rng(config: TacticsConfig, learned: Box<dyn Policy>, rng: R) -> Self {
        Self {
            id: generate_id(),
            analyzer: SituationAnalyzer::new(&config),
            arbiter: HybridArbiter::new(&config, rng),
            guard: StepGuard::new(Box::new(MonotonicClock::new()), config.step_budget()),
            rule_based: RuleBasedPolicy::new(config),
            learned,
            last: None,
        }
    }

    /// Replaces the time source used for the step budget.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.guard.set_clock(clock);
        self
    }

    /// Situation and routing of the most recent completed analysis.
    pub fn last_decision(&self) -> Option<(Situation, Arbitration)> {
        self.last
    }
}

impl<R: Rng + Send> Agent for HybridAgent<R> {
    fn step(&mut self, observation: &Observation) -> Action {
        let Self {
            id,
            analyzer,
            rule_based,
            learned,
            arbiter,
            guard,
            last,
        } = self;

        guard.run(id.as_str(), |deadline| {
            let situation = analyzer.analyze(observation);
            if deadline.exceeded() {
                return Action::hold();
            }

            let route = arbiter.arbitrate(&situation);
            *last = Some((situation, route));
            debug!(
                agent = %id,
                threat = situation.threat_level,
                formation = situation.formation_quality,
                advantage = situation.tactical_advantage,
                confidence = situation.confidence,
                %route,
                "hybrid step"
            );

            match route {
                Arbitration::Emergency => rule_based.emergency_action(observation),
                Arbitration::Learned => learned.decide(observation),
                Arbitration::RuleBased => rule_based.decide(observation),
            }
        })
    }

    fn reset(&mut self) {
        debug!(agent = %self.id, steps = self.guard.timings().total_steps(), "episode reset");
        self.guard.reset();
        self.rule_based.reset();
        self.learned.reset();
        self.last = None;
    }

    fn performance_stats(&self) -> Option<PerformanceStats> {
        self.guard.timings().stats()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "hybrid"
    }
}
