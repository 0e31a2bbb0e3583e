//! Agents driven by a single policy: rule-based and learned.

use tracing::debug;

use super::clock::{Clock, MonotonicClock};
use super::guard::StepGuard;
use super::metrics::PerformanceStats;
use super::Agent;
use crate::action::Action;
use crate::config::TacticsConfig;
use crate::observation::Observation;
use crate::policy::{Policy, RuleBasedPolicy};
use crate::{generate_id, Id};

/// Agent that always follows the threat-banded rule-based tactics.
pub struct RuleBasedAgent {
    id: Id,
    policy: RuleBasedPolicy,
    guard: StepGuard,
}

impl RuleBasedAgent {
    pub fn new(config: TacticsConfig) -> Self {
        let guard = StepGuard::new(Box::new(MonotonicClock::new()), config.step_budget());
        Self {
            id: generate_id(),
            policy: RuleBasedPolicy::new(config),
            guard,
        }
    }

    /// Replaces the time source used for the step budget.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.guard.set_clock(clock);
        self
    }

    pub fn policy(&self) -> &RuleBasedPolicy {
        &self.policy
    }
}

impl Agent for RuleBasedAgent {
    fn step(&mut self, observation: &Observation) -> Action {
        let policy = &mut self.policy;
        self.guard.run(&self.id, |_| policy.decide(observation))
    }

    fn reset(&mut self) {
        debug!(agent = %self.id, steps = self.guard.timings().total_steps(), "episode reset");
        self.guard.reset();
        self.policy.reset();
    }

    fn performance_stats(&self) -> Option<PerformanceStats> {
        self.guard.timings().stats()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "rule_based"
    }
}

/// Agent that always follows an injected learned policy.
pub struct LearnedAgent {
    id: Id,
    policy: Box<dyn Policy>,
    guard: StepGuard,
}

impl LearnedAgent {
    pub fn new(config: &TacticsConfig, policy: Box<dyn Policy>) -> Self {
        Self {
            id: generate_id(),
            policy,
            guard: StepGuard::new(Box::new(MonotonicClock::new()), config.step_budget()),
        }
    }

    /// Replaces the time source used for the step budget.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.guard.set_clock(clock);
        self
    }
}

impl Agent for LearnedAgent {
    fn step(&mut self, observation: &Observation) -> Action {
        let policy = &mut self.policy;
        self.guard.run(&self.id, |_| policy.decide(observation))
    }

    fn reset(&mut self) {
        debug!(agent = %self.id, steps = self.guard.timings().total_steps(), "episode reset");
        self.guard.reset();
        self.policy.reset();
    }

    fn performance_stats(&self) -> Option<PerformanceStats> {
        self.guard.timings().stats()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "learned"
    }
}
