//! Agents: the `step` / `reset` capability and its three strategies.
//!
//! Every agent owns its clock, random source, and performance counters;
//! nothing is shared between instances, so agents can be evaluated on
//! separate threads without locking.

pub mod arbiter;
pub mod clock;
pub mod guard;
pub mod hybrid;
pub mod metrics;
pub mod simple;


use std::fmt;
use std::str::FromStr;

pub use arbiter::{Arbitration, HybridArbiter};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use guard::{Deadline, StepGuard};
pub use hybrid::HybridAgent;
pub use metrics::{PerformanceStats, StepTimings};
pub use simple::{LearnedAgent, RuleBasedAgent};

use crate::action::Action;
use crate::config::TacticsConfig;
use crate::error::ConfigError;
use crate::observation::Observation;
use crate::policy::{Policy, RandomPolicy};

/// A decision maker driven one observation at a time.
///
/// `step` never fails: budget overruns and internal faults degrade to
/// [`Action::hold`].
pub trait Agent: Send {
    /// Decides the action for one step.
    fn step(&mut self, observation: &Observation) -> Action;

    /// Starts a new episode, clearing per-episode state and counters.
    fn reset(&mut self);

    /// Step timings since the last reset, `None` before the first step.
    fn performance_stats(&self) -> Option<PerformanceStats>;

    /// Unique identifier of this instance.
    fn id(&self) -> &str;

    /// Returns a human-readable name for this agent's strategy.
    fn name(&self) -> &str;
}

/// Strategy selector for [`build_agent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    RuleBased,
    Learned,
    Hybrid,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::RuleBased => write!(f, "rule_based"),
            AgentKind::Learned => write!(f, "ml_agent"),
            AgentKind::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rule_based" | "rule-based" | "rules" => Ok(AgentKind::RuleBased),
            "ml_agent" | "ml" | "learned" => Ok(AgentKind::Learned),
            "hybrid" => Ok(AgentKind::Hybrid),
            other => Err(format!(
                "unknown agent kind '{}'; expected rule_based, ml_agent or hybrid",
                other
            )),
        }
    }
}

/// Validates `config` and builds an agent of the requested kind.
///
/// # Arguments
///
/// * `kind` - Strategy to build
/// * `config` - Constants shared by every strategy
/// * `learned` - Policy for the learned and hybrid agents; without one they
///   fall back to a [`RandomPolicy`] seeded from `config.seed`, standing in
///   for an untrained model
///
/// # Returns
///
/// The boxed agent, or the first [`ConfigError`] found in `config`.
pub fn build_agent(
    kind: AgentKind,
    config: TacticsConfig,
    learned: Option<Box<dyn Policy>>,
) -> Result<Box<dyn Agent>, ConfigError> {
    config.validate()?;
    let seed = config.seed;
    let learned_or_random = || match learned {
        Some(policy) => policy,
        None => Box::new(RandomPolicy::seeded(seed)) as Box<dyn Policy>,
    };
    let agent: Box<dyn Agent> = match kind {
        AgentKind::RuleBased => Box::new(RuleBasedAgent::new(config)),
        AgentKind::Learned => Box::new(LearnedAgent::new(&config, learned_or_random())),
        AgentKind::Hybrid => Box::new(HybridAgent::new(config, learned_or_random())),
    };
    Ok(agent)
}
