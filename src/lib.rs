//! escort-tactics - situational decision engine for escort skirmishes
//!
//! Scores a 2D snapshot of four fighters, their escort, and the opposing
//! side, then picks defensive, offensive, or formation-hold commands. A
//! hybrid agent blends the rule-based tactics with an injectable learned
//! policy under a per-step wall-clock budget.

pub mod action;
pub mod agent;
pub mod config;
pub mod error;
pub mod observation;
pub mod policy;
pub mod situation;
pub mod tactics;
pub mod types;

pub use action::{Action, ActionKind, Command, FIGHTER_COUNT};
pub use agent::{
    build_agent, Agent, AgentKind, Clock, HybridAgent, LearnedAgent, ManualClock, MonotonicClock,
    PerformanceStats, RuleBasedAgent,
};
pub use config::TacticsConfig;
pub use error::{ConfigError, ObservationError};
pub use observation::Observation;
pub use policy::{FnPolicy, Policy, QValuePolicy, RandomPolicy, RuleBasedPolicy};
pub use situation::{Situation, SituationAnalyzer};
pub use tactics::{FormationKind, Tactic};
pub use types::{Direction, Position};

/// Identifier type used for agent instances.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
