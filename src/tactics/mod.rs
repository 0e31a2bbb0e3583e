//! Rule-based tactics.
//!
//! Each tactic turns an [`Observation`](crate::Observation) into a complete
//! [`Action`](crate::Action). [`Tactic::select`] picks one from the threat
//! level alone.

pub mod defensive;
pub mod emergency;
pub mod formation;
pub mod offensive;

use std::fmt;

pub use defensive::DefensiveTactics;
pub use emergency::EmergencyTactics;
pub use formation::{FormationKind, FormationManager};
pub use offensive::OffensiveTactics;

use crate::config::TacticsConfig;
use crate::types::Position;

/// The three mutually exclusive behaviours of the rule-based selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tactic {
    Defensive,
    Offensive,
    FormationHold,
}

impl Tactic {
    /// Picks a tactic from the threat level.
    ///
    /// Strictly above the defensive threshold defends, strictly below the
    /// offensive threshold attacks, anything in between (bounds included)
    /// holds formation.
    pub fn select(threat_level: f64, config: &TacticsConfig) -> Tactic {
        if threat_level > config.defensive_threshold {
            Tactic::Defensive
        } else if threat_level < config.offensive_threshold {
            Tactic::Offensive
        } else {
            Tactic::FormationHold
        }
    }
}

impl fmt::Display for Tactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tactic::Defensive => write!(f, "defensive"),
            Tactic::Offensive => write!(f, "offensive"),
            Tactic::FormationHold => write!(f, "formation_hold"),
        }
    }
}

/// Sum of unit vectors pointing from each threat toward `from`.
///
/// Threats coincident with `from` contribute nothing.
pub(crate) fn escape_vector(from: &Position, threats: &[Position]) -> Position {
    threats
        .iter()
        .filter_map(|t| t.direction_to(from))
        .fold(Position::origin(), |acc, v| acc + v)
}
