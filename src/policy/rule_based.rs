//! Rule-based policy: threat-banded tactic selection.

use tracing::debug;

use super::trait_::Policy;
use crate::action::Action;
use crate::config::TacticsConfig;
use crate::observation::Observation;
use crate::situation::proximity_threat;
use crate::tactics::{
    DefensiveTactics, EmergencyTactics, FormationManager, OffensiveTactics, Tactic,
};

/// Picks defensive, offensive, or formation-hold behaviour from the
/// escort's threat level, and exposes the emergency evasion used by the
/// hybrid agent on critical steps.
#[derive(Debug, Clone)]
pub struct RuleBasedPolicy {
    config: TacticsConfig,
    defensive: DefensiveTactics,
    offensive: OffensiveTactics,
    formation: FormationManager,
    emergency: EmergencyTactics,
}

impl RuleBasedPolicy {
    pub fn new(config: TacticsConfig) -> Self {
        Self {
            defensive: DefensiveTactics::new(&config),
            offensive: OffensiveTactics::new(),
            formation: FormationManager::new(&config),
            emergency: EmergencyTactics::new(),
            config,
        }
    }

    /// Tactic that [`Policy::decide`] would run for `observation`.
    ///
    /// Threat is measured over `tactic_threat_range`, which is wider than
    /// the hybrid scorer's `max_safe_distance`.
    pub fn select_tactic(&self, observation: &Observation) -> Tactic {
        let threat = proximity_threat(
            &observation.escort_position,
            &observation.enemy_positions,
            self.config.tactic_threat_range,
        );
        Tactic::select(threat, &self.config)
    }

    /// Runs a given tactic regardless of the threat level.
    pub fn execute(&self, tactic: Tactic, observation: &Observation) -> Action {
        match tactic {
            Tactic::Defensive => self.defensive.execute(observation),
            Tactic::Offensive => self.offensive.execute(observation),
            Tactic::FormationHold => self.formation.maintain_formation(observation),
        }
    }

    /// Fast evasion for critical situations.
    pub fn emergency_action(&self, observation: &Observation) -> Action {
        self.emergency.execute(observation)
    }

    pub fn formation_mut(&mut self) -> &mut FormationManager {
        &mut self.formation
    }
}

impl Policy for RuleBasedPolicy {
    fn decide(&mut self, observation: &Observation) -> Action {
        let tactic = self.select_tactic(observation);
        debug!(%tactic, "rule-based tactic selected");
        self.execute(tactic, observation)
    }

    fn name(&self) -> &str {
        "rule_based"
    }

    fn reset(&mut self) {
        self.formation.set_kind(self.config.formation);
    }
}
