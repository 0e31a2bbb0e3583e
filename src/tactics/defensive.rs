//! Defensive tactic: fighters form a shield between the escort and the
//! threat while the escort slips away.

use crate::action::{Action, ActionKind, Command, FIGHTER_COUNT};
use crate::config::TacticsConfig;
use crate::observation::Observation;
use crate::types::{Direction, Position};

use super::escape_vector;

/// Angles of the guard diamond flown when no enemy is visible.
const GUARD_ANGLES_DEG: [f64; FIGHTER_COUNT] = [45.0, 135.0, 225.0, 315.0];

#[derive(Debug, Clone)]
pub struct DefensiveTactics {
    shield_distance: f64,
    shield_spread: f64,
    guard_radius: f64,
}

impl DefensiveTactics {
    pub fn new(config: &TacticsConfig) -> Self {
        Self {
            shield_distance: config.shield_distance,
            shield_spread: config.shield_spread,
            guard_radius: config.guard_radius,
        }
    }

    pub fn execute(&self, observation: &Observation) -> Action {
        let escort = observation.escort_position;
        let enemies = &observation.enemy_positions;
        let slots = self.defense_positions(escort, enemies);
        let own = observation.fighter_slots();

        let escort_cmd = match escape_vector(&escort, enemies).normalized() {
            Some(v) => Command::heading(ActionKind::Evade, Direction::from_vector(v.x, v.y)),
            None => Command::stay(),
        };

        Action {
            fighters: std::array::from_fn(|i| {
                Command::toward(ActionKind::Defend, own[i], slots[i])
            }),
            escort: escort_cmd,
        }
    }

    /// Shield slots for the four fighters.
    ///
    /// With enemies visible the slots form a line `shield_distance` out from
    /// the escort toward the enemy centroid, spread perpendicular to that
    /// axis. Without enemies they form a guard diamond of `guard_radius`.
    pub fn defense_positions(
        &self,
        escort: Position,
        enemies: &[Position],
    ) -> [Position; FIGHTER_COUNT] {
        let Some(centroid) = Position::centroid(enemies) else {
            return GUARD_ANGLES_DEG.map(|deg| {
                let rad = deg.to_radians();
                escort + Position::new(rad.cos(), rad.sin()) * self.guard_radius
            });
        };

        let t = escort
            .direction_to(&centroid)
            .unwrap_or(Position::new(1.0, 0.0));
        let base = escort + t * self.shield_distance;
        std::array::from_fn(|i| {
            let offset = (i as f64 - 1.5) * self.shield_spread / 2.0;
            base + Position::new(t.y, -t.x) * offset
        })
    }
}
