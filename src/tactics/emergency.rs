//! Emergency evasion, used when the situation is critical.
//!
//! Cheap by construction: one pass over the enemies per fighter, no slot
//! geometry.

use crate::action::{Action, ActionKind, Command};
use crate::observation::Observation;
use crate::types::{Direction, Position};

use super::escape_vector;

/// Heading used when a fighter has nothing to run from.
const DEFAULT_EVASION: Direction = Direction::North;

#[derive(Debug, Clone, Default)]
pub struct EmergencyTactics;

impl EmergencyTactics {
    pub fn new() -> Self {
        Self
    }

    /// Every fighter breaks away from the enemies around it; the escort
    /// falls back to the centre of its own fighters.
    pub fn execute(&self, observation: &Observation) -> Action {
        let own = observation.fighter_slots();
        let enemies = &observation.enemy_positions;

        let escort = match Position::centroid(&observation.own_positions) {
            Some(center) => Command::toward(ActionKind::Move, observation.escort_position, center),
            None => Command::stay(),
        };

        Action {
            fighters: std::array::from_fn(|i| {
                Command::heading(ActionKind::Evade, Self::safe_direction(own[i], enemies))
            }),
            escort,
        }
    }

    /// Heading away from every enemy as seen from `from`.
    pub fn safe_direction(from: Position, enemies: &[Position]) -> Direction {
        escape_vector(&from, enemies)
            .normalized()
            .map(|v| Direction::from_vector(v.x, v.y))
            .unwrap_or(DEFAULT_EVASION)
    }
}
