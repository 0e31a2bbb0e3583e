//! Offensive tactic: two fighters go for the enemy escort, the rest engage
//! whichever enemy fighter is closest to them.

use crate::action::{Action, ActionKind, Command};
use crate::observation::Observation;
use crate::types::Position;

/// Fighters (lowest indices first) sent after the enemy escort.
const ESCORT_HUNTERS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct OffensiveTactics;

impl OffensiveTactics {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, observation: &Observation) -> Action {
        let own = observation.fighter_slots();
        Action {
            fighters: std::array::from_fn(|i| {
                let target = self.target_for(i, own[i], observation);
                Command::toward(ActionKind::Attack, own[i], target)
            }),
            escort: Command::stay(),
        }
    }

    /// Target point for fighter `index` at `position`.
    ///
    /// With no enemy fighters visible everyone goes for the enemy escort.
    pub fn target_for(&self, index: usize, position: Position, observation: &Observation) -> Position {
        if index < ESCORT_HUNTERS {
            return observation.enemy_escort_position;
        }
        position
            .nearest(&observation.enemy_positions)
            .copied()
            .unwrap_or(observation.enemy_escort_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn scenario() -> Observation {
        Observation::new(
            vec![
                Position::new(0.0, 0.0),
                Position::new(10.0, 0.0),
                Position::new(0.0, 10.0),
                Position::new(10.0, 10.0),
            ],
            Position::new(5.0, 5.0),
            vec![Position::new(-100.0, 10.0), Position::new(200.0, 10.0)],
            Position::new(0.0, 500.0),
        )
    }

    #[test]
    fn first_two_hunt_enemy_escort() {
        let action = OffensiveTactics::new().execute(&scenario());
        assert_eq!(action.fighters[0].target, Some(Position::new(0.0, 500.0)));
        assert_eq!(action.fighters[0].direction, Some(Direction::North));
        assert_eq!(action.fighters[1].target, Some(Position::new(0.0, 500.0)));
    }

    #[test]
    fn rest_engage_nearest_enemy() {
        let action = OffensiveTactics::new().execute(&scenario());
        assert_eq!(action.fighters[2].target, Some(Position::new(-100.0, 10.0)));
        assert_eq!(action.fighters[2].direction, Some(Direction::West));
        assert_eq!(action.fighters[3].target, Some(Position::new(-100.0, 10.0)));
        assert!(action.fighters.iter().all(|c| c.kind == ActionKind::Attack));
        assert_eq!(action.escort, Command::stay());
    }

    #[test]
    fn no_enemy_fighters_falls_back_to_escort() {
        let mut obs = scenario();
        obs.enemy_positions.clear();
        let action = OffensiveTactics::new().execute(&obs);
        assert!(action
            .fighters
            .iter()
            .all(|c| c.target == Some(Position::new(0.0, 500.0))));
    }
}
