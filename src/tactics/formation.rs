//! Formation hold: fighters take up fixed offsets around the escort.

use std::fmt;
use std::str::FromStr;

use crate::action::{Action, ActionKind, Command, FIGHTER_COUNT};
use crate::config::TacticsConfig;
use crate::observation::Observation;
use crate::types::Position;

/// Shape flown around the escort while holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FormationKind {
    /// Front, left, right, rear.
    #[default]
    Diamond,
    /// Abreast, evenly spaced.
    Line,
    /// Point forward, two trailing wings, one rear.
    Wedge,
    /// Four points on a circle at 0°, 90°, 180°, 270°.
    Circle,
}

impl FormationKind {
    pub const ALL: [FormationKind; 4] = [
        FormationKind::Diamond,
        FormationKind::Line,
        FormationKind::Wedge,
        FormationKind::Circle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormationKind::Diamond => "diamond",
            FormationKind::Line => "line",
            FormationKind::Wedge => "wedge",
            FormationKind::Circle => "circle",
        }
    }
}

impl fmt::Display for FormationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown formation '{}'", s))
    }
}

/// Computes formation slots and the orders to reach them.
#[derive(Debug, Clone)]
pub struct FormationManager {
    kind: FormationKind,
    diamond_offset: f64,
    line_spacing: f64,
    wedge_offset: f64,
    circle_radius: f64,
}

impl FormationManager {
    pub fn new(config: &TacticsConfig) -> Self {
        Self {
            kind: config.formation,
            diamond_offset: config.diamond_offset,
            line_spacing: config.line_spacing,
            wedge_offset: config.wedge_offset,
            circle_radius: config.circle_radius,
        }
    }

    pub fn kind(&self) -> FormationKind {
        self.kind
    }

    /// Switches the shape flown from the next step on.
    pub fn set_kind(&mut self, kind: FormationKind) {
        self.kind = kind;
    }

    /// Slot positions around `center` for the current shape.
    pub fn slots(&self, center: Position) -> [Position; FIGHTER_COUNT] {
        let offsets: [(f64, f64); FIGHTER_COUNT] = match self.kind {
            FormationKind::Diamond => {
                let o = self.diamond_offset;
                [(0.0, o), (-o, 0.0), (o, 0.0), (0.0, -o)]
            }
            FormationKind::Line => {
                let s = self.line_spacing;
                [(-1.5 * s, 0.0), (-0.5 * s, 0.0), (0.5 * s, 0.0), (1.5 * s, 0.0)]
            }
            FormationKind::Wedge => {
                let o = self.wedge_offset;
                [(0.0, o), (-o, -0.5 * o), (o, -0.5 * o), (0.0, -o)]
            }
            FormationKind::Circle => {
                let r = self.circle_radius;
                let at = |deg: f64| {
                    let rad = deg.to_radians();
                    (r * rad.cos(), r * rad.sin())
                };
                [at(0.0), at(90.0), at(180.0), at(270.0)]
            }
        };
        offsets.map(|(dx, dy)| center + Position::new(dx, dy))
    }

    /// Orders every fighter toward its slot; the escort stays.
    pub fn maintain_formation(&self, observation: &Observation) -> Action {
        let slots = self.slots(observation.escort_position);
        let own = observation.fighter_slots();
        Action {
            fighters: std::array::from_fn(|i| Command::toward(ActionKind::Move, own[i], slots[i])),
            escort: Command::stay(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn manager(kind: FormationKind) -> FormationManager {
        FormationManager::new(&TacticsConfig {
            formation: kind,
            ..TacticsConfig::default()
        })
    }

    #[test]
    fn diamond_slots() {
        let slots = manager(FormationKind::Diamond).slots(Position::new(5.0, 5.0));
        assert_eq!(
            slots,
            [
                Position::new(5.0, 55.0),
                Position::new(-45.0, 5.0),
                Position::new(55.0, 5.0),
                Position::new(5.0, -45.0),
            ]
        );
    }

    #[test]
    fn line_slots_are_evenly_spaced() {
        let slots = manager(FormationKind::Line).slots(Position::origin());
        let xs: Vec<f64> = slots.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-60.0, -20.0, 20.0, 60.0]);
        assert!(slots.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn wedge_slots() {
        let slots = manager(FormationKind::Wedge).slots(Position::origin());
        assert_eq!(slots[0], Position::new(0.0, 45.0));
        assert_eq!(slots[1], Position::new(-45.0, -22.5));
        assert_eq!(slots[2], Position::new(45.0, -22.5));
        assert_eq!(slots[3], Position::new(0.0, -45.0));
    }

    #[test]
    fn circle_slots_on_radius() {
        let center = Position::new(1.0, -2.0);
        for p in manager(FormationKind::Circle).slots(center) {
            assert!((p.distance_to(&center) - 60.0).abs() < 1e-9);
        }
    }

    #[test]
    fn maintain_moves_toward_slots() {
        let obs = Observation {
            own_positions: vec![Position::origin(); 4],
            ..Observation::default()
        };
        let action = manager(FormationKind::Diamond).maintain_formation(&obs);
        let dirs: Vec<_> = action.fighters.iter().map(|c| c.direction.unwrap()).collect();
        assert_eq!(
            dirs,
            vec![Direction::North, Direction::West, Direction::East, Direction::South]
        );
        assert!(action.fighters.iter().all(|c| c.kind == ActionKind::Move));
        assert_eq!(action.escort, Command::stay());
    }

    #[test]
    fn set_kind_switches_shape() {
        let mut m = manager(FormationKind::Diamond);
        m.set_kind(FormationKind::Line);
        assert_eq!(m.kind(), FormationKind::Line);
        assert_eq!(m.slots(Position::origin())[0], Position::new(-60.0, 0.0));
    }

    #[test]
    fn parse_formation_kind() {
        assert_eq!("Wedge".parse::<FormationKind>(), Ok(FormationKind::Wedge));
        assert!("box".parse::<FormationKind>().is_err());
    }
}
