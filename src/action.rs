//! Per-step commands issued to the own side.

use std::fmt;

use crate::types::{Direction, Position};

/// Number of own fighters commanded each step.
pub const FIGHTER_COUNT: usize = 4;

/// What a unit is told to do this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ActionKind {
    Attack,
    Defend,
    Evade,
    Move,
    Stay,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Attack => "attack",
            ActionKind::Defend => "defend",
            ActionKind::Evade => "evade",
            ActionKind::Move => "move",
            ActionKind::Stay => "stay",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single unit's order: a kind, plus an optional heading and target point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    pub kind: ActionKind,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub direction: Option<Direction>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub target: Option<Position>,
}

impl Command {
    /// Hold position.
    pub fn stay() -> Self {
        Self {
            kind: ActionKind::Stay,
            direction: None,
            target: None,
        }
    }

    /// An order along a heading with no target point.
    pub fn heading(kind: ActionKind, direction: Direction) -> Self {
        Self {
            kind,
            direction: Some(direction),
            target: None,
        }
    }

    /// An order toward `target`, heading quantized from `from`.
    pub fn toward(kind: ActionKind, from: Position, target: Position) -> Self {
        Self {
            kind,
            direction: Some(from.heading_to(&target)),
            target: Some(target),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(d) = self.direction {
            write!(f, " {}", d)?;
        }
        if let Some(t) = self.target {
            write!(f, " -> {}", t)?;
        }
        Ok(())
    }
}

/// Orders for one decision step: one per own fighter plus the escort.
///
/// The fighter count is fixed by the type, so every action carries exactly
/// [`FIGHTER_COUNT`] fighter entries whatever the observation looked like.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub fighters: [Command; FIGHTER_COUNT],
    pub escort: Command,
}

impl Action {
    /// The safe fallback: every unit, escort included, stays put.
    pub fn hold() -> Self {
        Self {
            fighters: [Command::stay(); FIGHTER_COUNT],
            escort: Command::stay(),
        }
    }

    /// True when this is exactly [`Action::hold`].
    pub fn is_hold(&self) -> bool {
        *self == Self::hold()
    }

    /// All five commands, fighters first.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.fighters.iter().chain(std::iter::once(&self.escort))
    }

    /// Serializes to the JSON wire shape `{ "fighters": [..], "escort": {..} }`.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> String {
        // Plain data with no maps keyed by non-strings; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::hold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_is_all_stay() {
        let a = Action::hold();
        assert_eq!(a.fighters.len(), FIGHTER_COUNT);
        assert!(a.commands().all(|c| c.kind == ActionKind::Stay));
        assert_eq!(a.commands().count(), FIGHTER_COUNT + 1);
        assert!(a.is_hold());
    }

    #[test]
    fn toward_quantizes_heading() {
        let c = Command::toward(
            ActionKind::Attack,
            Position::new(0.0, 0.0),
            Position::new(0.0, -5.0),
        );
        assert_eq!(c.direction, Some(Direction::South));
        assert_eq!(c.target, Some(Position::new(0.0, -5.0)));
    }

    #[test]
    fn command_display() {
        let c = Command::heading(ActionKind::Evade, Direction::Northwest);
        assert_eq!(c.to_string(), "evade northwest");
        assert_eq!(Command::stay().to_string(), "stay");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_shape() {
        let mut a = Action::hold();
        a.fighters[0] = Command::heading(ActionKind::Move, Direction::East);
        let v: serde_json::Value = serde_json::from_str(&a.to_json()).unwrap();
        assert_eq!(v["fighters"].as_array().unwrap().len(), 4);
        assert_eq!(v["fighters"][0]["kind"], "move");
        assert_eq!(v["fighters"][0]["direction"], "east");
        assert_eq!(v["escort"]["kind"], "stay");
        assert!(v["escort"].get("direction").is_none());
    }
}
