//! Observation snapshot and its encodings.
//!
//! Ingestion is lenient: an absent field takes its default, a point with
//! too few coordinates is zero-padded, and a non-numeric coordinate reads
//! as zero.

use crate::action::FIGHTER_COUNT;
use crate::types::Position;

/// Enemy fighter slots in the flat feature encoding.
pub const ENEMY_SLOTS: usize = 4;

/// Length of [`Observation::features`]: own fighters, escort, enemy
/// fighters, enemy escort, two coordinates each.
pub const FEATURE_DIM: usize = 2 * (FIGHTER_COUNT + 1 + ENEMY_SLOTS + 1);

/// Everything the engine sees in one decision step.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Observation {
    /// Own fighter positions, in command order.
    pub own_positions: Vec<Position>,
    pub escort_position: Position,
    pub enemy_positions: Vec<Position>,
    pub enemy_escort_position: Position,
}

impl Observation {
    pub fn new(
        own_positions: Vec<Position>,
        escort_position: Position,
        enemy_positions: Vec<Position>,
        enemy_escort_position: Position,
    ) -> Self {
        Self {
            own_positions,
            escort_position,
            enemy_positions,
            enemy_escort_position,
        }
    }

    /// Position of own fighter `i`, or the origin if it was not observed.
    pub fn own_unit(&self, i: usize) -> Position {
        self.own_positions.get(i).copied().unwrap_or_default()
    }

    /// Own fighter positions padded (or cut) to exactly [`FIGHTER_COUNT`].
    pub fn fighter_slots(&self) -> [Position; FIGHTER_COUNT] {
        std::array::from_fn(|i| self.own_unit(i))
    }

    /// Flat feature vector for learned policies.
    ///
    /// Layout: `own[4] ++ escort ++ enemy[4] ++ enemy_escort`, each an
    /// `(x, y)` pair; missing units are zero-filled and extra enemies are
    /// dropped.
    pub fn features(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(FEATURE_DIM);
        let mut push = |p: Position| {
            out.push(p.x as f32);
            out.push(p.y as f32);
        };
        for i in 0..FIGHTER_COUNT {
            push(self.own_unit(i));
        }
        push(self.escort_position);
        for i in 0..ENEMY_SLOTS {
            push(self.enemy_positions.get(i).copied().unwrap_or_default());
        }
        push(self.enemy_escort_position);
        out
    }
}

#[cfg(feature = "serde")]
mod json {
    use serde_json::Value;

    use super::Observation;
    use crate::error::ObservationError;
    use crate::types::Position;

    impl Observation {
        /// Parses the JSON wire form.
        ///
        /// ```text
        /// { "own_positions": [[x, y], ...], "escort_position": [x, y],
        ///   "enemy_positions": [[x, y], ...], "enemy_escort_position": [x, y] }
        /// ```
        ///
        /// Points may also be written as `{"x": .., "y": ..}`.
        pub fn from_json(s: &str) -> Result<Self, ObservationError> {
            let value: Value = serde_json::from_str(s)?;
            Self::from_value(&value)
        }

        /// Builds an observation from an already-parsed JSON value.
        pub fn from_value(value: &Value) -> Result<Self, ObservationError> {
            let obj = value
                .as_object()
                .ok_or_else(|| ObservationError::NotAnObject(kind_of(value)))?;
            Ok(Self {
                own_positions: obj.get("own_positions").map(points).unwrap_or_default(),
                escort_position: obj.get("escort_position").map(point).unwrap_or_default(),
                enemy_positions: obj.get("enemy_positions").map(points).unwrap_or_default(),
                enemy_escort_position: obj
                    .get("enemy_escort_position")
                    .map(point)
                    .unwrap_or_default(),
            })
        }
    }

    fn kind_of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn coord(value: Option<&Value>) -> f64 {
        value.and_then(Value::as_f64).unwrap_or(0.0)
    }

    fn point(value: &Value) -> Position {
        match value {
            Value::Array(xs) => Position::new(coord(xs.first()), coord(xs.get(1))),
            Value::Object(m) => Position::new(coord(m.get("x")), coord(m.get("y"))),
            _ => Position::origin(),
        }
    }

    fn points(value: &Value) -> Vec<Position> {
        value
            .as_array()
            .map(|xs| xs.iter().map(point).collect())
            .unwrap_or_default()
    }
}
