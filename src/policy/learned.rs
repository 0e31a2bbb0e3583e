//! Adapters that turn learned models into [`Policy`]s.
//!
//! The engine treats a learned policy as a black box. Two shapes are
//! supported: any closure producing an [`Action`] directly, and any
//! scorer producing per-unit Q-values over the discrete move set.

use super::trait_::Policy;
use crate::action::{Action, ActionKind, Command, FIGHTER_COUNT};
use crate::observation::Observation;
use crate::types::Direction;

/// Discrete moves a Q-value head scores for each unit.
///
/// Index order is fixed by the model's output layout; `None` means stay.
pub const Q_ACTION_MAP: [Option<Direction>; Q_ACTIONS_PER_UNIT] = [
    Some(Direction::North),
    Some(Direction::South),
    Some(Direction::East),
    Some(Direction::West),
    Some(Direction::Northeast),
    Some(Direction::Northwest),
    Some(Direction::Southeast),
    Some(Direction::Southwest),
    None,
];

/// Q-values per unit.
pub const Q_ACTIONS_PER_UNIT: usize = 9;

/// Units scored by a Q-value head: the fighters, then the escort.
pub const Q_UNITS: usize = FIGHTER_COUNT + 1;

/// Total length of a Q-value vector.
pub const Q_OUTPUT_DIM: usize = Q_UNITS * Q_ACTIONS_PER_UNIT;

/// Wraps a closure `observation -> action` as a policy.
pub struct FnPolicy<F> {
    name: String,
    f: F,
}

impl<F> FnPolicy<F>
where
    F: FnMut(&Observation) -> Action + Send,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Policy for FnPolicy<F>
where
    F: FnMut(&Observation) -> Action + Send,
{
    fn decide(&mut self, observation: &Observation) -> Action {
        (self.f)(observation)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Greedy policy over a Q-value scorer.
///
/// The scorer receives [`Observation::features`] and returns
/// [`Q_OUTPUT_DIM`] values laid out unit-major (`[unit][action]`). Each
/// unit takes the argmax of its block; a short or empty block reads as
/// stay.
pub struct QValuePolicy<F> {
    name: String,
    scorer: F,
}

impl<F> QValuePolicy<F>
where
    F: FnMut(&[f32]) -> Vec<f32> + Send,
{
    pub fn new(name: impl Into<String>, scorer: F) -> Self {
        Self {
            name: name.into(),
            scorer,
        }
    }
}

impl<F> Policy for QValuePolicy<F>
where
    F: FnMut(&[f32]) -> Vec<f32> + Send,
{
    fn decide(&mut self, observation: &Observation) -> Action {
        let q = (self.scorer)(&observation.features());
        decode_q_values(&q)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Decodes a unit-major Q-value vector into an action.
///
/// # Arguments
///
/// * `q` - Up to [`Q_OUTPUT_DIM`] values, [`Q_ACTIONS_PER_UNIT`] per unit,
///   fighters first and the escort last
///
/// # Returns
///
/// The argmax action for every unit. Units whose block is short or
/// missing stay.
pub fn decode_q_values(q: &[f32]) -> Action {
    let command = |unit: usize| {
        let start = unit * Q_ACTIONS_PER_UNIT;
        let block = q.get(start..start + Q_ACTIONS_PER_UNIT).unwrap_or(&[]);
        match argmax(block).and_then(|i| Q_ACTION_MAP[i]) {
            Some(dir) => Command::heading(ActionKind::Move, dir),
            None => Command::stay(),
        }
    };
    Action {
        fighters: std::array::from_fn(|i| command(i)),
        escort: command(FIGHTER_COUNT),
    }
}

/// Index of the largest value, first one on ties; NaN never wins.
fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
