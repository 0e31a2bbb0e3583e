//! Situation scoring: threat, formation quality, and tactical advantage.
//!
//! Every score lives in [0, 1]. The aggregate decides whether the step is
//! critical and how much the hybrid agent may trust its learned policy.

use crate::config::TacticsConfig;
use crate::observation::Observation;
use crate::types::Position;

const THREAT_WEIGHT: f64 = 0.4;
const FORMATION_WEIGHT: f64 = 0.3;
const ADVANTAGE_WEIGHT: f64 = 0.3;

const NUMERICAL_SHARE: f64 = 0.7;
const POSITIONAL_SHARE: f64 = 0.3;

/// Derived assessment of one observation. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    pub threat_level: f64,
    pub formation_quality: f64,
    pub tactical_advantage: f64,
    pub is_critical: bool,
    pub confidence: f64,
}

/// Computes [`Situation`]s with a fixed set of constants.
#[derive(Debug, Clone)]
pub struct SituationAnalyzer {
    max_safe_distance: f64,
    ideal_distance: f64,
    positional_advantage: f64,
    critical_threat: f64,
    critical_formation_quality: f64,
}

impl SituationAnalyzer {
    pub fn new(config: &TacticsConfig) -> Self {
        Self {
            max_safe_distance: config.max_safe_distance,
            ideal_distance: config.ideal_formation_distance,
            positional_advantage: config.positional_advantage,
            critical_threat: config.critical_threat,
            critical_formation_quality: config.critical_formation_quality,
        }
    }

    /// Scores a full observation.
    pub fn analyze(&self, observation: &Observation) -> Situation {
        let threat_level =
            self.threat_level(&observation.escort_position, &observation.enemy_positions);
        let formation_quality = self.formation_quality(&observation.own_positions);
        let tactical_advantage = self.tactical_advantage(
            observation.own_positions.len(),
            observation.enemy_positions.len(),
        );

        let is_critical =
            threat_level > self.critical_threat || formation_quality < self.critical_formation_quality;
        let confidence = THREAT_WEIGHT * (1.0 - threat_level)
            + FORMATION_WEIGHT * formation_quality
            + ADVANTAGE_WEIGHT * tactical_advantage;

        Situation {
            threat_level,
            formation_quality,
            tactical_advantage,
            is_critical,
            confidence,
        }
    }

    /// Proximity of the closest enemy to the escort.
    ///
    /// ```text
    /// threat = clamp(1 - min_dist / max_safe_distance, 0, 1)
    /// ```
    ///
    /// Zero with no enemies; non-increasing in the minimum distance.
    pub fn threat_level(&self, escort: &Position, enemies: &[Position]) -> f64 {
        proximity_threat(escort, enemies, self.max_safe_distance)
    }

    /// How closely pairwise spacing matches the ideal distance.
    ///
    /// Zero with fewer than two units.
    pub fn formation_quality(&self, own: &[Position]) -> f64 {
        if own.len() < 2 {
            return 0.0;
        }
        let mut total_deviation = 0.0;
        let mut pairs = 0usize;
        for (i, a) in own.iter().enumerate() {
            for b in &own[i + 1..] {
                total_deviation += (a.distance_to(b) - self.ideal_distance).abs();
                pairs += 1;
            }
        }
        let avg_deviation = total_deviation / pairs as f64;
        unit_clamp(1.0 - avg_deviation / self.ideal_distance)
    }

    /// Numerical superiority blended with the positional placeholder.
    ///
    /// One when no enemy is visible.
    pub fn tactical_advantage(&self, own_count: usize, enemy_count: usize) -> f64 {
        if enemy_count == 0 {
            return 1.0;
        }
        let numerical = own_count as f64 / (own_count + enemy_count) as f64;
        NUMERICAL_SHARE * numerical + POSITIONAL_SHARE * self.positional_advantage
    }
}

/// Linear proximity threat of the closest enemy over `range`.
///
/// # Arguments
///
/// * `escort` - Position being protected
/// * `enemies` - Visible enemy positions
/// * `range` - Distance at which the threat reaches zero
///
/// # Returns
///
/// `clamp(1 - min_dist / range, 0, 1)`, or zero with no enemies.
pub fn proximity_threat(escort: &Position, enemies: &[Position], range: f64) -> f64 {
    if enemies.is_empty() {
        return 0.0;
    }
    let min_distance = enemies
        .iter()
        .map(|e| escort.distance_to(e))
        .fold(f64::INFINITY, f64::min);
    unit_clamp(1.0 - min_distance / range)
}

/// Clamps to [0, 1], sending NaN to 0.
fn unit_clamp(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
