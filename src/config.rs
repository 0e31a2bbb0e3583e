//! Configuration for the tactical decision engine.

use std::time::Duration;

use crate::error::ConfigError;
use crate::tactics::FormationKind;

/// Read-only tuning constants supplied to agents at construction.
///
/// Controls situation scoring, tactic thresholds, formation geometry,
/// hybrid arbitration, and the per-step time budget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TacticsConfig {
    // --- Situation scoring ---
    /// Escort-to-enemy distance at which threat drops to zero.
    pub max_safe_distance: f64,
    /// Ideal pairwise spacing between own fighters.
    pub ideal_formation_distance: f64,
    /// Placeholder positional term of the advantage score, in [0, 1].
    pub positional_advantage: f64,

    // --- Tactic selection ---
    /// Escort-to-enemy distance at which the rule-based threat drops to zero.
    pub tactic_threat_range: f64,
    /// Threat above which the defensive tactic runs.
    pub defensive_threshold: f64,
    /// Threat below which the offensive tactic runs.
    pub offensive_threshold: f64,
    /// Threat above which the situation is critical.
    pub critical_threat: f64,
    /// Formation quality below which the situation is critical.
    pub critical_formation_quality: f64,

    // --- Defensive geometry ---
    /// Distance of the shield line from the escort, toward the threat.
    pub shield_distance: f64,
    /// Lateral spread of the shield line.
    pub shield_spread: f64,
    /// Radius of the guard diamond used when no enemy is visible.
    pub guard_radius: f64,

    // --- Formation hold geometry ---
    /// Formation flown while holding.
    pub formation: FormationKind,
    pub diamond_offset: f64,
    pub line_spacing: f64,
    pub wedge_offset: f64,
    pub circle_radius: f64,

    // --- Hybrid arbitration ---
    /// Confidence above which the learned policy is trusted outright.
    pub learned_confidence: f64,
    /// Probability of picking the learned policy in a blended step.
    pub learned_weight: f64,
    /// Seed for agents that build their own random source.
    pub seed: u64,

    // --- Timing ---
    /// Wall-clock budget per decision, in milliseconds.
    pub max_step_time_ms: u64,
}

impl TacticsConfig {
    /// Per-step wall-clock budget.
    pub fn step_budget(&self) -> Duration {
        Duration::from_millis(self.max_step_time_ms)
    }

    /// Checks that every constant is usable by the scorers and tactics.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_safe_distance", self.max_safe_distance)?;
        positive("tactic_threat_range", self.tactic_threat_range)?;
        positive("ideal_formation_distance", self.ideal_formation_distance)?;
        positive("shield_distance", self.shield_distance)?;
        non_negative("shield_spread", self.shield_spread)?;
        positive("guard_radius", self.guard_radius)?;
        positive("diamond_offset", self.diamond_offset)?;
        positive("line_spacing", self.line_spacing)?;
        positive("wedge_offset", self.wedge_offset)?;
        positive("circle_radius", self.circle_radius)?;

        unit_interval("positional_advantage", self.positional_advantage)?;
        unit_interval("defensive_threshold", self.defensive_threshold)?;
        unit_interval("offensive_threshold", self.offensive_threshold)?;
        unit_interval("critical_threat", self.critical_threat)?;
        unit_interval("critical_formation_quality", self.critical_formation_quality)?;
        unit_interval("learned_confidence", self.learned_confidence)?;
        unit_interval("learned_weight", self.learned_weight)?;

        if self.offensive_threshold > self.defensive_threshold {
            return Err(ConfigError::InvalidValue {
                field: "offensive_threshold",
                reason: format!(
                    "{} exceeds defensive_threshold {}",
                    self.offensive_threshold, self.defensive_threshold
                ),
            });
        }
        if self.max_step_time_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_step_time_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parses a TOML document; absent keys keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: TacticsConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    #[cfg(feature = "serde")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{} is not a positive finite number", value),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{} is not a non-negative finite number", value),
        })
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{} is outside [0, 1]", value),
        })
    }
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self {
            max_safe_distance: 500.0,
            ideal_formation_distance: 100.0,
            positional_advantage: 0.5,
            tactic_threat_range: 1000.0,
            defensive_threshold: 0.7,
            offensive_threshold: 0.3,
            critical_threat: 0.8,
            critical_formation_quality: 0.3,
            shield_distance: 80.0,
            shield_spread: 60.0,
            guard_radius: 70.0,
            formation: FormationKind::Diamond,
            diamond_offset: 50.0,
            line_spacing: 40.0,
            wedge_offset: 45.0,
            circle_radius: 60.0,
            learned_confidence: 0.8,
            learned_weight: 0.3,
            seed: 42,
            max_step_time_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = TacticsConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.step_budget(), Duration::from_millis(100));
    }

    #[test]
    fn rejects_zero_safe_distance() {
        let cfg = TacticsConfig {
            max_safe_distance: 0.0,
            ..TacticsConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_safe_distance"));
    }

    #[test]
    fn rejects_non_positive_tactic_range() {
        for range in [0.0, -1000.0, f64::INFINITY] {
            let cfg = TacticsConfig {
                tactic_threat_range: range,
                ..TacticsConfig::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::InvalidValue {
                    field: "tactic_threat_range",
                    ..
                })
            ));
        }
    }

    #[test]
    fn rejects_crossed_thresholds() {
        let cfg = TacticsConfig {
            offensive_threshold: 0.9,
            defensive_threshold: 0.5,
            ..TacticsConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue {
                field: "offensive_threshold",
                ..
            })
        ));
    }

    #[test]
    fn rejects_weight_out_of_range() {
        let cfg = TacticsConfig {
            learned_weight: 1.5,
            ..TacticsConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_nan_threshold() {
        let cfg = TacticsConfig {
            critical_threat: f64::NAN,
            ..TacticsConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn toml_overrides_keep_defaults() {
        let cfg = TacticsConfig::from_toml_str(
            r#"
            max_safe_distance = 800.0
            formation = "wedge"
            max_step_time_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(cfg.max_safe_distance, 800.0);
        assert_eq!(cfg.formation, FormationKind::Wedge);
        assert_eq!(cfg.step_budget(), Duration::from_millis(250));
        assert_eq!(cfg.ideal_formation_distance, 100.0);
        assert_eq!(cfg.tactic_threat_range, 1000.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn toml_invalid_value_is_rejected() {
        let err = TacticsConfig::from_toml_str("learned_weight = -0.1").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn toml_syntax_error_is_parse_error() {
        let err = TacticsConfig::from_toml_str("max_safe_distance = = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_file_is_io_error() {
        let err = TacticsConfig::from_toml_file("/nonexistent/tactics.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
