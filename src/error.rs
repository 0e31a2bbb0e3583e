use thiserror::Error;

/// Errors raised while building or loading a [`TacticsConfig`](crate::TacticsConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[cfg(feature = "serde")]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while ingesting an [`Observation`](crate::Observation).
///
/// Only structurally unusable input is an error; missing or malformed
/// fields inside a well-formed document fall back to defaults.
#[derive(Debug, Error)]
pub enum ObservationError {
    #[cfg(feature = "serde")]
    #[error("Observation is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Observation must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let e = ConfigError::InvalidValue {
            field: "max_safe_distance",
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid value for `max_safe_distance`: must be positive"
        );
    }

    #[test]
    fn not_an_object_display() {
        let e = ObservationError::NotAnObject("array");
        assert_eq!(e.to_string(), "Observation must be a JSON object, got array");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_error_converts() {
        let err: ObservationError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("Observation is not valid JSON"));
    }
}
