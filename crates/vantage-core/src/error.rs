//! Error types for Vantage

use thiserror::Error;

/// The main error type for Vantage operations
#[derive(Debug, Error)]
pub enum VantageError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Duplicate entity name: {0}")]
    DuplicateEntityName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Scenario error: {0}")]
    ScenarioError(String),
}

/// Result type alias for Vantage operations
pub type Result<T> = std::result::Result<T, VantageError>;

impl From<toml::de::Error> for VantageError {
    fn from(err: toml::de::Error) -> Self {
        VantageError::TomlParseError(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = VantageError::ValueOutOfRange {
            field: "zoom_scalar".into(),
            min: 1.0,
            max: 4.0,
            value: 9.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: zoom_scalar must be between 1 and 4, got 9"
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("a = ");
        let err: VantageError = parsed.unwrap_err().into();
        assert!(matches!(err, VantageError::TomlParseError(_)));
    }
}
