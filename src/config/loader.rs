//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RotationsConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax error or an unrecognized rotation status name.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate a rotation status document.
pub fn parse_config(content: &str) -> Result<RotationsConfig, ConfigError> {
    let config: RotationsConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate a rotation status document from a TOML file.
pub fn load_config(path: &Path) -> Result<RotationsConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::RotationStatus;

    #[test]
    fn test_parse_document() {
        let config = parse_config(
            r#"
            [observability]
            log_level = "debug"

            [[rotations]]
            name = "rotation-fin1"
            status = "IN"

            [[rotations]]
            name = "rotation-east3"
            status = "UNKNOWN"
            "#,
        )
        .unwrap();

        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.rotations.len(), 2);
        assert_eq!(config.rotations[0].status, RotationStatus::In);
        assert_eq!(config.rotations[1].status, RotationStatus::Unknown);
    }

    #[test]
    fn test_unrecognized_status_is_parse_error() {
        let err = parse_config(
            r#"
            [[rotations]]
            name = "rotation-fin1"
            status = "unhealthy"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("unrecognized rotation status 'unhealthy'"));
    }

    #[test]
    fn test_missing_status_is_parse_error() {
        let err = parse_config(
            r#"
            [[rotations]]
            name = "rotation-fin1"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config(
            r#"
            [[rotations]]
            name = ""
            status = "OUT"

            [[rotations]]
            name = "r1"
            status = "IN"

            [[rotations]]
            name = "r1"
            status = "OUT"
            "#,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation failed: rotation #0 has an empty name, rotation 'r1' is declared 2 times"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/rotations.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
