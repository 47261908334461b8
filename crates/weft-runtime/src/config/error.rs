//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;
use weft_types::ErrorCode;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        /// File path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        /// File path.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize config.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar {
        /// Variable name.
        name: String,
        /// What was expected.
        message: String,
    },
}

impl ConfigError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid env var error.
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FAILED",
            Self::ParseToml { .. } => "CONFIG_PARSE_FAILED",
            Self::Serialize(_) => "CONFIG_SERIALIZE_FAILED",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// A semantic problem in an otherwise well-formed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    /// A `[[modes]]` entry has a blank name.
    #[error("mode definition has an empty name")]
    EmptyModeName,

    /// A `[[components]]` entry has a blank id.
    #[error("component definition has an empty id")]
    EmptyComponentId,

    /// A behaviour request has a blank name.
    #[error("component '{component}': behaviour with empty name")]
    EmptyBehaviourName {
        /// Component id as written.
        component: String,
    },

    /// `[mode] initial` names neither a built-in nor a declared mode.
    #[error("initial mode '{mode}' is not defined")]
    UnknownInitialMode {
        /// Requested initial mode.
        mode: String,
    },
}

impl ErrorCode for ConfigValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyModeName => "CONFIG_EMPTY_MODE_NAME",
            Self::EmptyComponentId => "CONFIG_EMPTY_COMPONENT_ID",
            Self::EmptyBehaviourName { .. } => "CONFIG_EMPTY_BEHAVIOUR_NAME",
            Self::UnknownInitialMode { .. } => "CONFIG_UNKNOWN_INITIAL_MODE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_types::{assert_error_code, assert_error_codes};

    #[test]
    fn error_display() {
        let err = ConfigError::invalid_env_var("WEFT_DEBUG", "expected bool");
        assert!(err.to_string().contains("WEFT_DEBUG"));
        assert!(err.to_string().contains("expected bool"));
        assert_error_code(&err, "CONFIG_");
    }

    #[test]
    fn validation_codes() {
        assert_error_codes(
            &[
                ConfigValidationError::EmptyModeName,
                ConfigValidationError::EmptyComponentId,
                ConfigValidationError::EmptyBehaviourName {
                    component: "drawer".into(),
                },
                ConfigValidationError::UnknownInitialMode {
                    mode: "ghost".into(),
                },
            ],
            "CONFIG_",
        );
    }
}
