//! Error types for behaviour validation and behaviour API calls.
//!
//! # Error Code Convention
//!
//! | Error | Code prefix | Recoverable |
//! |-------|-------------|-------------|
//! | [`ValidationError`] | `SCHEMA_` | No |
//! | [`CompositeValidationError`] | `BEHAVIOUR_` | No |
//! | [`BehaviourError`] | `BEHAVIOUR_` | Only `ApiFailed` |
//!
//! Validation errors are configuration mistakes; retrying with the same
//! configuration never helps.

use thiserror::Error;
use weft_types::ErrorCode;

/// A field-level schema violation.
///
/// Always names the offending field so errors can be rendered or
/// aggregated into a [`CompositeValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Field name.
        field: String,
    },

    /// A field is present but its validator rejected the value.
    #[error("field '{field}' rejected: {reason}")]
    InvalidField {
        /// Field name.
        field: String,
        /// Why the validator rejected the value.
        reason: String,
    },

    /// The raw configuration contains a key the schema does not declare.
    #[error("unknown field '{field}'")]
    UnknownField {
        /// The undeclared key.
        field: String,
    },

    /// The raw configuration is not an object.
    #[error("configuration must be an object, got {found}")]
    NotAnObject {
        /// JSON type that was supplied instead.
        found: &'static str,
    },
}

impl ValidationError {
    /// Returns the field this error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::InvalidField { field, .. }
            | Self::UnknownField { field } => Some(field),
            Self::NotAnObject { .. } => None,
        }
    }
}

impl ErrorCode for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "SCHEMA_MISSING_FIELD",
            Self::InvalidField { .. } => "SCHEMA_INVALID_FIELD",
            Self::UnknownField { .. } => "SCHEMA_UNKNOWN_FIELD",
            Self::NotAnObject { .. } => "SCHEMA_NOT_AN_OBJECT",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Why one behaviour of a bind request could not be attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviourFailure {
    /// The configuration failed schema validation.
    #[error("{behaviour}: {}", join(.errors))]
    InvalidConfig {
        /// Behaviour name.
        behaviour: String,
        /// Every field-level violation for this behaviour.
        errors: Vec<ValidationError>,
    },

    /// The behaviour name is not present in the registry.
    #[error("{behaviour}: behaviour is not registered")]
    Unregistered {
        /// Behaviour name.
        behaviour: String,
    },

    /// The same behaviour was requested twice for one component.
    #[error("{behaviour}: behaviour requested more than once")]
    Duplicate {
        /// Behaviour name.
        behaviour: String,
    },
}

impl BehaviourFailure {
    /// Returns the name of the behaviour that failed.
    #[must_use]
    pub fn behaviour(&self) -> &str {
        match self {
            Self::InvalidConfig { behaviour, .. }
            | Self::Unregistered { behaviour }
            | Self::Duplicate { behaviour } => behaviour,
        }
    }

    /// Returns the field-level errors (empty unless `InvalidConfig`).
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidConfig { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// Every failure from one bind call.
///
/// The binder validates all requested behaviours before reporting, so a
/// caller sees every misconfigured behaviour at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("component {component}: {} behaviour(s) failed validation: {}", .failures.len(), join(.failures))]
pub struct CompositeValidationError {
    /// FQN of the component being bound.
    pub component: String,
    /// One entry per failing behaviour, in request order.
    pub failures: Vec<BehaviourFailure>,
}

impl CompositeValidationError {
    /// Names of the failing behaviours, in request order.
    #[must_use]
    pub fn failed_behaviours(&self) -> Vec<&str> {
        self.failures
            .iter()
            .map(BehaviourFailure::behaviour)
            .collect()
    }

    /// Returns the failure for `behaviour`, if it failed.
    #[must_use]
    pub fn failure(&self, behaviour: &str) -> Option<&BehaviourFailure> {
        self.failures.iter().find(|f| f.behaviour() == behaviour)
    }
}

impl ErrorCode for CompositeValidationError {
    fn code(&self) -> &'static str {
        "BEHAVIOUR_VALIDATION_FAILED"
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Errors raised when using a bound behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviourError {
    /// The component has no behaviour with this name.
    #[error("behaviour '{0}' is not bound to this component")]
    NotBound(String),

    /// The behaviour does not expose this API.
    #[error("behaviour '{behaviour}' has no api '{api}'")]
    UnknownApi {
        /// Behaviour name.
        behaviour: String,
        /// Requested API name.
        api: String,
    },

    /// The behaviour does not expose this static helper.
    #[error("behaviour '{behaviour}' has no helper '{helper}'")]
    UnknownHelper {
        /// Behaviour name.
        behaviour: String,
        /// Requested helper name.
        helper: String,
    },

    /// The behaviour declares no state factory.
    #[error("behaviour '{0}' has no state")]
    NoState(String),

    /// The state cell holds a different type than the caller expected.
    #[error("state of behaviour '{behaviour}' is not a {expected}")]
    StateType {
        /// Behaviour name.
        behaviour: String,
        /// Type name the caller asked for.
        expected: &'static str,
    },

    /// A configuration field could not be read as the requested type.
    #[error("config field '{field}' has unexpected type: {message}")]
    ConfigType {
        /// Field name.
        field: String,
        /// Deserialization message.
        message: String,
    },

    /// Arguments passed to an API or helper were not acceptable.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// An API or helper reported a failure.
    #[error("api '{api}' failed: {message}")]
    ApiFailed {
        /// API or helper name.
        api: String,
        /// Failure message.
        message: String,
    },
}

impl BehaviourError {
    /// Creates an `ApiFailed` error.
    pub fn failed(api: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiFailed {
            api: api.into(),
            message: message.into(),
        }
    }
}

impl ErrorCode for BehaviourError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotBound(_) => "BEHAVIOUR_NOT_BOUND",
            Self::UnknownApi { .. } => "BEHAVIOUR_UNKNOWN_API",
            Self::UnknownHelper { .. } => "BEHAVIOUR_UNKNOWN_HELPER",
            Self::NoState(_) => "BEHAVIOUR_NO_STATE",
            Self::StateType { .. } => "BEHAVIOUR_STATE_TYPE",
            Self::ConfigType { .. } => "BEHAVIOUR_CONFIG_TYPE",
            Self::InvalidArguments(_) => "BEHAVIOUR_INVALID_ARGUMENTS",
            Self::ApiFailed { .. } => "BEHAVIOUR_API_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::ApiFailed { .. })
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
