//! Editor host errors.

use crate::config::ConfigValidationError;
use thiserror::Error;
use weft_behaviour::{BehaviourError, CompositeValidationError};
use weft_mode::ModeError;
use weft_types::ErrorCode;

/// Errors raised while building or driving an [`Editor`](crate::Editor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// The configuration failed semantic validation.
    #[error("invalid configuration: {}", join(.0))]
    InvalidConfig(Vec<ConfigValidationError>),

    /// Binding behaviours to a component failed.
    #[error(transparent)]
    Bind(#[from] CompositeValidationError),

    /// A component was bound a second time.
    #[error("component {component} is already bound")]
    AlreadyBound {
        /// Component FQN.
        component: String,
    },

    /// Two components share an id.
    #[error("duplicate component: {component}")]
    DuplicateComponent {
        /// Component FQN.
        component: String,
    },

    /// No component with this id.
    #[error("unknown component: {component}")]
    UnknownComponent {
        /// Requested id.
        component: String,
    },

    /// A mode operation failed.
    #[error(transparent)]
    Mode(#[from] ModeError),

    /// A behaviour API call failed.
    #[error(transparent)]
    Behaviour(#[from] BehaviourError),
}

impl ErrorCode for EditorError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "EDITOR_INVALID_CONFIG",
            Self::Bind(_) => "EDITOR_BIND_FAILED",
            Self::AlreadyBound { .. } => "EDITOR_ALREADY_BOUND",
            Self::DuplicateComponent { .. } => "EDITOR_DUPLICATE_COMPONENT",
            Self::UnknownComponent { .. } => "EDITOR_UNKNOWN_COMPONENT",
            Self::Mode(_) => "EDITOR_MODE_FAILED",
            Self::Behaviour(_) => "EDITOR_BEHAVIOUR_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Mode(e) => e.is_recoverable(),
            Self::Behaviour(e) => e.is_recoverable(),
            _ => false,
        }
    }
}

fn join(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
