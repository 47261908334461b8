//! Error types for the mode registry.

use std::fmt;
use thiserror::Error;
use weft_types::ErrorCode;

/// Failure reported by a mode's `activate` or `deactivate` hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookFailure {
    /// Failure message.
    pub message: String,
}

impl HookFailure {
    /// Creates a failure with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ErrorCode for HookFailure {
    fn code(&self) -> &'static str {
        "MODE_HOOK_FAILED"
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

/// Which half of a transition was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The outgoing mode's `deactivate`.
    Deactivate,
    /// The incoming mode's `activate`.
    Activate,
}

impl Phase {
    /// Lower-case name of the phase.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deactivate => "deactivate",
            Self::Activate => "activate",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from [`ModeRegistry`](crate::ModeRegistry) operations.
///
/// In every case the active mode is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    /// The requested mode is not registered.
    #[error("unknown mode: {mode}")]
    UnknownMode {
        /// Requested mode name.
        mode: String,
    },

    /// An `activate` or `deactivate` hook failed.
    #[error("{phase} of mode '{mode}' failed: {source}")]
    Transition {
        /// Mode whose hook failed.
        mode: String,
        /// Hook that failed.
        phase: Phase,
        /// Failure reported by the hook.
        #[source]
        source: HookFailure,
    },
}

impl ModeError {
    /// Mode named by the error.
    #[must_use]
    pub fn mode(&self) -> &str {
        match self {
            Self::UnknownMode { mode } | Self::Transition { mode, .. } => mode,
        }
    }
}

impl ErrorCode for ModeError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownMode { .. } => "MODE_UNKNOWN",
            Self::Transition { .. } => "MODE_TRANSITION_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_types::{assert_error_code, assert_error_codes};

    #[test]
    fn display_unknown_mode() {
        let err = ModeError::UnknownMode {
            mode: "preview".into(),
        };
        assert_eq!(err.to_string(), "unknown mode: preview");
        assert_eq!(err.mode(), "preview");
    }

    #[test]
    fn display_transition() {
        let err = ModeError::Transition {
            mode: "readonly".into(),
            phase: Phase::Activate,
            source: HookFailure::new("selection blocker missing"),
        };
        assert_eq!(
            err.to_string(),
            "activate of mode 'readonly' failed: selection blocker missing"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn error_codes() {
        assert_error_codes(
            &[
                ModeError::UnknownMode { mode: "x".into() },
                ModeError::Transition {
                    mode: "x".into(),
                    phase: Phase::Deactivate,
                    source: HookFailure::new("boom"),
                },
            ],
            "MODE_",
        );
        assert_error_code(&HookFailure::new("boom"), "MODE_");
    }
}
