//! Unified error interface for weft.
//!
//! Every weft error type implements [`ErrorCode`] so hosts can handle
//! failures from the behaviour binder, the mode registry and the
//! configuration layer uniformly.
//!
//! # Example
//!
//! ```
//! use weft_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     Missing(String),
//!     Busy,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing(_) => "LOOKUP_MISSING",
//!             Self::Busy => "LOOKUP_BUSY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! let err = LookupError::Busy;
//! assert_eq!(err.code(), "LOOKUP_BUSY");
//! assert!(err.is_recoverable());
//! ```

/// Unified error code interface for weft errors.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"MODE_UNKNOWN"`
/// - **Crate-prefixed**: `SCHEMA_`, `BEHAVIOUR_`, `MODE_`, `CONFIG_`, `EDITOR_`
/// - **Stable**: codes do not change once published
///
/// # Recoverability
///
/// Almost everything in weft is a programming or configuration error,
/// so most codes report `false`. A failing activation hook is the
/// exception: the host may fix the underlying condition and retry `set`.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying (possibly after corrective action) may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows weft conventions.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use weft_types::{ErrorCode, assert_error_code};
///
/// #[derive(Debug)]
/// enum MyError { Timeout }
///
/// impl ErrorCode for MyError {
///     fn code(&self) -> &'static str { "MY_TIMEOUT" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&MyError::Timeout, "MY_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum ProbeError {
        Transient,
        Permanent,
    }

    impl ErrorCode for ProbeError {
        fn code(&self) -> &'static str {
            match self {
                Self::Transient => "PROBE_TRANSIENT",
                Self::Permanent => "PROBE_PERMANENT",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn codes_and_recoverability() {
        assert_eq!(ProbeError::Transient.code(), "PROBE_TRANSIENT");
        assert!(ProbeError::Transient.is_recoverable());
        assert!(!ProbeError::Permanent.is_recoverable());
    }

    #[test]
    fn assert_error_codes_all_variants() {
        assert_error_codes(&[ProbeError::Transient, ProbeError::Permanent], "PROBE_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn assert_error_code_wrong_prefix() {
        assert_error_code(&ProbeError::Transient, "MODE_");
    }

    #[test]
    fn upper_snake_case_rules() {
        assert!(is_upper_snake_case("MODE_UNKNOWN"));
        assert!(is_upper_snake_case("A1_B2"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("mode_unknown"));
        assert!(!is_upper_snake_case("_MODE"));
        assert!(!is_upper_snake_case("MODE_"));
        assert!(!is_upper_snake_case("MODE__UNKNOWN"));
    }
}
