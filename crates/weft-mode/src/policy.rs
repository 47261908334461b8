//! Read-only policy of a mode.
//!
//! A mode's [`EditorReadOnly`] policy is resolved into two independent
//! axes, [`ReadOnlyFlags`], at query time.
//!
//! # Serialized Form
//!
//! ```toml
//! editor_read_only = true                      # both axes disabled
//! editor_read_only = { ui_enabled = true }     # UI on, selection off
//! ```

use serde::{Deserialize, Serialize};

/// Read-only policy declared by a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EditorReadOnly {
    /// One answer for both axes: `true` disables UI and selection.
    Uniform(bool),
    /// Independent axes. An absent key means that axis is disabled.
    PerAxis {
        /// Whether UI interaction is enabled.
        #[serde(default, alias = "uiEnabled")]
        ui_enabled: bool,
        /// Whether content selection is enabled.
        #[serde(default, alias = "selectionEnabled")]
        selection_enabled: bool,
    },
}

impl EditorReadOnly {
    /// Fully enabled (the `design` policy).
    pub const EDITABLE: Self = Self::Uniform(false);
    /// Fully disabled (the `readonly` policy).
    pub const READ_ONLY: Self = Self::Uniform(true);

    /// Resolves the policy into flags.
    #[must_use]
    pub fn flags(self) -> ReadOnlyFlags {
        match self {
            Self::Uniform(read_only) => ReadOnlyFlags {
                ui_enabled: !read_only,
                selection_enabled: !read_only,
            },
            Self::PerAxis {
                ui_enabled,
                selection_enabled,
            } => ReadOnlyFlags {
                ui_enabled,
                selection_enabled,
            },
        }
    }

    /// Whether UI interaction is enabled under this policy.
    #[must_use]
    pub fn is_ui_enabled(self) -> bool {
        self.flags().ui_enabled
    }

    /// Whether content selection is enabled under this policy.
    #[must_use]
    pub fn is_selection_enabled(self) -> bool {
        self.flags().selection_enabled
    }
}

impl Default for EditorReadOnly {
    fn default() -> Self {
        Self::EDITABLE
    }
}

impl From<bool> for EditorReadOnly {
    fn from(read_only: bool) -> Self {
        Self::Uniform(read_only)
    }
}

/// The two derived read-only axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOnlyFlags {
    /// UI interaction enabled.
    pub ui_enabled: bool,
    /// Content selection enabled.
    pub selection_enabled: bool,
}

impl ReadOnlyFlags {
    /// Both axes enabled.
    pub const ENABLED: Self = Self {
        ui_enabled: true,
        selection_enabled: true,
    };
    /// Both axes disabled.
    pub const DISABLED: Self = Self {
        ui_enabled: false,
        selection_enabled: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        editor_read_only: EditorReadOnly,
    }

    fn parse(toml_str: &str) -> EditorReadOnly {
        toml::from_str::<Wrapper>(toml_str).unwrap().editor_read_only
    }

    #[test]
    fn uniform_true_disables_both() {
        assert_eq!(
            EditorReadOnly::Uniform(true).flags(),
            ReadOnlyFlags::DISABLED
        );
        assert_eq!(
            EditorReadOnly::Uniform(false).flags(),
            ReadOnlyFlags::ENABLED
        );
    }

    #[test]
    fn per_axis_reads_each_key() {
        let policy = EditorReadOnly::PerAxis {
            ui_enabled: true,
            selection_enabled: false,
        };
        assert!(policy.is_ui_enabled());
        assert!(!policy.is_selection_enabled());
    }

    #[test]
    fn toml_bool_form() {
        assert_eq!(
            parse("editor_read_only = true"),
            EditorReadOnly::Uniform(true)
        );
    }

    #[test]
    fn toml_partial_table_defaults_absent_to_disabled() {
        let policy = parse("editor_read_only = { ui_enabled = true }");
        assert_eq!(
            policy.flags(),
            ReadOnlyFlags {
                ui_enabled: true,
                selection_enabled: false,
            }
        );
    }

    #[test]
    fn json_camel_case_keys() {
        let policy: EditorReadOnly =
            serde_json::from_value(serde_json::json!({"selectionEnabled": true})).unwrap();
        assert!(!policy.is_ui_enabled());
        assert!(policy.is_selection_enabled());
    }

    #[test]
    fn empty_table_disables_both() {
        assert_eq!(
            parse("editor_read_only = {}").flags(),
            ReadOnlyFlags::DISABLED
        );
    }
}
