//! Configuration types.

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use weft_mode::{EditorReadOnly, DESIGN, READONLY};
use weft_types::ComponentId;

/// Main configuration structure.
///
/// Every section is optional in the file.
///
/// # Example
///
/// ```
/// use weft_runtime::config::WeftConfig;
///
/// let config = WeftConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.mode.initial, "design");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeftConfig {
    /// Enable debug logging.
    pub debug: bool,

    /// Mode selection.
    pub mode: ModeConfig,

    /// Declarative modes, registered after the built-ins.
    pub modes: Vec<ModeDef>,

    /// Declarative host components and their behaviours.
    pub components: Vec<ComponentDef>,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl WeftConfig {
    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Applies `layer` over `self`.
    ///
    /// Every scalar present in the layer wins, including one equal to
    /// the default. Modes are replaced by `name` and components by FQN;
    /// new entries are appended.
    pub fn merge(&mut self, layer: &ConfigLayer) {
        if let Some(debug) = layer.debug {
            self.debug = debug;
        }
        if let Some(ref initial) = layer.mode.initial {
            self.mode.initial.clone_from(initial);
        }

        for def in &layer.modes {
            self.modes.retain(|m| m.name != def.name);
            self.modes.push(def.clone());
        }
        for def in &layer.components {
            let id = ComponentId::parse(&def.id);
            self.components.retain(|c| !ComponentId::parse(&c.id).fqn_eq(&id));
            self.components.push(def.clone());
        }

        if let Some(ref level) = layer.logging.level {
            self.logging.level.clone_from(level);
        }
    }

    /// Validates the whole configuration.
    ///
    /// Returns all validation errors, not just the first one.
    pub fn validate_all(&self) -> Vec<ConfigValidationError> {
        let mut errors: Vec<ConfigValidationError> = self
            .modes
            .iter()
            .filter_map(|m| m.validate().err())
            .collect();

        for component in &self.components {
            errors.extend(component.validate());
        }

        if !self.has_mode(&self.mode.initial) {
            errors.push(ConfigValidationError::UnknownInitialMode {
                mode: self.mode.initial.clone(),
            });
        }
        errors
    }

    /// Returns `true` if `name` is a built-in or declared mode.
    #[must_use]
    pub fn has_mode(&self, name: &str) -> bool {
        name == DESIGN || name == READONLY || self.modes.iter().any(|m| m.name == name)
    }
}

/// Mode selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModeConfig {
    /// Mode the editor switches to once built.
    pub initial: String,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            initial: DESIGN.into(),
        }
    }
}

/// A declarative mode.
///
/// Declarative modes have no-op lifecycle hooks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModeDef {
    /// Mode name.
    pub name: String,

    /// Read-only policy: a bool, or `{ ui_enabled, selection_enabled }`.
    #[serde(default)]
    pub editor_read_only: EditorReadOnly,
}

impl ModeDef {
    /// Validates this definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::EmptyModeName`] for a blank name.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModeName);
        }
        Ok(())
    }
}

/// A declarative host component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    /// Component id, `namespace::name` or a bare builtin name.
    pub id: String,

    /// Behaviours to bind, in order.
    #[serde(default)]
    pub behaviours: Vec<BehaviourDef>,
}

impl ComponentDef {
    /// Validates this definition.
    ///
    /// Returns every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        if self.id.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyComponentId);
        }
        for behaviour in &self.behaviours {
            if behaviour.name.trim().is_empty() {
                errors.push(ConfigValidationError::EmptyBehaviourName {
                    component: self.id.clone(),
                });
            }
        }
        errors
    }
}

/// One behaviour request of a [`ComponentDef`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BehaviourDef {
    /// Registered behaviour name.
    pub name: String,

    /// Raw per-instance configuration, validated at bind time.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub config: Value,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}


/// One configuration file, before layering.
///
/// Same shape as [`WeftConfig`], but scalars are optional so a key that
/// is present always overrides the layer below, even when it restates
/// the default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigLayer {
    /// `debug`, if set.
    pub debug: Option<bool>,

    /// `[mode]` section.
    pub mode: ModeLayer,

    /// `[[modes]]` entries.
    pub modes: Vec<ModeDef>,

    /// `[[components]]` entries.
    pub components: Vec<ComponentDef>,

    /// `[logging]` section.
    pub logging: LoggingLayer,
}

impl ConfigLayer {
    /// Deserializes a layer from TOML.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// `[mode]` section of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModeLayer {
    /// `initial`, if set.
    pub initial: Option<String>,
}

/// `[logging]` section of a [`ConfigLayer`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingLayer {
    /// `level`, if set.
    pub level: Option<String>,
}
