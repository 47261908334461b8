//! Field schemas and configuration validation.
//!
//! A behaviour declares an ordered [`FieldSchema`]; each component that
//! uses the behaviour supplies a raw JSON configuration which is checked
//! against it at bind time.
//!
//! # Rules
//!
//! | Field state | Result |
//! |-------------|--------|
//! | present | validator runs (if any) |
//! | absent, required | [`ValidationError::MissingField`] |
//! | absent, defaulted | default substituted |
//! | absent, optional | `null` substituted |
//! | key not in schema | [`ValidationError::UnknownField`] |
//!
//! Validation is pure and reports every violation, not just the first.
//!
//! # Example
//!
//! ```
//! use weft_behaviour::{FieldSchema, FieldSpec, ValueKind};
//! use serde_json::json;
//!
//! let schema = FieldSchema::new([
//!     FieldSpec::required("dimension").one_of(["width", "height"]),
//!     FieldSpec::defaulted("expanded", false).kind(ValueKind::Bool),
//! ]);
//!
//! let config = schema.validate(&json!({ "dimension": "height" })).unwrap();
//! assert_eq!(config.get("expanded"), Some(&json!(false)));
//!
//! let errors = schema.validate(&json!({ "dimenson": "height" })).unwrap_err();
//! assert_eq!(errors.len(), 2); // missing `dimension` + unknown `dimenson`
//! ```

use crate::{BehaviourError, ValidationError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Validator predicate: `Err(reason)` rejects the value.
pub type FieldCheck = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// How a field behaves when it is absent from the raw configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    /// Absence is an error.
    Required,
    /// Absence substitutes the given default.
    Defaulted(Value),
    /// Absence substitutes `null`.
    Optional,
}

/// JSON type constraint usable as a field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `true` / `false`.
    Bool,
    /// Any JSON number.
    Number,
    /// Any JSON string.
    String,
    /// Any JSON array.
    Array,
    /// Any JSON object.
    Object,
}

impl ValueKind {
    /// Returns `true` if `value` has this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Bool => value.is_boolean(),
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(s)
    }
}

/// Declaration of one configuration field.
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    presence: Presence,
    checks: Vec<FieldCheck>,
}

impl FieldSpec {
    /// A field that must be supplied.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self::with_presence(name, Presence::Required)
    }

    /// A field that falls back to `default` when absent.
    #[must_use]
    pub fn defaulted(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self::with_presence(name, Presence::Defaulted(default.into()))
    }

    /// A field that falls back to `null` when absent.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self::with_presence(name, Presence::Optional)
    }

    fn with_presence(name: impl Into<String>, presence: Presence) -> Self {
        Self {
            name: name.into(),
            presence,
            checks: Vec::new(),
        }
    }

    /// Adds a custom validator predicate.
    ///
    /// Checks run in the order they were added; the first rejection wins.
    #[must_use]
    pub fn check(
        mut self,
        check: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.checks.push(Arc::new(check));
        self
    }

    /// Requires the value to be of the given JSON kind.
    ///
    /// An explicit `null` is accepted for optional fields.
    #[must_use]
    pub fn kind(self, kind: ValueKind) -> Self {
        let nullable = self.presence == Presence::Optional;
        self.check(move |value| {
            if kind.matches(value) || (nullable && value.is_null()) {
                Ok(())
            } else {
                Err(format!("expected {kind}, got {}", json_type(value)))
            }
        })
    }

    /// Requires the value to be one of the given strings.
    #[must_use]
    pub fn one_of<I, S>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        self.check(move |value| match value.as_str() {
            Some(s) if allowed.iter().any(|a| a == s) => Ok(()),
            _ => Err(format!("expected one of [{}]", allowed.join(", "))),
        })
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absence policy.
    #[must_use]
    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    /// Returns `true` if the field must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    fn run_checks(&self, value: &Value) -> Result<(), ValidationError> {
        for check in &self.checks {
            check(value).map_err(|reason| ValidationError::InvalidField {
                field: self.name.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("presence", &self.presence)
            .field("checks", &self.checks.len())
            .finish()
    }
}

/// Ordered set of field declarations.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    /// Creates a schema from field declarations.
    ///
    /// A later declaration with the same name replaces the earlier one.
    #[must_use]
    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        let mut schema = Self::empty();
        for field in fields {
            schema.push(field);
        }
        schema
    }

    /// A schema with no fields; only `{}` or `null` validates against it.
    #[must_use]
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    fn push(&mut self, field: FieldSpec) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field declaration.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates a raw configuration.
    ///
    /// `null` is treated as an empty object. Errors are reported in schema
    /// order, followed by unknown keys.
    ///
    /// # Errors
    ///
    /// Returns every [`ValidationError`] found.
    pub fn validate(&self, raw: &Value) -> Result<ValidatedConfig, Vec<ValidationError>> {
        let empty = Map::new();
        let input = match raw {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(vec![ValidationError::NotAnObject {
                    found: json_type(other),
                }])
            }
        };

        let mut errors = Vec::new();
        let mut values = Map::new();

        for spec in &self.fields {
            match (input.get(&spec.name), &spec.presence) {
                (Some(value), _) => match spec.run_checks(value) {
                    Ok(()) => {
                        values.insert(spec.name.clone(), value.clone());
                    }
                    Err(e) => errors.push(e),
                },
                (None, Presence::Required) => errors.push(ValidationError::MissingField {
                    field: spec.name.clone(),
                }),
                (None, Presence::Defaulted(default)) => {
                    values.insert(spec.name.clone(), default.clone());
                }
                (None, Presence::Optional) => {
                    values.insert(spec.name.clone(), Value::Null);
                }
            }
        }

        for key in input.keys() {
            if self.field(key).is_none() {
                errors.push(ValidationError::UnknownField { field: key.clone() });
            }
        }

        if errors.is_empty() {
            Ok(ValidatedConfig { values })
        } else {
            Err(errors)
        }
    }
}

/// Validates `raw` against `schema`.
///
/// Free-function form of [`FieldSchema::validate`].
///
/// # Errors
///
/// Returns every [`ValidationError`] found.
pub fn validate(
    schema: &FieldSchema,
    raw: &Value,
) -> Result<ValidatedConfig, Vec<ValidationError>> {
    schema.validate(raw)
}

/// Configuration that passed validation.
///
/// Every schema field is present (defaults applied) and no other keys
/// exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedConfig {
    values: Map<String, Value>,
}

impl ValidatedConfig {
    /// Returns a field's value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Reads a field as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviourError::ConfigType`] if the field is absent or
    /// does not deserialize as `T`.
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> Result<T, BehaviourError> {
        let value = self.values.get(field).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| BehaviourError::ConfigType {
            field: field.to_string(),
            message: e.to_string(),
        })
    }

    /// Deserializes the whole configuration into a typed struct.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviourError::ConfigType`] on type mismatch.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, BehaviourError> {
        serde_json::from_value(Value::Object(self.values.clone())).map_err(|e| {
            BehaviourError::ConfigType {
                field: "<config>".to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Returns the configuration as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    /// Iterates over `(field, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the configuration has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn sliding_schema() -> FieldSchema {
        FieldSchema::new([
            FieldSpec::required("dimension").one_of(["width", "height"]),
            FieldSpec::required("closed_class").kind(ValueKind::String),
            FieldSpec::defaulted("expanded", false).kind(ValueKind::Bool),
            FieldSpec::optional("on_grown").kind(ValueKind::String),
        ])
    }

    // ── Success ─────────────────────────────────────────────

    #[test]
    fn defaults_are_applied() {
        let config = sliding_schema()
            .validate(&json!({"dimension": "height", "closed_class": "closed"}))
            .unwrap();

        assert_eq!(config.get("dimension"), Some(&json!("height")));
        assert_eq!(config.get("expanded"), Some(&json!(false)));
        assert_eq!(config.get("on_grown"), Some(&Value::Null));
        assert_eq!(config.len(), 4);
    }

    #[test]
    fn supplied_value_overrides_default() {
        let config = sliding_schema()
            .validate(&json!({"dimension": "width", "closed_class": "c", "expanded": true}))
            .unwrap();
        assert_eq!(config.get_as::<bool>("expanded").unwrap(), true);
    }

    #[test]
    fn optional_field_accepts_explicit_null() {
        let config = sliding_schema()
            .validate(&json!({"dimension": "width", "closed_class": "c", "on_grown": null}))
            .unwrap();
        assert_eq!(config.get("on_grown"), Some(&Value::Null));
    }

    #[test]
    fn null_config_is_empty_object() {
        let config = FieldSchema::empty().validate(&Value::Null).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn typed_deserialize() {
        #[derive(Deserialize)]
        struct Sliding {
            dimension: String,
            expanded: bool,
        }

        let config = sliding_schema()
            .validate(&json!({"dimension": "width", "closed_class": "c"}))
            .unwrap();
        let typed: Sliding = config.deserialize().unwrap();
        assert_eq!(typed.dimension, "width");
        assert!(!typed.expanded);
    }

    // ── Failures ────────────────────────────────────────────

    #[test]
    fn missing_required_field() {
        let errors = sliding_schema()
            .validate(&json!({"dimension": "width"}))
            .unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MissingField {
                field: "closed_class".into()
            }]
        );
    }

    #[test]
    fn predicate_rejection_names_field() {
        let errors = sliding_schema()
            .validate(&json!({"dimension": "depth", "closed_class": "c"}))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), Some("dimension"));
        assert!(matches!(errors[0], ValidationError::InvalidField { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let errors = sliding_schema()
            .validate(&json!({"dimension": "width", "closed_class": "c", "expandd": true}))
            .unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnknownField {
                field: "expandd".into()
            }]
        );
    }

    #[test]
    fn all_violations_reported() {
        let errors = sliding_schema()
            .validate(&json!({"dimension": 3, "expanded": "yes", "typo": 1}))
            .unwrap_err();
        let fields: Vec<_> = errors.iter().filter_map(ValidationError::field).collect();
        assert_eq!(
            fields,
            vec!["dimension", "closed_class", "expanded", "typo"]
        );
    }

    #[test]
    fn non_object_config() {
        let errors = sliding_schema().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::NotAnObject { found: "array" }]
        );
    }

    #[test]
    fn kind_check_message() {
        let schema = FieldSchema::new([FieldSpec::required("speed").kind(ValueKind::Number)]);
        let errors = schema.validate(&json!({"speed": "fast"})).unwrap_err();
        assert_eq!(
            errors[0].to_string(),
            "field 'speed' rejected: expected number, got string"
        );
    }

    #[test]
    fn validation_is_deterministic() {
        let schema = sliding_schema();
        let raw = json!({"dimension": "width", "closed_class": "c"});
        assert_eq!(schema.validate(&raw), schema.validate(&raw));
    }

    #[test]
    fn redeclared_field_replaces_earlier() {
        let schema = FieldSchema::new([
            FieldSpec::required("mode"),
            FieldSpec::defaulted("mode", "auto"),
        ]);
        assert_eq!(schema.len(), 1);
        assert!(!schema.field("mode").unwrap().is_required());
    }

    #[test]
    fn free_function_matches_method() {
        let schema = sliding_schema();
        let raw = json!({"dimension": "width", "closed_class": "c"});
        assert_eq!(validate(&schema, &raw), schema.validate(&raw));
    }
}
