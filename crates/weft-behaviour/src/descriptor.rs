//! Behaviour descriptors.
//!
//! A [`BehaviourDescriptor`] is the immutable, reusable definition of one
//! behaviour. It is built once with [`BehaviourSpec`] and shared (cheaply
//! cloned) across every component the behaviour is bound to.
//!
//! Creating a descriptor never validates instance configuration; that
//! happens per component at bind time.
//!
//! # Example
//!
//! ```
//! use weft_behaviour::{BehaviourSpec, BehaviourState, EventBinding, EventOutcome, FieldSpec, ValueKind};
//! use serde_json::{json, Value};
//!
//! struct Slide { expanded: bool }
//! impl BehaviourState for Slide {}
//!
//! let sliding = BehaviourSpec::new("sliding")
//!     .fields([
//!         FieldSpec::required("dimension").one_of(["width", "height"]),
//!         FieldSpec::defaulted("expanded", false).kind(ValueKind::Bool),
//!     ])
//!     .state(|config| Slide { expanded: config.get_as("expanded").unwrap_or(false) })
//!     .active(|_ctx| vec![EventBinding::new("transitionend", |_| EventOutcome::Continue)])
//!     .api("has_grown", |ctx, _args| {
//!         ctx.with_state(|s: &Slide| Value::Bool(s.expanded))
//!     })
//!     .extra("dimensions", |_args| Ok(json!(["width", "height"])))
//!     .create();
//!
//! assert_eq!(sliding.name(), "sliding");
//! assert!(sliding.has_state());
//! assert_eq!(sliding.api_names(), vec!["has_grown"]);
//! ```

use crate::{
    BehaviourError, BehaviourState, EventBinding, FieldSchema, FieldSpec, InstanceContext,
    ValidatedConfig, ValidationError,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// `active` factory: declares the event bindings for one instance.
pub type ActiveFn = Arc<dyn Fn(&InstanceContext<'_>) -> Vec<EventBinding> + Send + Sync>;

/// API function: receives the instance context first, then call arguments.
pub type ApiFn =
    Arc<dyn Fn(&InstanceContext<'_>, &[Value]) -> Result<Value, BehaviourError> + Send + Sync>;

/// `state` factory: builds a fresh state for one instance.
pub type StateFn = Arc<dyn Fn(&ValidatedConfig) -> Box<dyn BehaviourState> + Send + Sync>;

/// Static helper in the `extra` namespace; has no instance.
pub type HelperFn = Arc<dyn Fn(&[Value]) -> Result<Value, BehaviourError> + Send + Sync>;

/// Builder for a [`BehaviourDescriptor`].
pub struct BehaviourSpec {
    name: String,
    fields: FieldSchema,
    active: Option<ActiveFn>,
    apis: BTreeMap<String, ApiFn>,
    state: Option<StateFn>,
    extra: BTreeMap<String, HelperFn>,
}

impl BehaviourSpec {
    /// Starts a spec with no fields, bindings, APIs, state or helpers.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: FieldSchema::empty(),
            active: None,
            apis: BTreeMap::new(),
            state: None,
            extra: BTreeMap::new(),
        }
    }

    /// Sets the field schema from individual declarations.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields = FieldSchema::new(fields);
        self
    }

    /// Sets a prebuilt field schema.
    #[must_use]
    pub fn schema(mut self, schema: FieldSchema) -> Self {
        self.fields = schema;
        self
    }

    /// Sets the `active` factory.
    ///
    /// Called once per bound instance; must return fresh bindings each time.
    #[must_use]
    pub fn active(
        mut self,
        factory: impl Fn(&InstanceContext<'_>) -> Vec<EventBinding> + Send + Sync + 'static,
    ) -> Self {
        self.active = Some(Arc::new(factory));
        self
    }

    /// Adds an API function. A repeated name replaces the earlier one.
    #[must_use]
    pub fn api(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&InstanceContext<'_>, &[Value]) -> Result<Value, BehaviourError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.apis.insert(name.into(), Arc::new(f));
        self
    }

    /// Sets the `state` factory.
    ///
    /// Called once per bound instance; must return a fresh state each time.
    #[must_use]
    pub fn state<S: BehaviourState>(
        mut self,
        factory: impl Fn(&ValidatedConfig) -> S + Send + Sync + 'static,
    ) -> Self {
        self.state = Some(Arc::new(move |config: &ValidatedConfig| {
            Box::new(factory(config)) as Box<dyn BehaviourState>
        }));
        self
    }

    /// Adds a static helper to the `extra` namespace.
    #[must_use]
    pub fn extra(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Value, BehaviourError> + Send + Sync + 'static,
    ) -> Self {
        self.extra.insert(name.into(), Arc::new(f));
        self
    }

    /// Freezes the spec into a descriptor.
    #[must_use]
    pub fn create(self) -> BehaviourDescriptor {
        tracing::debug!(
            behaviour = %self.name,
            fields = self.fields.len(),
            apis = self.apis.len(),
            stateful = self.state.is_some(),
            "behaviour created"
        );
        BehaviourDescriptor {
            inner: Arc::new(self),
        }
    }
}

/// Freezes `spec` into a descriptor.
///
/// Free-function form of [`BehaviourSpec::create`].
#[must_use]
pub fn create(spec: BehaviourSpec) -> BehaviourDescriptor {
    spec.create()
}

/// Immutable definition of one behaviour.
#[derive(Clone)]
pub struct BehaviourDescriptor {
    inner: Arc<BehaviourSpec>,
}

impl BehaviourDescriptor {
    /// Behaviour name (registry key).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Field schema.
    #[must_use]
    pub fn schema(&self) -> &FieldSchema {
        &self.inner.fields
    }

    /// Validates a raw per-instance configuration against the schema.
    ///
    /// # Errors
    ///
    /// Returns every field-level violation.
    pub fn validate(&self, raw: &Value) -> Result<ValidatedConfig, Vec<ValidationError>> {
        self.inner.fields.validate(raw)
    }

    /// Returns `true` if the behaviour declares event bindings.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.inner.active.is_some()
    }

    /// Returns `true` if the behaviour has per-instance state.
    #[must_use]
    pub fn has_state(&self) -> bool {
        self.inner.state.is_some()
    }

    /// API names, sorted.
    #[must_use]
    pub fn api_names(&self) -> Vec<&str> {
        self.inner.apis.keys().map(String::as_str).collect()
    }

    /// Helper names in the `extra` namespace, sorted.
    #[must_use]
    pub fn helper_names(&self) -> Vec<&str> {
        self.inner.extra.keys().map(String::as_str).collect()
    }

    /// Calls a static helper.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviourError::UnknownHelper`] or whatever the helper returns.
    pub fn call_extra(&self, helper: &str, args: &[Value]) -> Result<Value, BehaviourError> {
        let f = self
            .inner
            .extra
            .get(helper)
            .ok_or_else(|| BehaviourError::UnknownHelper {
                behaviour: self.name().to_string(),
                helper: helper.to_string(),
            })?;
        f(args)
    }

    /// Returns `true` if both handles refer to the same descriptor.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn active_fn(&self) -> Option<&ActiveFn> {
        self.inner.active.as_ref()
    }

    pub(crate) fn state_fn(&self) -> Option<&StateFn> {
        self.inner.state.as_ref()
    }

    pub(crate) fn apis(&self) -> &BTreeMap<String, ApiFn> {
        &self.inner.apis
    }
}

impl fmt::Debug for BehaviourDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviourDescriptor")
            .field("name", &self.name())
            .field("fields", &self.schema().len())
            .field("active", &self.has_active())
            .field("apis", &self.api_names())
            .field("state", &self.has_state())
            .field("extra", &self.helper_names())
            .finish()
    }
}
