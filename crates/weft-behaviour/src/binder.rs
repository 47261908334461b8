//! Per-component behaviour binding.
//!
//! [`bind`] turns an ordered list of `(descriptor, raw config)` pairs into a
//! [`ComponentBehaviourSet`]: validated configs, fresh state cells, event
//! bindings for the caller to wire, and APIs with the instance context
//! already applied.
//!
//! # Validation Before Construction
//!
//! Every pair is validated before any state or binding is created. If any
//! pair fails, nothing is constructed and the returned
//! [`CompositeValidationError`] lists every failing behaviour.
//!
//! # Example
//!
//! ```
//! use weft_behaviour::{bind, BehaviourSpec, FieldSpec};
//! use weft_types::ComponentId;
//! use serde_json::json;
//!
//! let focusing = BehaviourSpec::new("focusing")
//!     .fields([FieldSpec::defaulted("tabstop", true)])
//!     .api("is_tabstop", |ctx, _| Ok(ctx.config.get("tabstop").cloned().unwrap_or_default()))
//!     .create();
//!
//! let button = ComponentId::builtin("button");
//! let set = bind(&button, [(focusing, json!({}))]).unwrap();
//! assert_eq!(set.call("focusing", "is_tabstop", &[]).unwrap(), json!(true));
//! ```

use crate::{
    BehaviourDescriptor, BehaviourError, BehaviourFailure, CompositeValidationError, EventBinding,
    EventSink, InstanceContext, StateCell, ValidatedConfig,
};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;
use weft_types::ComponentId;

type CallFn = Arc<dyn Fn(&[Value]) -> Result<Value, BehaviourError> + Send + Sync>;

/// An API function with its instance context already applied.
#[derive(Clone)]
pub struct BoundApi {
    name: String,
    call: CallFn,
}

impl BoundApi {
    /// API name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the API.
    ///
    /// # Errors
    ///
    /// Whatever the API function returns.
    pub fn call(&self, args: &[Value]) -> Result<Value, BehaviourError> {
        (self.call)(args)
    }
}

impl fmt::Debug for BoundApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundApi")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// One behaviour attached to one component.
#[derive(Debug)]
pub struct BoundBehaviour {
    descriptor: BehaviourDescriptor,
    config: Arc<ValidatedConfig>,
    state: Option<StateCell>,
    apis: BTreeMap<String, BoundApi>,
    events: Vec<EventBinding>,
}

impl BoundBehaviour {
    /// Behaviour name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Descriptor this instance was built from.
    #[must_use]
    pub fn descriptor(&self) -> &BehaviourDescriptor {
        &self.descriptor
    }

    /// Validated configuration with defaults applied.
    #[must_use]
    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// State cell, if the behaviour is stateful.
    #[must_use]
    pub fn state(&self) -> Option<&StateCell> {
        self.state.as_ref()
    }

    /// Bound API names, sorted.
    #[must_use]
    pub fn api_names(&self) -> Vec<&str> {
        self.apis.keys().map(String::as_str).collect()
    }

    /// Returns the bound API named `api`.
    #[must_use]
    pub fn api(&self, api: &str) -> Option<&BoundApi> {
        self.apis.get(api)
    }

    /// Calls `api` with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviourError::UnknownApi`] or whatever the API returns.
    pub fn call(&self, api: &str, args: &[Value]) -> Result<Value, BehaviourError> {
        let bound = self
            .apis
            .get(api)
            .ok_or_else(|| BehaviourError::UnknownApi {
                behaviour: self.name().to_string(),
                api: api.to_string(),
            })?;
        bound.call(args)
    }

    /// Event bindings declared by the `active` factory for this instance.
    #[must_use]
    pub fn events(&self) -> &[EventBinding] {
        &self.events
    }
}

/// The runtime behaviour set owned by one component.
///
/// Its shape is fixed at bind time; only state cells mutate afterwards.
#[derive(Debug)]
pub struct ComponentBehaviourSet {
    component: ComponentId,
    behaviours: Vec<BoundBehaviour>,
}

impl ComponentBehaviourSet {
    /// Component this set belongs to.
    #[must_use]
    pub fn component(&self) -> &ComponentId {
        &self.component
    }

    /// Number of bound behaviours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    /// Returns `true` if no behaviour is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }

    /// Bound behaviour names, in bind order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.behaviours.iter().map(BoundBehaviour::name).collect()
    }

    /// Returns `true` if `behaviour` is bound.
    #[must_use]
    pub fn has(&self, behaviour: &str) -> bool {
        self.get(behaviour).is_some()
    }

    /// Returns the bound behaviour named `behaviour`.
    #[must_use]
    pub fn get(&self, behaviour: &str) -> Option<&BoundBehaviour> {
        self.behaviours.iter().find(|b| b.name() == behaviour)
    }

    /// Like [`get`](Self::get), but a missing behaviour is an error.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviourError::NotBound`].
    pub fn behaviour(&self, behaviour: &str) -> Result<&BoundBehaviour, BehaviourError> {
        self.get(behaviour)
            .ok_or_else(|| BehaviourError::NotBound(behaviour.to_string()))
    }

    /// Calls `component.<behaviour>.<api>(args)`.
    ///
    /// # Errors
    ///
    /// Returns `NotBound`, `UnknownApi`, or whatever the API returns.
    pub fn call(
        &self,
        behaviour: &str,
        api: &str,
        args: &[Value],
    ) -> Result<Value, BehaviourError> {
        self.behaviour(behaviour)?.call(api, args)
    }

    /// JSON snapshot of a behaviour's state.
    ///
    /// # Errors
    ///
    /// Returns `NotBound` or `NoState`.
    pub fn read_state(&self, behaviour: &str) -> Result<Value, BehaviourError> {
        let bound = self.behaviour(behaviour)?;
        bound
            .state()
            .map(StateCell::read_state)
            .ok_or_else(|| BehaviourError::NoState(behaviour.to_string()))
    }

    /// Hands every event binding to `sink`, in bind order.
    ///
    /// Returns the number of bindings wired.
    pub fn wire_into(&self, sink: &mut dyn EventSink) -> usize {
        let mut wired = 0;
        for bound in &self.behaviours {
            for binding in &bound.events {
                sink.wire(&self.component, bound.name(), binding.clone());
                wired += 1;
            }
        }
        wired
    }

    /// Iterates bound behaviours in bind order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundBehaviour> {
        self.behaviours.iter()
    }
}

/// Binds behaviours to `component`.
///
/// # Errors
///
/// Returns a [`CompositeValidationError`] naming every behaviour whose
/// configuration failed validation, or which was requested twice.
pub fn bind<I>(
    component: &ComponentId,
    configs: I,
) -> Result<ComponentBehaviourSet, CompositeValidationError>
where
    I: IntoIterator<Item = (BehaviourDescriptor, Value)>,
{
    bind_resolved(component, configs.into_iter().map(Ok))
}

/// Binds already-resolved requests; an `Err` entry is a failure decided
/// upstream (e.g. an unregistered name) and is reported alongside the rest.
pub(crate) fn bind_resolved<I>(
    component: &ComponentId,
    requests: I,
) -> Result<ComponentBehaviourSet, CompositeValidationError>
where
    I: IntoIterator<Item = Result<(BehaviourDescriptor, Value), BehaviourFailure>>,
{
    let mut failures = Vec::new();
    let mut validated = Vec::new();
    let mut seen = HashSet::new();

    for request in requests {
        let (descriptor, raw) = match request {
            Ok(pair) => pair,
            Err(failure) => {
                failures.push(failure);
                continue;
            }
        };

        if !seen.insert(descriptor.name().to_string()) {
            failures.push(BehaviourFailure::Duplicate {
                behaviour: descriptor.name().to_string(),
            });
            continue;
        }

        match descriptor.validate(&raw) {
            Ok(config) => validated.push((descriptor, config)),
            Err(errors) => failures.push(BehaviourFailure::InvalidConfig {
                behaviour: descriptor.name().to_string(),
                errors,
            }),
        }
    }

    if !failures.is_empty() {
        let err = CompositeValidationError {
            component: component.fqn(),
            failures,
        };
        tracing::warn!(
            component = %component,
            failed = ?err.failed_behaviours(),
            "behaviour bind rejected"
        );
        return Err(err);
    }

    let behaviours = validated
        .into_iter()
        .map(|(descriptor, config)| instantiate(component, descriptor, config))
        .collect::<Vec<_>>();

    tracing::debug!(
        component = %component,
        behaviours = behaviours.len(),
        "behaviours bound"
    );

    Ok(ComponentBehaviourSet {
        component: component.clone(),
        behaviours,
    })
}

fn instantiate(
    component: &ComponentId,
    descriptor: BehaviourDescriptor,
    config: ValidatedConfig,
) -> BoundBehaviour {
    let config = Arc::new(config);
    let name: Arc<str> = Arc::from(descriptor.name());

    let state = descriptor
        .state_fn()
        .map(|factory| StateCell::new(&name, factory(&config)));

    let events = descriptor.active_fn().map_or_else(Vec::new, |factory| {
        let ctx = InstanceContext::new(component, &name, &config, state.as_ref());
        factory(&ctx)
    });

    let apis = descriptor
        .apis()
        .iter()
        .map(|(api, f)| {
            let f = Arc::clone(f);
            let component = component.clone();
            let name = Arc::clone(&name);
            let config = Arc::clone(&config);
            let state = state.clone();
            let call: CallFn = Arc::new(move |args: &[Value]| {
                let ctx = InstanceContext::new(&component, &name, &config, state.as_ref());
                f(&ctx, args)
            });
            (
                api.clone(),
                BoundApi {
                    name: api.clone(),
                    call,
                },
            )
        })
        .collect();

    BoundBehaviour {
        descriptor,
        config,
        state,
        apis,
        events,
    }
}
