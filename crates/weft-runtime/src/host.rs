//! Host components.
//!
//! A [`HostComponent`] owns the behaviour set bound to it and an
//! [`EventTable`] holding the handlers those behaviours declared.
//! Binding happens exactly once.

use crate::EditorError;
use serde_json::Value;
use weft_behaviour::{
    bind, BehaviourDescriptor, BehaviourError, BehaviourRegistry, ComponentBehaviourSet,
    DispatchReport, EventTable,
};
use weft_types::ComponentId;

/// A component hosted by an editor.
#[derive(Debug)]
pub struct HostComponent {
    id: ComponentId,
    behaviours: Option<ComponentBehaviourSet>,
    events: EventTable,
}

impl HostComponent {
    /// Creates an unbound component.
    #[must_use]
    pub fn new(id: ComponentId) -> Self {
        Self {
            id,
            behaviours: None,
            events: EventTable::new(),
        }
    }

    /// Component id.
    #[must_use]
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Returns `true` once behaviours have been bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.behaviours.is_some()
    }

    /// Binds descriptors with their raw configs and wires their events.
    ///
    /// # Errors
    ///
    /// - [`EditorError::AlreadyBound`] on a second call
    /// - [`EditorError::Bind`] if any configuration is invalid
    pub fn bind<I>(&mut self, configs: I) -> Result<(), EditorError>
    where
        I: IntoIterator<Item = (BehaviourDescriptor, Value)>,
    {
        self.ensure_unbound()?;
        let set = bind(&self.id, configs)?;
        self.attach(set);
        Ok(())
    }

    /// Like [`bind`](Self::bind), resolving behaviours by name.
    ///
    /// # Errors
    ///
    /// Same as [`bind`](Self::bind); unregistered names are bind failures.
    pub fn bind_named<I, S>(
        &mut self,
        registry: &BehaviourRegistry,
        requests: I,
    ) -> Result<(), EditorError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        self.ensure_unbound()?;
        let set = registry.bind_named(&self.id, requests)?;
        self.attach(set);
        Ok(())
    }

    fn ensure_unbound(&self) -> Result<(), EditorError> {
        if self.is_bound() {
            tracing::warn!(component = %self.id, "component already bound");
            return Err(EditorError::AlreadyBound {
                component: self.id.fqn(),
            });
        }
        Ok(())
    }

    fn attach(&mut self, set: ComponentBehaviourSet) {
        let wired = set.wire_into(&mut self.events);
        tracing::debug!(
            component = %self.id,
            behaviours = ?set.names(),
            handlers = wired,
            "component bound"
        );
        self.behaviours = Some(set);
    }

    /// Bound behaviour set, if bound.
    #[must_use]
    pub fn behaviours(&self) -> Option<&ComponentBehaviourSet> {
        self.behaviours.as_ref()
    }

    /// Calls `<behaviour>.<api>(args)` on this component.
    ///
    /// # Errors
    ///
    /// Returns `NotBound` if the component is unbound or lacks the
    /// behaviour, otherwise whatever the API call returns.
    pub fn call(
        &self,
        behaviour: &str,
        api: &str,
        args: &[Value],
    ) -> Result<Value, BehaviourError> {
        self.behaviours
            .as_ref()
            .ok_or_else(|| BehaviourError::NotBound(behaviour.to_string()))?
            .call(behaviour, api, args)
    }

    /// Dispatches `event` to this component's handlers.
    pub fn dispatch(&self, event: &str, payload: &Value) -> DispatchReport {
        self.events.dispatch(event, payload)
    }

    /// Handlers wired for this component.
    #[must_use]
    pub fn events(&self) -> &EventTable {
        &self.events
    }
}
