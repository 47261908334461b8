//! Behaviour registry: name-keyed lookup for declaratively wired components.
//!
//! Owned by the host; never global. Use `Arc<RwLock<BehaviourRegistry>>`
//! if several owners need it:
//! - lookups and [`bind_named`](BehaviourRegistry::bind_named) take `&self`
//! - [`register`](BehaviourRegistry::register) takes `&mut self`

use crate::binder::bind_resolved;
use crate::{
    BehaviourDescriptor, BehaviourFailure, ComponentBehaviourSet, CompositeValidationError,
};
use serde_json::Value;
use std::collections::HashMap;
use weft_types::ComponentId;

/// Central registry of behaviour descriptors.
#[derive(Debug, Default)]
pub struct BehaviourRegistry {
    behaviours: HashMap<String, BehaviourDescriptor>,
}

impl BehaviourRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `descriptor` under its name.
    ///
    /// Last write wins: a previous descriptor with the same name is
    /// replaced and returned.
    pub fn register(&mut self, descriptor: BehaviourDescriptor) -> Option<BehaviourDescriptor> {
        let name = descriptor.name().to_string();
        let previous = self.behaviours.insert(name.clone(), descriptor);
        tracing::debug!(behaviour = %name, replaced = previous.is_some(), "behaviour registered");
        previous
    }

    /// Returns the descriptor registered as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BehaviourDescriptor> {
        self.behaviours.get(name)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.behaviours.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.behaviours.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered behaviours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }

    /// Resolves behaviour names and binds them to `component`.
    ///
    /// Unregistered names are reported in the same composite error as
    /// configuration failures.
    ///
    /// # Errors
    ///
    /// Returns a [`CompositeValidationError`] listing every failing request.
    pub fn bind_named<I, S>(
        &self,
        component: &ComponentId,
        requests: I,
    ) -> Result<ComponentBehaviourSet, CompositeValidationError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let resolved = requests.into_iter().map(|(name, raw)| {
            let name = name.as_ref();
            self.get(name)
                .map(|descriptor| (descriptor.clone(), raw))
                .ok_or_else(|| BehaviourFailure::Unregistered {
                    behaviour: name.to_string(),
                })
        });
        bind_resolved(component, resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::counter_behaviour;
    use crate::BehaviourSpec;
    use serde_json::json;

    #[test]
    fn register_and_lookup() {
        let mut registry = BehaviourRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register(counter_behaviour("counter")).is_none());
        let focusing = BehaviourSpec::new("focusing").create();
        assert!(registry.register(focusing).is_none());

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("counter"));
        assert_eq!(registry.names(), vec!["counter", "focusing"]);
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = BehaviourRegistry::new();
        let first = BehaviourSpec::new("focusing").create();
        let second = BehaviourSpec::new("focusing")
            .api("focus", |_, _| Ok(json!(true)))
            .create();

        registry.register(first.clone());
        let replaced = registry.register(second.clone()).unwrap();

        assert!(replaced.ptr_eq(&first));
        assert!(registry.get("focusing").unwrap().ptr_eq(&second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn bind_named_resolves_descriptors() {
        let mut registry = BehaviourRegistry::new();
        registry.register(counter_behaviour("counter"));

        let comp = ComponentId::builtin("spinner");
        let set = registry
            .bind_named(&comp, [("counter", json!({"start": 4}))])
            .unwrap();
        assert_eq!(set.call("counter", "get", &[]).unwrap(), json!(4));
    }

    #[test]
    fn bind_named_reports_unregistered_with_invalid() {
        let mut registry = BehaviourRegistry::new();
        registry.register(counter_behaviour("counter"));

        let comp = ComponentId::builtin("spinner");
        let err = registry
            .bind_named(
                &comp,
                [
                    ("sliding", json!({})),
                    ("counter", json!({"bogus": 1})),
                ],
            )
            .unwrap_err();

        assert_eq!(err.failed_behaviours(), vec!["sliding", "counter"]);
        assert!(matches!(
            err.failure("sliding"),
            Some(BehaviourFailure::Unregistered { .. })
        ));
        assert!(matches!(
            err.failure("counter"),
            Some(BehaviourFailure::InvalidConfig { .. })
        ));
    }
}
