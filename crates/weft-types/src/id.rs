//! Identifier types for weft.

use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// Namespace UUID for deterministic UUID v5 generation of builtin ids.
const WEFT_NAMESPACE: Uuid = uuid!("5b0e6f3c-8a51-4d0e-9d63-2f7c1a4e9b18");

/// Identifier for a component that behaviours are attached to.
///
/// - **Builtin components**: UUID v5, deterministic from the name
/// - **Custom components**: UUID v4, unique per instance
///
/// `PartialEq` compares the UUID too; use [`fqn_eq`](Self::fqn_eq) to
/// compare only `namespace::name`.
///
/// # Example
///
/// ```
/// use weft_types::ComponentId;
///
/// let a = ComponentId::new("plugin", "slider");
/// let b = ComponentId::new("plugin", "slider");
/// assert_ne!(a, b);
/// assert!(a.fqn_eq(&b));
/// assert_eq!(a.fqn(), "plugin::slider");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId {
    /// Globally unique identifier.
    pub uuid: Uuid,
    /// Namespace (e.g. "builtin", "plugin").
    pub namespace: String,
    /// Component name within namespace.
    pub name: String,
}

impl ComponentId {
    /// Creates a new [`ComponentId`] with a random UUID v4.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Creates a builtin component ID with a deterministic UUID v5.
    #[must_use]
    pub fn builtin(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            uuid: Uuid::new_v5(&WEFT_NAMESPACE, name.as_bytes()),
            namespace: "builtin".to_string(),
            name,
        }
    }

    /// Parses a `namespace::name` string.
    ///
    /// Builtin names get their deterministic UUID; anything else gets a
    /// fresh v4. A bare name without `::` is treated as builtin.
    ///
    /// ```
    /// use weft_types::ComponentId;
    ///
    /// assert_eq!(ComponentId::parse("builtin::toolbar"), ComponentId::builtin("toolbar"));
    /// assert_eq!(ComponentId::parse("toolbar"), ComponentId::builtin("toolbar"));
    /// assert_eq!(ComponentId::parse("plugin::slider").namespace, "plugin");
    /// ```
    #[must_use]
    pub fn parse(fqn: &str) -> Self {
        match fqn.split_once("::") {
            Some(("builtin", name)) => Self::builtin(name),
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::builtin(fqn),
        }
    }

    /// Returns the fully qualified name in `namespace::name` format.
    #[must_use]
    pub fn fqn(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }

    /// Compares two ids by FQN only, ignoring UUID.
    #[must_use]
    pub fn fqn_eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.name == other.name
    }

    /// Returns `true` if this is a builtin component.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.namespace == "builtin"
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.namespace, self.name)
    }
}

/// Identifier for an editor host.
///
/// Each host owns exactly one mode registry; the id shows up in logs so
/// transitions from different editors can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostId(pub Uuid);

impl HostId {
    /// Creates a new random [`HostId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for HostId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_deterministic() {
        let a = ComponentId::builtin("toolbar");
        let b = ComponentId::builtin("toolbar");
        let c = ComponentId::builtin("socket");
        assert_eq!(a.uuid, b.uuid);
        assert_ne!(a.uuid, c.uuid);
        assert!(a.is_builtin());
    }

    #[test]
    fn custom_ids_are_random() {
        let a = ComponentId::new("plugin", "slider");
        let b = ComponentId::new("plugin", "slider");
        assert_ne!(a, b);
        assert!(a.fqn_eq(&b));
        assert!(!a.is_builtin());
    }

    #[test]
    fn parse_namespaced() {
        let id = ComponentId::parse("plugin::slider");
        assert_eq!(id.namespace, "plugin");
        assert_eq!(id.name, "slider");
    }

    #[test]
    fn parse_builtin_forms() {
        assert_eq!(
            ComponentId::parse("toolbar"),
            ComponentId::builtin("toolbar")
        );
        assert_eq!(
            ComponentId::parse("builtin::toolbar"),
            ComponentId::builtin("toolbar")
        );
    }

    #[test]
    fn component_id_serde_roundtrip() {
        let id = ComponentId::builtin("toolbar");
        let json = serde_json::to_string(&id).unwrap();
        let back: ComponentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
