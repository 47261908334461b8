//! The editor host.
//!
//! [`Editor`] composes an [`EditorMode`] with the [`HostComponent`]s
//! declared in a [`WeftConfig`], resolving their behaviours through a
//! [`BehaviourRegistry`].
//!
//! # Build Order
//!
//! 1. Validate the configuration (all problems reported together)
//! 2. Create the mode state, running read-only installers once
//! 3. Register declarative modes
//! 4. Bind declared components
//! 5. Switch to `[mode] initial`

use crate::config::{ComponentDef, WeftConfig};
use crate::{EditorError, HostComponent};
use serde_json::Value;
use weft_behaviour::{BehaviourRegistry, DispatchReport};
use weft_mode::{
    EditorMode, ModeDescriptor, ModeSwitch, ReadOnlyFlag, ReadOnlyFlags, ReadOnlyInstaller,
    ReadOnlySource, DESIGN, READONLY,
};
use weft_types::{ComponentId, HostId};

/// Builder for [`Editor`].
///
/// # Example
///
/// ```
/// use weft_runtime::config::WeftConfig;
/// use weft_runtime::Editor;
///
/// let config = WeftConfig::from_toml(r#"
/// [mode]
/// initial = "review"
///
/// [[modes]]
/// name = "review"
/// editor_read_only = { ui_enabled = true }
/// "#).unwrap();
///
/// let editor = Editor::builder().config(config).build().unwrap();
/// assert_eq!(editor.mode(), "review");
/// assert!(editor.is_ui_enabled());
/// assert!(!editor.is_selection_enabled());
/// ```
pub struct EditorBuilder {
    config: WeftConfig,
    behaviours: BehaviourRegistry,
    read_only: Box<dyn ReadOnlySource>,
    installers: Vec<Box<dyn ReadOnlyInstaller>>,
    skip_components: bool,
}

impl EditorBuilder {
    fn new() -> Self {
        Self {
            config: WeftConfig::default(),
            behaviours: BehaviourRegistry::new(),
            read_only: Box::new(ReadOnlyFlag::default()),
            installers: Vec::new(),
            skip_components: false,
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: WeftConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the registry used to resolve component behaviours.
    #[must_use]
    pub fn behaviours(mut self, registry: BehaviourRegistry) -> Self {
        self.behaviours = registry;
        self
    }

    /// Sets the host's own read-only check.
    #[must_use]
    pub fn read_only_source(mut self, source: impl ReadOnlySource + 'static) -> Self {
        self.read_only = Box::new(source);
        self
    }

    /// Adds a read-only installer.
    #[must_use]
    pub fn installer(mut self, installer: impl ReadOnlyInstaller + 'static) -> Self {
        self.installers.push(Box::new(installer));
        self
    }

    /// Skips binding the configured components.
    ///
    /// Useful for inspecting modes without the behaviours the
    /// components need.
    #[must_use]
    pub fn skip_components(mut self) -> Self {
        self.skip_components = true;
        self
    }

    /// Builds the editor.
    ///
    /// # Errors
    ///
    /// - [`EditorError::InvalidConfig`] with every validation problem
    /// - [`EditorError::Bind`] or [`EditorError::DuplicateComponent`] for
    ///   component wiring failures
    /// - [`EditorError::Mode`] if switching to the initial mode fails
    pub fn build(self) -> Result<Editor, EditorError> {
        let errors = self.config.validate_all();
        if !errors.is_empty() {
            tracing::warn!(problems = errors.len(), "configuration rejected");
            return Err(EditorError::InvalidConfig(errors));
        }

        let mut mode = EditorMode::new(BoxedSource(self.read_only), self.installers);
        for def in &self.config.modes {
            mode.register(def.name.clone(), ModeDescriptor::new(def.editor_read_only));
        }

        let mut editor = Editor {
            id: HostId::new(),
            mode,
            components: Vec::new(),
            behaviours: self.behaviours,
        };

        if !self.skip_components {
            for def in &self.config.components {
                editor.add_configured(def)?;
            }
        }

        editor.mode.set(&self.config.mode.initial)?;
        tracing::debug!(
            editor = %editor.id,
            mode = editor.mode.get(),
            components = editor.components.len(),
            "editor built"
        );
        Ok(editor)
    }
}

struct BoxedSource(Box<dyn ReadOnlySource>);

impl ReadOnlySource for BoxedSource {
    fn is_read_only(&self) -> bool {
        self.0.is_read_only()
    }
}

/// An editor host: mode state plus hosted components.
#[derive(Debug)]
pub struct Editor {
    id: HostId,
    mode: EditorMode,
    components: Vec<HostComponent>,
    behaviours: BehaviourRegistry,
}

impl Editor {
    /// Starts building an editor.
    #[must_use]
    pub fn builder() -> EditorBuilder {
        EditorBuilder::new()
    }

    /// Builds an editor from `config`, resolving behaviours in `behaviours`.
    ///
    /// # Errors
    ///
    /// See [`EditorBuilder::build`].
    pub fn from_config(
        config: WeftConfig,
        behaviours: BehaviourRegistry,
    ) -> Result<Self, EditorError> {
        Self::builder()
            .config(config)
            .behaviours(behaviours)
            .build()
    }

    /// Host identity.
    #[must_use]
    pub fn id(&self) -> HostId {
        self.id
    }

    // ── Modes ──

    /// Active mode name.
    #[must_use]
    pub fn mode(&self) -> &str {
        self.mode.get()
    }

    /// Switches mode.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Mode`]; the active mode is unchanged.
    pub fn set_mode(&mut self, name: &str) -> Result<(), EditorError> {
        Ok(self.mode.set(name)?)
    }

    /// Switches to `readonly` when `read_only`, otherwise to `design`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Mode`] if a hook fails.
    pub fn set_read_only(&mut self, read_only: bool) -> Result<(), EditorError> {
        self.set_mode(if read_only { READONLY } else { DESIGN })
    }

    /// Registers a mode.
    pub fn register_mode(&mut self, name: impl Into<String>, descriptor: ModeDescriptor) {
        self.mode.register(name, descriptor);
    }

    /// Subscribes to successful mode switches.
    pub fn on_mode_switch(&mut self, listener: impl Fn(&ModeSwitch) + Send + Sync + 'static) {
        self.mode.on_switch(listener);
    }

    /// Whether UI interaction is enabled.
    #[must_use]
    pub fn is_ui_enabled(&self) -> bool {
        self.mode.is_ui_enabled()
    }

    /// Whether content selection is enabled.
    #[must_use]
    pub fn is_selection_enabled(&self) -> bool {
        self.mode.is_selection_enabled()
    }

    /// The host's own read-only answer.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.mode.is_read_only()
    }

    /// Current derived flags.
    #[must_use]
    pub fn flags(&self) -> ReadOnlyFlags {
        self.mode.flags()
    }

    /// Mode state, for introspection.
    #[must_use]
    pub fn mode_state(&self) -> &EditorMode {
        &self.mode
    }

    // ── Components ──

    /// Adds an already-constructed component.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::DuplicateComponent`] if the id is taken.
    pub fn add_component(&mut self, component: HostComponent) -> Result<(), EditorError> {
        if self.component(component.id()).is_some() {
            return Err(EditorError::DuplicateComponent {
                component: component.id().fqn(),
            });
        }
        self.components.push(component);
        Ok(())
    }

    fn add_configured(&mut self, def: &ComponentDef) -> Result<(), EditorError> {
        let mut component = HostComponent::new(ComponentId::parse(&def.id));
        component.bind_named(
            &self.behaviours,
            def.behaviours
                .iter()
                .map(|b| (b.name.as_str(), b.config.clone())),
        )?;
        self.add_component(component)
    }

    /// Returns the component with this id (compared by FQN).
    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&HostComponent> {
        self.components.iter().find(|c| c.id().fqn_eq(id))
    }

    /// Looks up a component by FQN string.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownComponent`].
    pub fn component_by_name(&self, fqn: &str) -> Result<&HostComponent, EditorError> {
        self.component(&ComponentId::parse(fqn))
            .ok_or_else(|| EditorError::UnknownComponent {
                component: fqn.to_string(),
            })
    }

    /// Hosted components, in insertion order.
    #[must_use]
    pub fn components(&self) -> &[HostComponent] {
        &self.components
    }

    /// Calls `<behaviour>.<api>(args)` on the component named `fqn`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponent` or the wrapped behaviour error.
    pub fn call(
        &self,
        fqn: &str,
        behaviour: &str,
        api: &str,
        args: &[Value],
    ) -> Result<Value, EditorError> {
        Ok(self.component_by_name(fqn)?.call(behaviour, api, args)?)
    }

    /// Dispatches `event` to the component named `fqn`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponent`.
    pub fn dispatch(
        &self,
        fqn: &str,
        event: &str,
        payload: &Value,
    ) -> Result<DispatchReport, EditorError> {
        Ok(self.component_by_name(fqn)?.dispatch(event, payload))
    }

    /// Behaviour registry used for configured components.
    #[must_use]
    pub fn behaviour_registry(&self) -> &BehaviourRegistry {
        &self.behaviours
    }
}
