//! The editor-facing mode API.
//!
//! [`EditorMode`] owns a [`ModeRegistry`], keeps a shared
//! [`ReadOnlySignals`] in step with it, and answers the host's
//! read-only questions.
//!
//! # Example
//!
//! ```
//! use weft_mode::{EditorMode, ReadOnlyFlag};
//!
//! let read_only = ReadOnlyFlag::new(false);
//! let mut mode = EditorMode::new(read_only.clone(), Vec::new());
//!
//! mode.set("readonly").unwrap();
//! assert_eq!(mode.get(), "readonly");
//! assert!(!mode.is_ui_enabled());
//!
//! // The host's own read-only answer is independent of the mode.
//! assert!(!mode.is_read_only());
//! read_only.set(true);
//! assert!(mode.is_read_only());
//! ```

use crate::{
    ModeDescriptor, ModeError, ModeRegistry, ModeSwitch, ReadOnlyFlag, ReadOnlyFlags,
    ReadOnlyInstaller, ReadOnlySignals, ReadOnlySource,
};
use std::fmt;

/// Mode state of one editor host.
pub struct EditorMode {
    registry: ModeRegistry,
    signals: ReadOnlySignals,
    read_only: Box<dyn ReadOnlySource>,
    installers: Vec<Box<dyn ReadOnlyInstaller>>,
}

impl EditorMode {
    /// Creates the mode state and runs each installer once.
    ///
    /// Installers receive the shared signals and are kept alive for the
    /// lifetime of the editor.
    #[must_use]
    pub fn new(
        read_only: impl ReadOnlySource + 'static,
        installers: Vec<Box<dyn ReadOnlyInstaller>>,
    ) -> Self {
        let mut registry = ModeRegistry::new();
        let signals = ReadOnlySignals::new(registry.flags());

        // First listener, so later listeners already observe the new flags.
        let live = signals.clone();
        registry.on_switch(move |switch| live.store(switch.flags));

        let mut installers = installers;
        for installer in &mut installers {
            installer.install_content_filters(&signals);
            installer.install_selection_blockers(&signals);
        }
        tracing::debug!(
            installers = installers.len(),
            mode = registry.get(),
            "editor mode ready"
        );
        Self {
            registry,
            signals,
            read_only: Box::new(read_only),
            installers,
        }
    }

    /// Registers a mode. See [`ModeRegistry::register`].
    pub fn register(
        &mut self,
        name: impl Into<String>,
        descriptor: ModeDescriptor,
    ) -> Option<ModeDescriptor> {
        let previous = self.registry.register(name, descriptor);
        self.signals.store(self.registry.flags());
        previous
    }

    /// Switches mode. See [`ModeRegistry::set`].
    ///
    /// # Errors
    ///
    /// Returns [`ModeError`]; the active mode and signals are unchanged.
    pub fn set(&mut self, name: &str) -> Result<(), ModeError> {
        self.registry.set(name)
    }

    /// Active mode name.
    #[must_use]
    pub fn get(&self) -> &str {
        self.registry.get()
    }

    /// Whether UI interaction is enabled.
    #[must_use]
    pub fn is_ui_enabled(&self) -> bool {
        self.registry.is_ui_enabled()
    }

    /// Whether content selection is enabled.
    #[must_use]
    pub fn is_selection_enabled(&self) -> bool {
        self.registry.is_selection_enabled()
    }

    /// The host's own read-only answer.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only.is_read_only()
    }

    /// Current derived flags.
    #[must_use]
    pub fn flags(&self) -> ReadOnlyFlags {
        self.registry.flags()
    }

    /// Subscribes to successful transitions.
    ///
    /// The signals are already updated when listeners run.
    pub fn on_switch(&mut self, listener: impl Fn(&ModeSwitch) + Send + Sync + 'static) {
        self.registry.on_switch(listener);
    }

    /// Shared signals handed to installers.
    #[must_use]
    pub fn signals(&self) -> &ReadOnlySignals {
        &self.signals
    }

    /// Underlying registry, for introspection.
    #[must_use]
    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    /// Number of installers that were run.
    #[must_use]
    pub fn installer_count(&self) -> usize {
        self.installers.len()
    }
}

impl Default for EditorMode {
    fn default() -> Self {
        Self::new(ReadOnlyFlag::default(), Vec::new())
    }
}

impl fmt::Debug for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorMode")
            .field("registry", &self.registry)
            .field("signals", &self.signals.flags())
            .field("read_only", &self.is_read_only())
            .field("installers", &self.installers.len())
            .finish()
    }
}
