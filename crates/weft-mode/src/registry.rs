//! Mode registry: single-slot state machine over named modes.
//!
//! Owned by one host; never global. All mutation goes through `&mut self`,
//! so callers that share a registry serialize through an owning lock.
//!
//! # Transition Order
//!
//! `set(target)` runs the outgoing mode's `deactivate`, then the target's
//! `activate`. The active mode changes only after both succeed; a failure
//! in either leaves it untouched.

use crate::{EditorReadOnly, ModeDescriptor, ModeError, Phase, ReadOnlyFlags};
use std::collections::HashMap;
use std::fmt;

/// Name of the built-in, fully enabled mode.
pub const DESIGN: &str = "design";
/// Name of the built-in, fully disabled mode.
pub const READONLY: &str = "readonly";

/// A completed transition, delivered to [`ModeRegistry::on_switch`] listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSwitch {
    /// Mode that was left.
    pub from: String,
    /// Mode that is now active.
    pub to: String,
    /// Flags derived from the new mode's policy.
    pub flags: ReadOnlyFlags,
}

type SwitchListener = Box<dyn Fn(&ModeSwitch) + Send + Sync>;

struct ActiveMode {
    name: String,
    descriptor: ModeDescriptor,
}

/// Registry of modes with exactly one active.
pub struct ModeRegistry {
    modes: HashMap<String, ModeDescriptor>,
    active: ActiveMode,
    listeners: Vec<SwitchListener>,
}

impl ModeRegistry {
    /// Creates a registry seeded with `design` and `readonly`, with
    /// `design` active.
    #[must_use]
    pub fn new() -> Self {
        let mut modes = HashMap::new();
        modes.insert(DESIGN.to_string(), ModeDescriptor::design());
        modes.insert(READONLY.to_string(), ModeDescriptor::readonly());
        Self {
            modes,
            active: ActiveMode {
                name: DESIGN.to_string(),
                descriptor: ModeDescriptor::design(),
            },
            listeners: Vec::new(),
        }
    }

    /// Registers `descriptor` as `name`, replacing any previous one.
    ///
    /// Never runs hooks. Replacing the active mode takes effect for its
    /// flags immediately and for its `deactivate` on the next transition.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        descriptor: ModeDescriptor,
    ) -> Option<ModeDescriptor> {
        let name = name.into();
        if name == self.active.name {
            self.active.descriptor = descriptor.clone();
        }
        let previous = self.modes.insert(name.clone(), descriptor);
        tracing::debug!(mode = %name, replaced = previous.is_some(), "mode registered");
        previous
    }

    /// Switches to `name`.
    ///
    /// Setting the active mode again is a no-op: no hooks run and no
    /// listener is notified.
    ///
    /// # Errors
    ///
    /// - [`ModeError::UnknownMode`] if `name` is not registered
    /// - [`ModeError::Transition`] if a hook fails
    pub fn set(&mut self, name: &str) -> Result<(), ModeError> {
        if name == self.active.name {
            tracing::trace!(mode = name, "mode already active");
            return Ok(());
        }

        let Some(target) = self.modes.get(name).cloned() else {
            tracing::warn!(mode = name, active = %self.active.name, "unknown mode");
            return Err(ModeError::UnknownMode {
                mode: name.to_string(),
            });
        };

        if let Err(source) = self.active.descriptor.deactivate() {
            return Err(self.rejected(
                self.active.name.clone(),
                Phase::Deactivate,
                source,
            ));
        }
        if let Err(source) = target.activate() {
            return Err(self.rejected(name.to_string(), Phase::Activate, source));
        }

        let flags = target.editor_read_only().flags();
        let previous = std::mem::replace(
            &mut self.active,
            ActiveMode {
                name: name.to_string(),
                descriptor: target,
            },
        );

        tracing::debug!(
            from = %previous.name,
            to = name,
            ui_enabled = flags.ui_enabled,
            selection_enabled = flags.selection_enabled,
            "mode switched"
        );

        let switch = ModeSwitch {
            from: previous.name,
            to: name.to_string(),
            flags,
        };
        for listener in &self.listeners {
            listener(&switch);
        }
        Ok(())
    }

    fn rejected(&self, mode: String, phase: Phase, source: crate::HookFailure) -> ModeError {
        tracing::warn!(
            mode = %mode,
            phase = %phase,
            active = %self.active.name,
            error = %source,
            "mode transition aborted"
        );
        ModeError::Transition {
            mode,
            phase,
            source,
        }
    }

    /// Active mode name.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.active.name
    }

    /// Policy of the active mode.
    #[must_use]
    pub fn editor_read_only(&self) -> EditorReadOnly {
        self.active.descriptor.editor_read_only()
    }

    /// Flags derived from the active mode's policy.
    #[must_use]
    pub fn flags(&self) -> ReadOnlyFlags {
        self.editor_read_only().flags()
    }

    /// Whether UI interaction is enabled in the active mode.
    #[must_use]
    pub fn is_ui_enabled(&self) -> bool {
        self.flags().ui_enabled
    }

    /// Whether content selection is enabled in the active mode.
    #[must_use]
    pub fn is_selection_enabled(&self) -> bool {
        self.flags().selection_enabled
    }

    /// Subscribes to successful transitions.
    pub fn on_switch(&mut self, listener: impl Fn(&ModeSwitch) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the descriptor registered as `name`.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&ModeDescriptor> {
        self.modes.get(name)
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.modes.contains_key(name)
    }

    /// Registered mode names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered modes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Returns `true` if no modes are registered.
    ///
    /// Modes are never removed, so a registry seeded by [`new`](Self::new)
    /// is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeRegistry")
            .field("modes", &self.names())
            .field("active", &self.active.name)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
