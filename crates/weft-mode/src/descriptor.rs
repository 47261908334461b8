//! Mode descriptors.

use crate::{EditorReadOnly, HookFailure};
use std::fmt;
use std::sync::Arc;

/// A mode lifecycle hook.
pub type ModeHookFn = Arc<dyn Fn() -> Result<(), HookFailure> + Send + Sync>;

/// One operating mode: lifecycle hooks plus read-only policy.
///
/// # Example
///
/// ```
/// use weft_mode::{EditorReadOnly, HookFailure, ModeDescriptor};
///
/// let preview = ModeDescriptor::new(EditorReadOnly::PerAxis {
///     ui_enabled: true,
///     selection_enabled: false,
/// })
/// .on_activate(|| Ok(()))
/// .on_deactivate(|| Err(HookFailure::new("preview cannot be left yet")));
///
/// assert!(preview.activate().is_ok());
/// assert!(preview.deactivate().is_err());
/// ```
#[derive(Clone)]
pub struct ModeDescriptor {
    activate: ModeHookFn,
    deactivate: ModeHookFn,
    editor_read_only: EditorReadOnly,
}

impl ModeDescriptor {
    /// Creates a mode with no-op hooks.
    #[must_use]
    pub fn new(editor_read_only: EditorReadOnly) -> Self {
        Self {
            activate: Arc::new(|| Ok(())),
            deactivate: Arc::new(|| Ok(())),
            editor_read_only,
        }
    }

    /// The built-in `design` mode: fully enabled.
    #[must_use]
    pub fn design() -> Self {
        Self::new(EditorReadOnly::EDITABLE)
    }

    /// The built-in `readonly` mode: fully disabled.
    #[must_use]
    pub fn readonly() -> Self {
        Self::new(EditorReadOnly::READ_ONLY)
    }

    /// Sets the `activate` hook.
    #[must_use]
    pub fn on_activate(
        mut self,
        f: impl Fn() -> Result<(), HookFailure> + Send + Sync + 'static,
    ) -> Self {
        self.activate = Arc::new(f);
        self
    }

    /// Sets the `deactivate` hook.
    #[must_use]
    pub fn on_deactivate(
        mut self,
        f: impl Fn() -> Result<(), HookFailure> + Send + Sync + 'static,
    ) -> Self {
        self.deactivate = Arc::new(f);
        self
    }

    /// Runs the `activate` hook.
    ///
    /// # Errors
    ///
    /// Whatever the hook returns.
    pub fn activate(&self) -> Result<(), HookFailure> {
        (self.activate)()
    }

    /// Runs the `deactivate` hook.
    ///
    /// # Errors
    ///
    /// Whatever the hook returns.
    pub fn deactivate(&self) -> Result<(), HookFailure> {
        (self.deactivate)()
    }

    /// Read-only policy.
    #[must_use]
    pub fn editor_read_only(&self) -> EditorReadOnly {
        self.editor_read_only
    }
}

impl fmt::Debug for ModeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeDescriptor")
            .field("editor_read_only", &self.editor_read_only)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReadOnlyFlags;

    #[test]
    fn builtins() {
        assert_eq!(
            ModeDescriptor::design().editor_read_only().flags(),
            ReadOnlyFlags::ENABLED
        );
        assert_eq!(
            ModeDescriptor::readonly().editor_read_only().flags(),
            ReadOnlyFlags::DISABLED
        );
        assert!(ModeDescriptor::design().activate().is_ok());
        assert!(ModeDescriptor::design().deactivate().is_ok());
    }

    #[test]
    fn hooks_are_replaceable() {
        let mode = ModeDescriptor::design().on_activate(|| Err(HookFailure::new("no")));
        assert_eq!(mode.activate(), Err(HookFailure::new("no")));
    }
}
