//! Read-only signals and the installer seam.
//!
//! Content filters and selection blockers live outside the engine. They are
//! installed once per host through [`ReadOnlyInstaller`] and receive a
//! [`ReadOnlySignals`] handle that always reflects the active mode.
//!
//! [`ReadOnlySource`] is the separate, host-owned answer to "is the
//! document read-only?", which may diverge from the mode flags.

use crate::ReadOnlyFlags;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Live view of the active mode's derived flags.
///
/// Clones share the same underlying flags.
#[derive(Debug, Clone)]
pub struct ReadOnlySignals {
    ui_enabled: Arc<AtomicBool>,
    selection_enabled: Arc<AtomicBool>,
}

impl ReadOnlySignals {
    /// Creates signals initialised to `flags`.
    #[must_use]
    pub fn new(flags: ReadOnlyFlags) -> Self {
        Self {
            ui_enabled: Arc::new(AtomicBool::new(flags.ui_enabled)),
            selection_enabled: Arc::new(AtomicBool::new(flags.selection_enabled)),
        }
    }

    /// Whether UI interaction is currently enabled.
    #[must_use]
    pub fn is_ui_enabled(&self) -> bool {
        self.ui_enabled.load(Ordering::Acquire)
    }

    /// Whether content selection is currently enabled.
    #[must_use]
    pub fn is_selection_enabled(&self) -> bool {
        self.selection_enabled.load(Ordering::Acquire)
    }

    /// Current flags.
    #[must_use]
    pub fn flags(&self) -> ReadOnlyFlags {
        ReadOnlyFlags {
            ui_enabled: self.is_ui_enabled(),
            selection_enabled: self.is_selection_enabled(),
        }
    }

    pub(crate) fn store(&self, flags: ReadOnlyFlags) {
        self.ui_enabled.store(flags.ui_enabled, Ordering::Release);
        self.selection_enabled
            .store(flags.selection_enabled, Ordering::Release);
    }
}

/// The host's authoritative read-only check.
pub trait ReadOnlySource: Send + Sync {
    /// Returns `true` if the host considers its content read-only.
    fn is_read_only(&self) -> bool;
}

/// A settable [`ReadOnlySource`].
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyFlag(Arc<AtomicBool>);

impl ReadOnlyFlag {
    /// Creates a flag with the given initial value.
    #[must_use]
    pub fn new(read_only: bool) -> Self {
        Self(Arc::new(AtomicBool::new(read_only)))
    }

    /// Sets the flag.
    pub fn set(&self, read_only: bool) {
        self.0.store(read_only, Ordering::Release);
    }
}

impl ReadOnlySource for ReadOnlyFlag {
    fn is_read_only(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl<F> ReadOnlySource for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_read_only(&self) -> bool {
        self()
    }
}

/// Installs read-only blocking into the host.
///
/// Each method is called exactly once, when the owning
/// [`EditorMode`](crate::EditorMode) is constructed.
pub trait ReadOnlyInstaller: Send + Sync {
    /// Installs filters that reject content edits while UI is disabled.
    fn install_content_filters(&mut self, signals: &ReadOnlySignals);

    /// Installs blockers that suppress selection while it is disabled.
    fn install_selection_blockers(&mut self, signals: &ReadOnlySignals);
}
