//! Test utilities for modes.
//!
//! Provides [`RecordingMode`], which builds descriptors whose hooks append
//! to a shared [`CallLog`], and [`RecordingInstaller`].

use crate::{EditorReadOnly, HookFailure, ModeDescriptor, ReadOnlyInstaller, ReadOnlySignals};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared, ordered log of hook calls such as `"design.deactivate"`.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    /// Snapshot of all entries.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    /// Returns `true` if nothing was logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

/// Builder for a [`ModeDescriptor`] that records its hook calls.
///
/// A failing hook is still logged before it fails.
#[derive(Debug, Clone)]
pub struct RecordingMode {
    label: String,
    log: CallLog,
    policy: EditorReadOnly,
    fail_activate: Option<String>,
    fail_deactivate: Option<String>,
}

impl RecordingMode {
    /// Starts a fully enabled recording mode logging as `label`.
    #[must_use]
    pub fn new(label: &str, log: &CallLog) -> Self {
        Self {
            label: label.to_string(),
            log: log.clone(),
            policy: EditorReadOnly::EDITABLE,
            fail_activate: None,
            fail_deactivate: None,
        }
    }

    /// Sets the read-only policy.
    #[must_use]
    pub fn policy(mut self, policy: EditorReadOnly) -> Self {
        self.policy = policy;
        self
    }

    /// Makes `activate` fail with `message`.
    #[must_use]
    pub fn fail_on_activate(mut self, message: &str) -> Self {
        self.fail_activate = Some(message.to_string());
        self
    }

    /// Makes `deactivate` fail with `message`.
    #[must_use]
    pub fn fail_on_deactivate(mut self, message: &str) -> Self {
        self.fail_deactivate = Some(message.to_string());
        self
    }

    /// Builds the descriptor.
    #[must_use]
    pub fn descriptor(self) -> ModeDescriptor {
        let activate = recorder(
            &self.log,
            format!("{}.activate", self.label),
            self.fail_activate,
        );
        let deactivate = recorder(
            &self.log,
            format!("{}.deactivate", self.label),
            self.fail_deactivate,
        );
        ModeDescriptor::new(self.policy)
            .on_activate(activate)
            .on_deactivate(deactivate)
    }
}

fn recorder(
    log: &CallLog,
    entry: String,
    failure: Option<String>,
) -> impl Fn() -> Result<(), HookFailure> + Send + Sync + 'static {
    let log = log.clone();
    move || {
        log.push(entry.clone());
        match &failure {
            Some(message) => Err(HookFailure::new(message.clone())),
            None => Ok(()),
        }
    }
}

/// A [`ReadOnlyInstaller`] that counts installs and keeps the signals.
///
/// Clones share counters, so a clone can be kept as a handle after the
/// original is handed to an editor.
#[derive(Debug, Clone, Default)]
pub struct RecordingInstaller {
    content: Arc<AtomicUsize>,
    selection: Arc<AtomicUsize>,
    signals: Arc<Mutex<Option<ReadOnlySignals>>>,
}

impl RecordingInstaller {
    /// Times `install_content_filters` ran.
    #[must_use]
    pub fn content_filter_installs(&self) -> usize {
        self.content.load(Ordering::SeqCst)
    }

    /// Times `install_selection_blockers` ran.
    #[must_use]
    pub fn selection_blocker_installs(&self) -> usize {
        self.selection.load(Ordering::SeqCst)
    }

    /// Signals received at install time.
    #[must_use]
    pub fn signals(&self) -> Option<ReadOnlySignals> {
        self.signals.lock().clone()
    }
}

impl ReadOnlyInstaller for RecordingInstaller {
    fn install_content_filters(&mut self, signals: &ReadOnlySignals) {
        self.content.fetch_add(1, Ordering::SeqCst);
        *self.signals.lock() = Some(signals.clone());
    }

    fn install_selection_blockers(&mut self, signals: &ReadOnlySignals) {
        self.selection.fetch_add(1, Ordering::SeqCst);
        *self.signals.lock() = Some(signals.clone());
    }
}
