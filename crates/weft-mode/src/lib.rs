//! Editor modes for weft.
//!
//! A host editor is always in exactly one *mode*. Each mode contributes
//! `activate`/`deactivate` hooks and a read-only policy from which two
//! independent flags are derived: UI-enabled and selection-enabled.
//!
//! # Transitions
//!
//! ```text
//!   set("readonly")            active = "design"
//!        │
//!        ├─ unknown name?  ──► Err(UnknownMode)      active unchanged
//!        ├─ already active? ─► Ok, no hooks run
//!        ▼
//!   design.deactivate()  ──✗─► Err(Transition{deactivate})
//!        ▼
//!   readonly.activate()  ──✗─► Err(Transition{activate})
//!        ▼
//!   active = "readonly", signals updated, listeners notified
//! ```
//!
//! # Built-in Modes
//!
//! | Mode       | Policy                 | UI  | Selection |
//! |------------|------------------------|-----|-----------|
//! | `design`   | `Uniform(false)`       | on  | on        |
//! | `readonly` | `Uniform(true)`        | off | off       |
//!
//! Both can be re-registered; the last registration wins.
//!
//! # Example
//!
//! ```
//! use weft_mode::{EditorReadOnly, ModeDescriptor, ModeRegistry};
//!
//! let mut modes = ModeRegistry::new();
//! modes.register(
//!     "review",
//!     ModeDescriptor::new(EditorReadOnly::PerAxis {
//!         ui_enabled: true,
//!         selection_enabled: false,
//!     }),
//! );
//!
//! modes.set("review").unwrap();
//! assert!(modes.is_ui_enabled());
//! assert!(!modes.is_selection_enabled());
//!
//! assert!(modes.set("missing").is_err());
//! assert_eq!(modes.get(), "review");
//! ```

mod descriptor;
mod editor_mode;
mod error;
mod policy;
mod readonly;
mod registry;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use descriptor::{ModeDescriptor, ModeHookFn};
pub use editor_mode::EditorMode;
pub use error::{HookFailure, ModeError, Phase};
pub use policy::{EditorReadOnly, ReadOnlyFlags};
pub use readonly::{ReadOnlyFlag, ReadOnlyInstaller, ReadOnlySignals, ReadOnlySource};
pub use registry::{ModeRegistry, ModeSwitch, DESIGN, READONLY};
