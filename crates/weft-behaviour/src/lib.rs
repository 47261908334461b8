//! Behaviour composition for weft.
//!
//! A *behaviour* is a named, independently developed capability that can be
//! attached to any component: a configuration schema, optional per-instance
//! state, optional event bindings and a namespaced API.
//!
//! # Lifecycle
//!
//! ```text
//!   BehaviourSpec ──create()──► BehaviourDescriptor   (once per behaviour)
//!                                      │
//!        raw config (JSON) ────────────┤
//!                                      ▼
//!                          validate against FieldSchema
//!                                      │   all failures collected
//!                                      ▼
//!                     bind() ──► ComponentBehaviourSet (once per component)
//!                                  ├─ ValidatedConfig   (defaults applied)
//!                                  ├─ StateCell         (fresh per instance)
//!                                  ├─ EventBinding[]    (wired by the host)
//!                                  └─ BoundApi          (context applied)
//! ```
//!
//! # Core Concepts
//!
//! ## Schema
//!
//! [`FieldSchema`] declares the accepted configuration keys. Validation is
//! strict: unknown keys are errors, and every error names its field.
//!
//! ## Binding
//!
//! [`bind`] validates every requested behaviour before building anything,
//! so a [`CompositeValidationError`] always lists every failure.
//!
//! ## Events
//!
//! `active` factories return [`EventBinding`]s. The host decides how to
//! dispatch them through an [`EventSink`]; [`EventTable`] is the default.
//!
//! # Example
//!
//! ```
//! use weft_behaviour::{bind, BehaviourSpec, BehaviourState, FieldSpec};
//! use weft_types::ComponentId;
//! use serde_json::{json, Value};
//!
//! struct Expanded(bool);
//! impl BehaviourState for Expanded {}
//!
//! let sliding = BehaviourSpec::new("sliding")
//!     .fields([FieldSpec::required("dimension").one_of(["width", "height"])])
//!     .state(|_| Expanded(false))
//!     .api("toggle", |ctx, _| {
//!         ctx.with_state_mut(|s: &mut Expanded| {
//!             s.0 = !s.0;
//!             Value::Bool(s.0)
//!         })
//!     })
//!     .create();
//!
//! let drawer = ComponentId::builtin("drawer");
//! let set = bind(&drawer, [(sliding.clone(), json!({"dimension": "height"}))]).unwrap();
//! assert_eq!(set.call("sliding", "toggle", &[]).unwrap(), json!(true));
//!
//! let err = bind(&drawer, [(sliding, json!({"dimension": "depth"}))]).unwrap_err();
//! assert_eq!(err.failed_behaviours(), vec!["sliding"]);
//! ```

mod binder;
mod context;
mod descriptor;
mod error;
mod event;
mod registry;
mod schema;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use binder::{bind, BoundApi, BoundBehaviour, ComponentBehaviourSet};
pub use context::InstanceContext;
pub use descriptor::{
    create, ActiveFn, ApiFn, BehaviourDescriptor, BehaviourSpec, HelperFn, StateFn,
};
pub use error::{BehaviourError, BehaviourFailure, CompositeValidationError, ValidationError};
pub use event::{DispatchReport, EventBinding, EventHandlerFn, EventOutcome, EventSink, EventTable};
pub use registry::BehaviourRegistry;
pub use schema::{
    validate, FieldCheck, FieldSchema, FieldSpec, Presence, ValidatedConfig, ValueKind,
};
pub use state::{AsAny, BehaviourState, StateCell};
