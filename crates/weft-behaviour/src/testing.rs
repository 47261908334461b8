//! Test utilities for behaviour binding.
//!
//! Provides a stateful [`counter_behaviour`] and a [`RecordingSink`] that
//! remembers what was wired into it.

use crate::{
    BehaviourDescriptor, BehaviourSpec, BehaviourState, EventBinding, EventOutcome, EventSink,
    FieldSpec, ValueKind,
};
use serde_json::{json, Value};
use weft_types::ComponentId;

/// State of [`counter_behaviour`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    /// Current count.
    pub count: i64,
    /// Amount added per increment.
    pub step: i64,
}

impl BehaviourState for CounterState {
    fn read_state(&self) -> Value {
        json!({ "count": self.count, "step": self.step })
    }
}

/// A stateful behaviour for tests.
///
/// - fields: `step` (number, default 1), `start` (number, default 0)
/// - apis: `increment` (adds `step`, returns the new count), `get`
/// - active: one `"tick"` binding that increments the count
/// - extra: `describe` (returns the behaviour name)
pub fn counter_behaviour(name: &str) -> BehaviourDescriptor {
    let described = name.to_string();
    BehaviourSpec::new(name)
        .fields([
            FieldSpec::defaulted("step", 1).kind(ValueKind::Number),
            FieldSpec::defaulted("start", 0).kind(ValueKind::Number),
        ])
        .state(|config| CounterState {
            count: config.get_as("start").unwrap_or(0),
            step: config.get_as("step").unwrap_or(1),
        })
        .active(|ctx| {
            let Ok(cell) = ctx.state() else {
                return Vec::new();
            };
            let cell = cell.clone();
            vec![EventBinding::new("tick", move |_| {
                let _ = cell.with_mut(|s: &mut CounterState| s.count += s.step);
                EventOutcome::Continue
            })]
        })
        .api("increment", |ctx, _args| {
            ctx.with_state_mut(|s: &mut CounterState| {
                s.count += s.step;
                json!(s.count)
            })
        })
        .api("get", |ctx, _args| ctx.with_state(|s: &CounterState| json!(s.count)))
        .extra("describe", move |_args| Ok(Value::String(described.clone())))
        .create()
}

/// One wiring recorded by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiredRecord {
    /// Component FQN.
    pub component: String,
    /// Behaviour that declared the binding.
    pub behaviour: String,
    /// Event name.
    pub event: String,
}

/// An [`EventSink`] that records every wiring and keeps the bindings.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Wirings in arrival order.
    pub records: Vec<WiredRecord>,
    /// Bindings in arrival order.
    pub bindings: Vec<EventBinding>,
}

impl RecordingSink {
    /// Behaviours that wired `event`, in arrival order.
    #[must_use]
    pub fn behaviours_for(&self, event: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.event == event)
            .map(|r| r.behaviour.clone())
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn wire(&mut self, component: &ComponentId, behaviour: &str, binding: EventBinding) {
        self.records.push(WiredRecord {
            component: component.fqn(),
            behaviour: behaviour.to_string(),
            event: binding.event().to_string(),
        });
        self.bindings.push(binding);
    }
}
