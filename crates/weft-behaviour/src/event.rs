//! Event bindings produced by a behaviour's `active` factory.
//!
//! The binder only *produces* [`EventBinding`]s; the host component
//! runtime decides how they are dispatched. [`EventSink`] is the seam,
//! and [`EventTable`] is the default implementation.
//!
//! # Dispatch Semantics
//!
//! Handlers for one event run in wiring order (behaviour bind order, then
//! declaration order within a behaviour). A handler returning
//! [`EventOutcome::Stop`] ends the chain.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use weft_types::ComponentId;

/// Result of one event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Let later handlers see the event.
    Continue,
    /// Consume the event; later handlers do not run.
    Stop,
}

/// Handler function for one event.
pub type EventHandlerFn = Arc<dyn Fn(&Value) -> EventOutcome + Send + Sync>;

/// A declaration that `event` should be routed to `handler`.
///
/// Handlers capture whatever instance context they need (state cell,
/// config) when the `active` factory creates them.
#[derive(Clone)]
pub struct EventBinding {
    event: String,
    handler: EventHandlerFn,
}

impl EventBinding {
    /// Creates a binding.
    pub fn new(
        event: impl Into<String>,
        handler: impl Fn(&Value) -> EventOutcome + Send + Sync + 'static,
    ) -> Self {
        Self {
            event: event.into(),
            handler: Arc::new(handler),
        }
    }

    /// Event name.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Invokes the handler.
    pub fn handle(&self, payload: &Value) -> EventOutcome {
        (self.handler)(payload)
    }
}

impl fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBinding")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

/// Receives the event bindings of a freshly bound component.
pub trait EventSink {
    /// Wires one binding declared by `behaviour` on `component`.
    fn wire(&mut self, component: &ComponentId, behaviour: &str, binding: EventBinding);
}

/// Summary of one [`EventTable::dispatch`] call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchReport {
    /// Number of handlers that ran.
    pub handled: usize,
    /// Behaviour whose handler stopped the chain, if any.
    pub stopped_by: Option<String>,
}

impl DispatchReport {
    /// Returns `true` if some handler consumed the event.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped_by.is_some()
    }
}

struct WiredHandler {
    behaviour: String,
    binding: EventBinding,
}

/// Default event-dispatch sink: event name → ordered handlers.
#[derive(Default)]
pub struct EventTable {
    handlers: HashMap<String, Vec<WiredHandler>>,
}

impl EventTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers wired for `event`.
    #[must_use]
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }

    /// Event names with at least one handler, sorted.
    #[must_use]
    pub fn events(&self) -> Vec<&str> {
        let mut events: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        events.sort_unstable();
        events
    }

    /// Total number of wired handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Returns `true` if nothing is wired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the handlers for `event` in order.
    pub fn dispatch(&self, event: &str, payload: &Value) -> DispatchReport {
        let mut report = DispatchReport::default();
        let Some(handlers) = self.handlers.get(event) else {
            return report;
        };

        for wired in handlers {
            report.handled += 1;
            if wired.binding.handle(payload) == EventOutcome::Stop {
                tracing::trace!(event, behaviour = %wired.behaviour, "event consumed");
                report.stopped_by = Some(wired.behaviour.clone());
                break;
            }
        }
        report
    }
}

impl EventSink for EventTable {
    fn wire(&mut self, _component: &ComponentId, behaviour: &str, binding: EventBinding) {
        self.handlers
            .entry(binding.event().to_string())
            .or_default()
            .push(WiredHandler {
                behaviour: behaviour.to_string(),
                binding,
            });
    }
}

impl fmt::Debug for EventTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTable")
            .field("events", &self.events())
            .field("handlers", &self.len())
            .finish()
    }
}
