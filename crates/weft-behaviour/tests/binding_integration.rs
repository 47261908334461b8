//! Integration tests for behaviour creation, registration and binding.

use serde_json::{json, Value};
use std::sync::Arc;
use weft_behaviour::testing::{counter_behaviour, CounterState};
use weft_behaviour::{
    bind, ApiFn, BehaviourError, BehaviourFailure, BehaviourRegistry, BehaviourSpec, BehaviourState,
    EventBinding, EventOutcome, EventTable, FieldSpec, HelperFn, InstanceContext, ValidationError,
    ValueKind,
};
use weft_types::{assert_error_code, ComponentId, ErrorCode};

struct SlideState {
    expanded: bool,
}

impl BehaviourState for SlideState {
    fn read_state(&self) -> Value {
        json!({ "expanded": self.expanded })
    }
}

fn sliding() -> weft_behaviour::BehaviourDescriptor {
    BehaviourSpec::new("sliding")
        .fields([
            FieldSpec::required("dimension").one_of(["width", "height"]),
            FieldSpec::defaulted("expanded", false).kind(ValueKind::Bool),
        ])
        .state(|config| SlideState {
            expanded: config.get_as("expanded").unwrap_or(false),
        })
        .active(|ctx| {
            let cell = ctx.state().ok().cloned();
            vec![EventBinding::new("transitionend", move |_| {
                if let Some(cell) = &cell {
                    let _ = cell.with_mut(|s: &mut SlideState| s.expanded = !s.expanded);
                }
                EventOutcome::Stop
            })]
        })
        .api("has_grown", |ctx, _| {
            ctx.with_state(|s: &SlideState| Value::Bool(s.expanded))
        })
        .create()
}

fn focusing() -> weft_behaviour::BehaviourDescriptor {
    BehaviourSpec::new("focusing")
        .fields([FieldSpec::optional("label").kind(ValueKind::String)])
        .create()
}

// ── Validation completeness ──

#[test]
fn three_behaviours_two_invalid_reports_both() {
    let panel = ComponentId::builtin("panel");
    let err = bind(
        &panel,
        [
            (sliding(), json!({"dimension": "depth"})),
            (counter_behaviour("counter"), json!({})),
            (focusing(), json!({"label": 7, "extra": true})),
        ],
    )
    .unwrap_err();

    assert_error_code(&err, "BEHAVIOUR_");
    assert_eq!(err.code(), "BEHAVIOUR_VALIDATION_FAILED");
    assert_eq!(err.component, "builtin::panel");
    assert_eq!(err.failed_behaviours(), vec!["sliding", "focusing"]);

    let focusing_errors = err
        .failure("focusing")
        .map(BehaviourFailure::errors)
        .unwrap_or_default();
    assert_eq!(focusing_errors.len(), 2);
    assert!(focusing_errors
        .iter()
        .any(|e| matches!(e, ValidationError::UnknownField { field } if field == "extra")));

    let rendered = err.to_string();
    assert!(rendered.contains("sliding"));
    assert!(rendered.contains("focusing"));
}

// ── State isolation ──

#[test]
fn each_component_gets_fresh_state() {
    let counter = counter_behaviour("counter");
    let a = bind(&ComponentId::builtin("a"), [(counter.clone(), json!({}))]).unwrap();
    let b = bind(
        &ComponentId::builtin("b"),
        [(counter, json!({"start": 100}))],
    )
    .unwrap();

    a.call("counter", "increment", &[]).unwrap();
    a.call("counter", "increment", &[]).unwrap();

    assert_eq!(a.call("counter", "get", &[]).unwrap(), json!(2));
    assert_eq!(b.call("counter", "get", &[]).unwrap(), json!(100));

    let a_cell = a.get("counter").and_then(|bound| bound.state()).unwrap();
    let b_cell = b.get("counter").and_then(|bound| bound.state()).unwrap();
    assert!(!a_cell.ptr_eq(b_cell));
    assert_eq!(
        a_cell.with(|s: &CounterState| s.clone()).unwrap(),
        CounterState { count: 2, step: 1 }
    );
}

// ── Events through the default sink ──

#[test]
fn active_bindings_drive_state_through_event_table() {
    let drawer = ComponentId::builtin("drawer");
    let set = bind(
        &drawer,
        [
            (sliding(), json!({"dimension": "height"})),
            (counter_behaviour("counter"), json!({})),
        ],
    )
    .unwrap();

    let mut table = EventTable::new();
    assert_eq!(set.wire_into(&mut table), 2);

    let report = table.dispatch("transitionend", &json!({}));
    assert_eq!(report.stopped_by.as_deref(), Some("sliding"));
    assert_eq!(set.call("sliding", "has_grown", &[]).unwrap(), json!(true));
    assert_eq!(
        set.read_state("sliding").unwrap(),
        json!({"expanded": true})
    );

    table.dispatch("tick", &json!({}));
    table.dispatch("tick", &json!({}));
    assert_eq!(set.call("counter", "get", &[]).unwrap(), json!(2));
}

// ── Registry ──

#[test]
fn re_registration_replaces_descriptor() {
    let mut registry = BehaviourRegistry::new();
    registry.register(BehaviourSpec::new("focusing").create());
    registry.register(
        BehaviourSpec::new("focusing")
            .api("focus", |_, _| Ok(json!("focused")))
            .create(),
    );

    let button = ComponentId::builtin("button");
    let set = registry
        .bind_named(&button, [("focusing", json!({}))])
        .unwrap();
    assert_eq!(
        set.call("focusing", "focus", &[]).unwrap(),
        json!("focused")
    );
}

#[test]
fn extra_helpers_and_api_errors() {
    let counter = counter_behaviour("counter");
    assert_eq!(
        counter.call_extra("describe", &[]).unwrap(),
        json!("counter")
    );

    let set = bind(&ComponentId::builtin("spinner"), [(counter, json!({}))]).unwrap();
    let err = set.call("counter", "missing", &[]).unwrap_err();
    assert_error_code(&err, "BEHAVIOUR_");
    assert!(!err.is_recoverable());
    assert!(matches!(err, BehaviourError::UnknownApi { .. }));
}

#[test]
fn shared_callables_plug_into_the_builder() {
    let count: HelperFn = Arc::new(|args: &[Value]| Ok(json!(args.len())));
    let echo: ApiFn = Arc::new(|ctx: &InstanceContext<'_>, args: &[Value]| {
        Ok(json!([ctx.behaviour, args.len()]))
    });

    let descriptor = BehaviourSpec::new("echoing")
        .extra("count", move |args| count(args))
        .api("echo", move |ctx, args| echo(ctx, args))
        .create();
    assert_eq!(
        descriptor
            .call_extra("count", &[json!(1), json!(2)])
            .unwrap(),
        json!(2)
    );

    let set = bind(&ComponentId::builtin("echo"), [(descriptor, json!({}))]).unwrap();
    assert_eq!(
        set.call("echoing", "echo", &[json!(true)]).unwrap(),
        json!(["echoing", 1])
    );
}
