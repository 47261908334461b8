//! Integration tests for mode transitions through the editor-facing API.

use parking_lot::Mutex;
use std::sync::Arc;
use weft_mode::testing::{CallLog, RecordingInstaller, RecordingMode};
use weft_mode::{
    EditorMode, EditorReadOnly, ModeError, ModeSwitch, Phase, ReadOnlyFlag, ReadOnlyFlags, DESIGN,
    READONLY,
};
use weft_types::{assert_error_code, ErrorCode};

fn recording_editor(log: &CallLog) -> EditorMode {
    let mut mode = EditorMode::new(ReadOnlyFlag::default(), Vec::new());
    mode.register(DESIGN, RecordingMode::new(DESIGN, log).descriptor());
    mode.register(
        READONLY,
        RecordingMode::new(READONLY, log)
            .policy(EditorReadOnly::READ_ONLY)
            .descriptor(),
    );
    mode
}

// ── Round trip ──

#[test]
fn design_readonly_round_trip() {
    let log = CallLog::new();
    let mut mode = recording_editor(&log);

    mode.set(READONLY).unwrap();
    assert_eq!(mode.get(), READONLY);
    assert!(!mode.is_ui_enabled());
    assert!(!mode.is_selection_enabled());

    mode.set(DESIGN).unwrap();
    assert_eq!(mode.get(), DESIGN);
    assert!(mode.is_ui_enabled());
    assert!(mode.is_selection_enabled());

    assert_eq!(
        log.entries(),
        vec![
            "design.deactivate",
            "readonly.activate",
            "readonly.deactivate",
            "design.activate",
        ]
    );
}

#[test]
fn repeated_set_is_idempotent() {
    let log = CallLog::new();
    let mut mode = recording_editor(&log);
    mode.set(READONLY).unwrap();
    log.clear();

    let active = mode.get().to_string();
    mode.set(&active).unwrap();
    mode.set(&active).unwrap();

    assert!(log.is_empty());
    assert_eq!(mode.flags(), ReadOnlyFlags::DISABLED);
}

// ── Failures ──

#[test]
fn unknown_mode_is_rejected_without_side_effects() {
    let log = CallLog::new();
    let mut mode = recording_editor(&log);
    let before = mode.flags();

    let err = mode.set("preview").unwrap_err();
    assert_error_code(&err, "MODE_");
    assert_eq!(err.code(), "MODE_UNKNOWN");
    assert_eq!(mode.get(), DESIGN);
    assert_eq!(mode.flags(), before);
    assert!(log.is_empty());
}

#[test]
fn failing_activate_aborts_after_deactivate() {
    let log = CallLog::new();
    let mut mode = recording_editor(&log);
    mode.register(
        "preview",
        RecordingMode::new("preview", &log)
            .policy(EditorReadOnly::PerAxis {
                ui_enabled: true,
                selection_enabled: false,
            })
            .fail_on_activate("renderer unavailable")
            .descriptor(),
    );

    let err = mode.set("preview").unwrap_err();
    match &err {
        ModeError::Transition {
            mode: failed,
            phase,
            source,
        } => {
            assert_eq!(failed, "preview");
            assert_eq!(*phase, Phase::Activate);
            assert_eq!(source.message, "renderer unavailable");
        }
        other => panic!("expected transition error, got {other:?}"),
    }
    assert!(err.to_string().contains("activate of mode 'preview'"));

    assert_eq!(mode.get(), DESIGN);
    assert_eq!(mode.flags(), ReadOnlyFlags::ENABLED);
    assert_eq!(log.entries(), vec!["design.deactivate", "preview.activate"]);
}

// ── Policy ──

#[test]
fn partial_policy_reads_axes_independently() {
    let mut mode = EditorMode::default();
    mode.register(
        "annotate",
        weft_mode::ModeDescriptor::new(EditorReadOnly::PerAxis {
            ui_enabled: false,
            selection_enabled: true,
        }),
    );
    mode.set("annotate").unwrap();
    assert!(!mode.is_ui_enabled());
    assert!(mode.is_selection_enabled());
}

#[test]
fn is_read_only_diverges_from_mode_flags() {
    let flag = ReadOnlyFlag::new(true);
    let mode = EditorMode::new(flag.clone(), Vec::new());
    assert_eq!(mode.get(), DESIGN);
    assert!(mode.is_ui_enabled());
    assert!(mode.is_read_only());
    flag.set(false);
    assert!(!mode.is_read_only());
}

// ── Observers ──

#[test]
fn installers_and_listeners_follow_transitions() {
    let installer = RecordingInstaller::default();
    let handle = installer.clone();
    let mut mode = EditorMode::new(ReadOnlyFlag::default(), vec![Box::new(installer)]);

    let switches = Arc::new(Mutex::new(Vec::<ModeSwitch>::new()));
    let sink = Arc::clone(&switches);
    mode.on_switch(move |switch| sink.lock().push(switch.clone()));

    mode.set(READONLY).unwrap();
    mode.set(READONLY).unwrap();
    mode.set(DESIGN).unwrap();

    let signals = handle.signals().unwrap();
    assert_eq!(signals.flags(), ReadOnlyFlags::ENABLED);
    assert_eq!(handle.content_filter_installs(), 1);
    assert_eq!(handle.selection_blocker_installs(), 1);

    let switches = switches.lock();
    let path: Vec<(&str, &str)> = switches
        .iter()
        .map(|s| (s.from.as_str(), s.to.as_str()))
        .collect();
    assert_eq!(path, vec![(DESIGN, READONLY), (READONLY, DESIGN)]);
}
