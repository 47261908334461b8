//! E2E tests for the `weft` binary.

mod common;

use common::{weft_cmd, write_project_config};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

// ─── modes ─────────────────────────────────────────────────────────

#[test]
fn modes_lists_builtins_with_design_active() {
    let (mut cmd, _project) = weft_cmd();
    cmd.arg("modes")
        .assert()
        .success()
        .stdout(contains("* design").and(contains("ui=on selection=on")))
        .stdout(contains("  readonly").and(contains("ui=off selection=off")));
}

#[test]
fn modes_includes_declared_modes() {
    let (mut cmd, project) = weft_cmd();
    write_project_config(
        project.path(),
        r#"
[mode]
initial = "review"

[[modes]]
name = "review"
editor_read_only = { ui_enabled = true }
"#,
    );

    cmd.arg("modes")
        .assert()
        .success()
        .stdout(contains("* review"))
        .stdout(contains("ui=on selection=off"))
        .stdout(contains("* design").not());
}

#[test]
fn env_var_selects_initial_mode() {
    let (mut cmd, _project) = weft_cmd();
    cmd.env("WEFT_MODE", "readonly")
        .arg("modes")
        .assert()
        .success()
        .stdout(contains("* readonly"));
}

// ─── switch ────────────────────────────────────────────────────────

#[test]
fn switch_to_readonly_prints_flags() {
    let (mut cmd, _project) = weft_cmd();
    cmd.args(["switch", "readonly"])
        .assert()
        .success()
        .stdout(contains("design -> readonly: ui=off selection=off"));
}

#[test]
fn switch_to_unknown_mode_fails() {
    let (mut cmd, _project) = weft_cmd();
    cmd.args(["switch", "ghost"])
        .assert()
        .failure()
        .stderr(contains("unknown mode: ghost"));
}

// ─── check ─────────────────────────────────────────────────────────

#[test]
fn check_lists_components() {
    let (mut cmd, project) = weft_cmd();
    write_project_config(
        project.path(),
        r#"
[[components]]
id = "spinner"

[[components.behaviours]]
name = "counter"
config = { step = 2 }

[[components.behaviours]]
name = "focusing"
"#,
    );

    cmd.arg("check")
        .assert()
        .success()
        .stdout(contains("ok: 0 mode(s), 1 component(s), initial mode 'design'"))
        .stdout(contains("builtin::spinner: counter, focusing"));
}

#[test]
fn check_reports_every_problem() {
    let (mut cmd, project) = weft_cmd();
    write_project_config(
        project.path(),
        r#"
[mode]
initial = "ghost"

[[modes]]
name = ""
"#,
    );

    cmd.arg("check")
        .assert()
        .failure()
        .stderr(contains("mode definition has an empty name"))
        .stderr(contains("ghost"))
        .stderr(contains("configuration has 2 problem(s)"));
}

#[test]
fn malformed_config_fails_to_load() {
    let (mut cmd, project) = weft_cmd();
    write_project_config(project.path(), "[mode\ninitial = ");

    cmd.arg("check")
        .assert()
        .failure()
        .stderr(contains("failed to load configuration"));
}
