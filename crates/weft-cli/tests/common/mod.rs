//! Shared E2E test helpers for `weft` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// Timeout for a single CLI invocation.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variables the loader reads; cleared so the host
/// environment cannot leak into assertions.
const ENV_VARS: &[&str] = &["WEFT_DEBUG", "WEFT_MODE", "WEFT_LOG_LEVEL", "RUST_LOG"];

/// Build a Command for the `weft` binary rooted at a fresh project dir.
///
/// The global config points into the tempdir and does not exist.
/// Returns (command, project); keep the project alive for the test.
pub fn weft_cmd() -> (assert_cmd::Command, TempDir) {
    let project = tempfile::tempdir().expect("create temp project dir");
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("weft");
    cmd.timeout(TIMEOUT);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    let global = project.path().join("global.toml");
    cmd.args([
        "-C",
        project.path().to_str().expect("valid utf8"),
        "--config",
        global.to_str().expect("valid utf8"),
    ]);
    (cmd, project)
}

/// Write `<root>/.weft/config.toml`.
pub fn write_project_config(root: &Path, content: &str) {
    let dir = root.join(".weft");
    std::fs::create_dir_all(&dir).expect("create .weft dir");
    std::fs::write(dir.join("config.toml"), content).expect("write project config");
}
