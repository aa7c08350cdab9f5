//! Integration tests for the foldtree binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(workspace: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_foldtree");
    Command::new(bin)
        .env("XDG_CONFIG_HOME", workspace.join("xdg-config"))
        .env("XDG_STATE_HOME", workspace.join("xdg-state"))
        .arg("--workspace")
        .arg(workspace)
        .arg("--quiet")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_fold_persists_across_invocations() {
    let temp_dir = TempDir::new().unwrap();
    let ws = temp_dir.path();

    stdout(&run(ws, &["fold", "paths"]));
    assert_eq!(stdout(&run(ws, &["is-folded", "paths"])), "true");
    assert_eq!(stdout(&run(ws, &["is-folded", "info"])), "false");
    assert!(ws.join(".foldtree/store").exists());
}

#[test]
fn test_toggle_all_and_aggregate_query() {
    let temp_dir = TempDir::new().unwrap();
    let ws = temp_dir.path();

    assert_eq!(stdout(&run(ws, &["is-all-folded", "*"])), "true");
    assert_eq!(stdout(&run(ws, &["toggle-all", "*"])), "toggled 5 node(s)");
    assert_eq!(stdout(&run(ws, &["is-all-folded", "*"])), "false");
    assert_eq!(stdout(&run(ws, &["is-folded", "definitions"])), "true");
}

#[test]
fn test_show_json_and_reset() {
    let temp_dir = TempDir::new().unwrap();
    let ws = temp_dir.path();

    stdout(&run(ws, &["fold", "info"]));
    let shown: serde_json::Value =
        serde_json::from_str(&stdout(&run(ws, &["show", "--format", "json"]))).unwrap();
    assert_eq!(shown["info"]["folded"], serde_json::Value::Bool(true));

    assert_eq!(stdout(&run(ws, &["reset"])), "fold state reset");
    assert_eq!(stdout(&run(ws, &["is-folded", "info"])), "false");
}

#[test]
fn test_usage_errors_exit_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let ws = temp_dir.path();

    let output = run(ws, &["is-all-folded", "paths"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid usage"));

    let output = run(ws, &["fold", "paths", "folded"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("reserved"));
}

#[test]
fn test_workspace_config_selects_sections() {
    let temp_dir = TempDir::new().unwrap();
    let ws = temp_dir.path();
    std::fs::create_dir_all(ws.join("config")).unwrap();
    std::fs::write(
        ws.join("config/config.toml"),
        "[tree]\ndefault_sections = [\"openapi\", \"components\"]\n",
    )
    .unwrap();

    let text = stdout(&run(ws, &["show"]));
    assert_eq!(text, "- components\n- openapi");
}
