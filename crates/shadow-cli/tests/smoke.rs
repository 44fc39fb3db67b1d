//! Smoke tests for the `shadow-route` binary.
//!
//! Each test writes a rule config to a temp dir and checks the JSON report
//! printed on stdout.

use std::path::PathBuf;
use std::process::{Command, Output};

const CONFIG: &str = r#"
default_algorithm = "sql-hint"

[data_sources.orders_group]
production = "ds_orders"
shadow = "ds_orders_shadow"

[data_sources.users_group]
production = "ds_users"
shadow = "ds_users_shadow"

[tables.t_order]
data_sources = ["orders_group"]
algorithms = ["writes-only"]

[algorithms.sql-hint]
type = "SQL_HINT"

[algorithms.writes-only]
type = "TABLE_HINT"
props = { operations = ["insert", "update", "delete"] }
"#;

fn shadow_route() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shadow-route"))
}

fn write_config(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("shadow.toml");
    std::fs::write(&path, CONFIG).unwrap();
    path
}

fn report(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "shadow-route should exit 0\nstderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON report")
}

// ── Help / basic CLI ──────────────────────────────────────────────────────────

#[test]
fn binary_responds_to_help() {
    let output = shadow_route()
        .arg("--help")
        .output()
        .expect("failed to execute shadow-route");
    assert!(output.status.success(), "shadow-route --help should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--operation"));
    assert!(stdout.contains("--table"));
    assert!(stdout.contains("--production"));
}

#[test]
fn missing_operation_exits_nonzero() {
    let output = shadow_route()
        .output()
        .expect("failed to execute shadow-route");
    assert!(!output.status.success());
}

// ── Routing decisions ─────────────────────────────────────────────────────────

#[test]
fn shadow_table_write_routes_to_table_shadow() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);

    let output = shadow_route()
        .arg("--config")
        .arg(&config)
        .args(["--operation", "insert", "--table", "o=t_order"])
        .args(["--route", "logic_db=ds_orders", "--route", "logic_db=ds_users"])
        .output()
        .expect("failed to execute shadow-route");

    let json = report(&output);
    assert_eq!(json["is_shadow"], true);
    assert!(json.get("shadow").is_none());
    assert_eq!(
        json["mappings"],
        serde_json::json!({"ds_orders": "ds_orders_shadow"})
    );
    assert_eq!(
        json["routes"],
        serde_json::json!([
            {"logic": "logic_db", "actual": "ds_orders_shadow"},
            {"logic": "logic_db", "actual": "ds_users"}
        ])
    );
}

#[test]
fn shadow_table_read_is_not_shadowed() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);

    let output = shadow_route()
        .arg("--config")
        .arg(&config)
        .args(["--operation", "select", "--table", "t_order"])
        .output()
        .expect("failed to execute shadow-route");

    let json = report(&output);
    assert_eq!(json["mappings"], serde_json::json!({}));
}

#[test]
fn unconfigured_table_uses_default_algorithm() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);

    let output = shadow_route()
        .arg("--config")
        .arg(&config)
        .args(["--operation", "select", "--table", "t_user"])
        .output()
        .expect("failed to execute shadow-route");

    let json = report(&output);
    assert_eq!(
        json["mappings"],
        serde_json::json!({
            "ds_orders": "ds_orders_shadow",
            "ds_users": "ds_users_shadow"
        })
    );
}

#[test]
fn production_direction_yields_no_mappings() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);

    let output = shadow_route()
        .env("SHADOW_ROUTE_CONFIG", &config)
        .args(["--operation", "insert", "--table", "t_order", "--production"])
        .output()
        .expect("failed to execute shadow-route");

    let json = report(&output);
    assert_eq!(json["is_shadow"], false);
    assert_eq!(json["mappings"], serde_json::json!({}));
}

// ── Failures ──────────────────────────────────────────────────────────────────

#[test]
fn unknown_operation_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);

    let output = shadow_route()
        .arg("--config")
        .arg(&config)
        .args(["--operation", "merge", "--table", "t_order"])
        .output()
        .expect("failed to execute shadow-route");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("merge"), "error should name the operation: {stderr}");
}

#[test]
fn fails_cleanly_with_no_config() {
    let dir = tempfile::tempdir().unwrap();

    let output = shadow_route()
        .args(["--operation", "insert"])
        .current_dir(dir.path())
        .env_remove("SHADOW_ROUTE_CONFIG")
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .output()
        .expect("failed to execute shadow-route");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("shadow.toml") || stderr.contains("config"),
        "error message should mention config: {stderr}"
    );
}

#[test]
fn dangling_reference_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(
        &path,
        r#"
[tables.t_order]
data_sources = ["nowhere"]
"#,
    )
    .unwrap();

    let output = shadow_route()
        .arg("--config")
        .arg(&path)
        .args(["--operation", "insert", "--table", "t_order"])
        .output()
        .expect("failed to execute shadow-route");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nowhere"), "error should name the reference: {stderr}");
}
