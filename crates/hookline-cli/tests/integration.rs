//! Integration tests for CLI commands.

use serde_json::{json, Value};
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, value: &Value) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path.to_string_lossy().to_string()
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_hookline"))
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let success = output.status.success();

    (success, stdout, stderr)
}

fn run_cli_with_stdin(args: &[&str], stdin: &str) -> (bool, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hookline"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        output.status.success(),
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

#[test]
fn test_coerce_body_defaults() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "body.json",
        &json!({
            "owner_id": "592F155746A1B867A114E010",
            "at": "2017-06-06T16:30:10Z",
            "count": "10"
        }),
    );

    let (success, stdout, _) = run_cli(&["coerce", &input]);
    assert!(success);
    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        output,
        json!({
            "owner_id": "592f155746a1b867a114e010",
            "at": "2017-06-06T16:30:10.000Z",
            "count": "10"
        })
    );
}

#[test]
fn test_coerce_query_preset_with_naive_dates() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "query.json",
        &json!({
            "limit": "10",
            "active": "true",
            "since": "2017-06-06T16:30:10",
            "$text": {"$search": "10"}
        }),
    );

    let (success, stdout, _) = run_cli(&["coerce", "--query", "--naive", &input]);
    assert!(success);
    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        output,
        json!({
            "limit": 10,
            "active": true,
            "since": "2017-06-06T16:30:10.000Z",
            "$text": {"$search": "10"}
        })
    );
}

#[test]
fn test_coerce_reads_stdin() {
    let (success, stdout, _) =
        run_cli_with_stdin(&["coerce", "--no-defaults", "--num"], r#"["1.5", "x"]"#);
    assert!(success);
    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output, json!([1.5, "x"]));
}

#[test]
fn test_coerce_rejects_invalid_json() {
    let (success, _, stderr) = run_cli_with_stdin(&["coerce"], "{not json");
    assert!(!success);
    assert!(stderr.contains("Invalid JSON"));
}

#[test]
fn test_apply_hook_chain() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "context.json",
        &json!({
            "method": "create",
            "data": {"tags": ["a", "a", "b"], "name": "thing"},
            "params": {
                "query": {"ids": "x, y,x"},
                "user": {"_id": "user-id"}
            }
        }),
    );

    let (success, stdout, _) = run_cli(&[
        "apply",
        &input,
        "--hook",
        "userstamp",
        "--hook",
        "unique-array:data.tags",
        "--hook",
        "split-list:params.query.ids",
        "--hook",
        "timestamp",
    ]);
    assert!(success);
    let output: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(output["method"], json!("create"));
    assert_eq!(output["data"]["tags"], json!(["a", "b"]));
    assert_eq!(output["data"]["created_by"], json!("user-id"));
    assert_eq!(output["data"]["updated_by"], json!("user-id"));
    assert_eq!(output["data"]["created_at"], output["data"]["updated_at"]);
    assert!(output["data"]["created_at"].is_string());
    assert_eq!(output["params"]["query"]["ids"], json!(["x", "y"]));
}

#[test]
fn test_apply_split_list_with_separator() {
    let (success, stdout, _) = run_cli_with_stdin(
        &["apply", "--hook", "split-list:params.query.ids:|"],
        r#"{"method": "find", "params": {"query": {"ids": "a|b|a"}}}"#,
    );
    assert!(success);
    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["params"]["query"]["ids"], json!(["a", "b"]));
}

#[test]
fn test_apply_rejects_unknown_hook() {
    let (success, _, stderr) = run_cli(&["apply", "--hook", "shout"]);
    assert!(!success);
    assert!(stderr.contains("unknown hook 'shout'"));
}

#[test]
fn test_apply_missing_file() {
    let (success, _, stderr) = run_cli(&["apply", "/nonexistent/context.json", "--hook", "coerce"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read file"));
}
