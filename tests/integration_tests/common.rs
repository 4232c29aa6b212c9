// shared utilities for integration tests

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// get path to the built formflow binary
pub fn formflow_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_formflow"))
}

/// run a formflow command and capture its output
pub fn run_formflow(args: &[&str]) -> Output {
    Command::new(formflow_binary_path())
        .args(args)
        .output()
        .expect("Failed to run formflow")
}

/// create a temporary directory for test schemas
pub fn create_test_dir(name: &str) -> PathBuf {
    let base = env::temp_dir().join("formflow_integration_tests");
    let dir = base.join(name);

    // clean up if exists
    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }

    fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}

/// clean up a test directory
pub fn cleanup_test_dir(path: &Path) {
    if path.exists() {
        fs::remove_dir_all(path).ok();
    }
}

/// write a schema file into a test directory
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// parse JSON-RPC stdout and return the result payload
pub fn json_result(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let response: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("stdout is not valid JSON");
    assert_eq!(response["jsonrpc"], "2.0", "not a JSON-RPC response");
    response["result"].clone()
}

/// parse JSON-RPC stdout and return the error payload
pub fn json_error(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let response: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("stdout is not valid JSON");
    assert_eq!(response["jsonrpc"], "2.0", "not a JSON-RPC response");
    response["error"].clone()
}

/// the coupon/discount schema used across tests
pub const COUPON_SCHEMA: &str = r#"{
    "fields": [
        { "name": "price", "type": "number", "default": 100 },
        { "name": "coupon", "type": "checkbox",
          "triggers": [{ "rule": "discount", "when": "true" }] }
    ],
    "rules": [
        { "name": "discount", "effects": [
            { "targetField": "price", "type": "subtract", "value": 10 }
        ] }
    ]
}"#;
