// integration tests for condition evaluation

use crate::common::{json_result, run_formflow};

#[test]
fn test_eval_less_than() {
    let output = run_formflow(&["--no-json", "eval", "5", "less than", "--compare", "10"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");

    let output = run_formflow(&["--no-json", "eval", "10", "less than", "--compare", "5"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "false");
}

#[test]
fn test_eval_nan_comparison_is_false() {
    let output = run_formflow(&["--no-json", "eval", "abc", "less than", "--compare", "10"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "false");
}

#[test]
fn test_eval_between() {
    let output = run_formflow(&["--no-json", "eval", "5", "between", "--compare", "[1, 10]"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");

    // reversed bounds can never be satisfied
    let output = run_formflow(&["--no-json", "eval", "5", "between", "--compare", "[10, 1]"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "false");
}

#[test]
fn test_eval_truthiness() {
    let output = run_formflow(&["--no-json", "eval", "true", "true"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");

    let output = run_formflow(&["--no-json", "eval", "\"\"", "empty"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");
}

#[test]
fn test_eval_matches() {
    let output = run_formflow(&[
        "--no-json",
        "eval",
        "AB-123",
        "matches",
        "--compare",
        "^[A-Z]{2}-\\d+$",
    ]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");
}

#[test]
fn test_eval_invalid_pattern_errors() {
    let output = run_formflow(&["--no-json", "eval", "x", "matches", "--compare", "(bad"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("condition evaluation failed"));
}

#[test]
fn test_eval_unknown_kind_is_false() {
    let output = run_formflow(&["--no-json", "eval", "x", "contains", "--compare", "x"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "false");
}

#[test]
fn test_eval_json_output() {
    let output = run_formflow(&["--json", "eval", "5", "greater than", "--compare", "3"]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["action"], "eval");
    assert_eq!(result["result"], true);
}
