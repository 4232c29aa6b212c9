// integration tests for the simulate command

use crate::common::{
    cleanup_test_dir, create_test_dir, json_result, run_formflow, write_file, COUPON_SCHEMA,
};

#[test]
fn test_simulate_coupon_discount() {
    let test_dir = create_test_dir("simulate_coupon");
    let schema = write_file(&test_dir, "schema.json", COUPON_SCHEMA);

    let output = run_formflow(&[
        "--json",
        "simulate",
        schema.to_str().unwrap(),
        "--set",
        "coupon=true",
    ]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["action"], "simulate");
    assert_eq!(result["data"]["price"], "90");
    assert_eq!(result["data"]["coupon"], true);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_simulate_inactive_trigger_keeps_price() {
    let test_dir = create_test_dir("simulate_inactive");
    let schema = write_file(&test_dir, "schema.json", COUPON_SCHEMA);

    let output = run_formflow(&[
        "--json",
        "simulate",
        schema.to_str().unwrap(),
        "--set",
        "coupon=false",
    ]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["data"]["price"].as_f64(), Some(100.0));

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_simulate_edits_apply_in_order() {
    let test_dir = create_test_dir("simulate_order");
    let schema = write_file(&test_dir, "schema.json", COUPON_SCHEMA);

    let output = run_formflow(&[
        "--json",
        "simulate",
        schema.to_str().unwrap(),
        "--set",
        "price=50",
        "--set",
        "coupon=true",
    ]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["data"]["price"], "40");

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_simulate_concat_cascade() {
    let test_dir = create_test_dir("simulate_concat");
    let schema = write_file(
        &test_dir,
        "schema.json",
        r#"{
            "fields": [
                { "name": "first", "type": "text" },
                { "name": "last", "type": "text",
                  "triggers": [{ "rule": "full-name", "when": "not empty" }] },
                { "name": "full", "type": "text" }
            ],
            "rules": [
                { "name": "full-name", "effects": [
                    { "targetField": "full", "type": "concat", "value": "",
                      "strictString": true,
                      "sourceFields": [
                        { "field": "first", "charAfter": " " },
                        { "field": "last" }
                      ] }
                ] }
            ]
        }"#,
    );

    let output = run_formflow(&[
        "--json",
        "simulate",
        schema.to_str().unwrap(),
        "--set",
        "first=Ada",
        "--set",
        "last=Lovelace",
    ]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["data"]["full"], "Ada Lovelace");

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_simulate_with_overrides_flag() {
    let test_dir = create_test_dir("simulate_overrides");
    let schema = write_file(
        &test_dir,
        "schema.json",
        r#"{
            "fields": [
                { "name": "plan", "type": "select",
                  "triggers": [{ "rule": "pro-only",
                                 "when": { "field": "plan", "when": "equal", "value": 2 } }] },
                { "name": "seats", "type": "number" }
            ],
            "rules": [
                { "name": "pro-only", "effects": [
                    { "targetField": "seats", "prop": "hidden", "value": true }
                ] }
            ]
        }"#,
    );

    let output = run_formflow(&[
        "--json",
        "simulate",
        schema.to_str().unwrap(),
        "--set",
        "plan=2",
        "--overrides",
    ]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["overrides"]["seats"]["hidden"], true);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_simulate_invalid_edit_format() {
    let test_dir = create_test_dir("simulate_bad_edit");
    let schema = write_file(&test_dir, "schema.json", COUPON_SCHEMA);

    let output = run_formflow(&[
        "--no-json",
        "simulate",
        schema.to_str().unwrap(),
        "--set",
        "no-equals-sign",
    ]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected FIELD=VALUE"));

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_simulate_without_edits_returns_defaults() {
    let test_dir = create_test_dir("simulate_defaults");
    let schema = write_file(&test_dir, "schema.json", COUPON_SCHEMA);

    let output = run_formflow(&["--json", "simulate", schema.to_str().unwrap()]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["data"]["price"].as_f64(), Some(100.0));

    cleanup_test_dir(&test_dir);
}
