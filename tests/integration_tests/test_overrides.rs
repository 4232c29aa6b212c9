// integration tests for the overrides command

use crate::common::{cleanup_test_dir, create_test_dir, json_result, run_formflow, write_file};

const GATED_SCHEMA: &str = r#"{
    "fields": [
        { "name": "plan", "type": "select",
          "triggers": [{ "rule": "pro-only",
                         "when": { "field": "plan", "when": "equal", "value": 2 } }] },
        { "name": "seats", "type": "number" }
    ],
    "rules": [
        { "name": "pro-only", "effects": [
            { "targetField": "seats", "prop": "hidden", "value": true },
            { "targetField": "seats", "prop": "title", "value": "Seats (pro)" }
        ] }
    ]
}"#;

#[test]
fn test_overrides_with_data_file() {
    let test_dir = create_test_dir("overrides_data_file");
    let schema = write_file(&test_dir, "schema.json", GATED_SCHEMA);
    let data = write_file(&test_dir, "data.json", r#"{ "plan": 2 }"#);

    let output = run_formflow(&[
        "--json",
        "overrides",
        schema.to_str().unwrap(),
        "--data",
        data.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["action"], "overrides");
    assert_eq!(result["overrides"]["seats"]["hidden"], true);
    assert_eq!(result["overrides"]["seats"]["title"], "Seats (pro)");

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_overrides_inactive_without_matching_data() {
    let test_dir = create_test_dir("overrides_inactive");
    let schema = write_file(&test_dir, "schema.json", GATED_SCHEMA);
    let data = write_file(&test_dir, "data.json", r#"{ "plan": 1 }"#);

    let output = run_formflow(&[
        "--json",
        "overrides",
        schema.to_str().unwrap(),
        "--data",
        data.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert!(result["overrides"].as_object().unwrap().is_empty());

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_overrides_uses_schema_data_by_default() {
    let test_dir = create_test_dir("overrides_schema_data");
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
            ],
            "data": { "plan": 2 }
        }"#,
    );

    let output = run_formflow(&["--json", "overrides", schema.to_str().unwrap()]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["overrides"]["seats"]["hidden"], true);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_overrides_empty_when_trigger_always_active() {
    let test_dir = create_test_dir("overrides_empty_when");
    let schema = write_file(
        &test_dir,
        "schema.json",
        r#"{
            "fields": [
                { "name": "a", "type": "text",
                  "triggers": [{ "rule": "mark", "when": [] }] },
                { "name": "b", "type": "text" }
            ],
            "rules": [
                { "name": "mark", "effects": [
                    { "targetField": "b", "prop": "readOnly", "value": true }
                ] }
            ]
        }"#,
    );

    let output = run_formflow(&["--json", "overrides", schema.to_str().unwrap()]);
    assert!(output.status.success());

    let result = json_result(&output);
    assert_eq!(result["overrides"]["b"]["readOnly"], true);

    cleanup_test_dir(&test_dir);
}

#[test]
fn test_overrides_missing_data_file() {
    let test_dir = create_test_dir("overrides_missing_data");
    let schema = write_file(&test_dir, "schema.json", GATED_SCHEMA);

    let output = run_formflow(&[
        "--no-json",
        "overrides",
        schema.to_str().unwrap(),
        "--data",
        "/nonexistent/data.json",
    ]);
    assert_eq!(output.status.code(), Some(4));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read data file"));

    cleanup_test_dir(&test_dir);
}
