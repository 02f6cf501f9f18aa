mod common;

use common::{script, TestEnv, LEVEL_TWO_ANSWERS, METADATA};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn completed_checkpoint_matches_contract() {
    let env = TestEnv::new();
    let out = env.complete_assessment("contract.json");
    validate("derived_result.schema.json", &out["data"]["score"]);

    let saved = env.read_json("contract.json");
    validate("checkpoint.schema.json", &saved);
    validate("derived_result.schema.json", &saved["score"]);
}

#[test]
fn partial_checkpoint_matches_contract() {
    let env = TestEnv::new();
    let out = env.path_str("partial.json");
    let first: Vec<&str> = LEVEL_TWO_ANSWERS[..12].to_vec();
    env.run_json_err(&["assess", "--output", &out], Some(script(&[METADATA, &first])));

    let saved = env.read_json("partial.json");
    assert!(saved.get("score").is_none());
    validate("checkpoint.schema.json", &saved);
}

#[test]
fn score_of_empty_checkpoint_matches_contract() {
    let env = TestEnv::new();
    fs::write(
        env.path("empty.json"),
        serde_json::json!({
            "metadata": {"tool_version": "0.1.0", "format_version": 1, "assessment_date": "2025-01-01T00:00:00Z"},
            "responses": {}
        })
        .to_string(),
    )
    .unwrap();
    let v = env.run_json(&["score", &env.path_str("empty.json")]);
    validate("derived_result.schema.json", &v["data"]);
    assert_eq!(
        v["data"]["cmmc_level_required"],
        "Not Required (verify contract requirements)"
    );
    assert_eq!(v["data"]["gap_count"], 0);
}

#[test]
fn error_envelope_matches_contract() {
    let env = TestEnv::new();
    let err = env.run_json_err(&["score", &env.path_str("nope.json")], None);
    validate("error.schema.json", &err);

    fs::write(env.path("bad.json"), "[]").unwrap();
    let err = env.run_json_err(&["report", &env.path_str("bad.json")], None);
    validate("error.schema.json", &err);
    assert_eq!(err["error"]["code"], "CHECKPOINT_CORRUPT");
}
