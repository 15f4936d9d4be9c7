//! End-to-end tests for the bn-infer binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

struct Docs {
    _dir: TempDir,
    structure: PathBuf,
    values: PathBuf,
    queries: PathBuf,
}

fn write_docs(structure: &str, values: &str, queries: &str) -> Docs {
    let dir = tempfile::tempdir().unwrap();
    let path = |name: &str, body: &str| {
        let p = dir.path().join(name);
        std::fs::write(&p, body).unwrap();
        p
    };
    let structure = path("structure.json", structure);
    let values = path("values.json", values);
    let queries = path("queries.json", queries);
    Docs {
        _dir: dir,
        structure,
        values,
        queries,
    }
}

fn bn_infer(docs: &Docs) -> Command {
    let mut cmd = Command::cargo_bin("bn-infer").unwrap();
    cmd.env_remove("BN_FORMAT")
        .env_remove("BN_LOG")
        .arg(&docs.structure)
        .arg(&docs.values)
        .arg(&docs.queries);
    cmd
}

const SCENARIO_QUERIES: &str = r#"[
    {"index": 1, "given": {}, "tofind": {"B": "true"}},
    {"index": 2, "given": {"A": "true"}, "tofind": {"B": "true"}}
]"#;

#[test]
fn answers_scenario_as_json() {
    let docs = write_docs(
        common::SCENARIO_STRUCTURE,
        common::SCENARIO_VALUES,
        SCENARIO_QUERIES,
    );
    let output = bn_infer(&docs).assert().success().get_output().stdout.clone();

    let answers: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let answers = answers.as_array().unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0]["index"], 1);
    assert!((answers[0]["answer"].as_f64().unwrap() - 0.24).abs() < 1e-12);
    assert_eq!(answers[1]["index"], 2);
    assert!((answers[1]["answer"].as_f64().unwrap() - 0.8).abs() < 1e-12);
}

#[test]
fn text_format_lists_one_answer_per_line() {
    let docs = write_docs(
        common::SCENARIO_STRUCTURE,
        common::SCENARIO_VALUES,
        SCENARIO_QUERIES,
    );
    bn_infer(&docs)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1\t0.24"))
        .stdout(predicate::str::contains("\n2\t0.8"));
}

#[test]
fn impossible_evidence_exits_with_undefined_code() {
    let values = common::SCENARIO_VALUES.replace(
        r#""A": {"true": 0.2, "false": 0.8}"#,
        r#""A": {"true": 0.0, "false": 1.0}"#,
    );
    let docs = write_docs(common::SCENARIO_STRUCTURE, &values, SCENARIO_QUERIES);
    bn_infer(&docs)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""answer":null"#));
}

#[test]
fn malformed_table_exits_with_inference_error() {
    let values = common::SCENARIO_VALUES.replace(
        r#"{"A": "false", "own_value": "false", "probability": 0.9}"#,
        r#"{"A": "true", "own_value": "false", "probability": 0.9}"#,
    );
    let docs = write_docs(common::SCENARIO_STRUCTURE, &values, SCENARIO_QUERIES);
    bn_infer(&docs)
        .assert()
        .code(12)
        .stderr(predicate::str::contains("invalid table data"));
}

#[test]
fn strict_mode_rejects_unnormalized_prior() {
    let values = common::SCENARIO_VALUES.replace(
        r#""A": {"true": 0.2, "false": 0.8}"#,
        r#""A": {"true": 0.2, "false": 0.7}"#,
    );
    let docs = write_docs(common::SCENARIO_STRUCTURE, &values, SCENARIO_QUERIES);
    bn_infer(&docs).assert().success();
    bn_infer(&docs)
        .arg("--strict")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("sums to"));
}

#[test]
fn unknown_parent_is_config_error() {
    let structure = common::SCENARIO_STRUCTURE.replace(r#"["A"]"#, r#"["Ghost"]"#);
    let docs = write_docs(&structure, common::SCENARIO_VALUES, SCENARIO_QUERIES);
    bn_infer(&docs)
        .assert()
        .code(10)
        .stderr(predicate::str::contains("Ghost"));
}

#[test]
fn missing_document_is_io_error() {
    let docs = write_docs(
        common::SCENARIO_STRUCTURE,
        common::SCENARIO_VALUES,
        SCENARIO_QUERIES,
    );
    Command::cargo_bin("bn-infer")
        .unwrap()
        .arg(&docs.structure)
        .arg(&docs.values)
        .arg(docs.structure.with_file_name("absent.json"))
        .assert()
        .code(13);
}

#[test]
fn wrong_argument_count_is_usage_error() {
    Command::cargo_bin("bn-infer")
        .unwrap()
        .arg("only-one.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
