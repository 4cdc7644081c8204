#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Three captures walking north-east along a street, one sequence.
const CAPTURES: &str = r#"{
    "reference": {"lat": 60.1699, "lon": 24.9384, "alt": 10.0},
    "sequences": [{"id": "street", "node_ids": ["a", "b", "c"]}],
    "captures": [
        {"id": "a", "sequence_id": "street", "completeness": "merged",
         "position": {"lat": 60.1699, "lon": 24.9384, "alt": 10.0},
         "rotation": [0.0, -1.5707963267948966, 0.0]},
        {"id": "b", "sequence_id": "street", "completeness": "merged",
         "position": {"lat": 60.1699, "lon": 24.93849, "alt": 10.0},
         "rotation": [0.0, -1.5707963267948966, 0.0]},
        {"id": "c", "sequence_id": "street", "completeness": "core",
         "position": {"lat": 60.1699, "lon": 24.93858, "alt": 10.0}}
    ]
}"#;

fn write_captures(dir: &Path) -> PathBuf {
    let path = dir.join("captures.json");
    fs::write(&path, CAPTURES).unwrap();
    path
}

fn navgraph() -> Command {
    Command::cargo_bin("navgraph").unwrap()
}

#[test]
fn prints_graph_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_captures(dir.path());

    let output = navgraph().arg("--input").arg(&input).output().unwrap();
    assert!(output.status.success());

    let graph: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let a = graph["edges"]["a"].as_array().unwrap();
    assert!(a
        .iter()
        .any(|e| e["direction"] == "step_forward" && e["target_id"] == "b"));
    assert!(graph["edges"].get("c").is_none());
}

#[test]
fn writes_single_node_edges_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_captures(dir.path());
    let out = dir.path().join("b.json");

    navgraph()
        .arg("--input")
        .arg(&input)
        .arg("--node")
        .arg("b")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let edges: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    let directions: Vec<_> = edges
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["direction"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(directions[..2], ["next", "prev"]);
    assert!(directions.contains(&"step_backward".to_owned()));
}

#[test]
fn settings_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_captures(dir.path());
    let settings = dir.path().join("settings.json");
    fs::write(&settings, r#"{"max_distance": 1.0}"#).unwrap();

    let output = navgraph()
        .args(["--node", "a", "--input"])
        .arg(&input)
        .arg("--settings")
        .arg(&settings)
        .output()
        .unwrap();
    assert!(output.status.success());
    let edges: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // b is 5 m away: only the sequence edge and the forward fallback remain.
    let edges = edges.as_array().unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[1]["direction"], "step_forward");
}

#[test]
fn rejects_invalid_settings() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_captures(dir.path());
    let settings = dir.path().join("settings.json");
    fs::write(&settings, r#"{"step": {"max_drift": 0.0}}"#).unwrap();

    navgraph()
        .arg("--input")
        .arg(&input)
        .arg("--settings")
        .arg(&settings)
        .assert()
        .failure()
        .stderr(predicate::str::contains("step.max_drift"));
}

#[test]
fn unknown_node_and_missing_input_fail() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_captures(dir.path());

    navgraph()
        .arg("--input")
        .arg(&input)
        .args(["--node", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));

    navgraph()
        .arg("--input")
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure();
}
