//! Integration tests for the `sflow` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sflow_cmd() -> Command {
    Command::cargo_bin("sflow").unwrap()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn help_mentions_direction() {
    sflow_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--direction"))
        .stdout(predicate::str::contains("--configFile"));
}

#[test]
fn writes_positioned_layers_to_stdout() {
    let output = sflow_cmd()
        .arg("-i")
        .arg(fixture("branching.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let layers: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(layers[0]["nodes"][0]["position_x"], 650.0);
    assert_eq!(layers[0]["nodes"][0]["position_y"], 100.0);
    assert_eq!(layers[2]["nodes"][1]["position_y"], 460.0);
}

#[test]
fn reads_stdin_and_dumps_positions() {
    let input = fs::read_to_string(fixture("camel_case.json")).unwrap();
    sflow_cmd()
        .args(["-d", "horizontal", "-f", "positions"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"direction\": \"horizontal\""))
        .stdout(predicate::str::contains("\"id\": \"first\""));
}

#[test]
fn writes_output_file_with_config_and_overrides() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("layout.json5");
    fs::write(&config_path, "{ mode: 'compact', compact: { gap: 0 } }").unwrap();
    let out_path = dir.path().join("out.json");

    sflow_cmd()
        .arg("-i")
        .arg(fixture("branching.json"))
        .arg("-c")
        .arg(&config_path)
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success();

    let layers: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    // two nodes of width 220 touching: centers at -110 and 110
    assert_eq!(layers[1]["nodes"][0]["position_x"], 290.0);
    assert_eq!(layers[1]["nodes"][1]["position_x"], 510.0);
}

#[test]
fn empty_graph_is_echoed_with_a_warning() {
    sflow_cmd()
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"))
        .stderr(predicate::str::contains("nothing to arrange"));
}

#[test]
fn invalid_gap_fails() {
    sflow_cmd()
        .arg("-i")
        .arg(fixture("branching.json"))
        .arg("--gapY=inf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid layout config"));
}

#[test]
fn malformed_input_fails() {
    sflow_cmd()
        .write_stdin("{ \"nodes\": 3 }")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error:"));
}
