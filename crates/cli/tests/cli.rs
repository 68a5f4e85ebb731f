//! End-to-end tests of the `treeviz` binary.

use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn treeviz(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_treeviz"))
        .args(args)
        .env("TREEVIZ_LOG", "off")
        .output()
        .expect("failed to run treeviz")
}

#[test]
fn demo_writes_svg() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("binary_tree_test.svg");

    let output = treeviz(&["demo", "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("right.right"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("7 nodes"));
}

#[test]
fn render_reads_json_tree() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tree.json");
    let out = dir.path().join("tree.dot");
    fs::write(&input, r#"{"value": 8, "left": {"value": 3}, "right": {"value": 10}}"#).unwrap();

    let output = treeviz(&[
        "render",
        input.to_str().unwrap(),
        "-f",
        "dot",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let dot = fs::read_to_string(&out).unwrap();
    assert!(dot.contains(r#"n0 [label="8""#));
    assert!(dot.contains("n0 -> n1;"));
    assert!(dot.contains("n0 -> n2;"));
}

#[test]
fn unsupported_format_exits_with_render_stage() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tree.xyz");

    let output = treeviz(&["demo", "-f", "xyz", "-o", out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("render stage failed"), "{stderr}");
    assert!(stderr.contains("xyz"), "{stderr}");
}

#[test]
fn inspect_prints_description() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tree.json");
    fs::write(&input, r#"{"value": "only"}"#).unwrap();

    let output = treeviz(&["inspect", input.to_str().unwrap()]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "G");
    assert_eq!(json["nodes"][0]["label"], "only");
    assert_eq!(json["edges"].as_array().unwrap().len(), 0);
}

#[test]
fn missing_input_file_fails() {
    let output = treeviz(&["inspect", "/nonexistent/treeviz/tree.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read"));
}
