use assert_cmd::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::process::Command;

fn cli() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo_bin!("planar-cli"))
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn analyzes_a_triangle_from_a_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("triangle.json");
    fs::write(&input, r#"[["a", "b"], ["b", "c"], ["c", "a"]]"#).expect("write input");

    let output = Command::new(assert_cmd::cargo_bin!("planar-cli"))
        .arg(input.to_string_lossy().as_ref())
        .assert()
        .success()
        .get_output()
        .clone();

    let value = stdout_json(&output);
    assert_eq!(value["is_planar"], json!(true));
    assert_eq!(value["euler"]["face_count"], json!(2));
    assert_eq!(value["euler"]["component_count"], json!(1));
    assert_eq!(value["layout"].as_array().map(Vec::len), Some(3));
}

#[test]
fn check_reads_stdin_and_omits_layout() {
    let output = cli()
        .arg("check")
        .write_stdin(
            r#"[[1,2],[1,3],[1,4],[1,5],[2,3],[2,4],[2,5],[3,4],[3,5],[4,5]]"#,
        )
        .assert()
        .success()
        .get_output()
        .clone();

    let value = stdout_json(&output);
    assert_eq!(value["is_planar"], json!(false));
    assert_eq!(value["euler"]["face_count"], json!(null));
    assert!(value.get("layout").is_none());
}

#[test]
fn layout_prints_positions_only() {
    let output = cli()
        .args(["layout", "--seed", "3", "-"])
        .write_stdin(r#"{"edges": [{"source": "x", "target": "y"}], "nodes": ["z"]}"#)
        .assert()
        .success()
        .get_output()
        .clone();

    let value = stdout_json(&output);
    let positions = value.as_array().expect("array of positions");
    let ids: Vec<&Value> = positions.iter().map(|p| &p["id"]).collect();
    assert_eq!(ids, vec![&json!("x"), &json!("y"), &json!("z")]);
}

#[test]
fn same_seed_same_output() {
    let input = r#"[["a","b"],["b","c"],["c","d"],["d","a"],["a","c"]]"#;
    let run = || {
        cli()
            .args(["layout", "--seed", "11"])
            .write_stdin(input)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn config_file_is_overridden_by_flags() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("options.json");
    fs::write(&config, r#"{"compute_layout": false, "layout": {"scale": 4.0}}"#)
        .expect("write config");

    let output = cli()
        .args(["analyze", "--config", config.to_string_lossy().as_ref()])
        .write_stdin(r#"[["a","b"]]"#)
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(stdout_json(&output)["layout"], json!(null));

    let output = cli()
        .args(["layout", "--config", config.to_string_lossy().as_ref()])
        .write_stdin(r#"[["a","b"]]"#)
        .assert()
        .success()
        .get_output()
        .clone();
    let positions = stdout_json(&output);
    let max = positions
        .as_array()
        .expect("positions")
        .iter()
        .flat_map(|p| [p["x"].as_f64(), p["y"].as_f64()])
        .flatten()
        .fold(0.0f64, |m, c| m.max(c.abs()));
    assert!((max - 4.0).abs() < 1e-9);
}

#[test]
fn invalid_input_exits_with_one() {
    let output = cli()
        .write_stdin(r#"[["a", "a"]]"#)
        .assert()
        .code(1)
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("self_loop_rejected"), "{stderr}");

    let output = cli()
        .write_stdin("not json")
        .assert()
        .code(1)
        .get_output()
        .clone();
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed_input"));
}

#[test]
fn usage_errors_exit_with_two() {
    cli().arg("--bogus").assert().code(2);
    cli().args(["--seed", "nope"]).assert().code(2);
}
