use octilinearizer::testing::single_edge;
use octilinearizer::prelude::Point;
use std::io::Write;
use std::process::{Command, Stdio};

fn octi() -> Command {
    Command::new(env!("CARGO_BIN_EXE_octi"))
}

/// Serialize a small two-stop network the same way the library itself would,
/// rather than hand-authoring JSON against petgraph's internal wire format.
fn sample_network() -> String {
    let tg = single_edge(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    tg.to_json_string().unwrap()
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("octi_cli_test_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_help() {
    let output = octi().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("octilinear"));
}

#[test]
fn test_inspect_reports_node_and_edge_counts() {
    let path = temp_path("inspect");
    std::fs::write(&path, sample_network()).unwrap();

    let output = octi().args(["inspect"]).arg(&path).output().unwrap();

    std::fs::remove_file(&path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Nodes: 2"));
    assert!(stdout.contains("Edges: 1"));
}

#[test]
fn test_inspect_reads_from_stdin() {
    let mut child = octi()
        .args(["inspect", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(sample_network().as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Nodes: 2"));
}

#[test]
fn test_draw_produces_an_octilinear_graph() {
    let path = temp_path("draw");
    std::fs::write(&path, sample_network()).unwrap();

    let output = octi()
        .args(["draw"])
        .arg(&path)
        .args(["--grid-size", "5"])
        .output()
        .unwrap();

    std::fs::remove_file(&path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Nodes: 2"));
    assert!(stdout.contains("Edges: 1"));
}

#[test]
fn test_draw_can_save_to_a_file() {
    let input_path = temp_path("draw_save_in");
    let output_path = temp_path("draw_save_out");
    std::fs::write(&input_path, sample_network()).unwrap();

    let status = octi()
        .args(["draw"])
        .arg(&input_path)
        .args(["--grid-size", "5"])
        .args(["-o"])
        .arg(&output_path)
        .status()
        .unwrap();

    std::fs::remove_file(&input_path).ok();
    assert!(status.success());
    let saved = std::fs::read_to_string(&output_path).unwrap();
    std::fs::remove_file(&output_path).ok();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert!(json.get("inner").is_some());
}

#[test]
fn test_draw_rejects_a_non_positive_grid_size() {
    let path = temp_path("draw_bad");
    std::fs::write(&path, sample_network()).unwrap();

    let output = octi()
        .args(["draw"])
        .arg(&path)
        .args(["--grid-size", "0"])
        .output()
        .unwrap();

    std::fs::remove_file(&path).ok();
    assert!(!output.status.success());
}
