use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn osm2edges() -> Command {
    Command::new(env!("CARGO_BIN_EXE_osm2edges"))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn test_pbf_to_stdout() {
    let output = osm2edges()
        .arg(fixture("roads.osm.pbf"))
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "0 1 111196\n1 2 111196\n"
    );
}

#[test]
fn test_output_file_and_stats_report() {
    let dir = tempdir().unwrap();
    let edges = dir.path().join("edges.txt");
    let stats = dir.path().join("stats.json");

    let output = osm2edges()
        .arg(fixture("roads.osm.pbf"))
        .arg("--directed")
        .arg("--metric")
        .arg("geodesic")
        .arg("-o")
        .arg(&edges)
        .arg("--stats")
        .arg(&stats)
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(&edges).unwrap();
    assert_eq!(written.lines().count(), 4);
    assert!(written.lines().all(|line| line.ends_with(" 111320")));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&stats).unwrap()).unwrap();
    assert_eq!(json["nodes"], 3);
    assert_eq!(json["edges"], 4);
    assert_eq!(json["ways"], 1);
    assert_eq!(json["directed"], true);
    assert_eq!(json["min_weight"], 111_320);
    assert_eq!(json["max_weight"], 111_320);
}

#[test]
fn test_missing_input_exits_with_error() {
    let dir = tempdir().unwrap();
    let output = osm2edges()
        .arg(dir.path().join("missing.osm"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: "), "{}", stderr);
}
